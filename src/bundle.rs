use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::AppError;

/// Key holding the user-facing application name
pub const DISPLAY_NAME_KEY: &str = "CFBundleDisplayName";

/// Unlocalized metadata file at the bundle root
pub const INFO_FILENAME: &str = "Info.json";

/// Localized metadata file inside `<locale>.lproj/`
pub const LOCALIZED_INFO_FILENAME: &str = "InfoPlist.json";

/// A flat key/value view of packaged application metadata.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct InfoDictionary(HashMap<String, Value>);

impl InfoDictionary {
    /// Get a string value by key. `None` if the key is missing or not a string.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        self.get(DISPLAY_NAME_KEY)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InfoDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }
}

/// Read access to the host application's metadata. The metadata is owned by
/// the host, never by the configuration that reads it.
pub trait BundleInfo {
    /// Metadata for the active locale, if the bundle ships any
    fn localized_info(&self) -> Option<&InfoDictionary>;

    /// Metadata that applies regardless of locale
    fn info(&self) -> Option<&InfoDictionary>;
}

/// An application bundle laid out on disk.
///
/// ```text
/// <root>/Info.json
/// <root>/<locale>.lproj/InfoPlist.json
/// ```
#[derive(Debug, Clone)]
pub struct Bundle {
    root: PathBuf,
    info: Option<InfoDictionary>,
    localized_info: Option<InfoDictionary>,
}

impl Bundle {
    /// Load the bundle rooted at `root`. Missing metadata files leave the
    /// corresponding dictionary empty; malformed ones are an error.
    ///
    /// For a `locale` such as `fr_CA`, `fr_CA.lproj` is tried before `fr.lproj`.
    pub fn load(root: impl Into<PathBuf>, locale: Option<&str>) -> Result<Self, AppError> {
        let root = root.into();
        info!("Loading bundle metadata from {}", root.display());

        let info = read_dictionary(&root.join(INFO_FILENAME))?;
        let localized_info = match locale {
            Some(locale) => read_localized_dictionary(&root, locale)?,
            None => None,
        };

        Ok(Self {
            root,
            info,
            localized_info,
        })
    }

    pub fn from_parts(
        root: impl Into<PathBuf>,
        info: Option<InfoDictionary>,
        localized_info: Option<InfoDictionary>,
    ) -> Self {
        Self {
            root: root.into(),
            info,
            localized_info,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a named resource inside the bundle. Existence is not checked.
    /// `name` is expected to be relative; `AppConfig` rejects anything else.
    pub fn resource_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl BundleInfo for Bundle {
    fn localized_info(&self) -> Option<&InfoDictionary> {
        self.localized_info.as_ref()
    }

    fn info(&self) -> Option<&InfoDictionary> {
        self.info.as_ref()
    }
}

/// `fr_CA` -> `["fr_CA", "fr"]`
fn locale_candidates(locale: &str) -> Vec<&str> {
    match locale.split(['_', '-']).next() {
        Some(language) if !language.is_empty() && language != locale => vec![locale, language],
        _ => vec![locale],
    }
}

fn read_localized_dictionary(
    root: &Path,
    locale: &str,
) -> Result<Option<InfoDictionary>, AppError> {
    for candidate in locale_candidates(locale) {
        let path = root
            .join(format!("{candidate}.lproj"))
            .join(LOCALIZED_INFO_FILENAME);
        if let Some(dictionary) = read_dictionary(&path)? {
            return Ok(Some(dictionary));
        }
    }

    Ok(None)
}

fn read_dictionary(path: &Path) -> Result<Option<InfoDictionary>, AppError> {
    match fs::read(path) {
        Ok(bytes) => {
            debug!("Read {} bytes from {}", bytes.len(), path.display());
            Ok(Some(serde_json::from_slice(&bytes)?))
        }
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("No metadata at {}", path.display());
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

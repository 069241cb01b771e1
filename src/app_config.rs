use std::{
    env,
    path::{Component, Path, PathBuf},
};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    app_name::{self, OAUTH_NAME_SOURCES},
    bundle::{Bundle, BundleInfo},
    endpoint,
    error::AppError,
};

/// Resource holding the object mapping definitions
pub const DEFAULT_MAPPING_DEFINITIONS_FILENAME: &str = "Mappings.plist";

/// Trello API base url
pub const DEFAULT_API_BASE_URL: &str = "https://api.trello.com/1/";

/// Prefix for environment overrides, e.g. `TRELLO_API_BASE_URL`
pub const ENV_PREFIX: &str = "TRELLO_";

/// Consulted in order when no locale is configured; the first non-empty one wins
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Immutable client configuration. Built once at startup and handed to
/// whatever needs it by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    mapping_definitions_filename: String,
    api_base_url: String,
    bundle_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locale: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mapping_definitions_filename: DEFAULT_MAPPING_DEFINITIONS_FILENAME.into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            bundle_path: PathBuf::from("."),
            locale: None,
        }
    }
}

impl AppConfig {
    /// Defaults, then `Config.toml`, then `Config-dev.toml`, then `TRELLO_*`
    /// environment variables. Both files are optional.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file("Config.toml"))
            .merge(Toml::file("Config-dev.toml"))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn build() -> Result<Self, AppError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self, AppError> {
        let config: Self = figment.extract()?;
        endpoint::parse_base_url(&config.api_base_url)?;
        validate_mapping_filename(&config.mapping_definitions_filename)?;

        info!(
            "Loaded configuration: api_base_url={}, mapping_definitions_filename={}",
            config.api_base_url, config.mapping_definitions_filename
        );

        Ok(config)
    }

    pub fn mapping_definitions_filename(&self) -> &str {
        &self.mapping_definitions_filename
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    /// The configured locale, if any. See [`AppConfig::effective_locale`].
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// The configured locale, else the user's locale from the environment
    pub fn effective_locale(&self) -> Option<String> {
        self.locale.clone().or_else(system_locale)
    }

    /// The name presented during OAuth: the localized display name, else the
    /// unlocalized one, else `None`. Recomputed from `bundle` on every call.
    pub fn oauth_app_name<B: BundleInfo + ?Sized>(&self, bundle: &B) -> Option<String> {
        app_name::resolve(bundle, &OAUTH_NAME_SOURCES)
    }

    /// Same as [`AppConfig::oauth_app_name`], for callers that cannot proceed without a name.
    pub fn require_oauth_app_name<B: BundleInfo + ?Sized>(
        &self,
        bundle: &B,
    ) -> Result<String, AppError> {
        self.oauth_app_name(bundle).ok_or(AppError::MissingAppName)
    }

    pub fn load_bundle(&self) -> Result<Bundle, AppError> {
        let locale = self.effective_locale();
        debug!("Using locale {locale:?}");
        Bundle::load(&self.bundle_path, locale.as_deref())
    }

    /// Build a request url below the API base
    pub fn api_url(&self, path: &str) -> Result<Url, AppError> {
        endpoint::api_url(&self.api_base_url, path)
    }
}

/// The user's locale from `LC_ALL`, `LC_MESSAGES` or `LANG`
pub fn system_locale() -> Option<String> {
    let value = LOCALE_ENV_VARS
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.is_empty())?;

    parse_locale(&value)
}

/// `en_US.UTF-8` -> `en_US`. `C` and `POSIX` carry no language.
fn parse_locale(value: &str) -> Option<String> {
    let locale = value.split(['.', '@']).next().unwrap_or_default();

    match locale {
        "" | "C" | "POSIX" => None,
        locale => Some(locale.to_string()),
    }
}

/// The mapping resource must stay inside the bundle
fn validate_mapping_filename(name: &str) -> Result<(), AppError> {
    let invalid = |reason: &str| AppError::InvalidMappingFilename {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let mut components = Path::new(name).components().peekable();
    if components.peek().is_none() {
        return Err(invalid("must not be empty"));
    }
    if !components.all(|c| matches!(c, Component::Normal(_) | Component::CurDir)) {
        return Err(invalid("must be a relative path inside the bundle"));
    }

    Ok(())
}

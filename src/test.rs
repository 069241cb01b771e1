//! # test
//! Holds utility functions that are beneficial for testing

use std::{fs, path::Path};

use crate::bundle::{Bundle, InfoDictionary, DISPLAY_NAME_KEY, INFO_FILENAME, LOCALIZED_INFO_FILENAME};

/// Constructs an in-memory [`Bundle`] with the given display names
///
/// `None` leaves out the whole dictionary for that tier.
/// # Examples
/// ```rs
/// let bundle = make_bundle(None, Some("Trello"));
/// assert_eq!(Some("Trello".into()), AppConfig::default().oauth_app_name(&bundle))
/// ```
pub(crate) fn make_bundle(localized: Option<&str>, unlocalized: Option<&str>) -> Bundle {
    let dictionary =
        |name: &str| -> InfoDictionary { [(DISPLAY_NAME_KEY, name)].into_iter().collect() };

    Bundle::from_parts(".", unlocalized.map(dictionary), localized.map(dictionary))
}

/// Writes `Info.json` and, optionally, `<locale>.lproj/InfoPlist.json` under `root`
pub(crate) fn write_bundle(root: &Path, info: Option<&str>, localized: Option<(&str, &str)>) {
    if let Some(info) = info {
        fs::write(root.join(INFO_FILENAME), info).unwrap();
    }

    if let Some((locale, contents)) = localized {
        let dir = root.join(format!("{locale}.lproj"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(LOCALIZED_INFO_FILENAME), contents).unwrap();
    }
}

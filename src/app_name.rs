//! Resolution of the application name shown during OAuth consent.

use tracing::debug;

use crate::bundle::{BundleInfo, InfoDictionary};

/// A single place the display name may come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    Localized,
    Unlocalized,
}

/// Lookup order for the OAuth display name. Nothing comes after the unlocalized name.
pub const OAUTH_NAME_SOURCES: [NameSource; 2] = [NameSource::Localized, NameSource::Unlocalized];

impl NameSource {
    fn dictionary<'a, B: BundleInfo + ?Sized>(self, bundle: &'a B) -> Option<&'a InfoDictionary> {
        match self {
            Self::Localized => bundle.localized_info(),
            Self::Unlocalized => bundle.info(),
        }
    }

    /// The display name from this source, treating empty values as absent
    pub fn lookup<B: BundleInfo + ?Sized>(self, bundle: &B) -> Option<String> {
        self.dictionary(bundle)
            .and_then(InfoDictionary::display_name)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
    }
}

/// Return the first non-empty name yielded by `sources`, in order.
pub fn resolve<B: BundleInfo + ?Sized>(bundle: &B, sources: &[NameSource]) -> Option<String> {
    sources.iter().find_map(|&source| {
        let name = source.lookup(bundle);
        debug!("Display name from {source:?}: {name:?}");
        name
    })
}

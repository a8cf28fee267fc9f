//! Scalar UI preferences persisted as bare JSON primitives.
//!
//! # Responsibility
//! - Load and persist the theme flag and locale string, one key each.
//!
//! # Invariants
//! - An absent or unreadable value falls back to its default; preference
//!   load never fails on bad data, only on store transport errors.

use crate::repo::collection_repo::RepoResult;
use crate::store::Store;
use log::warn;

/// Storage key for the dark-mode flag (JSON-encoded bool, e.g. `true`).
pub const DARK_MODE_KEY: &str = "gradebook.pref.dark_mode";
/// Storage key for the locale tag (JSON-encoded string, e.g. `"en"`).
pub const LOCALE_KEY: &str = "gradebook.pref.locale";

const DEFAULT_LOCALE: &str = "en";

/// Host UI preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
    pub locale: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl Preferences {
    /// Loads both preference keys, substituting defaults for absent or
    /// unreadable values.
    pub fn load<S: Store>(store: &S) -> RepoResult<Self> {
        let defaults = Self::default();

        let dark_mode = match store.get(DARK_MODE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(
                    "event=pref_load module=service status=recovered key={DARK_MODE_KEY} error={err}"
                );
                defaults.dark_mode
            }),
            None => defaults.dark_mode,
        };

        let locale = match store.get(LOCALE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(
                    "event=pref_load module=service status=recovered key={LOCALE_KEY} error={err}"
                );
                defaults.locale.clone()
            }),
            None => defaults.locale.clone(),
        };

        Ok(Self { dark_mode, locale })
    }

    /// Persists the dark-mode flag under its own key.
    pub fn save_dark_mode<S: Store>(store: &mut S, value: bool) -> RepoResult<()> {
        let raw = serde_json::to_string(&value)?;
        store.set(DARK_MODE_KEY, &raw)?;
        Ok(())
    }

    /// Persists the locale tag under its own key.
    pub fn save_locale<S: Store>(store: &mut S, value: &str) -> RepoResult<()> {
        let raw = serde_json::to_string(value)?;
        store.set(LOCALE_KEY, &raw)?;
        Ok(())
    }
}

//! Board configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::export::{ArtworkResolver, ExportConfig};
use crate::scoring::LabelLocale;

/// Settings for a board session.
///
/// ## Usage
///
/// ```
/// use cardset_board::config::BoardConfig;
/// use cardset_board::scoring::LabelLocale;
///
/// let config = BoardConfig::default()
///     .with_locale(LabelLocale::Chinese)
///     .with_artwork_base("https://cdn.example.com/cards")
///     .with_catalog_timeout_ms(5_000);
///
/// assert_eq!(config.catalog_timeout_ms, Some(5_000));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Prefix for title-derived artwork references.
    pub artwork_base: Option<String>,

    /// Language of the score summary.
    pub locale: LabelLocale,

    /// Catalog fetch timeout. `None` waits indefinitely.
    pub catalog_timeout_ms: Option<u64>,

    pub export: ExportConfig,
}

impl BoardConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Set artwork base (builder pattern).
    #[must_use]
    pub fn with_artwork_base(mut self, base: impl Into<String>) -> Self {
        self.artwork_base = Some(base.into());
        self
    }

    /// Set locale (builder pattern).
    #[must_use]
    pub fn with_locale(mut self, locale: LabelLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Set catalog timeout (builder pattern).
    #[must_use]
    pub fn with_catalog_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.catalog_timeout_ms = Some(timeout_ms);
        self
    }

    /// Set export settings (builder pattern).
    #[must_use]
    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    #[must_use]
    pub fn artwork_resolver(&self) -> ArtworkResolver {
        ArtworkResolver::new(self.artwork_base.clone())
    }
}

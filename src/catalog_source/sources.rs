//! Catalog sources: file, HTTP and in-memory.

use std::path::PathBuf;

use async_trait::async_trait;

use super::{parse_records, CatalogSource};
use crate::cards::CardDefinition;
use crate::error::CatalogError;

/// A JSON catalog on disk.
#[derive(Clone, Debug)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for JsonFileCatalog {
    async fn fetch(&self) -> Result<Vec<CardDefinition>, CatalogError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        parse_records(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// The catalog service's `/cards` listing.
#[derive(Clone, Debug)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// A listing under `base_url`, fetched with a shared client.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("{}/cards", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn fetch(&self) -> Result<Vec<CardDefinition>, CatalogError> {
        let text = self
            .client
            .get(self.url())
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_records(&text)
    }

    fn describe(&self) -> String {
        self.url()
    }
}

/// A fixed list of definitions.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    cards: Vec<CardDefinition>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new(cards: Vec<CardDefinition>) -> Self {
        Self { cards }
    }

    /// The built-in 12-card set.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(crate::cards::builtin_definitions())
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    async fn fetch(&self) -> Result<Vec<CardDefinition>, CatalogError> {
        Ok(self.cards.clone())
    }

    fn describe(&self) -> String {
        "static catalog".to_string()
    }
}

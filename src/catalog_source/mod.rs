//! Where the card catalog comes from.
//!
//! The catalog is fetched once per session. A failed or empty fetch is not
//! fatal: the board runs with an empty catalog and the error is kept for
//! the user to see. There is no retry.
//!
//! ## Key Types
//!
//! - `CatalogSource`: async fetch of an ordered definition list
//! - `JsonFileCatalog`, `HttpCatalog`, `StaticCatalog`: implementations
//! - `CatalogLoad`: the catalog to use plus the error, if any

pub mod sources;

pub use sources::{HttpCatalog, JsonFileCatalog, StaticCatalog};

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::cards::{CardCatalog, CardDefinition};
use crate::error::CatalogError;

/// An external catalog provider.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch definitions in display order.
    async fn fetch(&self) -> Result<Vec<CardDefinition>, CatalogError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// Result of a catalog load. Always usable.
#[derive(Debug, Default)]
pub struct CatalogLoad {
    pub catalog: CardCatalog,
    /// Set when the fetch failed or returned nothing; show it to the user.
    pub error: Option<CatalogError>,
}

impl CatalogLoad {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Fetch and index a catalog. Never fails; see `CatalogLoad`.
pub async fn load(source: &dyn CatalogSource, timeout_ms: Option<u64>) -> CatalogLoad {
    let fetched = match timeout_ms {
        None => source.fetch().await,
        Some(ms) => tokio::time::timeout(Duration::from_millis(ms), source.fetch())
            .await
            .unwrap_or(Err(CatalogError::Timeout(ms))),
    };

    let result = fetched.and_then(|cards| {
        if cards.is_empty() {
            return Err(CatalogError::Empty);
        }
        CardCatalog::from_definitions(cards)
    });

    match result {
        Ok(catalog) => {
            tracing::info!(source = %source.describe(), cards = catalog.len(), "catalog loaded");
            CatalogLoad { catalog, error: None }
        }
        Err(err) => {
            tracing::warn!(source = %source.describe(), error = %err, "catalog unavailable, using empty catalog");
            CatalogLoad {
                catalog: CardCatalog::new(),
                error: Some(err),
            }
        }
    }
}

/// Parse a catalog listing: an array of records, or an object with a
/// `cards` array. Malformed records are skipped; order is preserved.
pub fn parse_records(text: &str) -> Result<Vec<CardDefinition>, CatalogError> {
    let document: Value = serde_json::from_str(text)?;
    let records = match &document {
        Value::Array(records) => records.as_slice(),
        Value::Object(map) => map
            .get("cards")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    };

    let cards = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match CardDefinition::deserialize(record) {
            Ok(card) => Some(card),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping malformed catalog record");
                None
            }
        })
        .collect();
    Ok(cards)
}

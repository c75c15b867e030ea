//! A board together with its catalog lifecycle.
//!
//! The catalog fetch may complete after the board it was meant for has been
//! reloaded or torn down. Each load is tagged with a `CatalogTicket`; only
//! the newest ticket of a live session may install its result.

use std::sync::Arc;

use crate::board::Board;
use crate::catalog_source::{self, CatalogLoad, CatalogSource};
use crate::config::BoardConfig;
use crate::error::{CatalogError, RecognitionError};
use crate::export::{ArtworkSource, ImageExporter};
use crate::import::{parse_response, ImportReport};

/// Identifies one catalog load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CatalogTicket(u64);

impl CatalogTicket {
    #[must_use]
    pub const fn generation(self) -> u64 {
        self.0
    }
}

/// A board session.
#[derive(Debug)]
pub struct BoardSession {
    config: BoardConfig,
    board: Board,
    generation: u64,
    torn_down: bool,
    catalog_error: Option<CatalogError>,
}

impl BoardSession {
    /// A session with an empty board. The grid is usable before any
    /// catalog arrives.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        let board = Board::empty().with_locale(config.locale);
        Self {
            config,
            board,
            generation: 0,
            torn_down: false,
            catalog_error: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The last catalog failure, for display.
    #[must_use]
    pub fn catalog_error(&self) -> Option<&CatalogError> {
        self.catalog_error.as_ref()
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Start a catalog load. Any earlier ticket becomes stale.
    pub fn begin_catalog_load(&mut self) -> CatalogTicket {
        self.generation += 1;
        CatalogTicket(self.generation)
    }

    /// Install a finished load. Returns `false` and changes nothing if the
    /// ticket is stale or the session has been torn down.
    pub fn apply_catalog(&mut self, ticket: CatalogTicket, load: CatalogLoad) -> bool {
        if self.torn_down || ticket.generation() != self.generation {
            tracing::debug!(
                ticket = ticket.generation(),
                current = self.generation,
                torn_down = self.torn_down,
                "discarding catalog load"
            );
            return false;
        }
        self.catalog_error = load.error;
        self.board.reload(Arc::new(load.catalog));
        true
    }

    /// Fetch and install a catalog in one step.
    pub async fn load_catalog(&mut self, source: &dyn CatalogSource) -> bool {
        let ticket = self.begin_catalog_load();
        let load = catalog_source::load(source, self.config.catalog_timeout_ms).await;
        self.apply_catalog(ticket, load)
    }

    /// Replace the layout from a recognition service response.
    pub fn import_response(&mut self, text: &str) -> Result<ImportReport, RecognitionError> {
        let items = parse_response(text)?;
        Ok(self.board.import_layout(&items))
    }

    /// An exporter using this session's export settings and artwork base.
    pub fn exporter(&self, source: Arc<dyn ArtworkSource>) -> ImageExporter {
        ImageExporter::new(self.config.export.clone(), source, self.config.artwork_resolver())
    }

    /// Stop accepting catalog results.
    pub fn teardown(&mut self) {
        self.torn_down = true;
    }
}

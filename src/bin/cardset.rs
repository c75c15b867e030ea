//! Command-line front end for the card placement board.
//!
//! Loads a catalog, applies an imported layout and manual operations, then
//! prints the score summary and optionally writes a PNG.

use std::path::PathBuf;
use std::sync::Arc;

use ab_glyph::FontArc;
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardset_board::{
    ArtworkSource, BoardConfig, BoardSession, CardId, CardSide, CatalogSource, FsArtworkSource,
    HttpArtworkSource, HttpCatalog, JsonFileCatalog, LabelLocale, StaticCatalog, SLOT_COUNT,
};

#[derive(Parser)]
#[command(name = "cardset", version, about = "Lay out, score and export a 12-slot card set")]
struct Cli {
    /// Board settings (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog file (JSON); the built-in set is used otherwise
    #[arg(long, conflicts_with = "catalog_url")]
    catalog: Option<PathBuf>,

    /// Catalog service base URL; `/cards` is appended
    #[arg(long)]
    catalog_url: Option<String>,

    /// Recognition response to import (JSON, optionally fenced)
    #[arg(long)]
    import: Option<PathBuf>,

    /// Place a card in the first empty slot: `card_01` or `card_01:back`
    #[arg(long, value_parser = parse_placement)]
    place: Vec<(CardId, CardSide)>,

    /// Swap two positions, 1-based: `1,12`
    #[arg(long, value_parser = parse_swap)]
    swap: Vec<(usize, usize)>,

    /// Flip the card at a 1-based position
    #[arg(long, value_parser = parse_position)]
    flip: Vec<usize>,

    /// Score labels in Chinese
    #[arg(long)]
    chinese: bool,

    /// Print the board summary as JSON
    #[arg(long)]
    json: bool,

    /// Write the board image to this PNG file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Directory holding artwork named by card title
    #[arg(long)]
    artwork_root: Option<PathBuf>,

    /// Font for text in the exported image (TTF/OTF)
    #[arg(long)]
    font: Option<PathBuf>,
}

fn parse_position(text: &str) -> Result<usize, String> {
    match text.trim().parse::<usize>() {
        Ok(n) if (1..=SLOT_COUNT).contains(&n) => Ok(n - 1),
        _ => Err(format!("expected a position between 1 and {SLOT_COUNT}")),
    }
}

fn parse_swap(text: &str) -> Result<(usize, usize), String> {
    let (a, b) = text.split_once(',').ok_or("expected two positions, e.g. 1,12")?;
    Ok((parse_position(a)?, parse_position(b)?))
}

fn parse_placement(text: &str) -> Result<(CardId, CardSide), String> {
    let (id, side) = match text.split_once(':') {
        None => (text, CardSide::Front),
        Some((id, "front")) => (id, CardSide::Front),
        Some((id, "back")) => (id, CardSide::Back),
        Some((_, other)) => return Err(format!("unknown side {other:?}, expected front or back")),
    };
    if id.trim().is_empty() {
        return Err("card id is empty".to_string());
    }
    Ok((CardId::new(id.trim()), side))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BoardConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => BoardConfig::default(),
    };
    if cli.chinese {
        config.locale = LabelLocale::Chinese;
    }
    if cli.artwork_root.is_some() && config.artwork_base.is_none() {
        // Title-derived references become paths under the artwork root.
        config.artwork_base = Some(String::new());
    }

    let client = reqwest::Client::new();
    let mut session = BoardSession::new(config);
    let source: Box<dyn CatalogSource> = match (&cli.catalog, &cli.catalog_url) {
        (Some(path), _) => Box::new(JsonFileCatalog::new(path)),
        (None, Some(url)) => Box::new(HttpCatalog::new(client.clone(), url.as_str())),
        (None, None) => Box::new(StaticCatalog::builtin()),
    };
    session.load_catalog(source.as_ref()).await;
    if let Some(err) = session.catalog_error() {
        eprintln!("catalog unavailable: {err}");
    }

    if let Some(path) = &cli.import {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let report = session
            .import_response(&text)
            .with_context(|| format!("failed to import {}", path.display()))?;
        for skipped in report.capacity_failures() {
            eprintln!(
                "no room for {}",
                skipped.label.as_deref().unwrap_or("unnamed card")
            );
        }
    }

    let board = session.board_mut();
    for (card_id, side) in &cli.place {
        if let Err(err) = board.place_card(card_id, *side) {
            eprintln!("cannot place {card_id}: {err}");
        }
    }
    for &(i, j) in &cli.swap {
        board.swap_slots(i, j);
    }
    for &index in &cli.flip {
        board.flip_slot(index);
    }

    let summary = board.summary();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.score_text);
        for line in summary.layout_lines() {
            println!("{line}");
        }
    }

    if let Some(path) = &cli.export {
        let artwork: Arc<dyn ArtworkSource> = match &cli.artwork_root {
            Some(root) => Arc::new(FsArtworkSource::new(root)),
            None => Arc::new(HttpArtworkSource::new(client)),
        };
        let mut exporter = session.exporter(artwork);
        if let Some(font_path) = &cli.font {
            let bytes = std::fs::read(font_path)
                .with_context(|| format!("failed to read font {}", font_path.display()))?;
            let font = FontArc::try_from_vec(bytes).context("font file is not a valid TTF/OTF font")?;
            exporter = exporter.with_font(font);
        }

        let output = exporter
            .export_board(session.board())
            .await
            .context("export failed")?;
        std::fs::write(path, &output.png)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!(
            "wrote {}x{} image to {} ({} fallback slots)",
            output.width,
            output.height,
            path.display(),
            output.fallback_count()
        );
    }

    Ok(())
}

//! Rendering the board to an image.
//!
//! ## Key Types
//!
//! - `ExportConfig`: fixed canvas geometry and palette
//! - `ArtworkSource`: async artwork loader (filesystem, HTTP, memory)
//! - `ImageExporter`: joins all artwork loads and draws the PNG
//! - `SlotRender`: what ended up in each slot

pub mod artwork;
pub mod config;
pub mod render;

pub use artwork::{
    load_with_timeout, ArtworkResolver, ArtworkSource, FsArtworkSource, HttpArtworkSource,
    MemoryArtworkSource,
};
pub use config::{Color, ExportConfig, Palette, MAX_CANVAS_SIDE};
pub use render::{ExportOutput, FallbackReason, ImageExporter, SlotRender};

//! Export geometry and palette.

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::board::slot::{COLUMNS, ROWS};
use crate::cards::CardColor;
use crate::interaction::geometry::{Point, SlotGeometry};

/// Largest canvas side the exporter will allocate.
pub const MAX_CANVAS_SIDE: u64 = 16_384;

/// An opaque RGB color, written as `#rrggbb` in configuration files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the `#` is optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    #[must_use]
    pub const fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color {value:?}, expected #rrggbb"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Colors used by the exporter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub border: Color,
    /// Empty-slot marker text.
    pub marker: Color,
    /// Caption and title text.
    pub text: Color,
    pub red: Color,
    pub blue: Color,
    pub yellow: Color,
    pub green: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0xf8, 0xfa, 0xfc),
            border: Color::rgb(0xcb, 0xd5, 0xe1),
            marker: Color::rgb(0x94, 0xa3, 0xb8),
            text: Color::rgb(0x11, 0x18, 0x27),
            red: Color::rgb(0xfe, 0xca, 0xca),
            blue: Color::rgb(0xbf, 0xdb, 0xfe),
            yellow: Color::rgb(0xfe, 0xf0, 0x8a),
            green: Color::rgb(0xbb, 0xf7, 0xd0),
        }
    }
}

impl Palette {
    /// Fallback tint for a card color.
    #[must_use]
    pub fn tint(&self, color: CardColor) -> Color {
        match color {
            CardColor::Red => self.red,
            CardColor::Blue => self.blue,
            CardColor::Yellow => self.yellow,
            CardColor::Green => self.green,
        }
    }
}

/// Fixed geometry of an exported board image.
///
/// Canvas size is `4w + 2p + 3g` by `3h + 2p + 2g + caption_height`; the
/// grid starts `caption_offset` below the top padding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub slot_width: u32,
    pub slot_height: u32,
    pub padding: u32,
    pub gutter: u32,
    pub caption_height: u32,
    pub caption_offset: u32,

    /// Caption drawn above the grid.
    pub caption: String,
    pub caption_size: f32,

    /// Text centered in empty slots.
    pub empty_marker: String,
    pub marker_size: f32,

    pub title_size: f32,
    pub palette: Palette,

    /// Dash and gap length of empty-slot borders.
    pub dash: u32,
    pub border_width: u32,

    /// Per-artwork load timeout. `None` waits indefinitely.
    pub artwork_timeout_ms: Option<u64>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            slot_width: 240,
            slot_height: 300,
            padding: 20,
            gutter: 14,
            caption_height: 50,
            caption_offset: 24,
            caption: "卡组摆放".to_string(),
            caption_size: 18.0,
            empty_marker: "空位".to_string(),
            marker_size: 14.0,
            title_size: 16.0,
            palette: Palette::default(),
            dash: 8,
            border_width: 2,
            artwork_timeout_ms: None,
        }
    }
}

impl ExportConfig {
    /// Set slot dimensions (builder pattern).
    #[must_use]
    pub fn with_slot_size(mut self, width: u32, height: u32) -> Self {
        self.slot_width = width;
        self.slot_height = height;
        self
    }

    /// Set padding and gutter (builder pattern).
    #[must_use]
    pub fn with_spacing(mut self, padding: u32, gutter: u32) -> Self {
        self.padding = padding;
        self.gutter = gutter;
        self
    }

    /// Set caption text (builder pattern).
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    /// Set empty-slot marker text (builder pattern).
    #[must_use]
    pub fn with_empty_marker(mut self, marker: impl Into<String>) -> Self {
        self.empty_marker = marker.into();
        self
    }

    /// Set palette (builder pattern).
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set artwork load timeout (builder pattern).
    #[must_use]
    pub fn with_artwork_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.artwork_timeout_ms = Some(timeout_ms);
        self
    }

    /// Canvas `(width, height)`. Computed wide so oversized settings are
    /// reported rather than overflowing.
    #[must_use]
    pub fn canvas_size(&self) -> (u64, u64) {
        let cols = COLUMNS as u64;
        let rows = ROWS as u64;
        let padding = 2 * u64::from(self.padding);
        let width = cols * u64::from(self.slot_width) + padding + (cols - 1) * u64::from(self.gutter);
        let height = rows * u64::from(self.slot_height)
            + padding
            + (rows - 1) * u64::from(self.gutter)
            + u64::from(self.caption_height);
        (width, height)
    }

    /// Top-left corner of the grid.
    #[must_use]
    pub fn grid_origin(&self) -> (u32, u32) {
        (self.padding, self.padding.saturating_add(self.caption_offset))
    }

    /// Slot rectangles on the exported canvas.
    #[must_use]
    pub fn slot_geometry(&self) -> SlotGeometry {
        let (x, y) = self.grid_origin();
        SlotGeometry::grid(
            Point::new(x as f32, y as f32),
            self.slot_width as f32,
            self.slot_height as f32,
            self.gutter as f32,
        )
    }
}

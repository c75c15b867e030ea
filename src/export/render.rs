//! Rendering a layout to a PNG.
//!
//! All artwork loads are started together and joined before drawing; a
//! failed load only downgrades its own slot to a tinted rectangle.

use std::sync::Arc;

use ab_glyph::{FontArc, PxScale};
use futures::future::join_all;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut, text_size,
};
use imageproc::rect::Rect as PixelRect;

use super::artwork::{load_with_timeout, ArtworkResolver, ArtworkSource};
use super::config::{ExportConfig, MAX_CANVAS_SIDE};
use crate::board::slot::{SlotCard, SLOT_COUNT};
use crate::board::Board;
use crate::error::ExportError;

/// Why a filled slot was drawn as a tinted rectangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    /// The face has no artwork reference.
    NoArtwork,
    /// The artwork could not be loaded or decoded.
    LoadFailed(String),
}

/// What was drawn for one slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotRender {
    Empty,
    Artwork { reference: String },
    Fallback { title: String, reason: FallbackReason },
}

/// A finished export.
#[derive(Clone, Debug)]
pub struct ExportOutput {
    /// PNG-encoded image.
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Per-slot record, in slot order.
    pub slots: Vec<SlotRender>,
}

impl ExportOutput {
    #[must_use]
    pub fn fallback_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, SlotRender::Fallback { .. }))
            .count()
    }
}

enum Loaded {
    Empty,
    Artwork(String, DynamicImage),
    Fallback(FallbackReason),
}

/// Renders board layouts to PNG.
pub struct ImageExporter {
    config: ExportConfig,
    source: Arc<dyn ArtworkSource>,
    resolver: ArtworkResolver,
    font: Option<FontArc>,
}

impl std::fmt::Debug for ImageExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageExporter")
            .field("config", &self.config)
            .field("resolver", &self.resolver)
            .field("font", &self.font.is_some())
            .finish_non_exhaustive()
    }
}

impl ImageExporter {
    pub fn new(config: ExportConfig, source: Arc<dyn ArtworkSource>, resolver: ArtworkResolver) -> Self {
        Self {
            config,
            source,
            resolver,
            font: None,
        }
    }

    /// Font for caption, marker and title text. Without one, text is
    /// skipped but still recorded in `SlotRender`.
    #[must_use]
    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export the board's current layout.
    pub async fn export_board(&self, board: &Board) -> Result<ExportOutput, ExportError> {
        self.export(board.slots()).await
    }

    /// Export a layout. Position in the slice is the slot index; missing
    /// positions are empty and positions past the grid are ignored.
    pub async fn export(&self, slots: &[Option<SlotCard>]) -> Result<ExportOutput, ExportError> {
        let (width, height) = self.canvas_size()?;

        let cards: Vec<Option<&SlotCard>> = (0..SLOT_COUNT)
            .map(|i| slots.get(i).and_then(Option::as_ref))
            .collect();
        let loaded = join_all(cards.iter().map(|card| self.load(*card))).await;

        let mut canvas = RgbaImage::from_pixel(width, height, self.config.palette.background.to_rgba());
        self.draw_caption(&mut canvas);

        let geometry = self.config.slot_geometry();
        let mut renders = Vec::with_capacity(SLOT_COUNT);
        for (index, (card, loaded)) in cards.iter().zip(loaded).enumerate() {
            let Some(rect) = geometry.rect(index) else { continue };
            let area = PixelRect::at(rect.x as i32, rect.y as i32).of_size(self.config.slot_width, self.config.slot_height);

            self.draw_border(&mut canvas, area, card.is_none());
            let render = match (card, loaded) {
                (Some(_), Loaded::Artwork(reference, image)) => {
                    draw_artwork(&mut canvas, area, &image);
                    SlotRender::Artwork { reference }
                }
                (Some(card), Loaded::Fallback(reason)) => {
                    self.draw_fallback(&mut canvas, area, card);
                    SlotRender::Fallback {
                        title: card.face.title.clone(),
                        reason,
                    }
                }
                _ => {
                    self.draw_empty_marker(&mut canvas, area);
                    SlotRender::Empty
                }
            };
            renders.push(render);
        }

        let mut png = Vec::new();
        PngEncoder::new(&mut png).write_image(canvas.as_raw(), width, height, ExtendedColorType::Rgba8)?;

        let output = ExportOutput {
            png,
            width,
            height,
            slots: renders,
        };
        tracing::info!(
            width,
            height,
            bytes = output.png.len(),
            fallbacks = output.fallback_count(),
            "exported board image"
        );
        Ok(output)
    }

    fn canvas_size(&self) -> Result<(u32, u32), ExportError> {
        let (width, height) = self.config.canvas_size();
        let valid = |side: u64| side > 0 && side <= MAX_CANVAS_SIDE;
        let has_slots = self.config.slot_width > 0 && self.config.slot_height > 0;
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(w), Ok(h)) if has_slots && valid(width) && valid(height) => Ok((w, h)),
            _ => {
                tracing::warn!(width, height, "cannot create export canvas");
                Err(ExportError::Canvas { width, height })
            }
        }
    }

    async fn load(&self, card: Option<&SlotCard>) -> Loaded {
        let Some(card) = card else {
            return Loaded::Empty;
        };
        let Some(reference) = self.resolver.resolve(&card.face) else {
            return Loaded::Fallback(FallbackReason::NoArtwork);
        };
        match load_with_timeout(self.source.as_ref(), &reference, self.config.artwork_timeout_ms).await {
            Ok(image) if image.width() > 0 && image.height() > 0 => Loaded::Artwork(reference, image),
            Ok(_) => {
                tracing::warn!(%reference, "artwork is empty, drawing fallback");
                Loaded::Fallback(FallbackReason::LoadFailed("image has no pixels".to_string()))
            }
            Err(err) => {
                tracing::warn!(%reference, error = %err, "artwork failed to load, drawing fallback");
                Loaded::Fallback(FallbackReason::LoadFailed(err.to_string()))
            }
        }
    }

    fn draw_caption(&self, canvas: &mut RgbaImage) {
        let Some(font) = &self.font else { return };
        let size = self.config.caption_size;
        let x = self.config.padding as i32;
        let y = self.config.padding as i32 + 12 - size as i32;
        draw_text_mut(
            canvas,
            self.config.palette.text.to_rgba(),
            x,
            y.max(0),
            PxScale::from(size),
            font,
            &self.config.caption,
        );
    }

    fn draw_border(&self, canvas: &mut RgbaImage, area: PixelRect, dashed: bool) {
        let color = self.config.palette.border.to_rgba();
        for inset in 0..self.config.border_width.min(area.width() / 2).min(area.height() / 2) {
            let rect = PixelRect::at(area.left() + inset as i32, area.top() + inset as i32)
                .of_size(area.width() - 2 * inset, area.height() - 2 * inset);
            if dashed {
                draw_dashed_rect(canvas, rect, self.config.dash.max(1), color);
            } else {
                draw_hollow_rect_mut(canvas, rect, color);
            }
        }
    }

    fn draw_fallback(&self, canvas: &mut RgbaImage, area: PixelRect, card: &SlotCard) {
        draw_filled_rect_mut(canvas, area, self.config.palette.tint(card.face.color).to_rgba());
        let Some(font) = &self.font else { return };
        let size = self.config.title_size;
        draw_text_mut(
            canvas,
            self.config.palette.text.to_rgba(),
            area.left() + 12,
            area.top() + 28 - size as i32,
            PxScale::from(size),
            font,
            &card.face.title,
        );
    }

    fn draw_empty_marker(&self, canvas: &mut RgbaImage, area: PixelRect) {
        let Some(font) = &self.font else { return };
        let scale = PxScale::from(self.config.marker_size);
        let (text_width, text_height) = text_size(scale, font, &self.config.empty_marker);
        let x = area.left() + (area.width() as i32 - text_width as i32) / 2;
        let y = area.top() + (area.height() as i32 - text_height as i32) / 2;
        draw_text_mut(
            canvas,
            self.config.palette.marker.to_rgba(),
            x,
            y,
            scale,
            font,
            &self.config.empty_marker,
        );
    }
}

/// Scale uniformly to fit, centered.
fn draw_artwork(canvas: &mut RgbaImage, area: PixelRect, image: &DynamicImage) {
    let ratio = f64::min(
        f64::from(area.width()) / f64::from(image.width()),
        f64::from(area.height()) / f64::from(image.height()),
    );
    let width = ((f64::from(image.width()) * ratio).round() as u32).clamp(1, area.width());
    let height = ((f64::from(image.height()) * ratio).round() as u32).clamp(1, area.height());
    let scaled = imageops::resize(&image.to_rgba8(), width, height, FilterType::Triangle);

    let x = i64::from(area.left()) + i64::from((area.width() - width) / 2);
    let y = i64::from(area.top()) + i64::from((area.height() - height) / 2);
    imageops::overlay(canvas, &scaled, x, y);
}

fn draw_dashed_rect(canvas: &mut RgbaImage, rect: PixelRect, dash: u32, color: Rgba<u8>) {
    let (left, top) = (rect.left() as f32, rect.top() as f32);
    let (right, bottom) = (rect.right() as f32, rect.bottom() as f32);
    for (start, end) in [
        ((left, top), (right, top)),
        ((right, top), (right, bottom)),
        ((right, bottom), (left, bottom)),
        ((left, bottom), (left, top)),
    ] {
        draw_dashed_line(canvas, start, end, dash as f32, color);
    }
}

fn draw_dashed_line(canvas: &mut RgbaImage, start: (f32, f32), end: (f32, f32), dash: f32, color: Rgba<u8>) {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return;
    }
    let (ux, uy) = (dx / length, dy / length);
    let mut offset = 0.0;
    while offset < length {
        let stop = (offset + dash).min(length);
        draw_line_segment_mut(
            canvas,
            (start.0 + ux * offset, start.1 + uy * offset),
            (start.0 + ux * stop, start.1 + uy * stop),
            color,
        );
        offset += 2.0 * dash;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::slot::empty_slots;
    use crate::cards::{CardColor, CardDefinition, CardFace, CardSide};
    use crate::error::ArtworkError;
    use crate::export::artwork::MemoryArtworkSource;
    use async_trait::async_trait;

    fn exporter(source: MemoryArtworkSource) -> ImageExporter {
        ImageExporter::new(ExportConfig::default(), Arc::new(source), ArtworkResolver::default())
    }

    fn card(title: &str, color: CardColor, image: Option<&str>, slot: usize) -> SlotCard {
        let mut front = CardFace::new(title, title, 2, color);
        if let Some(image) = image {
            front = front.with_image(image);
        }
        let def = CardDefinition::new(format!("id-{slot}"), front, CardFace::new("b", "b", 1, CardColor::Blue));
        SlotCard::from_definition(&def, CardSide::Front, slot)
    }

    fn pixel(output: &ExportOutput, x: u32, y: u32) -> Rgba<u8> {
        image::load_from_memory(&output.png).unwrap().to_rgba8().get_pixel(x, y).to_owned()
    }

    #[tokio::test]
    async fn test_empty_board() {
        let output = exporter(MemoryArtworkSource::new()).export(&empty_slots()).await.unwrap();
        assert_eq!((output.width, output.height), (1042, 1018));
        assert!(output.slots.iter().all(|s| *s == SlotRender::Empty));
        assert_eq!(pixel(&output, 2, 2), Rgba([0xf8, 0xfa, 0xfc, 255]));
        // First dash of slot 0's top border.
        assert_eq!(pixel(&output, 22, 44), Rgba([0xcb, 0xd5, 0xe1, 255]));
    }

    #[tokio::test]
    async fn test_fallback_and_artwork() {
        let source = MemoryArtworkSource::new().with_image(
            "art",
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]))),
        );
        let mut slots = empty_slots();
        slots[0] = Some(card("Critical", CardColor::Yellow, None, 0));
        slots[1] = Some(card("Square", CardColor::Blue, Some("art"), 1));
        slots[2] = Some(card("Broken", CardColor::Green, Some("missing"), 2));

        let output = exporter(source).export(&slots).await.unwrap();

        assert_eq!(
            output.slots[0],
            SlotRender::Fallback { title: "Critical".into(), reason: FallbackReason::NoArtwork }
        );
        assert_eq!(output.slots[1], SlotRender::Artwork { reference: "art".into() });
        assert!(matches!(
            &output.slots[2],
            SlotRender::Fallback { title, reason: FallbackReason::LoadFailed(_) } if title == "Broken"
        ));
        assert_eq!(output.fallback_count(), 2);

        // Yellow tint in slot 0.
        assert_eq!(pixel(&output, 140, 200), Rgba([0xfe, 0xf0, 0x8a, 255]));
        // Square artwork scaled to 240x240, centered vertically in slot 1.
        let slot1_x = 20 + 254;
        assert_eq!(pixel(&output, slot1_x + 120, 44 + 150), Rgba([255, 0, 0, 255]));
        assert_eq!(pixel(&output, slot1_x + 120, 44 + 10), Rgba([0xf8, 0xfa, 0xfc, 255]));
        // Green tint in slot 2.
        assert_eq!(pixel(&output, 20 + 2 * 254 + 120, 200), Rgba([0xbb, 0xf7, 0xd0, 255]));
    }

    #[tokio::test]
    async fn test_invalid_canvas() {
        let mut config = ExportConfig::default().with_slot_size(0, 0).with_spacing(0, 0);
        config.caption_height = 0;
        let exporter = ImageExporter::new(config, Arc::new(MemoryArtworkSource::new()), ArtworkResolver::default());
        assert!(matches!(
            exporter.export(&empty_slots()).await,
            Err(ExportError::Canvas { width: 0, height: 0 })
        ));

        let huge = ExportConfig::default().with_slot_size(10_000, 300);
        let exporter = ImageExporter::new(huge, Arc::new(MemoryArtworkSource::new()), ArtworkResolver::default());
        assert!(matches!(exporter.export(&empty_slots()).await, Err(ExportError::Canvas { .. })));
    }

    struct Slow;

    #[async_trait]
    impl ArtworkSource for Slow {
        async fn load(&self, _reference: &str) -> Result<DynamicImage, ArtworkError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_artwork_timeout_falls_back() {
        let config = ExportConfig::default().with_artwork_timeout_ms(20);
        let exporter = ImageExporter::new(config, Arc::new(Slow), ArtworkResolver::default());
        let mut slots = empty_slots();
        slots[5] = Some(card("Slow", CardColor::Red, Some("x"), 5));

        let output = exporter.export(&slots).await.unwrap();
        assert_eq!(output.fallback_count(), 1);
    }
}

//! Slot geometry and hit-testing.
//!
//! Any rendering surface that can report slot rectangles in its own
//! coordinate space can drive touch gestures through `hit_test`.

use serde::{Deserialize, Serialize};

use crate::board::slot::{SlotPosition, SLOT_COUNT};

/// A pointer position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment: the left and top edges are inside, the right
    /// and bottom edges are not. Adjacent rectangles never both contain a
    /// point.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height
    }
}

/// On-screen rectangle of every slot, indexed by slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotGeometry {
    rects: [Rect; SLOT_COUNT],
}

impl SlotGeometry {
    /// Geometry from explicitly measured rectangles.
    #[must_use]
    pub const fn from_rects(rects: [Rect; SLOT_COUNT]) -> Self {
        Self { rects }
    }

    /// The regular 3×4 grid.
    #[must_use]
    pub fn grid(origin: Point, slot_width: f32, slot_height: f32, gutter: f32) -> Self {
        let rects = std::array::from_fn(|index| {
            let pos = SlotPosition::from_index(index).unwrap_or(SlotPosition { row: 0, col: 0 });
            Rect::new(
                origin.x + pos.col as f32 * (slot_width + gutter),
                origin.y + pos.row as f32 * (slot_height + gutter),
                slot_width,
                slot_height,
            )
        });
        Self { rects }
    }

    #[must_use]
    pub fn rect(&self, index: usize) -> Option<&Rect> {
        self.rects.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Rect)> {
        self.rects.iter().enumerate()
    }
}

/// Slot under a point, if any.
#[must_use]
pub fn hit_test(point: Point, geometry: &SlotGeometry) -> Option<usize> {
    geometry
        .iter()
        .find(|(_, rect)| rect.contains(point))
        .map(|(index, _)| index)
}

//! The 12-card set the board ships with.
//!
//! Used when no remote catalog is configured, and by tests.

use super::catalog::CardCatalog;
use super::definition::CardDefinition;
use super::face::{CardColor, CardFace};

use super::face::CardColor::{Blue, Green, Red, Yellow};

type FaceRow = (&'static str, &'static str, u32, CardColor);

const CARDS: [(&str, FaceRow, FaceRow); 12] = [
    ("card_01", ("悲观", "Frustrated", 3, Blue), ("乐观", "Optimistic", 1, Red)),
    (
        "card_02",
        ("他人认可最重要", "Humans are the most important", 2, Red),
        ("事情结果最重要", "Result is the most important", 2, Yellow),
    ),
    (
        "card_03",
        ("主动帮助他人", "Always trying to help others", 2, Red),
        ("静待问题过去", "Waiting for things to go away", 2, Green),
    ),
    ("card_04", ("条理", "Organized", 1, Blue), ("随意", "Random", 3, Red)),
    (
        "card_05",
        ("以他人为中心", "Others-centered", 1, Green),
        ("以自我为中心", "Self-centered", 3, Yellow),
    ),
    (
        "card_06",
        ("越挫越勇", "What doesn't kill one makes one stronger", 1, Yellow),
        ("逆来顺受", "Conservative and hold back", 3, Green),
    ),
    ("card_07", ("目标坚定", "Determined", 1, Yellow), ("缺乏主见", "Hold back", 3, Green)),
    ("card_08", ("批判性强", "Critical", 3, Yellow), ("平和宽容", "Peaceful and tolerant", 1, Green)),
    (
        "card_09",
        ("发现问题先研究", "Study first when there is a problem", 2, Blue),
        ("发现问题先解决", "Act immediately once there is a problem", 2, Yellow),
    ),
    ("card_10", ("情绪化", "Emotional", 3, Red), ("自律", "Self-discipline", 1, Blue)),
    ("card_11", ("内心保守", "Conservative", 3, Blue), ("乐于分享", "Enjoy sharing", 1, Red)),
    (
        "card_12",
        ("相安无事最重要", "Waiting for things to go away", 2, Green),
        ("坚持原则最重要", "Sticking to the principles is the most important", 2, Blue),
    ),
];

fn face((title, english, value, color): FaceRow) -> CardFace {
    CardFace::new(title, english, value, color)
}

/// Definitions of the built-in set, in display order.
#[must_use]
pub fn builtin_definitions() -> Vec<CardDefinition> {
    CARDS
        .iter()
        .map(|&(id, front, back)| CardDefinition::new(id, face(front), face(back)))
        .collect()
}

impl CardCatalog {
    /// The built-in 12-card catalog.
    #[must_use]
    pub fn builtin() -> Self {
        // Ids in CARDS are unique, so this cannot hit the duplicate check.
        Self::from_definitions(builtin_definitions()).unwrap_or_default()
    }
}

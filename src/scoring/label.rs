//! Qualitative score labels and the rendered score summary.

use serde::{Deserialize, Serialize};

use super::ColorScores;
use crate::cards::CardColor;

/// Qualitative band of a color total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreLabel {
    High,
    Medium,
    General,
}

impl ScoreLabel {
    /// Band for a total.
    ///
    /// `> 17` is high, `11..=16` is medium, everything else (including
    /// exactly 10 and exactly 17) is general.
    #[must_use]
    pub fn for_score(score: u32) -> Self {
        if score > 17 {
            Self::High
        } else if score > 10 && score < 17 {
            Self::Medium
        } else {
            Self::General
        }
    }

    #[must_use]
    pub const fn text(self, locale: LabelLocale) -> &'static str {
        match (locale, self) {
            (LabelLocale::English, Self::High) => "high",
            (LabelLocale::English, Self::Medium) => "medium",
            (LabelLocale::English, Self::General) => "general",
            (LabelLocale::Chinese, Self::High) => "超级",
            (LabelLocale::Chinese, Self::Medium) => "明显",
            (LabelLocale::Chinese, Self::General) => "一般",
        }
    }
}

/// Language of rendered labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelLocale {
    #[default]
    English,
    Chinese,
}

impl LabelLocale {
    fn color_name(self, color: CardColor) -> &'static str {
        match (self, color) {
            (Self::English, c) => c.as_str(),
            (Self::Chinese, CardColor::Red) => "红",
            (Self::Chinese, CardColor::Blue) => "蓝",
            (Self::Chinese, CardColor::Yellow) => "黄",
            (Self::Chinese, CardColor::Green) => "绿",
        }
    }
}

/// Render all four totals with their labels.
///
/// English: `red: 6 (general) | blue: 0 (general) | yellow: 0 (general) | green: 0 (general)`
#[must_use]
pub fn score_text(scores: &ColorScores, locale: LabelLocale) -> String {
    let parts: Vec<String> = scores
        .iter()
        .map(|(color, total)| {
            let label = ScoreLabel::for_score(total).text(locale);
            match locale {
                LabelLocale::English => format!("{}: {} ({})", locale.color_name(color), total, label),
                LabelLocale::Chinese => format!("{}: {}（{}）", locale.color_name(color), total, label),
            }
        })
        .collect();
    parts.join(" | ")
}

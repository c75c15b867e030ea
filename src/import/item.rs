//! Recognized card mentions.
//!
//! `RawRecognizedItem` mirrors whatever the recognition service sends;
//! `RecognizedItem` is the validated record the matcher works on.

use serde::{Deserialize, Serialize};

use crate::board::slot::SLOT_COUNT;
use crate::cards::CardSide;

/// A position as sent on the wire: integer, float or text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPosition {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawPosition {
    /// Parse to an integer. Text parses its leading integer (`"4th"` is 4);
    /// floats must be integral.
    #[must_use]
    pub fn parse(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            Self::Float(_) => None,
            Self::Text(s) => leading_integer(s),
        }
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// One entry of the recognition service's card list, as received.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecognizedItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub position: Option<RawPosition>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// A validated recognized card mention.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecognizedItem {
    /// Text to match against the catalog.
    pub label: Option<String>,

    /// 1-based position as parsed, before range checking.
    pub position: Option<i64>,

    /// Side explicitly named by the recognizer.
    pub side: Option<CardSide>,
}

impl RecognizedItem {
    /// An item naming a card, without position or side.
    #[must_use]
    pub fn named(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    /// Set the 1-based position (builder pattern).
    #[must_use]
    pub fn at(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    /// Set the side (builder pattern).
    #[must_use]
    pub fn side(mut self, side: CardSide) -> Self {
        self.side = Some(side);
        self
    }

    /// Validate a raw entry.
    ///
    /// The label is the first non-empty of `title`, `name`, `code`.
    #[must_use]
    pub fn from_raw(raw: &RawRecognizedItem) -> Self {
        let label = [&raw.title, &raw.name, &raw.code]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(str::to_string);

        let side = raw.side.as_deref().map(str::trim).and_then(|s| {
            if s.eq_ignore_ascii_case("back") {
                Some(CardSide::Back)
            } else if s.eq_ignore_ascii_case("front") {
                Some(CardSide::Front)
            } else {
                None
            }
        });

        Self {
            label,
            position: raw.position.as_ref().and_then(RawPosition::parse),
            side,
        }
    }

    /// Target slot index, if the position is within 1..=12.
    #[must_use]
    pub fn slot_index(&self) -> Option<usize> {
        self.position
            .filter(|&p| p >= 1 && p <= SLOT_COUNT as i64)
            .map(|p| (p - 1) as usize)
    }
}

impl From<RawRecognizedItem> for RecognizedItem {
    fn from(raw: RawRecognizedItem) -> Self {
        Self::from_raw(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> RawRecognizedItem {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_position_forms() {
        assert_eq!(RecognizedItem::from_raw(&raw(r#"{"position":3}"#)).position, Some(3));
        assert_eq!(RecognizedItem::from_raw(&raw(r#"{"position":3.0}"#)).position, Some(3));
        assert_eq!(RecognizedItem::from_raw(&raw(r#"{"position":2.5}"#)).position, None);
        assert_eq!(RecognizedItem::from_raw(&raw(r#"{"position":" 7 "}"#)).position, Some(7));
        assert_eq!(RecognizedItem::from_raw(&raw(r#"{"position":"4th"}"#)).position, Some(4));
        assert_eq!(RecognizedItem::from_raw(&raw(r#"{"position":"top"}"#)).position, None);
        assert_eq!(RecognizedItem::from_raw(&raw(r#"{"position":"-2"}"#)).position, Some(-2));
        assert_eq!(RecognizedItem::from_raw(&raw("{}")).position, None);
    }

    #[test]
    fn test_slot_index_range() {
        assert_eq!(RecognizedItem::default().at(1).slot_index(), Some(0));
        assert_eq!(RecognizedItem::default().at(12).slot_index(), Some(11));
        assert_eq!(RecognizedItem::default().at(0).slot_index(), None);
        assert_eq!(RecognizedItem::default().at(13).slot_index(), None);
        assert_eq!(RecognizedItem::default().slot_index(), None);
    }

    #[test]
    fn test_label_precedence() {
        let item = RecognizedItem::from_raw(&raw(r#"{"name":"N","title":"T","code":"C"}"#));
        assert_eq!(item.label.as_deref(), Some("T"));

        let item = RecognizedItem::from_raw(&raw(r#"{"name":"N","title":"  ","code":"C"}"#));
        assert_eq!(item.label.as_deref(), Some("N"));

        let item = RecognizedItem::from_raw(&raw(r#"{"code":"card_05"}"#));
        assert_eq!(item.label.as_deref(), Some("card_05"));

        assert_eq!(RecognizedItem::from_raw(&raw("{}")).label, None);
    }

    #[test]
    fn test_side_parsing() {
        assert_eq!(RecognizedItem::from_raw(&raw(r#"{"side":"back"}"#)).side, Some(CardSide::Back));
        assert_eq!(RecognizedItem::from_raw(&raw(r#"{"side":"Back "}"#)).side, Some(CardSide::Back));
        assert_eq!(RecognizedItem::from_raw(&raw(r#"{"side":"front"}"#)).side, Some(CardSide::Front));
        assert_eq!(RecognizedItem::from_raw(&raw(r#"{"side":"reversed"}"#)).side, None);
    }
}

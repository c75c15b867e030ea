//! Card catalog for definition lookup.
//!
//! The `CardCatalog` is the session-immutable list of cards a board can
//! use. It keeps the display order of the source and provides fast lookup
//! by `CardId`.

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use super::face::CardSide;
use crate::error::CatalogError;

/// Ordered catalog of card definitions.
///
/// ## Example
///
/// ```
/// use cardset_board::cards::{CardCatalog, CardColor, CardDefinition, CardFace, CardId};
///
/// let catalog = CardCatalog::from_definitions(vec![CardDefinition::new(
///     "card_01",
///     CardFace::new("Pessimistic", "Frustrated", 3, CardColor::Blue),
///     CardFace::new("Optimistic", "Optimistic", 1, CardColor::Red),
/// )])
/// .unwrap();
///
/// let found = catalog.get(&CardId::new("card_01")).unwrap();
/// assert_eq!(found.front.value, 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<CardDefinition>,
    index: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, preserving the given order.
    ///
    /// Fails if two definitions share an id.
    pub fn from_definitions(cards: Vec<CardDefinition>) -> Result<Self, CatalogError> {
        let mut index = FxHashMap::default();
        for (pos, card) in cards.iter().enumerate() {
            if index.insert(card.id.clone(), pos).is_some() {
                return Err(CatalogError::DuplicateId(card.id.clone()));
            }
        }
        Ok(Self { cards, index })
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&CardDefinition> {
        self.index.get(id).map(|&pos| &self.cards[pos])
    }

    /// Check if a card ID is in the catalog.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    /// Get the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions in display order.
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter()
    }

    /// Resolve a free-text label to a card and the side it names.
    ///
    /// Every front face is tried before any back face, so a label that is a
    /// front on one card and a back on another resolves to the front.
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<(&CardDefinition, CardSide)> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        if let Some(card) = self.cards.iter().find(|c| c.front_matches(label)) {
            return Some((card, CardSide::Front));
        }
        self.cards
            .iter()
            .find(|c| c.back_matches(label))
            .map(|card| (card, CardSide::Back))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardColor, CardFace};

    fn card(id: &str, front: &str, back: &str) -> CardDefinition {
        CardDefinition::new(
            id,
            CardFace::new(front, format!("{front} en"), 1, CardColor::Red),
            CardFace::new(back, format!("{back} en"), 2, CardColor::Blue),
        )
    }

    #[test]
    fn test_lookup_and_order() {
        let catalog = CardCatalog::from_definitions(vec![
            card("b", "Bee", "Bear"),
            card("a", "Ant", "Ape"),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(&CardId::new("a")));
        assert!(!catalog.contains(&CardId::new("z")));
        assert_eq!(catalog.get(&CardId::new("a")).unwrap().front.title, "Ant");

        let ids: Vec<_> = catalog.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = CardCatalog::from_definitions(vec![
            card("a", "Ant", "Ape"),
            card("a", "Asp", "Auk"),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id.as_str() == "a"));
    }

    #[test]
    fn test_find_by_label_prefers_fronts() {
        // "Ape" is the back of `a` and the front of `c`.
        let catalog = CardCatalog::from_definitions(vec![
            card("a", "Ant", "Ape"),
            card("c", "Ape", "Cat"),
        ])
        .unwrap();

        let (found, side) = catalog.find_by_label("Ape").unwrap();
        assert_eq!(found.id.as_str(), "c");
        assert_eq!(side, CardSide::Front);

        let (found, side) = catalog.find_by_label("  Cat en ").unwrap();
        assert_eq!(found.id.as_str(), "c");
        assert_eq!(side, CardSide::Back);

        let (found, side) = catalog.find_by_label("a").unwrap();
        assert_eq!(found.id.as_str(), "a");
        assert_eq!(side, CardSide::Front);

        assert!(catalog.find_by_label("Dog").is_none());
        assert!(catalog.find_by_label("   ").is_none());
    }

    #[test]
    fn test_empty() {
        let catalog = CardCatalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.get(&CardId::new("a")).is_none());
    }
}

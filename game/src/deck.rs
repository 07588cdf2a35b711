use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::{EventId, EventRecord};
use crate::error::GameError;

/// Undealt cards for one session, drawn uniformly at random without replacement.
#[derive(Debug, Clone)]
pub struct Deck {
    remaining: Vec<EventRecord>,
    dealt: HashSet<EventId>,
    rng: StdRng,
}

impl Deck {
    /// Copies `catalog` into the deck. Repeated ids keep their first occurrence.
    pub fn new(catalog: &[EventRecord], seed: u64) -> Self {
        let mut seen = HashSet::with_capacity(catalog.len());
        let mut remaining = Vec::with_capacity(catalog.len());
        for event in catalog {
            if seen.insert(event.id.clone()) {
                remaining.push(event.clone());
            } else {
                tracing::warn!(id = %event.id, "dropping duplicate event from deck");
            }
        }
        Self {
            remaining,
            dealt: HashSet::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn remaining(&self) -> &[EventRecord] {
        &self.remaining
    }

    pub fn contains(&self, id: &EventId) -> bool {
        self.remaining.iter().any(|e| &e.id == id)
    }

    pub fn was_dealt(&self, id: &EventId) -> bool {
        self.dealt.contains(id)
    }

    pub fn draw(&mut self) -> Result<EventRecord, GameError> {
        if self.remaining.is_empty() {
            return Err(GameError::EmptyDeck);
        }
        let index = self.rng.random_range(0..self.remaining.len());
        let event = self.remaining.swap_remove(index);
        self.dealt.insert(event.id.clone());
        Ok(event)
    }

    /// Deals a specific card, if it is still in the deck.
    pub fn take(&mut self, id: &EventId) -> Option<EventRecord> {
        let index = self.remaining.iter().position(|e| &e.id == id)?;
        let event = self.remaining.remove(index);
        self.dealt.insert(event.id.clone());
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin_catalog;

    #[test]
    fn drawing_every_card_empties_the_deck_without_repeats() {
        let catalog = builtin_catalog();
        let mut deck = Deck::new(&catalog, 7);
        let mut drawn = HashSet::new();
        for _ in 0..catalog.len() {
            let event = deck.draw().expect("deck still has cards");
            assert!(deck.was_dealt(&event.id));
            assert!(!deck.contains(&event.id));
            assert!(drawn.insert(event.id));
        }
        assert!(deck.is_empty());
        assert!(matches!(deck.draw(), Err(GameError::EmptyDeck)));
    }

    #[test]
    fn duplicate_ids_are_kept_once() {
        let a = EventRecord::new("A", 1, "", "");
        let deck = Deck::new(&[a.clone(), a.clone(), EventRecord::new("B", 2, "", "")], 1);
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn same_seed_deals_same_order() {
        let catalog = builtin_catalog();
        let mut left = Deck::new(&catalog, 42);
        let mut right = Deck::new(&catalog, 42);
        for _ in 0..catalog.len() {
            assert_eq!(left.draw().ok(), right.draw().ok());
        }
    }

    #[test]
    fn take_deals_a_named_card_once() {
        let catalog = builtin_catalog();
        let mut deck = Deck::new(&catalog, 0);
        let id = catalog[0].id.clone();
        assert_eq!(deck.take(&id).map(|e| e.year), Some(0));
        assert!(deck.take(&id).is_none());
        assert_eq!(deck.len(), catalog.len() - 1);
    }
}

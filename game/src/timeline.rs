use serde::Serialize;

use crate::catalog::EventRecord;
use crate::validator::{self, Conflict};

/// The player's committed cards, always sorted by year.
///
/// The only way in is `insert_checked`, so an out-of-order card is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timeline {
    events: Vec<EventRecord>,
}

/// A card that did not fit where it was dropped. Hands the card back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misplaced {
    pub event: EventRecord,
    pub conflict: Conflict,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn years(&self) -> Vec<i32> {
        self.events.iter().map(|e| e.year).collect()
    }

    pub fn is_chronological(&self) -> bool {
        self.events.windows(2).all(|w| w[0].year <= w[1].year)
    }

    pub fn check(&self, index: usize, year: i32) -> Option<Conflict> {
        validator::conflict(&self.years(), index, year)
    }

    pub fn insert_checked(&mut self, index: usize, event: EventRecord) -> Result<(), Misplaced> {
        match self.check(index, event.year) {
            None => {
                self.events.insert(index, event);
                Ok(())
            }
            Some(conflict) => Err(Misplaced { event, conflict }),
        }
    }

    /// Appends `event` at the slot its year belongs in. Used for the opening card.
    pub fn insert_sorted(&mut self, event: EventRecord) -> usize {
        let index = self.events.partition_point(|e| e.year <= event.year);
        self.events.insert(index, event);
        index
    }
}

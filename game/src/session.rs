use serde::Serialize;

use crate::catalog::{EventId, EventRecord};
use crate::deck::Deck;
use crate::error::GameError;
use crate::settings::GameRules;
use crate::timeline::Timeline;
use crate::validator::Conflict;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameOutcome {
    Won,
    Lost,
}

/// The numbers a shell shows in its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    pub score: u32,
    pub lives: u32,
    pub max_lives: u32,
    pub progress: usize,
    pub total_cards: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Accepted { index: usize },
    Rejected { conflict: Conflict, lives_left: u32 },
}

/// Score, lives, progress, hand, timeline and deck of one game.
///
/// Mutated only through `draw` and `place`; a restart builds a new value.
#[derive(Debug, Clone)]
pub struct SessionState {
    rules: GameRules,
    score: u32,
    lives: u32,
    progress: usize,
    total_cards: usize,
    hand: Option<EventRecord>,
    timeline: Timeline,
    deck: Deck,
}

impl SessionState {
    pub fn new(catalog: &[EventRecord], rules: GameRules, seed: u64) -> Self {
        let mut deck = Deck::new(catalog, seed);
        let mut timeline = Timeline::new();

        if rules.opening_card {
            if let Some(first) = catalog.first().and_then(|e| deck.take(&e.id)) {
                tracing::debug!(id = %first.id, "opening card placed");
                timeline.insert_sorted(first);
            }
        }

        let total_cards = rules.total_cards.unwrap_or(deck.len());
        Self {
            rules,
            score: 0,
            lives: rules.max_lives,
            progress: 0,
            total_cards,
            hand: None,
            timeline,
            deck,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    pub fn hand(&self) -> Option<&EventRecord> {
        self.hand.as_ref()
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            score: self.score,
            lives: self.lives,
            max_lives: self.rules.max_lives,
            progress: self.progress,
            total_cards: self.total_cards,
        }
    }

    /// Moves a random card from the deck into the empty hand.
    pub fn draw(&mut self) -> Result<&EventRecord, GameError> {
        if self.hand.is_some() {
            return Err(GameError::InvalidTransition {
                phase: "holding a card",
                command: "draw",
            });
        }
        let card = self.deck.draw()?;
        Ok(self.hand.insert(card))
    }

    /// Tries to commit the hand card at `index`.
    ///
    /// Accepted: score and progress go up, the hand empties. Rejected: one life is lost and
    /// the card stays in hand. An index past the end is refused before anything changes.
    pub fn place(&mut self, index: usize) -> Result<Placement, GameError> {
        let len = self.timeline.len();
        if index > len {
            return Err(GameError::SlotOutOfRange { index, len });
        }
        let card = self.hand.take().ok_or(GameError::InvalidTransition {
            phase: "the hand is empty",
            command: "drop",
        })?;

        match self.timeline.insert_checked(index, card) {
            Ok(()) => {
                self.score = self.score.saturating_add(self.rules.reward);
                self.progress += 1;
                Ok(Placement::Accepted { index })
            }
            Err(misplaced) => {
                self.hand = Some(misplaced.event);
                self.lives = self.lives.saturating_sub(1);
                Ok(Placement::Rejected {
                    conflict: misplaced.conflict,
                    lives_left: self.lives,
                })
            }
        }
    }

    /// `Lost` once lives hit zero, `Won` once progress reaches the target.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.lives == 0 {
            Some(GameOutcome::Lost)
        } else if self.progress >= self.total_cards {
            Some(GameOutcome::Won)
        } else {
            None
        }
    }

    /// Outcome when the deck runs dry before the target is reached.
    pub fn outcome_on_exhaustion(&self) -> GameOutcome {
        if self.lives == 0 {
            GameOutcome::Lost
        } else {
            GameOutcome::Won
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            scoreboard: self.scoreboard(),
            hand: self.hand.as_ref().map(|e| e.id.clone()),
            timeline: self.timeline.events().iter().map(|e| e.id.clone()).collect(),
            years: self.timeline.years(),
            deck_remaining: self.deck.len(),
        }
    }
}

/// Serializable summary of a session, for logs and autoplay reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    #[serde(flatten)]
    pub scoreboard: Scoreboard,
    pub hand: Option<EventId>,
    pub timeline: Vec<EventId>,
    pub years: Vec<i32>,
    pub deck_remaining: usize,
}

//! Interaction phases and the single transition table both input modalities feed.
//!
//! `Game::handle` is the only place session state changes. It returns the effects a shell
//! should apply instead of calling into one, so transitions can be tested and replayed
//! without a host.

use std::sync::Arc;

use crate::catalog::{EventRecord, validate_catalog};
use crate::error::GameError;
use crate::input::InputModality;
use crate::session::{GameOutcome, Placement, Scoreboard, SessionState};
use crate::settings::GameRules;

pub const DRAW_LABEL: &str = "DRAW CARD";
pub const PLACE_LABEL: &str = "PLACE CARD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    HandFull,
    Dragging {
        modality: InputModality,
        /// Slot the card would land in if dropped now. Advisory only.
        candidate: Option<usize>,
    },
    Terminal(GameOutcome),
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::HandFull => "holding a card",
            Phase::Dragging { .. } => "dragging",
            Phase::Terminal(_) => "game over",
        }
    }

    pub fn is_dragging(self) -> bool {
        matches!(self, Phase::Dragging { .. })
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Terminal(_))
    }

    /// Label of the main action button; hidden once the game is over.
    pub fn main_button(self) -> Option<&'static str> {
        match self {
            Phase::Idle => Some(DRAW_LABEL),
            Phase::HandFull | Phase::Dragging { .. } => Some(PLACE_LABEL),
            Phase::Terminal(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Draw,
    BeginDrag(InputModality),
    Hover(Option<usize>),
    Drop(usize),
    Cancel,
    Restart,
}

impl Command {
    pub fn name(self) -> &'static str {
        match self {
            Command::Draw => "draw",
            Command::BeginDrag(_) => "begin drag",
            Command::Hover(_) => "hover",
            Command::Drop(_) => "drop",
            Command::Cancel => "cancel",
            Command::Restart => "restart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    HandOccupied,
    Misplaced,
    InitFailed,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::HandOccupied => {
                "You already have a card in your hand. Place it before drawing a new one."
            }
            Notice::Misplaced => "Incorrect placement. Try again!",
            Notice::InitFailed => {
                "An error occurred while initializing the game. Please try again."
            }
        }
    }
}

/// End-of-game message shown by the shell.
pub fn end_message(outcome: GameOutcome, score: u32) -> String {
    match outcome {
        GameOutcome::Lost => {
            format!("Game Over! You've run out of lives. Your final score is {score}.")
        }
        GameOutcome::Won => {
            format!("Congratulations! You've completed the game with a score of {score}.")
        }
    }
}

/// Something the shell should show. Applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RenderHand(Option<EventRecord>),
    RenderTimeline(Vec<EventRecord>),
    RenderScore(Scoreboard),
    Indicator(Option<usize>),
    Feedback { accepted: bool },
    Notice(Notice),
    MainButton(Option<&'static str>),
    GameEnd { outcome: GameOutcome, score: u32 },
}

/// One player's game: the catalog it deals from, the current session and phase.
#[derive(Debug, Clone)]
pub struct Game {
    catalog: Arc<[EventRecord]>,
    rules: GameRules,
    seed: u64,
    round: u64,
    session: SessionState,
    phase: Phase,
}

impl Game {
    pub fn new(catalog: &[EventRecord], rules: GameRules, seed: u64) -> Result<Self, GameError> {
        validate_catalog(catalog)?;
        let rules = rules.sanitized();
        let session = SessionState::new(catalog, rules, seed);
        let phase = session.outcome().map_or(Phase::Idle, Phase::Terminal);
        Ok(Self {
            catalog: catalog.into(),
            rules,
            seed,
            round: 0,
            session,
            phase,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn catalog(&self) -> &[EventRecord] {
        &self.catalog
    }

    /// Number of restarts so far.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn handle(&mut self, command: Command) -> Result<Vec<Effect>, GameError> {
        match (self.phase, command) {
            (_, Command::Restart) => Ok(self.restart()),
            (Phase::Idle, Command::Draw) => self.draw(),
            (Phase::HandFull | Phase::Dragging { .. }, Command::Draw) => {
                Ok(vec![Effect::Notice(Notice::HandOccupied)])
            }
            (Phase::HandFull, Command::BeginDrag(modality)) => {
                self.phase = Phase::Dragging {
                    modality,
                    candidate: None,
                };
                Ok(Vec::new())
            }
            (Phase::Dragging { modality, candidate }, Command::Hover(next)) => {
                if candidate == next {
                    return Ok(Vec::new());
                }
                self.phase = Phase::Dragging {
                    modality,
                    candidate: next,
                };
                Ok(vec![Effect::Indicator(next)])
            }
            (Phase::Dragging { .. }, Command::Drop(index)) => self.drop_at(index),
            (Phase::Dragging { .. }, Command::Cancel) => {
                self.phase = Phase::HandFull;
                Ok(vec![
                    Effect::Indicator(None),
                    Effect::RenderHand(self.session.hand().cloned()),
                ])
            }
            (phase, command) => {
                tracing::debug!(
                    phase = phase.name(),
                    command = command.name(),
                    "ignoring command"
                );
                Err(GameError::InvalidTransition {
                    phase: phase.name(),
                    command: command.name(),
                })
            }
        }
    }

    /// Starts a fresh session from the same catalog and returns a full repaint.
    pub fn restart(&mut self) -> Vec<Effect> {
        self.round = self.round.wrapping_add(1);
        let seed = self
            .seed
            .wrapping_add(self.round.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.session = SessionState::new(&self.catalog, self.rules, seed);
        self.phase = self.session.outcome().map_or(Phase::Idle, Phase::Terminal);
        tracing::info!(round = self.round, "game restarted");
        self.full_render()
    }

    /// Everything a freshly mounted shell needs to show the current state.
    pub fn full_render(&self) -> Vec<Effect> {
        let mut effects = vec![
            Effect::RenderTimeline(self.session.timeline().events().to_vec()),
            Effect::RenderHand(self.session.hand().cloned()),
            Effect::RenderScore(self.session.scoreboard()),
            Effect::Indicator(None),
            Effect::MainButton(self.phase.main_button()),
        ];
        if let Phase::Terminal(outcome) = self.phase {
            effects.push(Effect::GameEnd {
                outcome,
                score: self.session.score(),
            });
        }
        effects
    }

    fn draw(&mut self) -> Result<Vec<Effect>, GameError> {
        match self.session.draw() {
            Ok(card) => {
                tracing::debug!(id = %card.id, "card drawn");
                let card = card.clone();
                self.phase = Phase::HandFull;
                Ok(vec![
                    Effect::RenderHand(Some(card)),
                    Effect::MainButton(self.phase.main_button()),
                ])
            }
            Err(GameError::EmptyDeck) => {
                let outcome = self.session.outcome_on_exhaustion();
                Ok(self.finish(outcome))
            }
            Err(err) => Err(err),
        }
    }

    fn drop_at(&mut self, index: usize) -> Result<Vec<Effect>, GameError> {
        let placement = match self.session.place(index) {
            Ok(placement) => placement,
            Err(err) => {
                tracing::debug!(index, "drop refused: {err}");
                return Err(err);
            }
        };
        let mut effects = vec![Effect::Indicator(None)];
        match placement {
            Placement::Accepted { index } => {
                tracing::debug!(index, score = self.session.score(), "placement accepted");
                effects.extend([
                    Effect::RenderTimeline(self.session.timeline().events().to_vec()),
                    Effect::RenderHand(None),
                    Effect::RenderScore(self.session.scoreboard()),
                    Effect::Feedback { accepted: true },
                ]);
                match self.session.outcome() {
                    Some(outcome) => effects.extend(self.finish(outcome)),
                    None => {
                        self.phase = Phase::Idle;
                        effects.push(Effect::MainButton(self.phase.main_button()));
                    }
                }
            }
            Placement::Rejected {
                conflict,
                lives_left,
            } => {
                tracing::debug!(index, ?conflict, lives_left, "placement rejected");
                effects.extend([
                    Effect::RenderScore(self.session.scoreboard()),
                    Effect::Feedback { accepted: false },
                    Effect::RenderHand(self.session.hand().cloned()),
                ]);
                match self.session.outcome() {
                    Some(outcome) => effects.extend(self.finish(outcome)),
                    None => {
                        self.phase = Phase::HandFull;
                        effects.push(Effect::Notice(Notice::Misplaced));
                        effects.push(Effect::MainButton(self.phase.main_button()));
                    }
                }
            }
        }
        Ok(effects)
    }

    fn finish(&mut self, outcome: GameOutcome) -> Vec<Effect> {
        self.phase = Phase::Terminal(outcome);
        let score = self.session.score();
        tracing::info!(?outcome, score, round = self.round, "game over");
        vec![
            Effect::Indicator(None),
            Effect::MainButton(None),
            Effect::GameEnd { outcome, score },
        ]
    }
}

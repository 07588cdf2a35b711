use engine::GameLogic;

use crate::catalog::EventRecord;
use crate::error::GameError;
use crate::machine::{Command, Game};
use crate::settings::GameRules;

/// `GameLogic` over the interaction machine, so whole games can be replayed, rewound and
/// branched through `engine::HeadlessRunner`.
///
/// Rejected commands leave the state as it was; rendering effects are dropped.
#[derive(Debug, Clone)]
pub struct TimelineLogic {
    initial: Game,
}

impl TimelineLogic {
    pub fn new(catalog: &[EventRecord], rules: GameRules, seed: u64) -> Result<Self, GameError> {
        Ok(Self {
            initial: Game::new(catalog, rules, seed)?,
        })
    }
}

impl GameLogic for TimelineLogic {
    type State = Game;
    type Input = Command;

    fn initial_state(&self) -> Self::State {
        self.initial.clone()
    }

    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State {
        let mut next = state.clone();
        if let Err(err) = next.handle(input) {
            tracing::debug!("replay step ignored: {err}");
        }
        next
    }
}

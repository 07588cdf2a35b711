//! Runs a `Game` against a `HostShell`.
//!
//! The driver turns pointer events into commands, applies the resulting effects to the
//! shell and owns the two presentation timers. All time comes in through `tick`.

use std::time::Duration;

use crate::error::GameError;
use crate::host::{Haptic, HostShell};
use crate::input::{
    DragAdapter, DragEvent, DropTarget, Point, PointerEvent, TouchAdapter, TouchEvent,
};
use crate::machine::{Command, Effect, Game, Notice, Phase, end_message};
use crate::settings::PresentationSettings;
use crate::timers::{AutoScroll, FeedbackTimer};

pub const EXIT_PROMPT: &str = "Are you sure you want to exit the game?";

fn alert_via<H: HostShell>(shell: &mut H, message: &str) {
    match shell.platform() {
        Some(platform) => platform.alert(message),
        None => shell.alert(message),
    }
}

fn confirm_via<H: HostShell>(shell: &mut H, message: &str) -> bool {
    match shell.platform() {
        Some(platform) => platform.confirm(message),
        None => shell.confirm(message),
    }
}

fn haptic_via<H: HostShell>(shell: &mut H, kind: Haptic) {
    if let Some(platform) = shell.platform() {
        platform.haptic(kind);
    }
}

pub struct Driver<H: HostShell> {
    game: Game,
    shell: H,
    presentation: PresentationSettings,
    feedback: FeedbackTimer,
    autoscroll: Option<AutoScroll>,
    drag: DragAdapter,
    touch: TouchAdapter,
}

impl<H: HostShell> Driver<H> {
    /// Mounts `shell` and paints the initial state.
    ///
    /// A missing mount point aborts with a user-visible alert.
    pub fn mount(
        game: Game,
        mut shell: H,
        presentation: PresentationSettings,
    ) -> Result<Self, GameError> {
        if let Err(err) = shell.mount() {
            tracing::error!("cannot start game: {err}");
            alert_via(&mut shell, Notice::InitFailed.message());
            return Err(err);
        }

        let mut driver = Self {
            feedback: FeedbackTimer::new(presentation.feedback_duration()),
            game,
            shell,
            presentation,
            autoscroll: None,
            drag: DragAdapter::default(),
            touch: TouchAdapter::default(),
        };
        let effects = driver.game.full_render();
        driver.apply(effects);
        tracing::info!(
            cards = driver.game.catalog().len(),
            total = driver.game.session().total_cards(),
            "game mounted"
        );
        Ok(driver)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn phase(&self) -> Phase {
        self.game.phase()
    }

    pub fn shell(&self) -> &H {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut H {
        &mut self.shell
    }

    pub fn feedback(&self) -> &FeedbackTimer {
        &self.feedback
    }

    pub fn is_autoscrolling(&self) -> bool {
        self.autoscroll.is_some()
    }

    pub fn into_shell(self) -> H {
        self.shell
    }

    pub fn draw(&mut self) -> Result<Phase, GameError> {
        self.dispatch(Command::Draw)
    }

    pub fn restart(&mut self) -> Result<Phase, GameError> {
        self.drag.reset();
        self.touch.reset();
        self.dispatch(Command::Restart)
    }

    /// Applies one command. Invalid transitions change nothing and are returned as errors.
    pub fn dispatch(&mut self, command: Command) -> Result<Phase, GameError> {
        let result = self.game.handle(command);
        if !self.game.phase().is_dragging() {
            self.autoscroll = None;
        }
        self.apply(result?);
        Ok(self.game.phase())
    }

    pub fn pointer(&mut self, event: PointerEvent) -> Result<Phase, GameError> {
        match event {
            PointerEvent::Start { modality } => self.dispatch(Command::BeginDrag(modality)),
            PointerEvent::Move { pos, .. } => {
                if self.game.phase().is_dragging() {
                    self.track_edges(pos);
                }
                let candidate = self
                    .shell
                    .hit_timeline(pos)
                    .then(|| self.shell.resolve_insertion_index(pos.x));
                self.dispatch(Command::Hover(candidate))
            }
            PointerEvent::Leave { .. } => {
                self.autoscroll = None;
                self.dispatch(Command::Hover(None))
            }
            PointerEvent::Release { pos, target, .. } => {
                self.autoscroll = None;
                let over_timeline = match target {
                    DropTarget::Timeline => true,
                    DropTarget::Outside => false,
                    DropTarget::HitTest => pos.is_some_and(|p| self.shell.hit_timeline(p)),
                };
                let index = match (over_timeline, pos, self.game.phase()) {
                    (false, _, _) => None,
                    (true, Some(p), _) => Some(self.shell.resolve_insertion_index(p.x)),
                    (true, None, Phase::Dragging { candidate, .. }) => candidate,
                    (true, None, _) => None,
                };
                match index {
                    Some(index) => self.dispatch(Command::Drop(index)),
                    None => self.dispatch(Command::Cancel),
                }
            }
        }
    }

    /// Feeds a native drag event. Events the adapter swallows leave the phase unchanged.
    pub fn drag_event(&mut self, event: DragEvent) -> Result<Phase, GameError> {
        match self.drag.translate(event) {
            Some(pointer) => self.pointer(pointer),
            None => Ok(self.game.phase()),
        }
    }

    pub fn touch_event(&mut self, event: TouchEvent) -> Result<Phase, GameError> {
        match self.touch.translate(event) {
            Some(pointer) => self.pointer(pointer),
            None => Ok(self.game.phase()),
        }
    }

    /// Advances the feedback indicator and any running edge scroll.
    pub fn tick(&mut self, dt: Duration) {
        if self.feedback.tick(dt) {
            self.shell.hide_feedback();
        }
        if let Some(scroll) = self.autoscroll.as_mut() {
            let delta = scroll.tick(dt);
            if delta != 0 {
                self.shell.scroll_timeline(delta);
            }
        }
    }

    /// Asks the player to confirm leaving. Returns true when they do.
    pub fn request_exit(&mut self) -> bool {
        let confirmed = confirm_via(&mut self.shell, EXIT_PROMPT);
        if confirmed {
            tracing::info!(score = self.game.session().score(), "player left the game");
        }
        confirmed
    }

    fn track_edges(&mut self, pos: Point) {
        let Some(dir) = self.shell.edge_zone(pos) else {
            self.autoscroll = None;
            return;
        };
        match self.autoscroll.as_mut() {
            Some(scroll) => scroll.retarget(dir),
            None => {
                self.autoscroll = Some(AutoScroll::new(
                    dir,
                    self.presentation.autoscroll_interval(),
                    self.presentation.autoscroll_step_px,
                ));
            }
        }
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RenderHand(card) => self.shell.render_hand(card.as_ref()),
                Effect::RenderTimeline(events) => self.shell.render_timeline(&events),
                Effect::RenderScore(board) => self.shell.render_score(&board),
                Effect::Indicator(slot) => self.shell.show_indicator(slot),
                Effect::Feedback { accepted } => {
                    self.feedback.show(accepted);
                    self.shell.show_feedback(accepted);
                    let kind = if accepted {
                        Haptic::Success
                    } else {
                        Haptic::Error
                    };
                    haptic_via(&mut self.shell, kind);
                }
                Effect::Notice(notice) => {
                    if notice == Notice::HandOccupied {
                        haptic_via(&mut self.shell, Haptic::Warning);
                    }
                    alert_via(&mut self.shell, notice.message());
                }
                Effect::MainButton(label) => {
                    if let Some(platform) = self.shell.platform() {
                        platform.set_main_button(label);
                    }
                }
                Effect::GameEnd { outcome, score } => {
                    let message = end_message(outcome, score);
                    self.shell.show_game_end(outcome, score, &message);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EventRecord;
    use crate::host::RecordingShell;
    use crate::input::InputModality;
    use crate::settings::GameRules;

    fn driver(shell: RecordingShell) -> Driver<RecordingShell> {
        let catalog = vec![
            EventRecord::new("A", 0, "", ""),
            EventRecord::new("B", 1492, "", ""),
        ];
        let game = Game::new(&catalog, GameRules::default(), 4).expect("valid catalog");
        Driver::mount(game, shell, PresentationSettings::default()).expect("mounts")
    }

    #[test]
    fn mount_paints_the_initial_state() {
        let d = driver(RecordingShell::with_platform());
        let shell = d.shell();
        assert!(shell.hand.is_none());
        assert!(shell.timeline.is_empty());
        assert_eq!(shell.score.map(|b| b.lives), Some(3));
        let button = shell.platform.as_ref().and_then(|p| p.main_button.clone());
        assert_eq!(button.as_deref(), Some("DRAW CARD"));
    }

    #[test]
    fn missing_mount_point_alerts_and_aborts() {
        let catalog = vec![EventRecord::new("A", 0, "", "")];
        let game = Game::new(&catalog, GameRules::default(), 0).expect("valid catalog");
        let shell = RecordingShell {
            missing: Some("timeline"),
            ..RecordingShell::default()
        };
        let result = Driver::mount(game, shell, PresentationSettings::default());
        assert!(matches!(
            result,
            Err(GameError::MissingHostElement("timeline"))
        ));
    }

    #[test]
    fn autoscroll_stops_when_the_drag_ends() {
        let mut d = driver(RecordingShell::default());
        d.draw().expect("draw");
        d.pointer(PointerEvent::Start {
            modality: InputModality::Drag,
        })
        .expect("begin drag");
        d.pointer(PointerEvent::Move {
            modality: InputModality::Drag,
            pos: Point::new(590.0, 10.0),
        })
        .expect("hover near right edge");
        assert!(d.is_autoscrolling());

        d.tick(Duration::from_millis(32));
        assert_eq!(d.shell().scrolled_px, 16);

        d.pointer(PointerEvent::Release {
            modality: InputModality::Drag,
            pos: None,
            target: DropTarget::Outside,
        })
        .expect("cancel");
        assert!(!d.is_autoscrolling());
        assert_eq!(d.phase(), Phase::HandFull);
    }

    #[test]
    fn feedback_hides_after_the_configured_time() {
        let mut d = driver(RecordingShell::default());
        d.draw().expect("draw");
        d.pointer(PointerEvent::Start {
            modality: InputModality::Touch,
        })
        .expect("begin drag");
        d.dispatch(Command::Drop(0)).expect("first card always fits");
        assert_eq!(d.shell().feedback, Some(true));

        d.tick(Duration::from_millis(1_499));
        assert_eq!(d.shell().feedback, Some(true));
        d.tick(Duration::from_millis(1));
        assert_eq!(d.shell().feedback, None);
    }

    #[test]
    fn exit_uses_platform_confirm_when_available() {
        let mut d = driver(RecordingShell::with_platform());
        assert!(d.request_exit());
        let confirms = d
            .shell()
            .platform
            .as_ref()
            .map(|p| p.confirms.clone())
            .unwrap_or_default();
        assert_eq!(confirms, vec![EXIT_PROMPT.to_string()]);
        assert!(d.shell().confirms.is_empty());
    }

    #[test]
    fn exit_without_platform_asks_the_shell() {
        let mut d = driver(RecordingShell::default());
        assert!(!d.request_exit());
        assert_eq!(d.shell().confirms, vec![EXIT_PROMPT.to_string()]);

        d.shell_mut().confirm_answer = true;
        assert!(d.request_exit());
        assert_eq!(d.shell().confirms.len(), 2);
    }
}

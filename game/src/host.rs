//! The seam between the game and whatever shows it.
//!
//! A `HostShell` renders and hit-tests; a `HostPlatform` adds optional native affordances
//! (haptics, native dialogs, a main action button). Shells without a platform still work:
//! alerts and confirms fall back to the shell's own methods.

use crate::catalog::EventRecord;
use crate::error::GameError;
use crate::input::Point;
use crate::session::{GameOutcome, Scoreboard};
use crate::timers::ScrollDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Haptic {
    Success,
    Error,
    Warning,
}

pub trait HostPlatform {
    fn haptic(&mut self, kind: Haptic);
    fn alert(&mut self, message: &str);
    fn confirm(&mut self, message: &str) -> bool;
    /// `None` hides the button.
    fn set_main_button(&mut self, label: Option<&str>);
}

pub trait HostShell {
    /// Checks that every mount point exists. Called once before the first render.
    fn mount(&mut self) -> Result<(), GameError> {
        Ok(())
    }

    fn render_hand(&mut self, card: Option<&EventRecord>);
    fn render_timeline(&mut self, events: &[EventRecord]);
    fn render_score(&mut self, board: &Scoreboard);
    fn show_feedback(&mut self, accepted: bool);
    fn show_game_end(&mut self, outcome: GameOutcome, score: u32, message: &str);

    /// Slot a card dropped at `pointer_x` would land in: the number of placed cards whose
    /// centre lies left of the pointer.
    fn resolve_insertion_index(&self, pointer_x: f32) -> usize;

    fn hide_feedback(&mut self) {}

    fn show_indicator(&mut self, _slot: Option<usize>) {}

    /// Whether `pos` is over the timeline drop area.
    fn hit_timeline(&self, _pos: Point) -> bool {
        true
    }

    fn edge_zone(&self, _pos: Point) -> Option<ScrollDir> {
        None
    }

    fn scroll_timeline(&mut self, _delta_px: i32) {}

    fn alert(&mut self, message: &str) {
        tracing::warn!("{message}");
    }

    /// Refuses when the shell has no way to ask.
    fn confirm(&mut self, message: &str) -> bool {
        tracing::warn!("{message} (no confirmation available, refusing)");
        false
    }

    fn platform(&mut self) -> Option<&mut dyn HostPlatform> {
        None
    }
}

/// Platform calls captured by `RecordingShell`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingPlatform {
    pub haptics: Vec<Haptic>,
    pub alerts: Vec<String>,
    pub confirms: Vec<String>,
    pub confirm_answer: bool,
    pub main_button: Option<String>,
}

impl HostPlatform for RecordingPlatform {
    fn haptic(&mut self, kind: Haptic) {
        self.haptics.push(kind);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.confirm_answer
    }

    fn set_main_button(&mut self, label: Option<&str>) {
        self.main_button = label.map(str::to_string);
    }
}

/// A headless shell that keeps what it was told to show.
///
/// Cards sit in fixed-width slots starting at x = 0; the timeline occupies every y at or
/// below `timeline_top`. Used by tests and by the autoplay binary.
#[derive(Debug, Clone)]
pub struct RecordingShell {
    pub slot_width: f32,
    pub viewport_width: f32,
    pub edge_px: f32,
    pub timeline_top: f32,
    /// Mount point to report as missing, if any.
    pub missing: Option<&'static str>,

    pub hand: Option<EventRecord>,
    pub timeline: Vec<EventRecord>,
    pub score: Option<Scoreboard>,
    pub feedback: Option<bool>,
    pub feedback_shown: usize,
    pub indicator: Option<usize>,
    pub alerts: Vec<String>,
    pub confirms: Vec<String>,
    pub confirm_answer: bool,
    pub game_end: Option<(GameOutcome, u32, String)>,
    pub scrolled_px: i32,
    pub platform: Option<RecordingPlatform>,
}

impl Default for RecordingShell {
    fn default() -> Self {
        Self {
            slot_width: 100.0,
            viewport_width: 600.0,
            edge_px: 48.0,
            timeline_top: 0.0,
            missing: None,
            hand: None,
            timeline: Vec::new(),
            score: None,
            feedback: None,
            feedback_shown: 0,
            indicator: None,
            alerts: Vec::new(),
            confirms: Vec::new(),
            confirm_answer: false,
            game_end: None,
            scrolled_px: 0,
            platform: None,
        }
    }
}

impl RecordingShell {
    pub fn with_platform() -> Self {
        Self {
            platform: Some(RecordingPlatform {
                confirm_answer: true,
                ..RecordingPlatform::default()
            }),
            ..Self::default()
        }
    }

    /// Pointer x that resolves to `index` on the current timeline.
    pub fn slot_x(&self, index: usize) -> f32 {
        index as f32 * self.slot_width
    }

    pub fn years(&self) -> Vec<i32> {
        self.timeline.iter().map(|e| e.year).collect()
    }
}

impl HostShell for RecordingShell {
    fn mount(&mut self) -> Result<(), GameError> {
        match self.missing {
            Some(element) => Err(GameError::MissingHostElement(element)),
            None => Ok(()),
        }
    }

    fn render_hand(&mut self, card: Option<&EventRecord>) {
        self.hand = card.cloned();
    }

    fn render_timeline(&mut self, events: &[EventRecord]) {
        self.timeline = events.to_vec();
    }

    fn render_score(&mut self, board: &Scoreboard) {
        self.score = Some(*board);
    }

    fn show_feedback(&mut self, accepted: bool) {
        self.feedback = Some(accepted);
        self.feedback_shown += 1;
    }

    fn hide_feedback(&mut self) {
        self.feedback = None;
    }

    fn show_indicator(&mut self, slot: Option<usize>) {
        self.indicator = slot;
    }

    fn show_game_end(&mut self, outcome: GameOutcome, score: u32, message: &str) {
        self.game_end = Some((outcome, score, message.to_string()));
    }

    fn resolve_insertion_index(&self, pointer_x: f32) -> usize {
        let x = pointer_x + self.scrolled_px as f32;
        (0..self.timeline.len())
            .filter(|&i| (i as f32 + 0.5) * self.slot_width < x)
            .count()
    }

    fn hit_timeline(&self, pos: Point) -> bool {
        pos.y >= self.timeline_top
    }

    fn edge_zone(&self, pos: Point) -> Option<ScrollDir> {
        if !self.hit_timeline(pos) {
            None
        } else if pos.x < self.edge_px {
            Some(ScrollDir::Left)
        } else if pos.x > self.viewport_width - self.edge_px {
            Some(ScrollDir::Right)
        } else {
            None
        }
    }

    fn scroll_timeline(&mut self, delta_px: i32) {
        self.scrolled_px = self.scrolled_px.saturating_add(delta_px);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.confirm_answer
    }

    fn platform(&mut self) -> Option<&mut dyn HostPlatform> {
        self.platform
            .as_mut()
            .map(|platform| platform as &mut dyn HostPlatform)
    }
}

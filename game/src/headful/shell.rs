use std::collections::HashSet;
use std::time::Duration;

use engine::surface::SurfaceSize;

use crate::catalog::{EventId, EventRecord};
use crate::error::GameError;
use crate::headful::layout::TableLayout;
use crate::headful::sfx::FeedbackSfx;
use crate::host::{Haptic, HostPlatform, HostShell};
use crate::input::Point;
use crate::session::{GameOutcome, Scoreboard};
use crate::timers::ScrollDir;

const BANNER_TIME: Duration = Duration::from_millis(2_500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub remaining: Duration,
}

/// Windowed host: keeps a render model of the table and acts as its own platform.
pub struct TableShell {
    layout: TableLayout,
    edge_px: f32,
    hand: Option<EventRecord>,
    timeline: Vec<EventRecord>,
    flipped: HashSet<EventId>,
    scoreboard: Option<Scoreboard>,
    feedback: Option<bool>,
    indicator: Option<usize>,
    scroll_px: i32,
    banner: Option<Banner>,
    game_end: Option<(GameOutcome, String)>,
    main_button: Option<String>,
    drag_pos: Option<Point>,
    exit_armed: bool,
    sfx: Option<FeedbackSfx>,
}

impl TableShell {
    pub fn new(size: SurfaceSize, edge_px: f32, sfx: Option<FeedbackSfx>) -> Self {
        Self {
            layout: TableLayout::compute(size),
            edge_px,
            hand: None,
            timeline: Vec::new(),
            flipped: HashSet::new(),
            scoreboard: None,
            feedback: None,
            indicator: None,
            scroll_px: 0,
            banner: None,
            game_end: None,
            main_button: None,
            drag_pos: None,
            exit_armed: false,
            sfx,
        }
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    pub fn resize(&mut self, size: SurfaceSize) {
        let layout = TableLayout::compute(size);
        if layout != self.layout {
            self.layout = layout;
            self.scroll_px = self.scroll_px.clamp(0, self.layout.max_scroll(self.timeline.len()));
        }
    }

    pub fn hand(&self) -> Option<&EventRecord> {
        self.hand.as_ref()
    }

    pub fn timeline(&self) -> &[EventRecord] {
        &self.timeline
    }

    pub fn is_flipped(&self, id: &EventId) -> bool {
        self.flipped.contains(id)
    }

    pub fn scoreboard(&self) -> Option<&Scoreboard> {
        self.scoreboard.as_ref()
    }

    pub fn feedback(&self) -> Option<bool> {
        self.feedback
    }

    pub fn indicator(&self) -> Option<usize> {
        self.indicator
    }

    pub fn scroll_px(&self) -> i32 {
        self.scroll_px
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn game_end(&self) -> Option<&(GameOutcome, String)> {
        self.game_end.as_ref()
    }

    pub fn main_button(&self) -> Option<&str> {
        self.main_button.as_deref()
    }

    pub fn drag_pos(&self) -> Option<Point> {
        self.drag_pos
    }

    pub fn set_drag_pos(&mut self, pos: Option<Point>) {
        self.drag_pos = pos;
    }

    pub fn hits_hand(&self, pos: Point) -> bool {
        self.hand.is_some() && self.layout.hand_card.contains_f(pos.x, pos.y)
    }

    pub fn hits_main_button(&self, pos: Point) -> bool {
        self.main_button.is_some() && self.layout.main_button.contains_f(pos.x, pos.y)
    }

    /// Turns a placed card over to show its notice text, or back.
    pub fn flip_at(&mut self, pos: Point) -> bool {
        let Some(index) = self.layout.card_at(self.timeline.len(), self.scroll_px, pos) else {
            return false;
        };
        let id = self.timeline[index].id.clone();
        if !self.flipped.remove(&id) {
            self.flipped.insert(id);
        }
        true
    }

    /// Ages the banner; an expired exit prompt disarms.
    pub fn advance(&mut self, dt: Duration) {
        if let Some(banner) = self.banner.as_mut() {
            banner.remaining = banner.remaining.saturating_sub(dt);
            if banner.remaining.is_zero() {
                self.banner = None;
                self.exit_armed = false;
            }
        }
    }

    fn show_banner(&mut self, text: &str) {
        self.banner = Some(Banner {
            text: text.to_string(),
            remaining: BANNER_TIME,
        });
    }
}

impl HostShell for TableShell {
    fn mount(&mut self) -> Result<(), GameError> {
        if self.layout.timeline.h == 0 {
            return Err(GameError::MissingHostElement("timeline"));
        }
        if self.layout.hand_card.w == 0 || self.layout.hand_card.h == 0 {
            return Err(GameError::MissingHostElement("hand"));
        }
        Ok(())
    }

    fn render_hand(&mut self, card: Option<&EventRecord>) {
        self.hand = card.cloned();
        if self.hand.is_none() {
            self.drag_pos = None;
        }
    }

    fn render_timeline(&mut self, events: &[EventRecord]) {
        self.timeline = events.to_vec();
        self.flipped.retain(|id| events.iter().any(|e| &e.id == id));
        self.scroll_px = self.scroll_px.clamp(0, self.layout.max_scroll(events.len()));
    }

    fn render_score(&mut self, board: &Scoreboard) {
        self.scoreboard = Some(*board);
    }

    fn show_feedback(&mut self, accepted: bool) {
        self.feedback = Some(accepted);
    }

    fn hide_feedback(&mut self) {
        self.feedback = None;
    }

    fn show_indicator(&mut self, slot: Option<usize>) {
        self.indicator = slot;
    }

    fn show_game_end(&mut self, outcome: GameOutcome, _score: u32, message: &str) {
        self.drag_pos = None;
        self.game_end = Some((outcome, message.to_string()));
    }

    fn resolve_insertion_index(&self, pointer_x: f32) -> usize {
        self.layout
            .insertion_index(self.timeline.len(), self.scroll_px, pointer_x)
    }

    fn hit_timeline(&self, pos: Point) -> bool {
        self.layout.timeline.contains_f(pos.x, pos.y)
    }

    fn edge_zone(&self, pos: Point) -> Option<ScrollDir> {
        self.layout.edge_zone(pos, self.edge_px)
    }

    fn scroll_timeline(&mut self, delta_px: i32) {
        let max = self.layout.max_scroll(self.timeline.len());
        self.scroll_px = self.scroll_px.saturating_add(delta_px).clamp(0, max);
    }

    fn alert(&mut self, message: &str) {
        self.show_banner(message);
    }

    fn platform(&mut self) -> Option<&mut dyn HostPlatform> {
        Some(self as &mut dyn HostPlatform)
    }
}

impl HostPlatform for TableShell {
    fn haptic(&mut self, kind: Haptic) {
        if let Some(sfx) = self.sfx.as_ref() {
            sfx.play(kind);
        }
    }

    fn alert(&mut self, message: &str) {
        self.show_banner(message);
    }

    /// There is no modal dialog: the first request arms, a second one while the prompt is
    /// still up confirms.
    fn confirm(&mut self, message: &str) -> bool {
        if self.exit_armed {
            return true;
        }
        self.exit_armed = true;
        self.show_banner(&format!("{message}\nPress Esc again to leave."));
        false
    }

    fn set_main_button(&mut self, label: Option<&str>) {
        self.main_button = label.map(str::to_string);
        if label.is_some() {
            self.game_end = None;
        }
    }
}

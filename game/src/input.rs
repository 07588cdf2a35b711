//! Input adapters.
//!
//! Native drag events and touch events are translated into one `PointerEvent` stream, which
//! is the only thing the driver understands. Each adapter keeps just enough state to turn its
//! event source into well-formed start → move* → release/leave sequences.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputModality {
    Drag,
    Touch,
}

impl InputModality {
    pub fn name(self) -> &'static str {
        match self {
            InputModality::Drag => "drag",
            InputModality::Touch => "touch",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Where a released card ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// The event source already knows the release happened over the timeline.
    Timeline,
    /// Released somewhere else: the card goes back to the hand.
    Outside,
    /// Unknown; the driver asks the shell to hit-test the release point.
    HitTest,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Start {
        modality: InputModality,
    },
    Move {
        modality: InputModality,
        pos: Point,
    },
    /// The pointer left the drop surface while still dragging.
    Leave {
        modality: InputModality,
    },
    Release {
        modality: InputModality,
        pos: Option<Point>,
        target: DropTarget,
    },
}

impl PointerEvent {
    pub fn modality(&self) -> InputModality {
        match *self {
            PointerEvent::Start { modality }
            | PointerEvent::Move { modality, .. }
            | PointerEvent::Leave { modality }
            | PointerEvent::Release { modality, .. } => modality,
        }
    }
}

/// HTML5-style drag-and-drop events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    DragStart,
    DragOver(Point),
    DragLeave,
    Drop(Point),
    /// Always fires last, whether or not a drop happened.
    DragEnd,
}

#[derive(Debug, Default)]
pub struct DragAdapter {
    active: bool,
    dropped: bool,
}

impl DragAdapter {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.dropped = false;
    }

    pub fn translate(&mut self, event: DragEvent) -> Option<PointerEvent> {
        let modality = InputModality::Drag;
        match event {
            DragEvent::DragStart => {
                self.active = true;
                self.dropped = false;
                Some(PointerEvent::Start { modality })
            }
            DragEvent::DragOver(pos) if self.active => Some(PointerEvent::Move { modality, pos }),
            DragEvent::DragLeave if self.active => Some(PointerEvent::Leave { modality }),
            DragEvent::Drop(pos) if self.active => {
                self.dropped = true;
                Some(PointerEvent::Release {
                    modality,
                    pos: Some(pos),
                    target: DropTarget::Timeline,
                })
            }
            DragEvent::DragEnd if self.active => {
                let dropped = self.dropped;
                self.reset();
                // A drop already resolved this drag.
                (!dropped).then_some(PointerEvent::Release {
                    modality,
                    pos: None,
                    target: DropTarget::Outside,
                })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    Start { id: u64, pos: Point },
    Move { id: u64, pos: Point },
    End { id: u64, pos: Point },
    Cancel { id: u64, pos: Point },
}

/// Follows the first finger that touches the card; other fingers are ignored.
#[derive(Debug, Default)]
pub struct TouchAdapter {
    active_id: Option<u64>,
}

impl TouchAdapter {
    pub fn is_active(&self) -> bool {
        self.active_id.is_some()
    }

    pub fn reset(&mut self) {
        self.active_id = None;
    }

    pub fn translate(&mut self, event: TouchEvent) -> Option<PointerEvent> {
        let modality = InputModality::Touch;
        match event {
            TouchEvent::Start { id, .. } => {
                if self.active_id.is_some() {
                    return None;
                }
                self.active_id = Some(id);
                Some(PointerEvent::Start { modality })
            }
            TouchEvent::Move { id, pos } if self.active_id == Some(id) => {
                Some(PointerEvent::Move { modality, pos })
            }
            TouchEvent::End { id, pos } | TouchEvent::Cancel { id, pos }
                if self.active_id == Some(id) =>
            {
                self.active_id = None;
                Some(PointerEvent::Release {
                    modality,
                    pos: Some(pos),
                    target: DropTarget::HitTest,
                })
            }
            _ => None,
        }
    }
}

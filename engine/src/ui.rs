//! Layout primitives.
//!
//! `Rect` uses a signed origin so content can be scrolled partly (or fully) off-screen;
//! renderers clip against the surface.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w as i32)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h as i32)
    }

    pub fn center_x(&self) -> i32 {
        self.x.saturating_add((self.w / 2) as i32)
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub fn contains_f(&self, px: f32, py: f32) -> bool {
        self.contains(px.floor() as i32, py.floor() as i32)
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Returns the rectangle inset by `insets`; the size saturates to 0.
    pub fn inset(&self, insets: Insets) -> Self {
        let w = self
            .w
            .saturating_sub(insets.left.saturating_add(insets.right));
        let h = self
            .h
            .saturating_sub(insets.top.saturating_add(insets.bottom));
        Self {
            x: self.x.saturating_add(insets.left as i32),
            y: self.y.saturating_add(insets.top as i32),
            w,
            h,
        }
    }

    /// Splits off a band of `h` pixels from the top, returning `(top, rest)`.
    pub fn split_top(&self, h: u32) -> (Self, Self) {
        let h = h.min(self.h);
        let top = Self { h, ..*self };
        let rest = Self {
            y: self.y.saturating_add(h as i32),
            h: self.h - h,
            ..*self
        };
        (top, rest)
    }

    /// Places a child of `size` inside this rect; oversized children are clamped.
    pub fn place(&self, size: Size, anchor: Anchor) -> Self {
        let w = size.w.min(self.w);
        let h = size.h.min(self.h);
        let free_w = (self.w - w) as i32;
        let free_h = (self.h - h) as i32;

        let x = match anchor {
            Anchor::TopLeft | Anchor::CenterLeft => self.x,
            Anchor::TopCenter | Anchor::Center | Anchor::BottomCenter => self.x + free_w / 2,
            Anchor::TopRight | Anchor::CenterRight => self.x + free_w,
        };
        let y = match anchor {
            Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight => self.y,
            Anchor::CenterLeft | Anchor::Center | Anchor::CenterRight => self.y + free_h / 2,
            Anchor::BottomCenter => self.y + free_h,
        };

        Self { x, y, w, h }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn all(v: u32) -> Self {
        Self {
            left: v,
            top: v,
            right: v,
            bottom: v,
        }
    }

    pub const fn symmetric(horizontal: u32, vertical: u32) -> Self {
        Self {
            left: horizontal,
            top: vertical,
            right: horizontal,
            bottom: vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomCenter,
}

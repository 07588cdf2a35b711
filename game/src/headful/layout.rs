use engine::surface::SurfaceSize;
use engine::ui::{Anchor, Insets, Rect, Size};

use crate::input::Point;
use crate::timers::ScrollDir;

pub const HEADER_H: u32 = 44;
pub const CARD_W: u32 = 168;
pub const CARD_H: u32 = 112;
pub const CARD_GAP: u32 = 14;
pub const BUTTON_W: u32 = 220;
pub const BUTTON_H: u32 = 40;
const PAD: u32 = 16;

/// Screen regions of the card table for one surface size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub bounds: Rect,
    pub header: Rect,
    pub timeline: Rect,
    pub hand_area: Rect,
    pub hand_card: Rect,
    pub main_button: Rect,
    pub banner: Rect,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::compute(SurfaceSize::new(960, 640))
    }
}

impl TableLayout {
    pub fn compute(size: SurfaceSize) -> Self {
        let bounds = Rect::from_size(size.width, size.height);
        let (header, rest) = bounds.split_top(HEADER_H);
        let (timeline, rest) = rest.split_top(CARD_H + 2 * PAD);
        let (hand_area, footer) = rest.split_top(rest.h.saturating_sub(BUTTON_H + 2 * PAD));

        let hand_card = hand_area.place(Size::new(CARD_W, CARD_H), Anchor::Center);
        let main_button = footer.place(Size::new(BUTTON_W, BUTTON_H), Anchor::Center);
        let banner = hand_area
            .inset(Insets::symmetric(PAD * 2, PAD))
            .place(Size::new(bounds.w, 72), Anchor::TopCenter);

        Self {
            bounds,
            header,
            timeline,
            hand_area,
            hand_card,
            main_button,
            banner,
        }
    }

    fn slot_w() -> i32 {
        (CARD_W + CARD_GAP) as i32
    }

    fn origin_x(&self, scroll_px: i32) -> i32 {
        self.timeline.x + PAD as i32 - scroll_px
    }

    /// Where the placed card at `index` is drawn.
    pub fn card_rect(&self, index: usize, scroll_px: i32) -> Rect {
        let x = self.origin_x(scroll_px) + index as i32 * Self::slot_w();
        Rect::new(x, self.timeline.y + PAD as i32, CARD_W, CARD_H)
    }

    /// Thin bar in the gap before slot `index`.
    pub fn indicator_rect(&self, index: usize, scroll_px: i32) -> Rect {
        let x = self.origin_x(scroll_px) + index as i32 * Self::slot_w() - (CARD_GAP as i32) / 2 - 2;
        Rect::new(x, self.timeline.y + PAD as i32 / 2, 4, CARD_H + PAD)
    }

    /// Number of placed cards whose centre lies left of `x`.
    pub fn insertion_index(&self, count: usize, scroll_px: i32, x: f32) -> usize {
        (0..count)
            .filter(|&i| (self.card_rect(i, scroll_px).center_x() as f32) < x)
            .count()
    }

    pub fn card_at(&self, count: usize, scroll_px: i32, pos: Point) -> Option<usize> {
        (0..count).find(|&i| self.card_rect(i, scroll_px).contains_f(pos.x, pos.y))
    }

    /// Largest useful scroll offset: the last card's right edge meets the viewport edge.
    pub fn max_scroll(&self, count: usize) -> i32 {
        let content = PAD as i32 * 2 + count as i32 * Self::slot_w();
        (content - self.timeline.w as i32).max(0)
    }

    pub fn edge_zone(&self, pos: Point, edge_px: f32) -> Option<ScrollDir> {
        if !self.timeline.contains_f(pos.x, pos.y) {
            return None;
        }
        let left = self.timeline.x as f32;
        let right = self.timeline.right() as f32;
        if pos.x < left + edge_px {
            Some(ScrollDir::Left)
        } else if pos.x >= right - edge_px {
            Some(ScrollDir::Right)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stack_top_to_bottom() {
        let l = TableLayout::compute(SurfaceSize::new(800, 600));
        assert_eq!(l.header.y, 0);
        assert_eq!(l.timeline.y, HEADER_H as i32);
        assert!(l.hand_area.y >= l.timeline.bottom());
        assert!(l.main_button.y >= l.hand_area.bottom());
        assert!(l.hand_area.contains(l.hand_card.center_x(), l.hand_card.y));
    }

    #[test]
    fn insertion_index_follows_card_centres() {
        let l = TableLayout::compute(SurfaceSize::new(800, 600));
        let first = l.card_rect(0, 0);
        let second = l.card_rect(1, 0);
        assert_eq!(l.insertion_index(2, 0, first.x as f32), 0);
        assert_eq!(l.insertion_index(2, 0, (first.center_x() + 1) as f32), 1);
        assert_eq!(l.insertion_index(2, 0, (second.center_x() + 1) as f32), 2);
        assert_eq!(l.insertion_index(0, 0, 500.0), 0);
    }

    #[test]
    fn scrolling_shifts_hit_testing() {
        let l = TableLayout::compute(SurfaceSize::new(800, 600));
        let r = l.card_rect(3, 0);
        let pos = Point::new(r.center_x() as f32, (r.y + 4) as f32);
        assert_eq!(l.card_at(5, 0, pos), Some(3));
        assert_eq!(l.card_at(5, l.card_rect(1, 0).x - l.card_rect(0, 0).x, pos), Some(4));
    }

    #[test]
    fn edge_zone_only_inside_the_timeline() {
        let l = TableLayout::compute(SurfaceSize::new(800, 600));
        let y = (l.timeline.y + 10) as f32;
        assert_eq!(l.edge_zone(Point::new(5.0, y), 40.0), Some(ScrollDir::Left));
        assert_eq!(l.edge_zone(Point::new(795.0, y), 40.0), Some(ScrollDir::Right));
        assert_eq!(l.edge_zone(Point::new(400.0, y), 40.0), None);
        assert_eq!(l.edge_zone(Point::new(5.0, 2.0), 40.0), None);
    }

    #[test]
    fn max_scroll_is_zero_until_cards_overflow() {
        let l = TableLayout::compute(SurfaceSize::new(800, 600));
        assert_eq!(l.max_scroll(2), 0);
        assert!(l.max_scroll(10) > 0);
    }
}

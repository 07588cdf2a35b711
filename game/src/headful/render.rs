use engine::graphics::{Color, Renderer2d, glyph_advance_x, line_advance_y, text_width};
use engine::ui::{Anchor, Insets, Rect, Size};

use crate::catalog::EventRecord;
use crate::headful::layout::{CARD_H, CARD_W};
use crate::headful::shell::TableShell;
use crate::session::GameOutcome;

const BG: Color = [24, 28, 38, 255];
const HEADER_BG: Color = [34, 40, 54, 255];
const TIMELINE_BG: Color = [30, 52, 62, 255];
const CARD_BG: Color = [236, 230, 214, 255];
const CARD_BACK: Color = [196, 214, 236, 255];
const CARD_EDGE: Color = [90, 80, 60, 255];
const INK: Color = [30, 30, 30, 255];
const TEXT: Color = [232, 236, 244, 255];
const MUTED: Color = [140, 150, 170, 255];
const ACCENT: Color = [250, 200, 80, 255];
const GOOD: Color = [80, 200, 120, 255];
const BAD: Color = [230, 80, 80, 255];

const TEXT_SCALE: u32 = 2;

/// Greedy word wrap to at most `max_chars` per line. Overlong words are split.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let word: String = word.into_iter().collect();
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&word);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

fn chars_fitting(width: u32, scale: u32) -> usize {
    (width / glyph_advance_x(scale)).max(1) as usize
}

fn draw_lines(r: &mut dyn Renderer2d, area: Rect, lines: &[String], color: Color, scale: u32) {
    let max_lines = (area.h / line_advance_y(scale)).max(1) as usize;
    let mut y = area.y;
    for line in lines.iter().take(max_lines) {
        let w = text_width(line, scale);
        let x = area.x + (area.w.saturating_sub(w) / 2) as i32;
        r.draw_text_scaled(x, y, line, color, scale);
        y += line_advance_y(scale) as i32;
    }
}

fn draw_card(r: &mut dyn Renderer2d, rect: Rect, card: &EventRecord, show_year: bool, flipped: bool) {
    r.fill_rect(rect, if flipped { CARD_BACK } else { CARD_BG });
    r.rect_outline(rect, CARD_EDGE);
    let body = rect.inset(Insets::all(8));
    let text = if flipped {
        card.display.notice.as_str()
    } else {
        card.name()
    };
    let scale = if flipped { 1 } else { TEXT_SCALE };
    let lines = wrap(text, chars_fitting(body.w, scale));
    draw_lines(r, body, &lines, INK, scale);

    if show_year && !flipped {
        let year = card.year.to_string();
        let w = text_width(&year, TEXT_SCALE + 1);
        let h = line_advance_y(TEXT_SCALE + 1);
        let slot = body.place(Size::new(w, h), Anchor::BottomCenter);
        r.draw_text_scaled(slot.x, slot.y, &year, CARD_EDGE, TEXT_SCALE + 1);
    }
}

fn draw_header(r: &mut dyn Renderer2d, shell: &TableShell) {
    let header = shell.layout().header;
    r.fill_rect(header, HEADER_BG);
    let Some(board) = shell.scoreboard() else {
        return;
    };
    let hearts = "*".repeat(board.lives as usize);
    let text = format!(
        "SCORE {}   LIVES {}   CARDS {}/{}",
        board.score, hearts, board.progress, board.total_cards
    );
    let y = header.y + (header.h.saturating_sub(line_advance_y(TEXT_SCALE)) / 2) as i32;
    r.draw_text_scaled(header.x + 16, y, &text, TEXT, TEXT_SCALE);
}

fn draw_timeline(r: &mut dyn Renderer2d, shell: &TableShell) {
    let layout = shell.layout();
    r.fill_rect(layout.timeline, TIMELINE_BG);
    if shell.timeline().is_empty() {
        let hint = "DROP YOUR FIRST CARD HERE";
        let w = text_width(hint, TEXT_SCALE);
        let at = layout.timeline.place(
            Size::new(w, line_advance_y(TEXT_SCALE)),
            Anchor::Center,
        );
        r.draw_text_scaled(at.x, at.y, hint, MUTED, TEXT_SCALE);
    }
    for (i, card) in shell.timeline().iter().enumerate() {
        let rect = layout.card_rect(i, shell.scroll_px());
        if rect.right() < layout.timeline.x || rect.x > layout.timeline.right() {
            continue;
        }
        draw_card(r, rect, card, true, shell.is_flipped(&card.id));
    }
    if let Some(slot) = shell.indicator() {
        r.fill_rect(layout.indicator_rect(slot, shell.scroll_px()), ACCENT);
    }
}

fn draw_hand(r: &mut dyn Renderer2d, shell: &TableShell) {
    let layout = shell.layout();
    let slot = layout.hand_card;
    match (shell.hand(), shell.drag_pos()) {
        (None, _) => {
            r.rect_outline(slot, MUTED);
            let lines = wrap("DRAW A CARD", chars_fitting(slot.w, TEXT_SCALE));
            draw_lines(r, slot.inset(Insets::all(12)), &lines, MUTED, TEXT_SCALE);
        }
        (Some(card), None) => draw_card(r, slot, card, false, false),
        (Some(card), Some(pos)) => {
            r.rect_outline(slot, MUTED);
            let dragged = Rect::new(
                pos.x as i32 - (CARD_W / 2) as i32,
                pos.y as i32 - (CARD_H / 2) as i32,
                CARD_W,
                CARD_H,
            );
            draw_card(r, dragged, card, false, false);
        }
    }

    if let Some(accepted) = shell.feedback() {
        let (label, color) = if accepted { ("OK!", GOOD) } else { ("X", BAD) };
        let scale = TEXT_SCALE * 3;
        let w = text_width(label, scale);
        let x = slot.right() + 24;
        let y = slot.y + (slot.h.saturating_sub(line_advance_y(scale)) / 2) as i32;
        r.blend_rect(Rect::new(x - 8, y - 8, w + 16, line_advance_y(scale) + 16), color, 80);
        r.draw_text_scaled(x, y, label, color, scale);
    }
}

fn draw_button(r: &mut dyn Renderer2d, shell: &TableShell) {
    let Some(label) = shell.main_button() else {
        return;
    };
    let rect = shell.layout().main_button;
    r.fill_rect(rect, ACCENT);
    let w = text_width(label, TEXT_SCALE);
    let at = rect.place(Size::new(w, line_advance_y(TEXT_SCALE)), Anchor::Center);
    r.draw_text_scaled(at.x, at.y, label, INK, TEXT_SCALE);
}

fn draw_overlay(r: &mut dyn Renderer2d, area: Rect, text: &str, color: Color, alpha: u8) {
    r.blend_rect(area, color, alpha);
    r.rect_outline(area, TEXT);
    let body = area.inset(Insets::symmetric(12, 10));
    let lines = wrap(text, chars_fitting(body.w, TEXT_SCALE));
    draw_lines(r, body, &lines, TEXT, TEXT_SCALE);
}

pub fn draw_table(r: &mut dyn Renderer2d, shell: &TableShell) {
    r.clear(BG);
    draw_header(r, shell);
    draw_timeline(r, shell);
    draw_hand(r, shell);
    draw_button(r, shell);

    let layout = shell.layout();
    if let Some((outcome, message)) = shell.game_end() {
        let color = match outcome {
            GameOutcome::Won => GOOD,
            GameOutcome::Lost => BAD,
        };
        let area = layout.hand_area.inset(Insets::symmetric(48, 32));
        let text = format!("GAME OVER\n{message}\nPRESS R TO RESTART");
        draw_overlay(r, area, &text, color, 200);
    } else if let Some(banner) = shell.banner() {
        draw_overlay(r, layout.banner, &banner.text, HEADER_BG, 220);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::surface::{RgbaBufferSurface, SurfaceSize};

    use crate::host::HostShell;

    #[test]
    fn wrap_breaks_on_words_and_splits_long_ones() {
        assert_eq!(wrap("Fall of Berlin Wall", 8), vec!["Fall of", "Berlin", "Wall"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("one\ntwo", 20), vec!["one", "two"]);
        assert!(wrap("", 5).is_empty());
    }

    #[test]
    fn table_renders_cards_and_indicator() {
        let size = SurfaceSize::new(800, 600);
        let mut shell = TableShell::new(size, 40.0, None);
        shell.render_timeline(&[EventRecord::new("Moon Landing", 1969, "", "")]);
        shell.show_indicator(Some(1));

        let mut surface = RgbaBufferSurface::new(size);
        draw_table(&mut surface.renderer(), &shell);

        let card = shell.layout().card_rect(0, 0);
        assert_eq!(surface.pixel(card.x as u32 + 1, card.y as u32 + 1), Some(CARD_BG));
        let bar = shell.layout().indicator_rect(1, 0);
        assert_eq!(
            surface.pixel(bar.x as u32 + 1, bar.y as u32 + 1),
            Some(ACCENT)
        );
    }
}

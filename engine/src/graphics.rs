use crate::{surface::SurfaceSize, ui::Rect};

pub type Color = [u8; 4];

// Block font: 3x5 glyphs, uppercase only.
pub const DEFAULT_TEXT_SCALE: u32 = 2;
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

pub fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

pub fn line_advance_y(scale: u32) -> u32 {
    (GLYPH_H + 1) * scale.max(1)
}

/// Width in pixels of the widest line of `text` at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.lines()
        .map(|line| line.chars().count() as u32 * glyph_advance_x(scale))
        .max()
        .unwrap_or(0)
}

/// 2D drawing interface used by game code.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Alpha-blended fill over existing content.
    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    fn rect_outline(&mut self, rect: Rect, color: Color);
    fn draw_text_scaled(&mut self, x: i32, y: i32, text: &str, color: Color, scale: u32);

    fn draw_text(&mut self, x: i32, y: i32, text: &str, color: Color) {
        self.draw_text_scaled(x, y, text, color, DEFAULT_TEXT_SCALE);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// Pixel span of `rect` that lies on a surface of `size`, as `(x0, y0, x1, y1)`.
fn clip(rect: Rect, size: SurfaceSize) -> Option<(usize, usize, usize, usize)> {
    let x0 = rect.x.max(0);
    let y0 = rect.y.max(0);
    let x1 = rect.right().min(size.width as i32);
    let y1 = rect.bottom().min(size.height as i32);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
}

/// CPU renderer drawing into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    fn for_each_pixel(&mut self, rect: Rect, mut f: impl FnMut(&mut [u8])) {
        if self.frame.len() < self.size.rgba_len() {
            return;
        }
        let Some((x0, y0, x1, y1)) = clip(rect, self.size) else {
            return;
        };
        let stride = self.size.width as usize * 4;
        for y in y0..y1 {
            let row = &mut self.frame[y * stride + x0 * 4..y * stride + x1 * 4];
            for px in row.chunks_exact_mut(4) {
                f(px);
            }
        }
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.for_each_pixel(rect, |px| px.copy_from_slice(&color));
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        match alpha {
            0 => {}
            255 => self.fill_rect(rect, color),
            _ => {
                let a = alpha as u32;
                let inv = 255 - a;
                self.for_each_pixel(rect, |px| {
                    for (channel, src) in px.iter_mut().zip(color).take(3) {
                        *channel = ((*channel as u32 * inv + src as u32 * a + 127) / 255) as u8;
                    }
                    px[3] = 255;
                });
            }
        }
    }

    fn rect_outline(&mut self, rect: Rect, color: Color) {
        if rect.w == 0 || rect.h == 0 {
            return;
        }
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - 1, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.y, 1, rect.h), color);
        self.fill_rect(Rect::new(rect.right() - 1, rect.y, 1, rect.h), color);
    }

    fn draw_text_scaled(&mut self, x: i32, y: i32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let adv_x = glyph_advance_x(scale) as i32;
        let adv_y = line_advance_y(scale) as i32;

        let mut cursor_x = x;
        let mut cursor_y = y;
        for ch in text.chars() {
            match ch {
                '\n' => {
                    cursor_x = x;
                    cursor_y += adv_y;
                }
                ' ' => cursor_x += adv_x,
                _ => {
                    self.draw_glyph(cursor_x, cursor_y, ch, color, scale);
                    cursor_x += adv_x;
                }
            }
        }
    }
}

impl CpuRenderer<'_> {
    fn draw_glyph(&mut self, x: i32, y: i32, ch: char, color: Color, scale: u32) {
        let s = scale as i32;
        for (row, bits) in glyph_rows(ch).into_iter().enumerate() {
            for col in 0..GLYPH_W {
                if bits & (1u8 << (GLYPH_W - 1 - col)) == 0 {
                    continue;
                }
                let px = Rect::new(x + col as i32 * s, y + row as i32 * s, scale, scale);
                self.fill_rect(px, color);
            }
        }
    }
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],

        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        '*' => [0b101, 0b010, 0b111, 0b010, 0b101],

        _ => [0b111, 0b001, 0b010, 0b000, 0b010],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(buf: &[u8], size: SurfaceSize, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * size.width + x) * 4) as usize;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    }

    #[test]
    fn fill_rect_clips_negative_and_oversized_rects() {
        let size = SurfaceSize::new(8, 8);
        let mut buf = vec![0u8; size.rgba_len()];
        let mut r = CpuRenderer::new(&mut buf, size);
        r.fill_rect(Rect::new(-4, -4, 6, 6), [255, 0, 0, 255]);
        r.fill_rect(Rect::new(6, 6, 100, 100), [0, 255, 0, 255]);

        assert_eq!(pixel(&buf, size, 0, 0), [255, 0, 0, 255]);
        assert_eq!(pixel(&buf, size, 1, 1), [255, 0, 0, 255]);
        assert_eq!(pixel(&buf, size, 2, 2), [0, 0, 0, 0]);
        assert_eq!(pixel(&buf, size, 7, 7), [0, 255, 0, 255]);
    }

    #[test]
    fn blend_rect_mixes_towards_color() {
        let size = SurfaceSize::new(2, 1);
        let mut buf = vec![0u8; size.rgba_len()];
        let mut r = CpuRenderer::new(&mut buf, size);
        r.blend_rect(Rect::from_size(1, 1), [200, 100, 0, 255], 128);

        let [red, green, blue, alpha] = pixel(&buf, size, 0, 0);
        assert!((99..=101).contains(&red));
        assert!((49..=51).contains(&green));
        assert_eq!(blue, 0);
        assert_eq!(alpha, 255);
        assert_eq!(pixel(&buf, size, 1, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn text_width_uses_longest_line() {
        assert_eq!(text_width("AB\nABCD", 1), 16);
        assert_eq!(text_width("", 2), 0);
    }

    #[test]
    fn draw_text_marks_glyph_pixels() {
        let size = SurfaceSize::new(16, 8);
        let mut buf = vec![0u8; size.rgba_len()];
        let mut r = CpuRenderer::new(&mut buf, size);
        r.draw_text_scaled(0, 0, "1", [9, 9, 9, 255], 1);

        // '1' has its stem in the middle column and a full bottom bar.
        assert_eq!(pixel(&buf, size, 1, 0), [9, 9, 9, 255]);
        assert_eq!(pixel(&buf, size, 0, 4), [9, 9, 9, 255]);
        assert_eq!(pixel(&buf, size, 0, 0), [0, 0, 0, 0]);
    }
}

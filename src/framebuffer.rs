//! 1bpp frame buffer in the panel's native page layout.
//!
//! Byte `(y / 8) * WIDTH + x`, bit `y % 8`, the same packing the textures
//! use. Sized for a 128x64 handheld screen.

use std::fmt::{self, Write};

use crate::display::{Colour, Display};

pub const SCREEN_WIDTH: u8 = 128;
pub const SCREEN_HEIGHT: u8 = 64;

const WIDTH: usize = SCREEN_WIDTH as usize;
const HEIGHT: usize = SCREEN_HEIGHT as usize;
const BUFFER_LEN: usize = WIDTH * HEIGHT / 8;

const GLYPH_WIDTH: i16 = 3;
const GLYPH_ADVANCE: i16 = GLYPH_WIDTH + 1;
const LINE_ADVANCE: i16 = 6;

pub struct FrameBuffer {
    bytes: [u8; BUFFER_LEN],
    cursor_x: i16,
    cursor_y: i16,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            bytes: [0; BUFFER_LEN],
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn clear(&mut self) {
        self.bytes.fill(0);
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    fn index(x: i16, y: i16) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x as usize >= WIDTH || y as usize >= HEIGHT {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some(((y / 8) * WIDTH + x, 1 << (y % 8)))
    }

    pub fn pixel(&self, x: i16, y: i16) -> bool {
        Self::index(x, y).is_some_and(|(i, mask)| self.bytes[i] & mask != 0)
    }

    pub fn lit_count(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }

    /// Unpacks to one `u32` per pixel, row-major, for presenting on a host
    /// surface.
    pub fn expand_into(&self, out: &mut [u32], on: u32, off: u32) {
        for (y, row) in out.chunks_mut(WIDTH).take(HEIGHT).enumerate() {
            let page = (y / 8) * WIDTH;
            let mask = 1u8 << (y % 8);
            for (x, px) in row.iter_mut().enumerate() {
                *px = if self.bytes[page + x] & mask != 0 { on } else { off };
            }
        }
    }

    #[inline]
    fn plot(&mut self, x: i16, y: i16, colour: Colour) {
        if let Some((i, mask)) = Self::index(x, y) {
            match colour {
                Colour::White => self.bytes[i] |= mask,
                Colour::Black => self.bytes[i] &= !mask,
            }
        }
    }

    /// Cohen-Sutherland clip against the screen. Returns the visible part.
    fn clip_line(
        mut x0: i32,
        mut y0: i32,
        mut x1: i32,
        mut y1: i32,
    ) -> Option<(i32, i32, i32, i32)> {
        const INSIDE: u8 = 0;
        const LEFT: u8 = 1;
        const RIGHT: u8 = 2;
        const BOTTOM: u8 = 4;
        const TOP: u8 = 8;
        // Four sides settle within a few passes per end; the cap only guards
        // against a stuck loop.
        const MAX_ITERATIONS: u32 = 16;

        let w = WIDTH as i32;
        let h = HEIGHT as i32;

        let outcode = |x: i32, y: i32| -> u8 {
            let mut code = INSIDE;
            if x < 0 {
                code |= LEFT;
            } else if x >= w {
                code |= RIGHT;
            }
            if y < 0 {
                code |= TOP;
            } else if y >= h {
                code |= BOTTOM;
            }
            code
        };

        let mut code0 = outcode(x0, y0);
        let mut code1 = outcode(x1, y1);

        for _ in 0..MAX_ITERATIONS {
            if (code0 | code1) == 0 {
                return Some((x0, y0, x1, y1));
            }
            if (code0 & code1) != 0 {
                return None;
            }

            let code_out = if code0 != 0 { code0 } else { code1 };
            let dx = (x1 - x0) as i64;
            let dy = (y1 - y0) as i64;

            let (x, y) = if (code_out & BOTTOM) != 0 {
                let y = h - 1;
                (x0 + (dx * (y - y0) as i64 / dy) as i32, y)
            } else if (code_out & TOP) != 0 {
                (x0 + (dx * (0 - y0) as i64 / dy) as i32, 0)
            } else if (code_out & RIGHT) != 0 {
                let x = w - 1;
                (x, y0 + (dy * (x - x0) as i64 / dx) as i32)
            } else {
                (0, y0 + (dy * (0 - x0) as i64 / dx) as i32)
            };

            if code_out == code0 {
                x0 = x;
                y0 = y;
                code0 = outcode(x0, y0);
            } else {
                x1 = x;
                y1 = y;
                code1 = outcode(x1, y1);
            }
        }
        None
    }

    fn draw_glyph(&mut self, c: char) {
        if c == '\n' {
            self.cursor_x = 0;
            self.cursor_y = self.cursor_y.saturating_add(LINE_ADVANCE);
            return;
        }
        if let Some(columns) = glyph(c) {
            for (dx, &column) in (0i16..).zip(columns.iter()) {
                for dy in 0..5i16 {
                    if column & (1u8 << dy) != 0 {
                        self.plot(
                            self.cursor_x.saturating_add(dx),
                            self.cursor_y.saturating_add(dy),
                            Colour::White,
                        );
                    }
                }
            }
        }
        self.cursor_x = self.cursor_x.saturating_add(GLYPH_ADVANCE);
    }
}

impl Display for FrameBuffer {
    fn width(&self) -> u8 {
        SCREEN_WIDTH
    }

    fn height(&self) -> u8 {
        SCREEN_HEIGHT
    }

    fn draw_pixel(&mut self, x: i16, y: i16, colour: Colour) {
        self.plot(x, y, colour);
    }

    fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16) {
        let Some((cx0, cy0, cx1, cy1)) =
            Self::clip_line(x0 as i32, y0 as i32, x1 as i32, y1 as i32)
        else {
            return;
        };

        let dx = (cx1 - cx0).abs();
        let dy = -((cy1 - cy0).abs());
        let sx = if cx0 < cx1 { 1 } else { -1 };
        let sy = if cy0 < cy1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (cx0, cy0);

        loop {
            self.plot(x as i16, y as i16, Colour::White);
            if x == cx1 && y == cy1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_fast_vline(&mut self, x: i16, y: i16, length: i16) {
        if length <= 0 || x < 0 || x as usize >= WIDTH {
            return;
        }
        let start = y.max(0);
        let end = y.saturating_add(length).min(HEIGHT as i16);
        for row in start..end {
            self.plot(x, row, Colour::White);
        }
    }

    fn set_cursor(&mut self, x: i16, y: i16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    fn print(&mut self, args: fmt::Arguments<'_>) {
        // Glyph drawing cannot fail.
        let _ = Cursor(self).write_fmt(args);
    }
}

struct Cursor<'a>(&'a mut FrameBuffer);

impl Write for Cursor<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            self.0.draw_glyph(c);
        }
        Ok(())
    }
}

/// 3x5 glyphs, one byte per column, bit 0 is the top row.
fn glyph(c: char) -> Option<[u8; 3]> {
    let columns = match c {
        '0' => [0b11111, 0b10001, 0b11111],
        '1' => [0b10010, 0b11111, 0b10000],
        '2' => [0b11101, 0b10101, 0b10111],
        '3' => [0b10101, 0b10101, 0b11111],
        '4' => [0b00111, 0b00100, 0b11111],
        '5' => [0b10111, 0b10101, 0b11101],
        '6' => [0b11111, 0b10101, 0b11101],
        '7' => [0b00001, 0b00001, 0b11111],
        '8' => [0b11111, 0b10101, 0b11111],
        '9' => [0b10111, 0b10101, 0b11111],
        '-' => [0b00100, 0b00100, 0b00100],
        '.' => [0b10000, 0b00000, 0b00000],
        _ => return None,
    };
    Some(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_uses_page_layout() {
        let mut fb = FrameBuffer::new();
        fb.draw_pixel(5, 10, Colour::White);
        assert_eq!(fb.as_bytes()[WIDTH + 5], 1 << 2);
        assert!(fb.pixel(5, 10));

        fb.draw_pixel(5, 10, Colour::Black);
        assert!(!fb.pixel(5, 10));
    }

    #[test]
    fn off_screen_writes_are_ignored() {
        let mut fb = FrameBuffer::new();
        fb.draw_pixel(-1, 0, Colour::White);
        fb.draw_pixel(0, SCREEN_HEIGHT as i16, Colour::White);
        fb.draw_fast_vline(200, 0, 10);
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn horizontal_line_is_inclusive() {
        let mut fb = FrameBuffer::new();
        fb.draw_line(2, 3, 6, 3);
        assert_eq!(fb.lit_count(), 5);
        assert!(fb.pixel(2, 3) && fb.pixel(6, 3));
    }

    #[test]
    fn line_is_clipped_to_screen() {
        let mut fb = FrameBuffer::new();
        fb.draw_line(-1000, 10, 1000, 10);
        assert_eq!(fb.lit_count(), WIDTH as u32);

        fb.clear();
        fb.draw_line(i16::MIN, i16::MIN, i16::MIN + 5, i16::MIN);
        assert_eq!(fb.lit_count(), 0);
    }

    #[test]
    fn line_crossing_two_corners_is_clipped_at_both_ends() {
        let mut fb = FrameBuffer::new();
        // slope 1/2 through the origin, outside on two sides at each end
        fb.draw_line(i16::MIN, -16384, i16::MAX, 16383);
        assert!(fb.pixel(0, 0));
        assert!(fb.pixel(126, 63));
        assert!(fb.lit_count() >= 127);
    }

    #[test]
    fn vline_clamps_both_ends() {
        let mut fb = FrameBuffer::new();
        fb.draw_fast_vline(7, -10, 30);
        assert_eq!(fb.lit_count(), 20);
        assert!(fb.pixel(7, 0) && fb.pixel(7, 19) && !fb.pixel(7, 20));
    }

    #[test]
    fn print_advances_cursor() {
        let mut fb = FrameBuffer::new();
        fb.set_cursor(0, 0);
        fb.print(format_args!("{}", 10));
        assert_eq!(fb.cursor_x, 2 * GLYPH_ADVANCE);
        // '1' and '0' light 8 and 12 pixels respectively
        assert_eq!(fb.lit_count(), 20);
    }

    #[test]
    fn expand_matches_pixels() {
        let mut fb = FrameBuffer::new();
        fb.draw_pixel(3, 9, Colour::White);
        let mut out = vec![0u32; WIDTH * HEIGHT];
        fb.expand_into(&mut out, 0xFFFFFF, 0);
        assert_eq!(out[9 * WIDTH + 3], 0xFFFFFF);
        assert_eq!(out.iter().filter(|&&p| p != 0).count(), 1);
    }
}

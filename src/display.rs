//! Drawing capability the renderers depend on.
//!
//! Coordinates are signed so callers can hand over off-screen geometry;
//! implementations clip.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Colour {
    Black,
    #[default]
    White,
}

impl From<u8> for Colour {
    /// Zero is black, anything else is white.
    fn from(value: u8) -> Self {
        if value == 0 { Colour::Black } else { Colour::White }
    }
}

pub trait Display {
    /// Screen width in pixels, at most 255.
    fn width(&self) -> u8;

    /// Screen height in pixels, at most 255.
    fn height(&self) -> u8;

    fn draw_pixel(&mut self, x: i16, y: i16, colour: Colour);

    /// Line in the default (white) colour, both endpoints inclusive.
    fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16);

    /// `length` pixels downward starting at `(x, y)`.
    fn draw_fast_vline(&mut self, x: i16, y: i16, length: i16);

    fn set_cursor(&mut self, x: i16, y: i16);

    /// Debug text at the cursor, advancing it.
    fn print(&mut self, args: fmt::Arguments<'_>);
}

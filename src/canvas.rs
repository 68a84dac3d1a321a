use crate::pos::Point;

/// An opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}
impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GREEN: Self = Self::rgb(0, 255, 0);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Fill colours for the two cell states plus the grid line colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub live: Color,
    pub dead: Color,
    pub line: Color,
}
impl Default for Palette {
    fn default() -> Self {
        Self {
            live: Color::GREEN,
            dead: Color::WHITE,
            line: Color::BLACK,
        }
    }
}

/// An axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}
impl Rect {
    #[inline]
    pub fn new(origin: Point, w: u32, h: u32) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            w,
            h,
        }
    }
}

/// A surface the game can draw itself onto
///
/// Presenting the finished frame is left to the host that owns the surface.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_line(&mut self, from: Point, to: Point, color: Color);
}

use std::ops::Add;

/// A position on the drawing surface, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}
impl Point {
    #[inline]
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Clamps the point into a `width` by `height` pixel surface
    #[inline]
    pub fn clamp_to(self, width: u32, height: u32) -> Self {
        let max_x = i32::try_from(width).unwrap_or(i32::MAX).saturating_sub(1).max(0);
        let max_y = i32::try_from(height).unwrap_or(i32::MAX).saturating_sub(1).max(0);
        Self {
            x: self.x.clamp(0, max_x),
            y: self.y.clamp(0, max_y),
        }
    }

    /// The grid cell this pixel falls into for a given cell size
    ///
    /// Returns [`None`] for points left of or above the surface origin.
    #[inline]
    pub fn to_cell(self, cell_size: u32) -> Option<CellPos> {
        if self.x < 0 || self.y < 0 || cell_size == 0 {
            return None;
        }
        Some(CellPos {
            row: self.y as usize / cell_size as usize,
            col: self.x as usize / cell_size as usize,
        })
    }
}
impl Add for Point {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// A cell coordinate in the grid, row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}
impl CellPos {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Top left pixel of this cell for a given cell size
    #[inline]
    pub fn origin(self, cell_size: u32) -> Point {
        Point {
            x: (self.col * cell_size as usize) as i32,
            y: (self.row * cell_size as usize) as i32,
        }
    }
}

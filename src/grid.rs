use crate::{pos::CellPos, rule};
use rand::Rng;

/// The 8 compass offsets around a cell as (row, col) deltas
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}
impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dead => Self::Alive,
            Self::Alive => Self::Dead,
        }
    }
}
impl From<bool> for Cell {
    #[inline]
    fn from(alive: bool) -> Self {
        if alive { Self::Alive } else { Self::Dead }
    }
}

/// A bounded (non-wrapping) board of cells
///
/// Cells are stored row-major in a single buffer of `width * height` cells.
/// The dimensions are fixed for the lifetime of the grid; [`Grid::clear`] and
/// [`Grid::randomize`] replace the whole buffer rather than editing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-dead grid
    ///
    /// # Panics
    /// If either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid must be at least 1x1");
        Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        }
    }

    /// Creates a grid where every cell is independently alive with probability 1/2
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Self {
        let mut grid = Self::new(width, height);
        grid.randomize(rng);
        grid
    }

    /// Creates a grid where exactly the given cells are alive
    pub fn from_alive(width: usize, height: usize, alive: &[CellPos]) -> Self {
        let mut grid = Self::new(width, height);
        for &pos in alive {
            grid.set(pos, Cell::Alive);
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    #[inline]
    fn index(&self, pos: CellPos) -> usize {
        assert!(
            self.contains(pos),
            "cell {pos:?} is outside a {}x{} grid",
            self.width,
            self.height
        );
        pos.row * self.width + pos.col
    }

    #[inline]
    pub fn get(&self, pos: CellPos) -> Cell {
        self.cells[self.index(pos)]
    }

    /// Overwrites a single cell, effective immediately
    #[inline]
    pub fn set(&mut self, pos: CellPos, cell: Cell) {
        let idx = self.index(pos);
        self.cells[idx] = cell;
    }

    /// Iterates the grid one row at a time, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// The cells at the 8 compass offsets of `(row, col)` that lie inside the grid
    ///
    /// Edges do not wrap, so corner cells have 3 neighbours and edge cells 5.
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = Cell> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let row = row.checked_add_signed(dr)?;
            let col = col.checked_add_signed(dc)?;
            let pos = CellPos { row, col };
            self.contains(pos).then(|| self.get(pos))
        })
    }

    #[inline]
    pub fn live_neighbors(&self, row: usize, col: usize) -> usize {
        self.neighbors(row, col).filter(|c| c.is_alive()).count()
    }

    /// Computes the following generation without touching the current one
    pub fn next_generation(&self) -> Vec<Cell> {
        let mut next = Vec::with_capacity(self.cells.len());
        for row in 0..self.height {
            for col in 0..self.width {
                let cell = self.cells[row * self.width + col];
                next.push(rule::next_state(cell, self.live_neighbors(row, col)));
            }
        }
        next
    }

    /// Advances the grid by one generation
    ///
    /// Every cell is evaluated against the previous generation, then the
    /// complete next generation is swapped in.
    ///
    /// ## Returns
    /// Whether any cell changed state. `false` means the grid has reached a
    /// fixed point (which includes the empty grid).
    pub fn compute_next_generation(&mut self) -> bool {
        let next = self.next_generation();
        let changed = next != self.cells;
        self.cells = next;
        changed
    }

    /// Replaces every cell with a dead one
    pub fn clear(&mut self) {
        self.cells = vec![Cell::Dead; self.width * self.height];
    }

    /// Replaces every cell with a uniformly random one
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cells = (0..self.width * self.height)
            .map(|_| Cell::from(rng.random_bool(0.5)))
            .collect();
    }
}

use crate::grid::Cell;
use std::sync::OnceLock;

/// The most live neighbours a cell can have
pub const MAX_NEIGHBORS: usize = 8;

/// One entry per (current state, live neighbour count) pair
type TransitionTable = [[Cell; MAX_NEIGHBORS + 1]; 2];

/// Returns a Singleton lookup table for the Game of Life ruleset
///
/// Equivalent to calling [`generate_table`] once and storing the result
fn get_table() -> &'static TransitionTable {
    static TABLE: OnceLock<TransitionTable> = OnceLock::new();
    TABLE.get_or_init(generate_table)
}

/// Creates the B3/S23 lookup table
///
/// The outer index is the current state (`0` dead, `1` alive), the inner
/// index is the number of live neighbours.
fn generate_table() -> TransitionTable {
    let mut table = [[Cell::Dead; MAX_NEIGHBORS + 1]; 2];
    for (state, row) in table.iter_mut().enumerate() {
        for (neighbors, next) in row.iter_mut().enumerate() {
            *next = match (state == 1, neighbors) {
                (true, 2) | (_, 3) => Cell::Alive,
                _ => Cell::Dead,
            };
        }
    }
    table
}

/// The state `cell` takes in the next generation given its live neighbours
#[inline]
pub fn next_state(cell: Cell, live_neighbors: usize) -> Cell {
    debug_assert!(live_neighbors <= MAX_NEIGHBORS, "more than 8 neighbours counted");
    get_table()[cell.is_alive() as usize][live_neighbors]
}

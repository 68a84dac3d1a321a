//! Core library for an interactive, bounded Conway's Game of Life.

pub mod canvas;
pub mod config;
pub mod grid;
pub mod input;
pub mod life;
pub mod limiter;
pub mod pos;
pub mod rule;

pub use canvas::{Canvas, Color, Palette, Rect};
pub use config::{ConfigError, Settings};
pub use grid::{Cell, Grid};
pub use input::{Command, Key};
pub use life::{Flow, GameLife, RunState};
pub use limiter::FrameLimiter;
pub use pos::{CellPos, Point};

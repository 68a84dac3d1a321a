use crate::{
    canvas::{Canvas, Palette, Rect},
    config::Settings,
    grid::{Cell, Grid},
    input::Command,
    pos::{CellPos, Point},
};
use log::{debug, info};
use rand::{Rng, rngs::StdRng};

/// Pixels added or removed per cell-size step, also the smallest cell size
pub const CELL_SIZE_STEP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Editing allowed, no automatic generations
    Paused,
    /// Generations advance every tick, editing disabled
    Running,
}

/// Whether the host loop should keep going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An in-progress mouse drag
#[derive(Debug, Clone, Copy)]
struct Paint {
    /// State forced onto every cell the drag visits
    target: Cell,
    last: CellPos,
}

/// The interactive game: a grid plus everything needed to drive and draw it
///
/// Hosts feed it [`Command`]s, call [`GameLife::tick`] at the pace of
/// [`GameLife::speed`], and draw it with [`GameLife::render`] whenever
/// [`GameLife::take_redraw`] reports the picture is stale.
#[derive(Debug)]
pub struct GameLife<R = StdRng> {
    grid: Grid,
    rng: R,
    palette: Palette,
    window_width: u32,
    window_height: u32,
    cell_size: u32,
    speed: u32,
    state: RunState,
    paint: Option<Paint>,
    generation: u64,
    redraw: bool,
}

impl<R: Rng> GameLife<R> {
    /// Creates a paused game sized from already validated settings
    pub fn new(settings: &Settings, mut rng: R) -> Self {
        let (width, height) = settings.grid_size();
        let grid = if settings.randomize {
            Grid::random(width, height, &mut rng)
        } else {
            Grid::new(width, height)
        };
        info!(
            "{}x{} grid, {}px cells, {} gen/s",
            width, height, settings.cell_size, settings.speed
        );

        Self {
            grid,
            rng,
            palette: Palette::default(),
            window_width: settings.window_width,
            window_height: settings.window_height,
            cell_size: settings.cell_size,
            speed: settings.speed.max(1),
            state: RunState::Paused,
            paint: None,
            generation: 0,
            redraw: true,
        }
    }

    pub fn handle(&mut self, command: Command) -> Flow {
        debug!("command {command:?}");
        match command {
            Command::Quit => return Flow::Quit,
            Command::TogglePause => {
                self.state = match self.state {
                    RunState::Paused => RunState::Running,
                    RunState::Running => RunState::Paused,
                };
                self.paint = None;
            }
            Command::PaintDown(p) => self.paint_down(p),
            Command::PaintMove(p) => self.paint_move(p),
            Command::PaintUp => self.paint = None,
            Command::Clear => {
                self.grid.clear();
                self.reset_board();
            }
            Command::Randomize => {
                self.grid.randomize(&mut self.rng);
                self.reset_board();
            }
            Command::SpeedDown => self.speed = self.speed.saturating_sub(1).max(1),
            Command::SpeedUp => self.speed = self.speed.saturating_add(1),
            Command::SizeDown => {
                if self.cell_size > CELL_SIZE_STEP {
                    self.cell_size -= CELL_SIZE_STEP;
                    self.resize_cells();
                }
            }
            Command::SizeUp => {
                let limit = self.window_width.min(self.window_height);
                if self.cell_size + CELL_SIZE_STEP <= limit {
                    self.cell_size += CELL_SIZE_STEP;
                    self.resize_cells();
                }
            }
            Command::Step => {
                if self.is_paused() {
                    self.advance();
                }
            }
        }
        Flow::Continue
    }
}

impl<R> GameLife<R> {
    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    #[inline]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }
    #[inline]
    pub fn speed(&self) -> u32 {
        self.speed
    }
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }
    #[inline]
    pub fn is_painting(&self) -> bool {
        self.paint.is_some()
    }
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
    #[inline]
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Returns whether the board changed since the last call, and resets the flag
    #[inline]
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Advances one generation if running
    ///
    /// A generation that changes nothing pauses the game.
    ///
    /// ## Returns
    /// Whether any cell changed
    pub fn tick(&mut self) -> bool {
        if self.is_paused() {
            return false;
        }
        let changed = self.advance();
        if !changed {
            info!("fixed point after {} generations, pausing", self.generation);
            self.state = RunState::Paused;
        }
        changed
    }

    fn advance(&mut self) -> bool {
        let changed = self.grid.compute_next_generation();
        if changed {
            self.generation += 1;
        }
        self.redraw = true;
        changed
    }

    fn reset_board(&mut self) {
        self.paint = None;
        self.state = RunState::Paused;
        self.generation = 0;
        self.redraw = true;
    }

    fn resize_cells(&mut self) {
        debug!("cell size now {}px", self.cell_size);
        self.paint = None;
        self.state = RunState::Paused;
        self.redraw = true;
    }

    /// The grid cell under a pixel, if there is one
    fn cell_at(&self, p: Point) -> Option<CellPos> {
        let cell = p
            .clamp_to(self.window_width, self.window_height)
            .to_cell(self.cell_size)?;
        self.grid.contains(cell).then_some(cell)
    }

    fn paint_down(&mut self, p: Point) {
        if !self.is_paused() {
            return;
        }
        let Some(cell) = self.cell_at(p) else {
            return;
        };
        let target = self.grid.get(cell).toggled();
        self.grid.set(cell, target);
        self.paint = Some(Paint { target, last: cell });
        self.redraw = true;
    }

    fn paint_move(&mut self, p: Point) {
        let Some(paint) = self.paint else {
            return;
        };
        let Some(cell) = self.cell_at(p) else {
            return;
        };
        if cell == paint.last {
            return;
        }
        self.grid.set(cell, paint.target);
        self.paint = Some(Paint { last: cell, ..paint });
        self.redraw = true;
    }

    /// Draws the whole board: background, every cell, then the grid lines
    pub fn render<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let surface = Rect::new(Point::zero(), self.window_width, self.window_height);
        canvas.fill_rect(surface, self.palette.dead);

        for (row, cells) in self.grid.rows().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                self.render_cell(canvas, CellPos { row, col }, cell);
            }
        }
        self.render_lines(canvas);
    }

    fn render_cell<C: Canvas + ?Sized>(&self, canvas: &mut C, pos: CellPos, cell: Cell) {
        let color = if cell.is_alive() {
            self.palette.live
        } else {
            self.palette.dead
        };
        let rect = Rect::new(pos.origin(self.cell_size), self.cell_size, self.cell_size);
        canvas.fill_rect(rect, color);
    }

    fn render_lines<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let (w, h) = (self.window_width as i32, self.window_height as i32);
        let step = self.cell_size as usize;
        for x in (0..w).step_by(step) {
            canvas.draw_line(Point { x, y: 0 }, Point { x, y: h }, self.palette.line);
        }
        for y in (0..h).step_by(step) {
            canvas.draw_line(Point { x: 0, y }, Point { x: w, y }, self.palette.line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Color;
    use rand::SeedableRng;

    #[derive(Default)]
    struct Recording {
        rects: Vec<(Rect, Color)>,
        lines: Vec<(Point, Point)>,
    }
    impl Canvas for Recording {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.rects.push((rect, color));
        }
        fn draw_line(&mut self, from: Point, to: Point, _color: Color) {
            self.lines.push((from, to));
        }
    }

    fn settings(width: u32, height: u32, cell_size: u32) -> Settings {
        Settings {
            window_width: width,
            window_height: height,
            cell_size,
            ..Settings::default()
        }
    }

    fn game(width: u32, height: u32, cell_size: u32) -> GameLife {
        GameLife::new(&settings(width, height, cell_size), StdRng::seed_from_u64(1))
    }

    fn center(row: usize, col: usize, cell_size: u32) -> Point {
        let half = cell_size as i32 / 2;
        CellPos::new(row, col).origin(cell_size) + Point { x: half, y: half }
    }

    fn alive(game: &GameLife) -> Vec<CellPos> {
        let mut out = Vec::new();
        for (row, cells) in game.grid().rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if cell.is_alive() {
                    out.push(CellPos::new(row, col));
                }
            }
        }
        out
    }

    #[test]
    fn small_window_makes_two_by_two_dead_grid() {
        let settings = Settings::from_positional(&["20", "20", "10", "1", "0"]).expect("valid");
        let game = GameLife::new(&settings, StdRng::seed_from_u64(0));

        assert_eq!(game.grid().width(), 2);
        assert_eq!(game.grid().height(), 2);
        assert_eq!(game.grid().alive_count(), 0);
        assert!(game.is_paused());
    }

    #[test]
    fn randomized_start_is_reproducible() {
        let settings = Settings {
            randomize: true,
            ..Settings::default()
        };
        let a = GameLife::new(&settings, StdRng::seed_from_u64(9));
        let b = GameLife::new(&settings, StdRng::seed_from_u64(9));

        assert!(a.grid().alive_count() > 0);
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn clicking_toggles_exactly_one_cell() {
        let mut game = game(100, 100, 10);

        game.handle(Command::PaintDown(center(3, 4, 10)));
        game.handle(Command::PaintUp);
        assert_eq!(alive(&game), vec![CellPos::new(3, 4)]);

        game.handle(Command::PaintDown(center(3, 4, 10)));
        game.handle(Command::PaintUp);
        assert!(alive(&game).is_empty());
    }

    #[test]
    fn drag_forces_the_first_target_state() {
        let mut game = game(100, 100, 10);
        game.grid.set(CellPos::new(0, 2), Cell::Alive);

        // starts on a dead cell, so the whole drag draws
        game.handle(Command::PaintDown(center(0, 0, 10)));
        game.handle(Command::PaintMove(center(0, 1, 10)));
        game.handle(Command::PaintMove(center(0, 2, 10)));
        game.handle(Command::PaintMove(center(0, 3, 10)));
        game.handle(Command::PaintUp);

        assert_eq!(
            alive(&game),
            (0..4).map(|col| CellPos::new(0, col)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn drag_from_live_cell_erases() {
        let mut game = game(100, 100, 10);
        for col in 0..3 {
            game.grid.set(CellPos::new(1, col), Cell::Alive);
        }

        game.handle(Command::PaintDown(center(1, 0, 10)));
        game.handle(Command::PaintMove(center(1, 1, 10)));
        game.handle(Command::PaintMove(center(2, 2, 10)));

        assert_eq!(alive(&game), vec![CellPos::new(1, 2)]);
    }

    #[test]
    fn moving_within_a_cell_does_not_repaint() {
        let mut game = game(100, 100, 10);

        game.handle(Command::PaintDown(Point { x: 1, y: 1 }));
        game.take_redraw();
        game.handle(Command::PaintMove(Point { x: 8, y: 8 }));

        assert!(!game.take_redraw());
        assert_eq!(alive(&game), vec![CellPos::new(0, 0)]);
    }

    #[test]
    fn motion_without_button_does_nothing() {
        let mut game = game(100, 100, 10);

        game.handle(Command::PaintMove(center(5, 5, 10)));

        assert!(alive(&game).is_empty());
    }

    #[test]
    fn painting_is_ignored_while_running() {
        let mut game = game(100, 100, 10);
        game.handle(Command::TogglePause);

        game.handle(Command::PaintDown(center(2, 2, 10)));

        assert!(!game.is_painting());
        assert!(alive(&game).is_empty());
    }

    #[test]
    fn toggling_pause_cancels_a_drag() {
        let mut game = game(100, 100, 10);
        game.handle(Command::PaintDown(center(0, 0, 10)));

        game.handle(Command::TogglePause);
        game.handle(Command::TogglePause);
        game.handle(Command::PaintMove(center(0, 1, 10)));

        assert_eq!(alive(&game), vec![CellPos::new(0, 0)]);
    }

    #[test]
    fn clicks_outside_the_window_are_clamped() {
        let mut game = game(100, 100, 10);

        game.handle(Command::PaintDown(Point { x: 500, y: -20 }));

        assert_eq!(alive(&game), vec![CellPos::new(0, 9)]);
    }

    #[test]
    fn clicks_past_the_grid_are_ignored() {
        let mut game = game(100, 100, 20);
        game.handle(Command::SizeDown);
        assert_eq!(game.cell_size(), 10);

        // the grid is still 5x5 cells, which now covers only the top left 50px
        game.handle(Command::PaintDown(Point { x: 75, y: 5 }));

        assert!(alive(&game).is_empty());
        assert!(!game.is_painting());
    }

    #[test]
    fn speed_never_drops_below_one() {
        let mut game = game(100, 100, 10);

        game.handle(Command::SpeedDown);
        assert_eq!(game.speed(), 1);

        game.handle(Command::SpeedUp);
        game.handle(Command::SpeedUp);
        game.handle(Command::SpeedDown);
        assert_eq!(game.speed(), 2);
    }

    #[test]
    fn cell_size_steps_and_pauses() {
        let mut game = game(100, 100, 10);
        game.handle(Command::TogglePause);

        game.handle(Command::SizeUp);
        assert_eq!(game.cell_size(), 20);
        assert!(game.is_paused());

        game.handle(Command::SizeDown);
        game.handle(Command::SizeDown);
        assert_eq!(game.cell_size(), 10);
        assert_eq!(game.grid().width(), 10);
    }

    #[test]
    fn cell_size_is_limited_by_the_window() {
        let mut game = game(30, 20, 10);

        game.handle(Command::SizeUp);
        game.handle(Command::SizeUp);

        assert_eq!(game.cell_size(), 20);
    }

    #[test]
    fn clear_empties_and_pauses() {
        let mut game = game(60, 60, 10);
        game.handle(Command::Randomize);
        game.handle(Command::TogglePause);

        game.handle(Command::Clear);

        assert!(game.is_paused());
        assert_eq!(game.grid().alive_count(), 0);
        assert_eq!(game.generation(), 0);
    }

    #[test]
    fn randomize_fills_and_pauses() {
        let mut game = game(200, 200, 10);
        game.handle(Command::TogglePause);

        game.handle(Command::Randomize);

        assert!(game.is_paused());
        assert!(game.grid().alive_count() > 0);
        assert!(game.take_redraw());
    }

    #[test]
    fn tick_does_nothing_while_paused() {
        let mut game = game(50, 50, 10);
        game.grid.set(CellPos::new(2, 2), Cell::Alive);

        assert!(!game.tick());
        assert_eq!(alive(&game), vec![CellPos::new(2, 2)]);
    }

    #[test]
    fn blinker_runs_until_paused() {
        let mut game = game(50, 50, 10);
        for col in 1..4 {
            game.grid.set(CellPos::new(2, col), Cell::Alive);
        }
        game.handle(Command::TogglePause);

        assert!(game.tick());
        assert!(game.tick());
        assert_eq!(game.generation(), 2);
        assert!(!game.is_paused());
    }

    #[test]
    fn fixed_point_pauses_automatically() {
        let mut game = game(50, 50, 10);
        game.grid.set(CellPos::new(0, 0), Cell::Alive);
        game.handle(Command::TogglePause);

        // the lone cell dies, then nothing changes
        assert!(game.tick());
        assert!(!game.is_paused());
        assert!(!game.tick());
        assert!(game.is_paused());
        assert_eq!(game.generation(), 1);
    }

    #[test]
    fn step_advances_once_while_paused() {
        let mut game = game(50, 50, 10);
        for row in 1..4 {
            game.grid.set(CellPos::new(row, 2), Cell::Alive);
        }

        game.handle(Command::Step);

        assert!(game.is_paused());
        assert_eq!(
            alive(&game),
            vec![CellPos::new(2, 1), CellPos::new(2, 2), CellPos::new(2, 3)]
        );
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut game = game(50, 50, 10);

        assert_eq!(game.handle(Command::Quit), Flow::Quit);
        assert_eq!(game.handle(Command::Clear), Flow::Continue);
    }

    #[test]
    fn render_fills_cells_then_draws_lines() {
        let mut game = game(30, 20, 10);
        game.grid.set(CellPos::new(1, 2), Cell::Alive);
        let mut canvas = Recording::default();

        game.render(&mut canvas);

        // background plus one rect per cell
        assert_eq!(canvas.rects.len(), 1 + 6);
        let live: Vec<_> = canvas
            .rects
            .iter()
            .filter(|(_, color)| *color == Color::GREEN)
            .collect();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].0, Rect::new(Point { x: 20, y: 10 }, 10, 10));

        // 3 vertical and 2 horizontal lines
        assert_eq!(canvas.lines.len(), 5);
        assert_eq!(canvas.lines[1], (Point { x: 10, y: 0 }, Point { x: 10, y: 20 }));
        assert_eq!(canvas.lines[4], (Point { x: 0, y: 10 }, Point { x: 30, y: 10 }));
    }

    #[test]
    fn first_frame_is_drawn_once() {
        let mut game = game(50, 50, 10);

        assert!(game.take_redraw());
        assert!(!game.take_redraw());
    }
}

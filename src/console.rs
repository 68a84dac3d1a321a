use crate::stats::SimpleRecord;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue, style, terminal,
};
use gamelife::{Canvas, Color, Command, Flow, FrameLimiter, GameLife, Key, Point, Rect, input};
use log::debug;
use rand::Rng;
use std::{
    io::{self, Write},
    ops::Range,
    time::Duration,
};

/// Pixels covered by one terminal character, roughly a terminal cell's aspect ratio
pub const CHAR_WIDTH: u32 = 5;
pub const CHAR_HEIGHT: u32 = 10;

/// How long to wait for input when no generation is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

/// A pixel surface downsampled to terminal characters
///
/// Each character takes the colour of the pixel at its centre, so thin
/// features such as 1-pixel grid lines only show up where they cross a centre.
pub struct TerminalCanvas {
    cols: usize,
    rows: usize,
    chars: Vec<Color>,
}
impl TerminalCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        let cols = width.div_ceil(CHAR_WIDTH) as usize;
        let rows = height.div_ceil(CHAR_HEIGHT) as usize;
        Self {
            cols,
            rows,
            chars: vec![Color::BLACK; cols * rows],
        }
    }

    /// The pixel a character samples
    #[inline]
    pub fn char_center(col: u16, row: u16) -> Point {
        Point {
            x: (col as u32 * CHAR_WIDTH + CHAR_WIDTH / 2) as i32,
            y: (row as u32 * CHAR_HEIGHT + CHAR_HEIGHT / 2) as i32,
        }
    }

    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Color {
        self.chars[row * self.cols + col]
    }

    /// Characters whose sample point lies in `start..start + len` along one axis
    fn span(start: i64, len: i64, char_size: u32, limit: usize) -> Range<usize> {
        let size = char_size as i64;
        let half = size / 2;
        // first index whose centre `i * size + half` is >= the bound
        let first_at = |bound: i64| -((half - bound).div_euclid(size));
        let lo = first_at(start).clamp(0, limit as i64) as usize;
        let hi = first_at(start + len).clamp(0, limit as i64) as usize;
        lo..hi.max(lo)
    }

    /// Writes the surface at the top left of the terminal, clipped to `cols` x `rows`
    pub fn present<W: Write>(&self, out: &mut W, cols: u16, rows: u16) -> io::Result<()> {
        let mut current = None;
        for row in 0..self.rows.min(rows as usize) {
            queue!(out, cursor::MoveTo(0, row as u16))?;
            for col in 0..self.cols.min(cols as usize) {
                let color = self.get(col, row);
                if current != Some(color) {
                    queue!(
                        out,
                        style::SetForegroundColor(style::Color::Rgb {
                            r: color.r,
                            g: color.g,
                            b: color.b,
                        })
                    )?;
                    current = Some(color);
                }
                queue!(out, style::Print('█'))?;
            }
        }
        queue!(out, style::ResetColor)
    }
}
impl Canvas for TerminalCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let cols = Self::span(rect.x.into(), rect.w.into(), CHAR_WIDTH, self.cols);
        let rows = Self::span(rect.y.into(), rect.h.into(), CHAR_HEIGHT, self.rows);
        for row in rows {
            let line = row * self.cols;
            self.chars[line + cols.start..line + cols.end].fill(color);
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        let (x0, x1) = (from.x.min(to.x) as i64, from.x.max(to.x) as i64);
        let (y0, y1) = (from.y.min(to.y) as i64, from.y.max(to.y) as i64);
        let cols = Self::span(x0, x1 - x0 + 1, CHAR_WIDTH, self.cols);
        let rows = Self::span(y0, y1 - y0 + 1, CHAR_HEIGHT, self.rows);
        for row in rows {
            for col in cols.clone() {
                let c = Self::char_center(col as u16, row as u16);
                if distance_to_segment(c, from, to) <= 0.5 {
                    self.chars[row * self.cols + col] = color;
                }
            }
        }
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (px, py) = (p.x as f64, p.y as f64);
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (dx, dy) = (b.x as f64 - ax, b.y as f64 - ay);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Maps a terminal event onto a game command
fn translate(event: Event) -> Option<Command> {
    match event {
        // CTRL+C
        Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }) => Some(Command::Quit),
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => {
            let key = match code {
                KeyCode::Enter => Key::Enter,
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Delete => Key::Delete,
                KeyCode::Esc => Key::Escape,
                KeyCode::Left => Key::Left,
                KeyCode::Right => Key::Right,
                KeyCode::Up => Key::Up,
                KeyCode::Down => Key::Down,
                KeyCode::Char(c) => Key::Char(c),
                _ => return None,
            };
            input::key_command(key)
        }
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => {
            let p = TerminalCanvas::char_center(column, row);
            match kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Command::PaintDown(p)),
                MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                    Some(Command::PaintMove(p))
                }
                MouseEventKind::Up(MouseButton::Left) => Some(Command::PaintUp),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Runs the game inside the terminal
///
/// Raw mode, the alternate screen and mouse capture are held for the lifetime
/// of the host and released on drop, including when the loop fails.
pub struct ConsoleRender {
    canvas: TerminalCanvas,
    stale: bool,
}
impl ConsoleRender {
    pub fn new(width: u32, height: u32) -> io::Result<Self> {
        let render = Self {
            canvas: TerminalCanvas::new(width, height),
            stale: true,
        };
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        Ok(render)
    }

    pub fn run<R: Rng>(&mut self, game: &mut GameLife<R>) -> io::Result<()> {
        let mut limiter = FrameLimiter::new();
        let mut stats = SimpleRecord::new(game);

        loop {
            if game.take_redraw() || self.stale {
                stats.record(game);
                self.render(game, stats.last())?;
            } else if stats.has_report() {
                self.render_footer(stats.report(game.speed()))?;
            }

            let timeout = if game.is_paused() {
                IDLE_POLL
            } else {
                limiter.remaining(game.speed())
            };
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Resize(cols, rows) => {
                        debug!("terminal resized to {cols}x{rows}");
                        self.stale = true;
                    }
                    event => {
                        if let Some(command) = translate(event) {
                            if game.handle(command) == Flow::Quit {
                                return Ok(());
                            }
                        }
                    }
                }
            }

            if !game.is_paused() && limiter.is_due(game.speed()) {
                limiter.mark();
                game.tick();
            }
        }
    }

    fn render<R>(&mut self, game: &GameLife<R>, report: &str) -> io::Result<()> {
        game.render(&mut self.canvas);
        self.stale = false;

        let (cols, rows) = terminal::size()?;
        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        // keep the last row for the footer
        self.canvas.present(&mut stdout, cols, rows.saturating_sub(1))?;
        self.render_footer(report)
    }

    fn render_footer(&self, report: &str) -> io::Result<()> {
        let (_, rows) = terminal::size()?;
        let mut stdout = io::stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, rows.saturating_sub(1)),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(report)
        )?;
        stdout.flush()
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        );
        let _ = terminal::disable_raw_mode();
    }
}

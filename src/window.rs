use anyhow::anyhow;
use gamelife::{Canvas, Color, Command, Flow, FrameLimiter, GameLife, Key, Point, Rect, input};
use log::{debug, info};

pub const TITLE: &str = "Game Life";

/// Draws onto an egui painter, one surface pixel per egui point
struct PainterCanvas<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}
impl PainterCanvas<'_> {
    #[inline]
    fn pos(&self, p: Point) -> egui::Pos2 {
        self.origin + egui::vec2(p.x as f32, p.y as f32)
    }
}
impl Canvas for PainterCanvas<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let min = self.pos(Point {
            x: rect.x,
            y: rect.y,
        });
        let rect = egui::Rect::from_min_size(min, egui::vec2(rect.w as f32, rect.h as f32));
        self.painter.rect_filled(rect, 0.0, color32(color));
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        let stroke = egui::Stroke::new(1.0, color32(color));
        self.painter.line_segment([self.pos(from), self.pos(to)], stroke);
    }
}

#[inline]
fn color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

#[inline]
fn point(pos: egui::Pos2, origin: egui::Pos2) -> Point {
    let local = pos - origin;
    Point {
        x: local.x.floor() as i32,
        y: local.y.floor() as i32,
    }
}

/// Maps an egui input event onto a game command
///
/// `origin` is the screen position of the drawing surface's top left pixel.
fn translate(event: &egui::Event, origin: egui::Pos2) -> Option<Command> {
    match *event {
        egui::Event::Key {
            key, pressed: true, ..
        } => {
            let key = match key {
                egui::Key::Enter => Key::Enter,
                egui::Key::Backspace => Key::Backspace,
                egui::Key::Delete => Key::Delete,
                egui::Key::Escape => Key::Escape,
                egui::Key::ArrowLeft => Key::Left,
                egui::Key::ArrowRight => Key::Right,
                egui::Key::ArrowUp => Key::Up,
                egui::Key::ArrowDown => Key::Down,
                egui::Key::R => Key::Char('r'),
                egui::Key::N => Key::Char('n'),
                egui::Key::Q => Key::Char('q'),
                _ => return None,
            };
            input::key_command(key)
        }
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            ..
        } => Some(if pressed {
            Command::PaintDown(point(pos, origin))
        } else {
            Command::PaintUp
        }),
        egui::Event::PointerMoved(pos) => Some(Command::PaintMove(point(pos, origin))),
        _ => None,
    }
}

/// The game hosted in a native window
///
/// egui redraws the whole frame on every update, so the board is rendered
/// every frame and generations are paced by asking for a repaint once the
/// limiter's period has passed.
pub struct WindowRender {
    game: GameLife,
    limiter: FrameLimiter,
}
impl WindowRender {
    pub fn new(game: GameLife) -> Self {
        Self {
            game,
            limiter: FrameLimiter::new(),
        }
    }

    /// Opens the window and blocks until it is closed
    pub fn run(self) -> anyhow::Result<()> {
        let (width, height) = self.game.window_size();
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(TITLE)
                .with_inner_size([width as f32, height as f32])
                .with_resizable(false),
            ..Default::default()
        };

        info!("opening {width}x{height} window");
        eframe::run_native(TITLE, options, Box::new(move |_cc| Box::new(self)))
            .map_err(|err| anyhow!("failed to open window: {err}"))
    }

    fn handle_input(&mut self, ctx: &egui::Context, origin: egui::Pos2) {
        let events = ctx.input(|i| i.events.clone());
        for event in &events {
            let Some(command) = translate(event, origin) else {
                continue;
            };
            if self.game.handle(command) == Flow::Quit {
                debug!("quit requested");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }
}

impl eframe::App for WindowRender {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let origin = ui.max_rect().min;
                self.handle_input(ctx, origin);

                let speed = self.game.speed();
                if !self.game.is_paused() && self.limiter.is_due(speed) {
                    self.limiter.mark();
                    self.game.tick();
                }

                self.game.take_redraw();
                let mut canvas = PainterCanvas {
                    painter: ui.painter(),
                    origin,
                };
                self.game.render(&mut canvas);
            });

        if !self.game.is_paused() {
            ctx.request_repaint_after(self.limiter.remaining(self.game.speed()));
        }
    }
}

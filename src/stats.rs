use gamelife::GameLife;
use std::time::Instant;

/// Rolling generation/population report shown alongside the board
pub struct SimpleRecord {
    gens: u64,
    alive: usize,
    paused: bool,
    gens_in_report: u64,
    last_report: Instant,
    report: String,
}
impl SimpleRecord {
    pub fn new<R>(game: &GameLife<R>) -> Self {
        let mut record = Self {
            gens: game.generation(),
            alive: game.grid().alive_count(),
            paused: game.is_paused(),
            gens_in_report: 0,
            last_report: Instant::now(),
            report: String::new(),
        };
        record.report = record.format(0.0, game.speed());
        record
    }

    /// Takes in the state of the game after a tick or an edit
    pub fn record<R>(&mut self, game: &GameLife<R>) {
        let gens = game.generation();
        // generation counter restarts on clear/randomize
        self.gens_in_report += gens.saturating_sub(self.gens);
        self.gens = gens;
        self.alive = game.grid().alive_count();
        self.paused = game.is_paused();
    }

    pub fn has_report(&self) -> bool {
        self.last_report.elapsed().as_millis() >= 500
    }

    /// Refreshes the report text, resetting the rate window
    pub fn report(&mut self, speed: u32) -> &str {
        let gens_per_sec = self.gens_in_report as f64 / self.last_report.elapsed().as_secs_f64();
        self.last_report = Instant::now();
        self.gens_in_report = 0;

        self.report = self.format(gens_per_sec, speed);
        &self.report
    }

    /// The most recent report text
    pub fn last(&self) -> &str {
        &self.report
    }

    fn format(&self, gens_per_sec: f64, speed: u32) -> String {
        format!(
            "{} {:.02}gen/s (target {}) gens:{}, alive:{}",
            if self.paused { "paused" } else { "running" },
            gens_per_sec,
            speed,
            self.gens,
            self.alive
        )
    }
}

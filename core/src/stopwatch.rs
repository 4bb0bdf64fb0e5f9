use core::time::Duration;
use web_time::Instant;

/// Elapsed-time source driven by the engine: reset on a new board, started on the first
/// reveal, stopped when the game ends.
pub trait Stopwatch {
    fn start(&mut self);
    fn stop(&mut self);
    fn reset(&mut self);
    /// Whole seconds counted so far.
    fn elapsed(&self) -> u32;
}

/// Counts ticks from the host, one per second. Ticks while stopped are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualStopwatch {
    running: bool,
    seconds: u32,
}

impl ManualStopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick(&mut self) {
        if self.running {
            self.seconds = self.seconds.saturating_add(1);
        }
    }

    /// Same as `n` calls to [`tick`](Self::tick).
    pub fn advance(&mut self, n: u32) {
        if self.running {
            self.seconds = self.seconds.saturating_add(n);
        }
    }
}

impl Stopwatch for ManualStopwatch {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn reset(&mut self) {
        self.running = false;
        self.seconds = 0;
    }

    fn elapsed(&self) -> u32 {
        self.seconds
    }
}

/// Wall-clock stopwatch, works on wasm too.
#[derive(Clone, Debug, Default)]
pub struct SystemStopwatch {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl SystemStopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    fn start_at(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    fn stop_at(&mut self, now: Instant) {
        if let Some(started_at) = self.started_at.take() {
            self.accumulated += now.saturating_duration_since(started_at);
        }
    }

    fn elapsed_at(&self, now: Instant) -> u32 {
        let running = self
            .started_at
            .map_or(Duration::ZERO, |started_at| now.saturating_duration_since(started_at));
        (self.accumulated + running)
            .as_secs()
            .try_into()
            .unwrap_or(u32::MAX)
    }
}

impl Stopwatch for SystemStopwatch {
    fn start(&mut self) {
        self.start_at(Instant::now());
    }

    fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    fn reset(&mut self) {
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    fn elapsed(&self) -> u32 {
        self.elapsed_at(Instant::now())
    }
}

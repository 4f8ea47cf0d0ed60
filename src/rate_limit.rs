use chrono::{DateTime, Duration, Utc};

// champion.gg allows 3000 requests per 10 minutes and 50 per 10 seconds.
const LONG_WINDOW_SECS: i64 = 600;
const LONG_WINDOW_PERMITS: u32 = 3000;
const SHORT_WINDOW_SECS: i64 = 10;
const SHORT_WINDOW_PERMITS: u32 = 50;

/// A counter that admits `permits` requests per `window`, at least one. The
/// window opens with the first request after a reset.
#[derive(Debug, Clone)]
pub struct FixedWindow {
    pub window: Duration,
    pub permits: u32,
    pub used: u32,
    pub reset: Option<DateTime<Utc>>,
}

impl FixedWindow {
    pub fn new(window: Duration, permits: u32) -> Self {
        FixedWindow {
            window,
            permits: permits.max(1),
            used: 0,
            reset: None,
        }
    }

    fn roll(&mut self, now: DateTime<Utc>) {
        if matches!(self.reset, Some(reset) if now >= reset) {
            self.used = 0;
            self.reset = None;
        }
    }

    pub fn can_make_request(&self) -> bool {
        self.used < self.permits
    }

    pub fn record_request(&mut self, now: DateTime<Utc>) {
        if self.reset.is_none() {
            self.reset = Some(now + self.window);
        }
        self.used += 1;
    }

    pub fn wait_time(&self, now: DateTime<Utc>) -> Duration {
        match self.reset {
            Some(reset) if !self.can_make_request() => (reset - now).max(Duration::zero()),
            _ => Duration::zero(),
        }
    }

    pub fn get_remaining(&self) -> u32 {
        self.permits.saturating_sub(self.used)
    }
}

/// Admits a request only when every window has a permit left.
#[derive(Debug, Clone)]
pub struct MultiWindowLimiter {
    windows: Vec<FixedWindow>,
}

impl MultiWindowLimiter {
    pub fn new(windows: Vec<FixedWindow>) -> Self {
        MultiWindowLimiter { windows }
    }

    pub fn championgg() -> Self {
        MultiWindowLimiter::new(vec![
            FixedWindow::new(Duration::seconds(LONG_WINDOW_SECS), LONG_WINDOW_PERMITS),
            FixedWindow::new(Duration::seconds(SHORT_WINDOW_SECS), SHORT_WINDOW_PERMITS),
        ])
    }

    /// Takes a permit from every window, or returns how long to wait before
    /// all of them would admit a request. Nothing is recorded on refusal.
    pub fn acquire_at(&mut self, now: DateTime<Utc>) -> Result<(), Duration> {
        for window in &mut self.windows {
            window.roll(now);
        }

        let wait = self
            .windows
            .iter()
            .map(|w| w.wait_time(now))
            .max()
            .unwrap_or_else(Duration::zero);

        if self.windows.iter().all(FixedWindow::can_make_request) {
            for window in &mut self.windows {
                window.record_request(now);
            }
            Ok(())
        } else {
            Err(wait)
        }
    }

    pub fn acquire(&mut self) -> Result<(), Duration> {
        self.acquire_at(Utc::now())
    }

    pub fn get_remaining(&self) -> u32 {
        self.windows
            .iter()
            .map(FixedWindow::get_remaining)
            .min()
            .unwrap_or(u32::MAX)
    }
}

impl Default for MultiWindowLimiter {
    fn default() -> Self {
        MultiWindowLimiter::championgg()
    }
}

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// How long the "copied" acknowledgement stays visible.
pub const COPY_ACK_WINDOW: Duration = Duration::from_secs(2);

/// Timed flag raised by the copy action.
#[derive(Debug)]
pub struct CopyAcknowledgement {
    raised_at: Mutex<Option<Instant>>,
    window: Duration,
}

impl Default for CopyAcknowledgement {
    fn default() -> Self {
        Self::with_window(COPY_ACK_WINDOW)
    }
}

impl CopyAcknowledgement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            raised_at: Mutex::new(None),
            window,
        }
    }

    /// Raise the flag; raising again restarts the window.
    pub fn raise(&self) {
        *self.raised_at.lock().unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());
    }

    pub fn is_active(&self) -> bool {
        let raised_at = *self.raised_at.lock().unwrap_or_else(|e| e.into_inner());
        raised_at.is_some_and(|at| at.elapsed() < self.window)
    }
}

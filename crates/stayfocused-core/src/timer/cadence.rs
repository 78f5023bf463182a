//! How often a host should re-sync a running countdown.
//!
//! Hosts throttle background work, so the poll period is only a hint: the
//! engine derives remaining time from its deadline and any re-sync, however
//! late, is correct. A host should still re-sync right away when it becomes
//! visible or regains focus so a finish that happened in the background is
//! reported immediately.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_FOREGROUND_MS: u64 = 250;
pub const DEFAULT_BACKGROUND_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Something the host observed that warrants a re-sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSignal {
    /// The periodic ticker fired.
    Interval,
    VisibilityChanged(Visibility),
    FocusGained,
}

#[derive(Debug, Clone)]
pub struct Cadence {
    visibility: Visibility,
    foreground: Duration,
    background: Duration,
}

impl Cadence {
    pub fn new(foreground_ms: u64, background_ms: u64) -> Self {
        Self {
            visibility: Visibility::Visible,
            foreground: Duration::from_millis(foreground_ms.max(1)),
            background: Duration::from_millis(background_ms.max(1)),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Poll period for the current visibility.
    pub fn interval(&self) -> Duration {
        match self.visibility {
            Visibility::Visible => self.foreground,
            Visibility::Hidden => self.background,
        }
    }

    /// Record a host signal. Returns `true` when the poll period changed and
    /// the host should re-arm its ticker.
    pub fn apply(&mut self, signal: HostSignal) -> bool {
        let before = self.interval();
        match signal {
            HostSignal::Interval => {}
            HostSignal::VisibilityChanged(v) => self.visibility = v,
            HostSignal::FocusGained => self.visibility = Visibility::Visible,
        }
        self.interval() != before
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self::new(DEFAULT_FOREGROUND_MS, DEFAULT_BACKGROUND_MS)
    }
}

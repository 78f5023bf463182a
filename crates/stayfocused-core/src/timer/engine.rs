//! Countdown engine implementation.
//!
//! The engine is a deadline-based state machine. It does not use internal
//! threads or count ticks: while running it stores only the absolute time at
//! which the countdown reaches zero, and remaining time is recomputed from the
//! clock on every query. The caller may call `tick()` as often or as rarely as
//! it likes; a re-sync after an arbitrarily long gap is still exact.
//!
//! ## State Transitions
//!
//! ```text
//! Idle     --start/start_fresh--> Running --stop--> Paused --start--> Running
//! Running  --(remaining == 0)-->  Finished --start/start_fresh--> Running
//! Paused | Finished --reset--> Idle
//! not Running --select_preset--> Idle
//! ```
//!
//! Calls that are not valid for the current phase are ignored and return
//! `None`. `select_preset`, `start` and `stop` re-sync first; when that
//! re-sync ends the run they return `TimerFinished` and do nothing else.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CountdownEngine::new(PresetCatalog::standard(), || ring());
//! engine.start();
//! // Whenever the host gets a chance:
//! engine.tick(); // Returns Some(Event::TimerFinished) once per run
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::cadence::{Cadence, HostSignal};
use super::display;
use super::preset::{Preset, PresetCatalog};
use crate::clock::{Clock, SystemClock};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunPhase {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Authoritative countdown state.
///
/// While running only the deadline is stored; otherwise only the frozen
/// number of seconds is. The two can never coexist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle {
        remaining_secs: u64,
    },
    Running {
        /// Epoch milliseconds at which the countdown reaches zero.
        deadline_ms: u64,
        /// Lowest value reported so far. A clock stepping backwards cannot
        /// push the countdown above it.
        ceiling_secs: u64,
    },
    Paused {
        remaining_secs: u64,
    },
    Finished,
}

impl TimerState {
    pub fn phase(&self) -> RunPhase {
        match self {
            TimerState::Idle { .. } => RunPhase::Idle,
            TimerState::Running { .. } => RunPhase::Running,
            TimerState::Paused { .. } => RunPhase::Paused,
            TimerState::Finished => RunPhase::Finished,
        }
    }
}

type FinishCallback = Box<dyn FnMut()>;

/// Core countdown engine.
///
/// Owns the preset catalog and the timer state exclusively. Hosts change it
/// only through the commands below and read it through the queries.
pub struct CountdownEngine<C: Clock = SystemClock> {
    catalog: PresetCatalog,
    selected: String,
    state: TimerState,
    clock: C,
    on_finish: FinishCallback,
}

impl CountdownEngine<SystemClock> {
    /// Create an engine on the system clock.
    ///
    /// Starts `Idle` with the first catalog preset selected. `on_finish` runs
    /// once each time a run reaches zero.
    pub fn new(catalog: PresetCatalog, on_finish: impl FnMut() + 'static) -> Self {
        Self::with_clock(catalog, SystemClock, on_finish)
    }
}

impl<C: Clock> CountdownEngine<C> {
    pub fn with_clock(catalog: PresetCatalog, clock: C, on_finish: impl FnMut() + 'static) -> Self {
        let first = catalog.first();
        let selected = first.key.clone();
        let remaining_secs = first.seconds;
        Self {
            catalog,
            selected,
            state: TimerState::Idle { remaining_secs },
            clock,
            on_finish: Box::new(on_finish),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> RunPhase {
        self.state.phase()
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    pub fn selected_preset(&self) -> &Preset {
        // `selected` only ever holds keys taken from the catalog.
        self.catalog
            .get(&self.selected)
            .unwrap_or_else(|| self.catalog.first())
    }

    /// Full duration of the selected preset.
    pub fn total_secs(&self) -> u64 {
        self.selected_preset().seconds
    }

    /// Only a running countdown needs a periodic ticker.
    pub fn needs_ticks(&self) -> bool {
        self.phase() == RunPhase::Running
    }

    /// Remaining whole seconds, finishing the run if it has reached zero.
    pub fn remaining_seconds(&mut self) -> u64 {
        self.tick();
        self.peek_remaining()
    }

    /// Remaining whole seconds without the finish check.
    ///
    /// May report 0 while still `Running`; the next `tick()` settles that.
    pub fn peek_remaining(&self) -> u64 {
        match self.state {
            TimerState::Idle { remaining_secs } | TimerState::Paused { remaining_secs } => {
                remaining_secs
            }
            TimerState::Running {
                deadline_ms,
                ceiling_secs,
            } => remaining_until(deadline_ms, ceiling_secs, self.clock.now_ms()),
            TimerState::Finished => 0,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let preset = self.selected_preset();
        let remaining_secs = self.peek_remaining();
        Event::StateSnapshot {
            phase: self.phase(),
            preset: preset.key.clone(),
            label: preset.label.clone(),
            remaining_secs,
            total_secs: preset.seconds,
            display: display::format_clock(remaining_secs),
            progress: display::progress(remaining_secs, preset.seconds),
            at: self.stamp(),
        }
    }

    /// Title for the host window or tab.
    pub fn title(&self) -> String {
        display::window_title(
            self.peek_remaining(),
            &self.selected_preset().label,
            self.needs_ticks(),
        )
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Choose another preset. Ignored while running or for unknown keys.
    pub fn select_preset(&mut self, key: &str) -> Option<Event> {
        if let Some(finished) = self.tick() {
            return Some(finished);
        }
        if self.needs_ticks() {
            debug!(preset = key, "preset change ignored while running");
            return None;
        }
        let duration_secs = self.catalog.get(key)?.seconds;
        self.selected = key.to_string();
        self.state = TimerState::Idle {
            remaining_secs: duration_secs,
        };
        debug!(preset = key, duration_secs, "preset selected");
        Some(Event::PresetSelected {
            preset: self.selected.clone(),
            duration_secs,
            at: self.stamp(),
        })
    }

    /// Start or resume. Resumes from the frozen value when paused, from the
    /// full duration when idle or finished.
    pub fn start(&mut self) -> Option<Event> {
        if let Some(finished) = self.tick() {
            return Some(finished);
        }
        let secs = match self.state {
            TimerState::Running { .. } => return None, // Already running.
            TimerState::Idle { remaining_secs } | TimerState::Paused { remaining_secs } => {
                remaining_secs
            }
            TimerState::Finished => self.total_secs(),
        };
        Some(self.arm(secs, false))
    }

    /// Pause, freezing the remaining time.
    pub fn stop(&mut self) -> Option<Event> {
        if let Some(finished) = self.tick() {
            return Some(finished);
        }
        if !self.needs_ticks() {
            return None;
        }
        let remaining_secs = self.peek_remaining();
        self.state = TimerState::Paused { remaining_secs };
        debug!(remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            remaining_secs,
            at: self.stamp(),
        })
    }

    /// Back to `Idle` with the full duration of the selected preset.
    pub fn reset(&mut self) -> Option<Event> {
        let remaining_secs = self.total_secs();
        self.state = TimerState::Idle { remaining_secs };
        debug!(preset = %self.selected, remaining_secs, "timer reset");
        Some(Event::TimerReset {
            preset: self.selected.clone(),
            remaining_secs,
            at: self.stamp(),
        })
    }

    /// Reset and start in one step, from any phase.
    pub fn start_fresh(&mut self) -> Option<Event> {
        Some(self.arm(self.total_secs(), true))
    }

    /// Re-sync against the clock. Returns `Some(Event::TimerFinished)` on the
    /// observation that ends a run, `None` otherwise.
    pub fn tick(&mut self) -> Option<Event> {
        let TimerState::Running { deadline_ms, .. } = self.state else {
            return None;
        };
        match self.peek_remaining() {
            0 => Some(self.finish()),
            left => {
                self.state = TimerState::Running {
                    deadline_ms,
                    ceiling_secs: left,
                };
                None
            }
        }
    }

    /// Feed a host signal through the cadence and re-sync.
    ///
    /// Check `cadence.interval()` afterwards to re-arm the host ticker.
    pub fn handle_signal(&mut self, cadence: &mut Cadence, signal: HostSignal) -> Option<Event> {
        if cadence.apply(signal) {
            debug!(interval = ?cadence.interval(), "poll interval changed");
        }
        self.tick()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn arm(&mut self, secs: u64, fresh: bool) -> Event {
        let deadline_ms = self.clock.now_ms().saturating_add(secs.saturating_mul(1000));
        self.state = TimerState::Running {
            deadline_ms,
            ceiling_secs: secs,
        };
        debug!(preset = %self.selected, remaining_secs = secs, fresh, "timer started");
        Event::TimerStarted {
            preset: self.selected.clone(),
            remaining_secs: secs,
            fresh,
            at: self.stamp(),
        }
    }

    fn finish(&mut self) -> Event {
        self.state = TimerState::Finished;
        info!(preset = %self.selected, "countdown finished");
        (self.on_finish)();
        Event::TimerFinished {
            preset: self.selected.clone(),
            at: self.stamp(),
        }
    }

    fn stamp(&self) -> DateTime<Utc> {
        i64::try_from(self.clock.now_ms())
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or_default()
    }
}

impl<C: Clock + fmt::Debug> fmt::Debug for CountdownEngine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownEngine")
            .field("catalog", &self.catalog)
            .field("selected", &self.selected)
            .field("state", &self.state)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

/// Whole seconds until `deadline_ms`, rounded half up, never negative and
/// never above `ceiling_secs`.
fn remaining_until(deadline_ms: u64, ceiling_secs: u64, now_ms: u64) -> u64 {
    let left_ms = deadline_ms.saturating_sub(now_ms);
    (left_ms.saturating_add(500) / 1000).min(ceiling_secs)
}

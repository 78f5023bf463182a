use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::RunPhase;

/// Every state change of the countdown produces an Event.
/// Hosts poll `snapshot()` for rendering and forward the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PresetSelected {
        preset: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStarted {
        preset: String,
        remaining_secs: u64,
        /// Started from the full duration via start-fresh.
        fresh: bool,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        preset: String,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerFinished {
        preset: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: RunPhase,
        preset: String,
        label: String,
        remaining_secs: u64,
        total_secs: u64,
        display: String,
        progress: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::PresetSelected { at, .. }
            | Event::TimerStarted { at, .. }
            | Event::TimerPaused { at, .. }
            | Event::TimerReset { at, .. }
            | Event::TimerFinished { at, .. }
            | Event::StateSnapshot { at, .. } => *at,
        }
    }
}

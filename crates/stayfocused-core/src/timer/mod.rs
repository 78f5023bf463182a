mod cadence;
pub mod display;
mod engine;
mod preset;

pub use cadence::{Cadence, HostSignal, Visibility, DEFAULT_BACKGROUND_MS, DEFAULT_FOREGROUND_MS};
pub use engine::{CountdownEngine, RunPhase, TimerState};
pub use preset::{default_presets, Preset, PresetCatalog};

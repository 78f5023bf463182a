//! # Stay Focused Core Library
//!
//! Core logic for the Stay Focused countdown widget: a preset-based countdown
//! timer plus the small image gallery shown beside it. Hosts (the CLI, or any
//! GUI) drive the engine and render what it reports.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: A deadline-based state machine. Remaining time is
//!   recomputed from an absolute deadline, so hosts may re-sync at any
//!   interval, including after long suspensions
//! - **Cadence**: Visibility-aware poll periods for hosts
//! - **Storage**: TOML-based configuration
//! - **Gallery**: Wrap-around image viewer state
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: Core countdown state machine
//! - [`PresetCatalog`]: Validated set of named durations
//! - [`Clock`]: Injectable time source
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod gallery;
pub mod storage;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use gallery::{Direction, Gallery};
pub use storage::Config;
pub use timer::{
    Cadence, CountdownEngine, HostSignal, Preset, PresetCatalog, RunPhase, TimerState, Visibility,
};

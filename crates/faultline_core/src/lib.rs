//! faultline_core: supervisory skeleton for fault-tolerant components.
//!
//! Design goals:
//! - Pure, testable transition semantics (no transport or process deps).
//! - Explicit types; no macro wizardry.
//! - Small, stable public API surface: implement the five `Behaviour`
//!   hooks, hand the component to a `Supervisor`, drive it with
//!   `run()`/`stop()`.

pub mod error;

/// Lifecycle state machine: states, signals, table, retry bounds, supervisor.
pub mod fsm;

/// Logging utilities (severity -> tracing level mapping).
pub mod logging;

pub use error::{EngineError, Result};
pub use fsm::{Behaviour, Signal, State, StatusHandle, Supervisor};

//! faultline_core::fsm
//!
//! Fault-tolerant lifecycle state machine for a single component.
//!
//! Key ideas:
//! - Fixed state/signal vocabulary with a pure transition table
//! - Sentinel `BackToPrevious` entries make `Configuring`/`Recovering`
//!   reentrant from any caller state
//! - Bounded-attempt orchestration turns repeated hook failure into a
//!   terminal failure signal
//! - One dedicated background thread per supervisor; `run()`/`stop()` are
//!   the only external control points, status is observed by polling

mod behaviour;
mod graph;
mod retry;
mod signal;
mod state;
mod supervisor;
mod table;

pub use behaviour::Behaviour;
pub use graph::{transition_graph, TransitionEdge, TransitionGraph};
pub use signal::Signal;
pub use state::{State, ALL_STATES};
pub use supervisor::{StatusHandle, Supervisor, DEFAULT_CADENCE};
pub use table::{defined_signals, resolve, Target};

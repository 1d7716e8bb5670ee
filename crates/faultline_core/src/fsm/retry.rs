use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{error, info};

use super::{Behaviour, Signal};

/// Drive the `configuring` hook under the attempt bound.
///
/// Calls the hook until it reports `DoneConfiguring` or `bound` attempts have
/// been made (attempts count from 1; the bound is inclusive). On success the
/// `configured` latch decides the emitted signal: first success emits
/// `DoneConfiguring` and sets the latch, every later success emits
/// `DoneReconfiguring`. Exhaustion emits `FailedConfig`.
pub(crate) fn drive_configuring(
    behaviour: &mut (dyn Behaviour + Send),
    name: &str,
    bound: u32,
    configured: &AtomicBool,
) -> Signal {
    let mut attempt = 0;
    let mut result = None;

    while attempt < bound && result != Some(Signal::DoneConfiguring) {
        attempt += 1;
        info!("configuring {name} (attempt {attempt}/{bound})");
        result = Some(behaviour.configuring());
    }

    if result != Some(Signal::DoneConfiguring) {
        error!("could not configure {name} after a maximum of {bound} attempts");
        return Signal::FailedConfig;
    }

    if !configured.swap(true, Ordering::AcqRel) {
        Signal::DoneConfiguring
    } else {
        Signal::DoneReconfiguring
    }
}

/// Drive the `recovering` hook under the attempt bound.
///
/// Same shape as configuration: the hook is called until it reports
/// `DoneRecovering` or the bound is reached. Success passes the hook's
/// signal through; exhaustion emits `FailedRecovery`.
pub(crate) fn drive_recovering(
    behaviour: &mut (dyn Behaviour + Send),
    name: &str,
    bound: u32,
) -> Signal {
    let mut attempt = 0;
    let mut result = None;

    while attempt < bound && result != Some(Signal::DoneRecovering) {
        attempt += 1;
        info!("attempting recovery of {name} (attempt {attempt}/{bound})");
        result = Some(behaviour.recovering());
    }

    match result {
        Some(signal @ Signal::DoneRecovering) => signal,
        _ => {
            error!("could not recover {name} after a maximum of {bound} attempts");
            Signal::FailedRecovery
        }
    }
}

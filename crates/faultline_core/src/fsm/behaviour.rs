use super::Signal;

/// Per-state behaviour hooks a supervised component implements.
///
/// The supervisor calls exactly one hook per loop tick, chosen by the current
/// state. Each hook may block for as long as it needs (e.g. `ready` waiting
/// for an operate request); a blocked hook stalls the whole state machine,
/// and `Supervisor::stop()` will wait for it to return.
///
/// Contract: a hook must only return a signal the transition table defines
/// for its state (see `defined_signals`). Anything else is treated as a
/// fatal engine defect and terminates the loop. Hooks are infallible at the
/// type level; a component that can fail expresses that through the failure
/// signals, not by panicking.
pub trait Behaviour {
    /// One-shot initialisation, called on entry to `Initialising`.
    ///
    /// Returns `Initialised` or `InitFailed`.
    fn init(&mut self) -> Signal {
        Signal::Initialised
    }

    /// One configuration attempt, called by the retry orchestrator.
    ///
    /// Returns `DoneConfiguring` on success or `RetryConfig` to ask for
    /// another attempt. The orchestrator, not the hook, distinguishes a
    /// first-time configuration from a reconfiguration.
    fn configuring(&mut self) -> Signal {
        Signal::DoneConfiguring
    }

    /// Idle behaviour; typically blocks until an operate request arrives.
    ///
    /// Returns `Run` to start operating, `Wait` to stay idle, or
    /// `Reconfigure` to request reconfiguration.
    fn ready(&mut self) -> Signal {
        Signal::Run
    }

    /// One unit of active operation.
    ///
    /// Returns `Continue` to keep running, `Done` to go back to idle,
    /// `Recover` to signal a fault, or `Reconfigure`.
    fn running(&mut self) -> Signal;

    /// One recovery attempt, called by the retry orchestrator.
    ///
    /// Returns `DoneRecovering` on success; anything else asks for another
    /// attempt.
    fn recovering(&mut self) -> Signal;
}

use crate::error::{EngineError, Result};

use super::{Signal, State};

/// Resolution of a transition-table entry.
///
/// `Configuring` and `Recovering` are reentrant from several states, so their
/// success exits carry `BackToPrevious`: control returns to whichever state
/// was active before the current one. The supervisor resolves the sentinel
/// against the instance's own recorded previous state, never a global.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Target {
    Fixed(State),
    BackToPrevious,
}

/// Look up the transition table for a (state, signal) pair.
///
/// The table is a pure function; there is no process-wide mutable map.
/// An undefined pair is a fatal engine defect (a hook returned a signal its
/// state does not define) and is reported, never masked.
pub fn resolve(state: State, signal: Signal) -> Result<Target> {
    use Signal::*;
    use State::*;

    let target = match (state, signal) {
        (Initialising, Initialised) => Target::Fixed(Configuring),
        (Initialising, InitFailed) => Target::Fixed(Recovering),

        (Configuring, DoneConfiguring) => Target::Fixed(Ready),
        (Configuring, RetryConfig) => Target::Fixed(Configuring),
        (Configuring, DoneReconfiguring) => Target::BackToPrevious,
        (Configuring, FailedConfig) => Target::Fixed(Stopped),

        (Ready, Run) => Target::Fixed(Running),
        (Ready, Wait) => Target::Fixed(Ready),
        (Ready, Reconfigure) => Target::Fixed(Configuring),

        (Running, Done) => Target::Fixed(Ready),
        (Running, Continue) => Target::Fixed(Running),
        (Running, Recover) => Target::Fixed(Recovering),
        (Running, Reconfigure) => Target::Fixed(Configuring),

        (Recovering, DoneRecovering) => Target::BackToPrevious,
        (Recovering, FailedRecovery) => Target::Fixed(Stopped),

        _ => {
            return Err(EngineError::undefined_transition(state.id(), signal.id()));
        }
    };

    Ok(target)
}

/// Get the list of signals the table defines for a given state.
///
/// Supports introspection and hook-contract checks. `Start` (pre-run) and
/// `Stopped` (terminal) define none.
pub fn defined_signals(state: State) -> &'static [Signal] {
    use Signal::*;
    use State::*;

    match state {
        Initialising => &[Initialised, InitFailed],
        Configuring => &[DoneConfiguring, RetryConfig, DoneReconfiguring, FailedConfig],
        Ready => &[Run, Wait, Reconfigure],
        Running => &[Done, Continue, Recover, Reconfigure],
        Recovering => &[DoneRecovering, FailedRecovery],
        Start | Stopped => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Domain, ErrorKind, Payload};

    #[test]
    fn sentinel_entries_resolve_to_back_to_previous() {
        assert_eq!(
            resolve(State::Configuring, Signal::DoneReconfiguring).unwrap(),
            Target::BackToPrevious
        );
        assert_eq!(
            resolve(State::Recovering, Signal::DoneRecovering).unwrap(),
            Target::BackToPrevious
        );
    }

    #[test]
    fn terminal_failures_route_to_stopped() {
        assert_eq!(
            resolve(State::Configuring, Signal::FailedConfig).unwrap(),
            Target::Fixed(State::Stopped)
        );
        assert_eq!(
            resolve(State::Recovering, Signal::FailedRecovery).unwrap(),
            Target::Fixed(State::Stopped)
        );
    }

    #[test]
    fn undefined_pair_has_payload() {
        let e = resolve(State::Ready, Signal::Initialised).unwrap_err();
        assert_eq!(e.kind, ErrorKind::UndefinedTransition);
        assert_eq!(e.domain, Domain::Fsm);

        match e.payload {
            Payload::Transition { state, signal } => {
                assert_eq!(state, State::Ready.id());
                assert_eq!(signal, Signal::Initialised.id());
            }
            _ => panic!("expected Transition payload"),
        }
    }

    #[test]
    fn stopped_is_terminal() {
        assert!(defined_signals(State::Stopped).is_empty());
        for signal in defined_signals(State::Running) {
            assert!(resolve(State::Stopped, *signal).is_err());
        }
    }
}

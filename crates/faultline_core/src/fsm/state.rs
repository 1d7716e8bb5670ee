/// Lifecycle states of a supervised component.
///
/// `Start` is the only state before `Supervisor::run()` seeds the loop;
/// `Stopped` is terminal (no outgoing transitions; reaching it ends the loop).
/// The five states in between each map to one behaviour hook.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum State {
    Start,
    Initialising,
    Configuring,
    Ready,
    Running,
    Recovering,
    Stopped,
}

/// Internal, compact IDs used for error payloads.
///
/// Stable, lightweight identifiers for debugging/telemetry inside
/// faultline_core; not part of any wire format.
impl State {
    pub const fn id(self) -> u8 {
        match self {
            State::Start => 0,
            State::Initialising => 1,
            State::Configuring => 2,
            State::Ready => 3,
            State::Running => 4,
            State::Recovering => 5,
            State::Stopped => 6,
        }
    }

    /// True once the loop can never leave this state.
    pub const fn is_terminal(self) -> bool {
        matches!(self, State::Stopped)
    }

    /// Stable, human-readable label for logs and diagnostics.
    pub const fn label(self) -> &'static str {
        match self {
            State::Start => "start",
            State::Initialising => "initialising",
            State::Configuring => "configuring",
            State::Ready => "ready",
            State::Running => "running",
            State::Recovering => "recovering",
            State::Stopped => "stopped",
        }
    }
}

/// Canonical list of all lifecycle states.
pub const ALL_STATES: [State; 7] = [
    State::Start,
    State::Initialising,
    State::Configuring,
    State::Ready,
    State::Running,
    State::Recovering,
    State::Stopped,
];

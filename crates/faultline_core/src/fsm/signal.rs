/// Transition signals produced by behaviour hooks (or by the retry
/// orchestrator on their behalf).
///
/// Each non-terminal state defines a subset of these; a hook must only
/// return signals its state defines (see `table::defined_signals`).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Signal {
    // Initialising
    Initialised,
    InitFailed,

    // Configuring
    DoneConfiguring,
    Reconfigure,
    DoneReconfiguring,
    RetryConfig,
    FailedConfig,

    // Ready / Running
    Wait,
    Run,
    Continue,
    Done,

    // Recovering
    Recover,
    DoneRecovering,
    FailedRecovery,
}

/// Internal, compact IDs used for error payloads.
///
/// Grouped by the state family that produces them; gaps are intentional so
/// new signals slot into their family without renumbering.
impl Signal {
    pub const fn id(self) -> u8 {
        match self {
            Signal::Initialised => 1,
            Signal::InitFailed => 2,

            Signal::DoneConfiguring => 10,
            Signal::Reconfigure => 11,
            Signal::DoneReconfiguring => 12,
            Signal::RetryConfig => 13,
            Signal::FailedConfig => 14,

            Signal::Wait => 20,
            Signal::Run => 21,
            Signal::Continue => 22,
            Signal::Done => 23,

            Signal::Recover => 30,
            Signal::DoneRecovering => 31,
            Signal::FailedRecovery => 32,
        }
    }

    /// Stable, human-readable label for logs and diagnostics.
    pub const fn label(self) -> &'static str {
        match self {
            Signal::Initialised => "initialised",
            Signal::InitFailed => "initialisation_failed",

            Signal::DoneConfiguring => "config_successful",
            Signal::Reconfigure => "configure",
            Signal::DoneReconfiguring => "reconfig_successful",
            Signal::RetryConfig => "retry_config",
            Signal::FailedConfig => "config_failure",

            Signal::Wait => "wait",
            Signal::Run => "run",
            Signal::Continue => "continue_running",
            Signal::Done => "done",

            Signal::Recover => "recover",
            Signal::DoneRecovering => "recovery_successful",
            Signal::FailedRecovery => "failed_recovery",
        }
    }
}

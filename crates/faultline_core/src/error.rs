use std::borrow::Cow;
use thiserror::Error;

/// Convenient result alias for faultline_core.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Log/handling importance. Maps cleanly onto tracing levels (see `logging`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Severity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Where an error came from (helps triage and routing).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Domain {
    Fsm,
    Supervisor,
    Behaviour,
    Config,
    Other,
}

/// Stable error "kind" for matching/branching.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidState,
    UndefinedTransition,
    Io,
    Other,
}

/// Optional structured payload for rich context without forcing allocation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Payload {
    None,

    /// Generic key/value context (usually no heap alloc if using &str).
    Context {
        key: &'static str,
        value: Cow<'static, str>,
    },

    /// A (state, signal) pair the transition table does not define.
    Transition { state: u8, signal: u8 },
}

/// The one error type that crosses module boundaries in faultline_core.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{severity:?}: {message}")]
pub struct EngineError {
    pub domain: Domain,
    pub kind: ErrorKind,
    pub severity: Severity,
    pub message: Cow<'static, str>,
    pub payload: Payload,
}

impl EngineError {
    /// Fully-specified constructor (rarely needed at call sites).
    pub fn new(
        domain: Domain,
        kind: ErrorKind,
        severity: Severity,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            domain,
            kind,
            severity,
            message: message.into(),
            payload: Payload::None,
        }
    }

    // ---------------- Fluent entry points ----------------

    #[inline]
    pub fn debug() -> ErrorBuilder {
        ErrorBuilder::new(Severity::Debug)
    }
    #[inline]
    pub fn info() -> ErrorBuilder {
        ErrorBuilder::new(Severity::Info)
    }
    #[inline]
    pub fn warn() -> ErrorBuilder {
        ErrorBuilder::new(Severity::Warn)
    }
    #[inline]
    pub fn error() -> ErrorBuilder {
        ErrorBuilder::new(Severity::Error)
    }
    #[inline]
    pub fn fatal() -> ErrorBuilder {
        ErrorBuilder::new(Severity::Fatal)
    }

    /// A (state, signal) pair with no entry in the transition table.
    ///
    /// This is a fatal engine defect: a behaviour hook returned a signal its
    /// state does not define, and the supervisor must not mask it.
    pub fn undefined_transition(state: u8, signal: u8) -> Self {
        EngineError::fatal()
            .domain(Domain::Fsm)
            .kind(ErrorKind::UndefinedTransition)
            .msg("signal is not defined for the current state")
            .payload(Payload::Transition { state, signal })
            .build()
    }
}

/// Fluent builder that behaves like iterator chains (takes self, returns Self).
/// Defaults:
/// - domain = Other
/// - kind = Other
/// - message = ""
/// - payload = None
#[derive(Debug, Clone)]
pub struct ErrorBuilder {
    domain: Domain,
    kind: ErrorKind,
    severity: Severity,
    message: Cow<'static, str>,
    payload: Payload,
}

impl ErrorBuilder {
    #[inline]
    fn new(severity: Severity) -> Self {
        Self {
            domain: Domain::Other,
            kind: ErrorKind::Other,
            severity,
            message: Cow::Borrowed(""),
            payload: Payload::None,
        }
    }

    /// Set/override the domain (defaults to Domain::Other).
    #[inline]
    pub fn domain(mut self, d: Domain) -> Self {
        self.domain = d;
        self
    }

    /// Set/override the kind (defaults to ErrorKind::Other).
    #[inline]
    pub fn kind(mut self, k: ErrorKind) -> Self {
        self.kind = k;
        self
    }

    /// Set/override the message (defaults to "").
    #[inline]
    pub fn msg(mut self, m: impl Into<Cow<'static, str>>) -> Self {
        self.message = m.into();
        self
    }

    /// Only one payload: this replaces any previous payload (default is None).
    #[inline]
    pub fn payload(mut self, p: Payload) -> Self {
        self.payload = p;
        self
    }

    #[inline]
    pub fn build(self) -> EngineError {
        EngineError {
            domain: self.domain,
            kind: self.kind,
            severity: self.severity,
            message: self.message,
            payload: self.payload,
        }
    }
}

impl From<ErrorBuilder> for EngineError {
    fn from(b: ErrorBuilder) -> Self {
        b.build()
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::error()
            .domain(Domain::Other)
            .kind(ErrorKind::Io)
            .msg("io error")
            .payload(Payload::Context {
                key: "io",
                value: e.to_string().into(),
            })
            .build()
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::error::{Domain, EngineError, ErrorKind, Result};
use crate::logging::log_engine_error;

use super::{retry, table, Behaviour, State, Target};

/// Default inter-tick delay of the control loop.
pub const DEFAULT_CADENCE: Duration = Duration::from_millis(200);

/// Current/previous state pair.
///
/// `previous` is the sole source of truth for resolving
/// `Target::BackToPrevious` and always holds the state occupied immediately
/// before the most recent transition.
#[derive(Debug, Copy, Clone)]
struct StatePair {
    current: State,
    previous: State,
}

/// Cross-thread status shared between the controller and the loop thread.
///
/// The loop writes; the controller reads (and flips `running` on stop).
/// Atomics cover the flags, a mutex covers the state pair, and the
/// condvar lets `stop()` cancel a pending inter-tick sleep.
#[derive(Debug)]
struct Status {
    running: AtomicBool,
    alive: AtomicBool,
    configured: AtomicBool,
    states: Mutex<StatePair>,
    last_fault: Mutex<Option<EngineError>>,
    tick: Mutex<()>,
    wake: Condvar,
}

impl Status {
    fn new() -> Self {
        Self {
            running: AtomicBool::new(true),
            alive: AtomicBool::new(false),
            configured: AtomicBool::new(false),
            states: Mutex::new(StatePair {
                current: State::Start,
                previous: State::Start,
            }),
            last_fault: Mutex::new(None),
            tick: Mutex::new(()),
            wake: Condvar::new(),
        }
    }

    fn snapshot(&self) -> StatePair {
        *self
            .states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a resolved transition target; returns (from, to).
    fn apply(&self, target: Target) -> (State, State) {
        let mut pair = self
            .states
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let next = match target {
            Target::Fixed(state) => state,
            Target::BackToPrevious => pair.previous,
        };
        let from = pair.current;
        pair.previous = pair.current;
        pair.current = next;
        (from, next)
    }

    fn seed(&self, state: State) {
        let mut pair = self
            .states
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        pair.current = state;
    }

    fn record_fault(&self, err: EngineError) {
        log_engine_error(&err);
        *self
            .last_fault
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(err);
    }

    fn clear_fault(&self) {
        *self
            .last_fault
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Sleep for one cadence interval, returning early if `running` drops.
    fn pause(&self, cadence: Duration) {
        let guard = self.tick.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = self
            .wake
            .wait_timeout_while(guard, cadence, |_| self.running.load(Ordering::Acquire))
            .unwrap_or_else(PoisonError::into_inner);
    }
}

/// Read-only, cloneable view of a supervisor's status.
///
/// Observation is polling-based; there is no push notification of
/// transitions. Safe to use from any thread while the loop runs.
#[derive(Debug, Clone)]
pub struct StatusHandle {
    inner: Arc<Status>,
}

impl StatusHandle {
    /// Controller intends the loop to keep going.
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::Acquire)
    }

    /// The background loop thread exists.
    pub fn is_alive(&self) -> bool {
        self.inner.alive.load(Ordering::Acquire)
    }

    /// The first configuration has succeeded at some point. Never reverts.
    pub fn is_configured(&self) -> bool {
        self.inner.configured.load(Ordering::Acquire)
    }

    pub fn current_state(&self) -> State {
        self.inner.snapshot().current
    }

    pub fn previous_state(&self) -> State {
        self.inner.snapshot().previous
    }

    /// Last engine defect recorded by the loop, if any.
    pub fn last_fault(&self) -> Option<EngineError> {
        self.inner
            .last_fault
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Fault-tolerant lifecycle supervisor for one component.
///
/// Owns the component's behaviour hooks and runs the state-machine loop on a
/// dedicated background thread. The controller thread drives it through
/// `run()`/`stop()` and observes progress through the status handle.
///
/// Each loop tick dispatches the current state's hook (through the retry
/// orchestrator for `Configuring`/`Recovering`), resolves the returned
/// signal against the transition table, records the transition and sleeps
/// one cadence interval. The loop ends on `Stopped` or an external stop.
pub struct Supervisor {
    name: String,
    dependencies: Vec<String>,
    max_recovery_attempts: u32,
    cadence: Duration,
    status: Arc<Status>,
    behaviour: Option<Box<dyn Behaviour + Send>>,
    thread: Option<JoinHandle<Box<dyn Behaviour + Send>>>,
}

impl Supervisor {
    /// Create a supervisor for `behaviour`.
    ///
    /// `dependencies` are opaque identifiers carried for the surrounding
    /// system; the supervisor does not resolve them. The attempt bound
    /// applies to both configuration and recovery and must be positive.
    pub fn new(
        name: impl Into<String>,
        dependencies: Vec<String>,
        max_recovery_attempts: u32,
        behaviour: Box<dyn Behaviour + Send>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(EngineError::error()
                .domain(Domain::Supervisor)
                .kind(ErrorKind::InvalidArgument)
                .msg("component name must not be empty")
                .build());
        }
        if max_recovery_attempts == 0 {
            return Err(EngineError::error()
                .domain(Domain::Supervisor)
                .kind(ErrorKind::InvalidArgument)
                .msg("max_recovery_attempts must be positive")
                .build());
        }

        Ok(Self {
            name,
            dependencies,
            max_recovery_attempts,
            cadence: DEFAULT_CADENCE,
            status: Arc::new(Status::new()),
            behaviour: Some(behaviour),
            thread: None,
        })
    }

    /// Same as `new` with the default attempt bound of 1.
    pub fn with_defaults(
        name: impl Into<String>,
        dependencies: Vec<String>,
        behaviour: Box<dyn Behaviour + Send>,
    ) -> Result<Self> {
        Self::new(name, dependencies, 1, behaviour)
    }

    /// Override the inter-tick delay (default 200 ms).
    pub fn with_cadence(mut self, cadence: Duration) -> Self {
        self.cadence = cadence;
        self
    }

    /// Component name (for logging/introspection).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opaque dependency identifiers, as given at construction.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Cloneable read-only status view.
    pub fn status(&self) -> StatusHandle {
        StatusHandle {
            inner: Arc::clone(&self.status),
        }
    }

    pub fn is_running(&self) -> bool {
        self.status.running.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.status.alive.load(Ordering::Acquire)
    }

    pub fn current_state(&self) -> State {
        self.status.snapshot().current
    }

    /// Start the state machine on a dedicated background thread.
    ///
    /// Seeds the loop into `Initialising`. No-op with a diagnostic if the
    /// loop is already alive. A restart after `stop()` deliberately keeps
    /// the stale `configured` latch and previous state, as the lifecycle
    /// model defines (the next successful configuration exit therefore
    /// reports a reconfiguration).
    pub fn run(&mut self) -> Result<()> {
        if self.status.alive.load(Ordering::Acquire) {
            warn!("{} already running", self.name);
            return Ok(());
        }

        // Reap a loop that terminated on its own (reached Stopped) so the
        // behaviour box is back in hand before restarting.
        if let Some(handle) = self.thread.take() {
            match handle.join() {
                Ok(behaviour) => self.behaviour = Some(behaviour),
                Err(_) => error!("{} supervisor thread panicked", self.name),
            }
        }

        let behaviour = self.behaviour.take().ok_or_else(|| {
            EngineError::error()
                .domain(Domain::Supervisor)
                .kind(ErrorKind::InvalidState)
                .msg("behaviour is not available (previous loop thread lost)")
                .build()
        })?;

        if self.status.configured.load(Ordering::Acquire) {
            debug!(
                "{} restarting with stale configured/previous_state",
                self.name
            );
        }

        self.status.clear_fault();
        self.status.seed(State::Initialising);
        self.status.running.store(true, Ordering::Release);
        self.status.alive.store(true, Ordering::Release);

        let name = self.name.clone();
        let bound = self.max_recovery_attempts;
        let cadence = self.cadence;
        let status = Arc::clone(&self.status);

        let spawned = thread::Builder::new()
            .name(format!("{}-lifecycle", self.name))
            .spawn(move || manage(name, bound, cadence, status, behaviour));

        match spawned {
            Ok(handle) => {
                self.thread = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.status.alive.store(false, Ordering::Release);
                Err(e.into())
            }
        }
    }

    /// Stop the state machine and wait for the loop thread to finish.
    ///
    /// Cooperative: a hook call already in progress is not interrupted, but
    /// a pending inter-tick sleep is cancelled. No-op with a diagnostic if
    /// the loop was never started (or already stopped and reaped).
    pub fn stop(&mut self) {
        let Some(handle) = self.thread.take() else {
            warn!(
                "{} cannot be stopped because it is not running yet",
                self.name
            );
            return;
        };

        // The loop may have reached Stopped on its own; joining is then just
        // reaping the finished thread to get the behaviour box back.
        if !self.status.alive.load(Ordering::Acquire) {
            debug!("{} already stopped; reaping the loop thread", self.name);
        }

        self.status.running.store(false, Ordering::Release);
        self.status.alive.store(false, Ordering::Release);

        // Notify under the tick mutex: the loop checks `running` while
        // holding it, so the store and notification cannot land between its
        // predicate check and the condvar wait.
        {
            let _guard = self
                .status
                .tick
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            self.status.wake.notify_all();
        }

        match handle.join() {
            Ok(behaviour) => self.behaviour = Some(behaviour),
            Err(_) => error!("{} supervisor thread panicked", self.name),
        }
    }
}

/// The control loop. Runs on the dedicated thread; returns the behaviour
/// box at exit so the supervisor can hand it back for a restart.
fn manage(
    name: String,
    bound: u32,
    cadence: Duration,
    status: Arc<Status>,
    mut behaviour: Box<dyn Behaviour + Send>,
) -> Box<dyn Behaviour + Send> {
    loop {
        let state = status.snapshot().current;
        if state.is_terminal() || !status.running.load(Ordering::Acquire) {
            break;
        }

        let signal = match state {
            State::Initialising => behaviour.init(),
            State::Configuring => {
                retry::drive_configuring(behaviour.as_mut(), &name, bound, &status.configured)
            }
            State::Ready => behaviour.ready(),
            State::Running => behaviour.running(),
            State::Recovering => retry::drive_recovering(behaviour.as_mut(), &name, bound),
            State::Start | State::Stopped => {
                status.record_fault(
                    EngineError::fatal()
                        .domain(Domain::Supervisor)
                        .kind(ErrorKind::InvalidState)
                        .msg("loop entered an unsupervised state")
                        .build(),
                );
                break;
            }
        };

        match table::resolve(state, signal) {
            Ok(target) => {
                let (from, to) = status.apply(target);
                if from != to {
                    info!("{name} transitioning: {} -> {}", from.label(), to.label());
                }
            }
            Err(err) => {
                status.record_fault(err);
                break;
            }
        }

        status.pause(cadence);
    }

    if status.running.load(Ordering::Acquire) {
        status.running.store(false, Ordering::Release);
    }
    status.alive.store(false, Ordering::Release);

    behaviour
}

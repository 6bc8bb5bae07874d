//! Worker channel adapter.
//!
//! Owns the single background countdown task for the life of the
//! application and exposes a typed send/subscribe surface. The task is a
//! tokio task that owns a [`CountdownEngine`]; control messages go in over an
//! mpsc channel, events come out over a broadcast channel so any number of
//! listeners can attach and detach without touching the task.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle -> Initializing -> Ready -> (Error | Terminated)
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, trace, warn};

use super::engine::CountdownEngine;
use super::protocol::{EngineControlMessage, EngineEvent};
use super::EngineSink;
use crate::clock::{Clock, SystemClock};
use crate::error::WorkerError;

/// Poll period of the engine task. Finer than one second so scheduler jitter
/// never hides a whole-second boundary.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Events buffered per subscriber before it starts lagging.
const EVENT_BUFFER_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerStatus {
    /// No engine task exists yet.
    Idle,
    Initializing,
    /// Engine task is running and accepts messages.
    Ready,
    /// Engine failed; this instance is unusable.
    Error,
    Terminated,
}

/// Cloneable handle to the engine task. All clones address the same task.
#[derive(Clone)]
pub struct WorkerChannel {
    inner: Arc<Inner>,
}

struct Inner {
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    status: Arc<watch::Sender<WorkerStatus>>,
    events: broadcast::Sender<EngineEvent>,
    control: Mutex<Option<mpsc::UnboundedSender<EngineControlMessage>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl WorkerChannel {
    /// Channel using the system clock and the default poll interval.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock), DEFAULT_POLL_INTERVAL)
    }

    pub fn with_clock(clock: Arc<dyn Clock>, poll_interval: Duration) -> Self {
        let (status, _) = watch::channel(WorkerStatus::Idle);
        let (events, _) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self {
            inner: Arc::new(Inner {
                clock,
                poll_interval,
                status: Arc::new(status),
                events,
                control: Mutex::new(None),
                task: Mutex::new(None),
            }),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn status(&self) -> WorkerStatus {
        *self.inner.status.borrow()
    }

    pub fn watch_status(&self) -> watch::Receiver<WorkerStatus> {
        self.inner.status.subscribe()
    }

    /// Attach a listener. Dropping the receiver detaches it; the engine task
    /// keeps running for other listeners.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.inner.events.subscribe()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Spawn the engine task on the current tokio runtime.
    ///
    /// A no-op when the task is already starting or running.
    ///
    /// # Errors
    ///
    /// Returns an error when no runtime is available (the failure is also
    /// broadcast as an ERROR event) or when this instance already failed or
    /// was terminated.
    pub fn init(&self) -> Result<(), WorkerError> {
        let mut control = lock(&self.inner.control);

        match self.status() {
            WorkerStatus::Initializing | WorkerStatus::Ready => {
                debug!("timer engine already initialized");
                return Ok(());
            }
            WorkerStatus::Error => return Err(WorkerError::Faulted),
            WorkerStatus::Terminated => return Err(WorkerError::Terminated),
            WorkerStatus::Idle => {}
        }

        self.inner.status.send_replace(WorkerStatus::Initializing);
        debug!("initializing timer engine");

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                let message = format!("no async runtime available: {e}");
                self.fail(&message);
                return Err(WorkerError::Spawn(message));
            }
        };

        let (control_tx, control_rx) = mpsc::unbounded_channel();
        let engine = CountdownEngine::new(Arc::clone(&self.inner.clock));
        let task = handle.spawn(run_engine(
            engine,
            control_rx,
            self.inner.events.clone(),
            Arc::clone(&self.inner.status),
            self.inner.poll_interval,
        ));

        *control = Some(control_tx);
        *lock(&self.inner.task) = Some(task);
        self.inner.status.send_replace(WorkerStatus::Ready);
        debug!("timer engine ready");
        Ok(())
    }

    /// Deliver a control message. Dropped with a warning unless the engine is
    /// ready.
    pub fn send(&self, message: EngineControlMessage) {
        let status = self.status();
        if status != WorkerStatus::Ready {
            warn!(
                ?status,
                message = message.name(),
                "timer engine not ready, dropping message"
            );
            return;
        }

        let control = lock(&self.inner.control);
        match control.as_ref() {
            Some(tx) => {
                trace!(message = message.name(), "sending to timer engine");
                if tx.send(message).is_err() {
                    warn!(message = message.name(), "timer engine stopped, dropping message");
                }
            }
            None => warn!(message = message.name(), "timer engine has no control channel"),
        }
    }

    /// Stop the engine task. Only meant for application shutdown; the
    /// instance accepts no further messages.
    pub fn terminate(&self) {
        lock(&self.inner.control).take();
        if let Some(task) = lock(&self.inner.task).take() {
            task.abort();
        }
        if self.status() != WorkerStatus::Terminated {
            debug!("timer engine terminated");
            self.inner.status.send_replace(WorkerStatus::Terminated);
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn fail(&self, message: &str) {
        error!("timer engine failed: {message}");
        self.inner.status.send_replace(WorkerStatus::Error);
        let _ = self.inner.events.send(EngineEvent::Error {
            message: message.to_string(),
        });
    }
}

impl Default for WorkerChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineSink for WorkerChannel {
    fn send(&self, message: EngineControlMessage) {
        WorkerChannel::send(self, message);
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let task = self.task.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = task.take() {
            task.abort();
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Engine task: applies control messages and polls while a countdown runs.
async fn run_engine(
    mut engine: CountdownEngine,
    mut control_rx: mpsc::UnboundedReceiver<EngineControlMessage>,
    events: broadcast::Sender<EngineEvent>,
    status: Arc<watch::Sender<WorkerStatus>>,
    poll_interval: Duration,
) {
    debug!(?poll_interval, "timer engine task starting");

    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let emitted = tokio::select! {
            message = control_rx.recv() => {
                let Some(message) = message else {
                    debug!("control channel closed, stopping timer engine task");
                    break;
                };
                trace!(message = message.name(), "timer engine received message");
                match message {
                    EngineControlMessage::Start { duration_seconds } => {
                        ticker.reset();
                        engine.start(duration_seconds)
                    }
                    EngineControlMessage::Pause => {
                        engine.pause();
                        Vec::new()
                    }
                    EngineControlMessage::Resume => {
                        ticker.reset();
                        engine.resume();
                        Vec::new()
                    }
                    EngineControlMessage::Reset => {
                        engine.reset();
                        Vec::new()
                    }
                }
            }
            _ = ticker.tick(), if engine.is_polling() => engine.poll(),
        };

        let mut faulted = false;
        for event in emitted {
            if let EngineEvent::Error { message } = &event {
                error!("timer engine error: {message}");
                faulted = true;
            }
            if events.send(event).is_err() {
                trace!("no listeners attached to timer engine");
            }
        }

        if faulted {
            status.send_replace(WorkerStatus::Error);
            break;
        }
    }
}

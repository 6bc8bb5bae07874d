//! Async driver for a [`SessionMachine`].
//!
//! The controller owns the machine and serializes everything that touches
//! it: user commands arrive on an mpsc channel, engine events on the worker
//! channel's broadcast. After each step it publishes a [`TimerState`]
//! snapshot and persists whatever changed.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::CoreError;
use crate::notify::Notifier;
use crate::session::SessionMachine;
use crate::storage::{
    load_history, load_settings, save_history, save_settings, KeyValueStore, PomodoroSettings,
};
use crate::timer::{TimerMode, TimerState};
use crate::worker::WorkerChannel;

/// User intents accepted by [`Controller::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start(Option<TimerMode>),
    Pause,
    Resume,
    Reset,
    Skip,
    UpdateSettings(PomodoroSettings),
    Shutdown,
}

pub struct Controller {
    machine: SessionMachine,
    channel: WorkerChannel,
    store: Arc<dyn KeyValueStore>,
    snapshot_tx: watch::Sender<TimerState>,
    persisted_records: usize,
}

impl Controller {
    /// `machine` must send its control messages through `channel`.
    pub fn new(
        machine: SessionMachine,
        channel: WorkerChannel,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(machine.state().clone());
        let persisted_records = machine.history().len();
        Self {
            machine,
            channel,
            store,
            snapshot_tx,
            persisted_records,
        }
    }

    /// Build a machine from the settings and history in `store`.
    pub fn from_store(
        channel: WorkerChannel,
        store: Arc<dyn KeyValueStore>,
        notifier: Box<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let settings = load_settings(store.as_ref());
        let history = load_history(store.as_ref());
        debug!(records = history.len(), "loaded session history");
        let machine = SessionMachine::with_history(
            settings,
            Box::new(channel.clone()),
            notifier,
            clock,
            history,
        );
        Self::new(machine, channel, store)
    }

    pub fn snapshots(&self) -> watch::Receiver<TimerState> {
        self.snapshot_tx.subscribe()
    }

    /// Drive the machine until [`Command::Shutdown`] arrives or every
    /// command sender is dropped. The engine task is stopped on return.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine task cannot be started.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) -> Result<(), CoreError> {
        let mut events = self.channel.subscribe();

        if let Err(e) = self.channel.init() {
            while let Ok(event) = events.try_recv() {
                self.machine.handle_event(event);
            }
            return Err(e.into());
        }
        info!("timer controller running");

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.apply(command),
                },
                event = events.recv() => match event {
                    Ok(event) => self.machine.handle_event(event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "controller fell behind the timer engine");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
            }
            self.publish();
        }

        self.channel.terminate();
        info!("timer controller stopped");
        Ok(())
    }

    fn apply(&mut self, command: Command) {
        debug!(?command, "applying command");
        match command {
            Command::Start(mode) => self.machine.start_timer(mode),
            Command::Pause => self.machine.pause_timer(),
            Command::Resume => self.machine.resume_timer(),
            Command::Reset => self.machine.reset_timer(),
            Command::Skip => self.machine.skip_to_next(),
            Command::UpdateSettings(settings) => match self.machine.update_settings(settings) {
                Ok(()) => {
                    if let Err(e) = save_settings(self.store.as_ref(), self.machine.settings()) {
                        warn!("failed to persist settings: {e}");
                    }
                }
                Err(e) => warn!("rejected settings update: {e}"),
            },
            Command::Shutdown => {}
        }
    }

    fn publish(&mut self) {
        let history = self.machine.history();
        if history.len() != self.persisted_records {
            match save_history(self.store.as_ref(), history) {
                Ok(()) => self.persisted_records = history.len(),
                Err(e) => warn!("failed to persist session history: {e}"),
            }
        }

        let state = self.machine.state();
        self.snapshot_tx.send_if_modified(|current| {
            if current == state {
                return false;
            }
            *current = state.clone();
            true
        });
    }
}

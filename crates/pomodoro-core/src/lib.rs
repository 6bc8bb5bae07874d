//! # Pomodoro Core Library
//!
//! This library provides the execution core of a Pomodoro timer: a
//! background countdown engine, the session state machine that sequences
//! focus sessions and breaks, and persistence for settings and history.
//! The CLI binary is a thin driver over the same library.
//!
//! ## Architecture
//!
//! - **Worker**: A tokio task anchored to an absolute wall-clock deadline.
//!   It is driven by control messages and emits whole-second ticks plus a
//!   single completion event
//! - **Session**: A state machine that reacts to user intents and engine
//!   events, advances the focus/break cycle, and records focus sessions
//! - **Storage**: JSON values in a key-value store (settings and history)
//! - **Controller**: Async loop wiring the three together
//!
//! ## Key Components
//!
//! - [`WorkerChannel`]: Lifecycle-managed handle to the countdown task
//! - [`SessionMachine`]: Timer state transitions
//! - [`Controller`]: Command/event loop with persistence
//! - [`PomodoroSettings`]: User-configurable durations and behavior

pub mod clock;
pub mod controller;
pub mod error;
pub mod notify;
pub mod session;
pub mod storage;
pub mod timer;
pub mod worker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{Command, Controller};
pub use error::{ConfigError, CoreError, NotifyError, StorageError, ValidationError, WorkerError};
pub use notify::{Notifier, SilentNotifier, SoundType, TerminalBell};
pub use session::{History, SessionMachine, SessionRecord};
pub use storage::{FileStore, KeyValueStore, MemoryStore, PomodoroSettings};
pub use timer::{TimerMode, TimerState};
pub use worker::{EngineControlMessage, EngineEvent, EngineSink, WorkerChannel, WorkerStatus};

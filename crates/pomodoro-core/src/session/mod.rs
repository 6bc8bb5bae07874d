//! Pomodoro session sequencing and history.

mod machine;
mod recorder;

pub use machine::SessionMachine;
pub use recorder::{History, SessionRecord, SessionRecorder};

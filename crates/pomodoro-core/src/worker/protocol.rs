//! Messages crossing the engine boundary.
//!
//! These two enums are the whole contract between the session layer and the
//! background countdown. They travel as typed values over channels; the serde
//! form is the documented wire shape:
//!
//! ```text
//! {"type":"START","payload":{"duration":1500}}
//! {"type":"TICK","payload":{"timeRemaining":42}}
//! {"type":"COMPLETE"}
//! ```

use serde::{Deserialize, Serialize};

/// Session -> engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineControlMessage {
    Start {
        #[serde(rename = "duration")]
        duration_seconds: u64,
    },
    Pause,
    Resume,
    Reset,
}

/// Engine -> session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineEvent {
    Tick {
        #[serde(rename = "timeRemaining")]
        time_remaining_seconds: u64,
    },
    Complete,
    Error { message: String },
}

impl EngineControlMessage {
    pub fn name(&self) -> &'static str {
        match self {
            EngineControlMessage::Start { .. } => "START",
            EngineControlMessage::Pause => "PAUSE",
            EngineControlMessage::Resume => "RESUME",
            EngineControlMessage::Reset => "RESET",
        }
    }
}

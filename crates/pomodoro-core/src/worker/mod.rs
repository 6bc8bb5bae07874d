mod channel;
mod engine;
mod protocol;

pub use channel::{WorkerChannel, WorkerStatus, DEFAULT_POLL_INTERVAL};
pub use engine::CountdownEngine;
pub use protocol::{EngineControlMessage, EngineEvent};

/// Anything that can carry control messages to the countdown engine.
///
/// Sending is fire-and-forget: implementations must not block and must not
/// fail loudly when the engine cannot take the message.
pub trait EngineSink: Send {
    fn send(&self, message: EngineControlMessage);
}

use serde::{Deserialize, Serialize};

use super::mode::TimerMode;

/// Observable timer state. Written only by the session state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub mode: TimerMode,
    pub time_remaining_seconds: u64,
    pub is_running: bool,
    /// Lifetime count of completed focus sessions.
    pub completed_focus_count: u64,
    /// Focus sessions completed since the last long break.
    pub current_cycle_index: u32,
    /// Mode queued to start when the user next presses start (idle only).
    pub pending_next_mode: Option<TimerMode>,
}

impl TimerState {
    pub fn new() -> Self {
        Self {
            mode: TimerMode::Idle,
            time_remaining_seconds: 0,
            is_running: false,
            completed_focus_count: 0,
            current_cycle_index: 0,
            pending_next_mode: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.mode == TimerMode::Idle
    }

    /// Paused means a countdown exists but is not advancing.
    pub fn is_paused(&self) -> bool {
        !self.is_idle() && !self.is_running
    }

    /// Remaining time as `MM:SS`.
    pub fn formatted_remaining(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.time_remaining_seconds / 60,
            self.time_remaining_seconds % 60
        )
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

mod mode;
mod state;

pub use mode::TimerMode;
pub use state::TimerState;

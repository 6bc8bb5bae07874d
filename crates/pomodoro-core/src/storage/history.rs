//! Session history persistence under the `pomodoro-records` key.

use super::KeyValueStore;
use crate::error::Result;
use crate::session::History;

pub const HISTORY_KEY: &str = "pomodoro-records";

/// Load the history, falling back to an empty one on missing or bad data.
pub fn load_history(store: &dyn KeyValueStore) -> History {
    match store.load(HISTORY_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("stored history is malformed, starting empty: {e}");
            History::new()
        }),
        Ok(None) => History::new(),
        Err(e) => {
            tracing::warn!("failed to read history, starting empty: {e}");
            History::new()
        }
    }
}

/// # Errors
///
/// Returns an error if the history cannot be encoded or written.
pub fn save_history(store: &dyn KeyValueStore, history: &History) -> Result<()> {
    let json = serde_json::to_string(history)?;
    store.save(HISTORY_KEY, &json)?;
    Ok(())
}

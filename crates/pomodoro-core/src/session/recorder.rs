//! Focus session history.
//!
//! A [`SessionRecord`] is created when a focus session ends, either by
//! running out (`completed: true`) or by being reset (`completed: false`).
//! Breaks are never recorded. Records are appended to [`History`] and never
//! changed afterwards.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Creation time in epoch milliseconds, unique within a history.
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub completed: bool,
    pub session_number: u64,
}

/// Ordered, append-only list of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<SessionRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: SessionRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.records.iter().filter(|r| r.completed).count()
    }

    /// Completed sessions that ended on `day` (UTC).
    pub fn today_completed_count(&self, day: NaiveDate) -> usize {
        self.records
            .iter()
            .filter(|r| r.completed && r.end_time.date_naive() == day)
            .count()
    }

    /// Largest numeric id present, if any.
    fn max_id(&self) -> Option<u64> {
        self.records
            .iter()
            .filter_map(|r| r.id.parse::<u64>().ok())
            .max()
    }
}

/// Turns session timestamps into records with time-derived unique ids.
pub struct SessionRecorder {
    clock: Arc<dyn Clock>,
    last_id: u64,
}

impl SessionRecorder {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock, last_id: 0 }
    }

    /// Continue id allocation after the records already in `history`.
    pub fn continuing(clock: Arc<dyn Clock>, history: &History) -> Self {
        Self {
            clock,
            last_id: history.max_id().unwrap_or(0),
        }
    }

    /// Build a record ending now.
    pub fn record(
        &mut self,
        start_time: DateTime<Utc>,
        completed: bool,
        session_number: u64,
    ) -> SessionRecord {
        let now_ms = self.clock.now_ms();
        let id = if now_ms > self.last_id {
            now_ms
        } else {
            self.last_id + 1
        };
        self.last_id = id;

        SessionRecord {
            id: id.to_string(),
            start_time,
            end_time: self.clock.now(),
            completed,
            session_number,
        }
    }
}

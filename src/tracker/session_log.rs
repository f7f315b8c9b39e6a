//! In-memory log of finalized work sessions.

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{WorkSession, YearMonth};

/// Finalized sessions, keyed by an increasing id.
///
/// Sessions are immutable once recorded: the stored pay is what reports
/// show, even if rates change afterwards.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    sessions: Vec<WorkSession>,
    next_id: u64,
}

impl SessionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self {
            sessions: Vec::new(),
            next_id: 1,
        }
    }

    /// Stores `session` under a fresh id and returns the stored copy.
    pub fn record(&mut self, mut session: WorkSession) -> WorkSession {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        session.id = id;

        debug!(session_id = id, minutes = session.total_minutes, "Recording work session");
        self.sessions.push(session.clone());
        session
    }

    /// Removes the session with `id`.
    pub fn delete(&mut self, id: u64) -> EngineResult<WorkSession> {
        let index = self
            .sessions
            .iter()
            .position(|s| s.id == id)
            .ok_or(EngineError::SessionNotFound { id })?;
        debug!(session_id = id, "Deleting work session");
        Ok(self.sessions.remove(index))
    }

    /// Looks up a session by id.
    pub fn get(&self, id: u64) -> Option<&WorkSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Sessions that started in `month`, newest first.
    pub fn sessions_in_month(&self, month: YearMonth) -> Vec<WorkSession> {
        let mut sessions: Vec<WorkSession> = self
            .sessions
            .iter()
            .filter(|s| month.contains(s.start_time))
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.start_time.cmp(&a.start_time).then(b.id.cmp(&a.id)));
        sessions
    }

    /// Every session, in recording order.
    pub fn all(&self) -> &[WorkSession] {
        &self.sessions
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use rust_decimal::Decimal;

    fn session(start: &str) -> WorkSession {
        let start = NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M").unwrap();
        WorkSession {
            id: 0,
            start_time: start,
            end_time: start + chrono::Duration::hours(1),
            total_minutes: 60,
            total_pay: Decimal::new(780, 2),
        }
    }

    #[test]
    fn test_record_assigns_increasing_ids() {
        let mut log = SessionLog::new();
        let a = log.record(session("2024-03-04 09:00"));
        let b = log.record(session("2024-03-05 09:00"));
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        log.delete(b.id).unwrap();
        let c = log.record(session("2024-03-06 09:00"));
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_delete_unknown_session() {
        let mut log = SessionLog::new();
        match log.delete(7) {
            Err(EngineError::SessionNotFound { id }) => assert_eq!(id, 7),
            other => panic!("Expected SessionNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_sessions_in_month_newest_first() {
        let mut log = SessionLog::new();
        log.record(session("2024-03-10 09:00"));
        log.record(session("2024-02-28 09:00"));
        log.record(session("2024-03-02 09:00"));
        log.record(session("2024-03-31 23:30"));

        let march = log.sessions_in_month("2024-03".parse().unwrap());
        let starts: Vec<String> = march
            .iter()
            .map(|s| s.start_time.format("%m-%d").to_string())
            .collect();
        assert_eq!(starts, vec!["03-31", "03-10", "03-02"]);
        assert_eq!(log.len(), 4);
        assert!(log.get(2).is_some());
    }
}

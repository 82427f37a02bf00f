//! Persisted audit log row.

use chrono::{DateTime, Utc};

use crate::domain::log_event::{Actor, LogEvent};

/// A row in the append-only audit log.
///
/// `actor` and `event` are stored as JSON text columns; decoding happens in
/// the repository so the rest of the code works with typed values.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub actor: Actor,
    pub event: LogEvent,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_holds_typed_payload() {
        let entry = LogEntry {
            id: 1,
            actor: Actor::Cli,
            event: LogEvent::RedirectRemoved {
                short_link: "docs".to_string(),
            },
            created_at: Utc::now(),
        };

        assert_eq!(entry.actor, Actor::Cli);
        assert!(matches!(entry.event, LogEvent::RedirectRemoved { .. }));
    }
}

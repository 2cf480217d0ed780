use chrono::{DateTime, Utc};
use splitlater_domain::{Ledger, MembershipPolicy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub recorded_at: DateTime<Utc>,
    pub text: String,
}

#[derive(Debug, Default)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    pub fn record(&mut self, recorded_at: DateTime<Utc>, text: impl Into<String>) {
        self.entries.push(LogEntry {
            recorded_at,
            text: text.into(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// State of one chat: its ledger and the log of changes since the last reset.
#[derive(Debug, Default)]
pub struct Session {
    ledger: Ledger,
    log: ActivityLog,
}

impl Session {
    pub fn new(policy: MembershipPolicy) -> Self {
        Self {
            ledger: Ledger::with_policy(policy),
            log: ActivityLog::default(),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn record(&mut self, recorded_at: DateTime<Utc>, text: impl Into<String>) {
        self.log.record(recorded_at, text);
    }

    /// Clears the ledger and the log. The membership policy is kept.
    pub fn reset(&mut self) {
        self.ledger.clear();
        self.log.clear();
    }
}

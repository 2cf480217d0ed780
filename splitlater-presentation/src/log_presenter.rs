use crate::messages;
use chrono::FixedOffset;
use splitlater_application::LogEntry;
use std::fmt::Write as _;

pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 8;
const TIMESTAMP_FORMAT: &str = "%a %d %b, %I:%M%p";

/// `None` when the offset is outside ±24 hours.
pub fn utc_offset_from_hours(hours: i32) -> Option<FixedOffset> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
}

#[derive(Clone, Copy, Debug)]
pub struct LogPresenter {
    offset: FixedOffset,
}

impl LogPresenter {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn render(&self, entries: &[LogEntry]) -> String {
        if entries.is_empty() {
            return messages::NO_LOGS.to_string();
        }

        let mut reply = String::with_capacity(64 * entries.len());
        for entry in entries {
            let local = entry.recorded_at.with_timezone(&self.offset);
            let _ = writeln!(
                reply,
                "{} --- {}",
                local.format(TIMESTAMP_FORMAT),
                entry.text
            );
        }
        reply.truncate(reply.trim_end().len());
        reply
    }
}

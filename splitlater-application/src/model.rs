use splitlater_domain::{EqualContributions, SharedContributions};
use std::borrow::Cow;

/// A parsed chat command. Names are still raw text at this point; they are
/// validated into participants by the message processor.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    Start,
    Help,
    Include(Vec<Cow<'a, str>>),
    Add {
        payer: Cow<'a, str>,
        amount: f64,
    },
    Split {
        payer: Cow<'a, str>,
        amount: f64,
        sharers: Vec<Cow<'a, str>>,
    },
    Delete(Cow<'a, str>),
    View,
    Resolve,
    Logs,
}

/// Snapshot of a session's contributions, detached from the session lock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContributionsView {
    pub equal: EqualContributions,
    pub shared: SharedContributions,
}

impl ContributionsView {
    pub fn is_empty(&self) -> bool {
        self.equal.is_empty() && self.shared.is_empty()
    }
}

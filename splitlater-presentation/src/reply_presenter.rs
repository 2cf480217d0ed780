use crate::{
    contributions_presenter::ContributionsPresenter, error_presenter::format_failure,
    log_presenter::LogPresenter, messages, settlement_presenter::SettlementPresenter,
};
use splitlater_application::ProcessingOutcome;

/// Turns a processing outcome into the text sent back to the chat.
#[derive(Clone, Copy, Debug)]
pub struct ReplyPresenter {
    logs: LogPresenter,
}

impl ReplyPresenter {
    pub fn new(logs: LogPresenter) -> Self {
        Self { logs }
    }

    /// `None` for messages that get no reply.
    pub fn render(&self, outcome: &ProcessingOutcome) -> Option<String> {
        let reply = match outcome {
            ProcessingOutcome::NotCommand => return None,
            ProcessingOutcome::Started => messages::START.to_string(),
            ProcessingOutcome::Help => messages::HELP.to_string(),
            ProcessingOutcome::Included(participants) => messages::included(participants),
            ProcessingOutcome::Added => messages::ADDED.to_string(),
            ProcessingOutcome::Removed(_) => messages::REMOVED.to_string(),
            ProcessingOutcome::View(view) => ContributionsPresenter::render(view),
            ProcessingOutcome::Resolved(settlement) => SettlementPresenter::render(settlement),
            ProcessingOutcome::Logs(entries) => self.logs.render(entries),
            ProcessingOutcome::Failed(failure) => format_failure(failure),
        };
        Some(reply)
    }
}

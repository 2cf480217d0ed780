use crate::{amount::format_amount, messages};
use splitlater_application::ContributionsView;
use std::fmt::Write as _;

pub struct ContributionsPresenter;

impl ContributionsPresenter {
    pub fn render(view: &ContributionsView) -> String {
        if view.is_empty() {
            return messages::NO_RECORDS.to_string();
        }

        let mut reply = String::with_capacity(512);
        for (participant, amount) in &view.equal {
            let _ = writeln!(reply, "{participant} has paid {}", format_amount(*amount));
        }
        for (key, amount) in &view.shared {
            let sharers = key
                .sharers
                .iter()
                .map(|sharer| sharer.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(
                reply,
                "{} has paid {} shared with {sharers}",
                key.payer,
                format_amount(*amount)
            );
        }
        reply.truncate(reply.trim_end().len());
        reply
    }
}

use splitlater_application::{CommandParseError, FailureKind};

pub fn format_failure(failure: &FailureKind) -> String {
    match failure {
        FailureKind::Parse(CommandParseError::UnknownCommand(word)) => {
            format!("Error: Unknown command '!{word}'. Type !help to view all commands.")
        }
        other => format!("Error: {other}"),
    }
}

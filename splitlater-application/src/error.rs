use splitlater_domain::LedgerError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandParseError {
    #[error("Unknown command '!{0}'.")]
    UnknownCommand(String),
    #[error("Missing arguments. Usage: {usage}")]
    MissingArguments { usage: &'static str },
    #[error("'{0}' is not a number.")]
    NonNumericAmount(String),
    #[error("Unexpected input '{0}'. Send one command per message.")]
    UnexpectedInput(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidNameReason {
    Empty,
    TooLong,
    ControlCharacter,
    CommandPrefix,
    Numeric,
}

impl InvalidNameReason {
    fn describe(self) -> &'static str {
        match self {
            InvalidNameReason::Empty => "names cannot be empty",
            InvalidNameReason::TooLong => "names are limited to 64 characters",
            InvalidNameReason::ControlCharacter => "names cannot contain control characters",
            InvalidNameReason::CommandPrefix => "names cannot start with '!'",
            InvalidNameReason::Numeric => "names cannot be numbers",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("'{name}' is not a valid name: {}", .reason.describe())]
    InvalidParticipant {
        name: String,
        reason: InvalidNameReason,
    },
    #[error("'{0}' is listed more than once.")]
    DuplicateParticipant(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FailureKind {
    #[error(transparent)]
    Parse(#[from] CommandParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#![warn(clippy::uninlined_format_args)]

pub mod command_syntax;
pub mod error;
pub mod message_processor;
pub mod model;
pub mod ports;
pub mod session;
pub mod validation;

pub use error::{CommandParseError, FailureKind, InvalidNameReason, ValidationError};
pub use message_processor::{MessageProcessor, ProcessingOutcome};
pub use model::{Command, ContributionsView};
pub use ports::CommandParser;
pub use session::{ActivityLog, LogEntry, Session};

use crate::{error::CommandParseError, model::Command};

pub trait CommandParser: Send + Sync {
    /// `Ok(None)` means the message is ordinary chat, not a command.
    fn parse<'a>(&self, content: &'a str) -> Result<Option<Command<'a>>, CommandParseError>;
}

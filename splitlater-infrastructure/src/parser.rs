use splitlater_application::{Command, CommandParseError, CommandParser};
use splitlater_parser::{Command as ParserCommand, ParseError, parse_command};

#[derive(Default)]
pub struct SplitLaterCommandParser;

impl CommandParser for SplitLaterCommandParser {
    fn parse<'a>(&self, content: &'a str) -> Result<Option<Command<'a>>, CommandParseError> {
        match parse_command(content) {
            Ok(command) => Ok(command.map(to_command)),
            Err(err) => Err(to_parse_error(err)),
        }
    }
}

fn to_command(command: ParserCommand<'_>) -> Command<'_> {
    match command {
        ParserCommand::Start => Command::Start,
        ParserCommand::Help => Command::Help,
        ParserCommand::Include(names) => Command::Include(names),
        ParserCommand::Add { payer, amount } => Command::Add { payer, amount },
        ParserCommand::Split {
            payer,
            amount,
            sharers,
        } => Command::Split {
            payer,
            amount,
            sharers,
        },
        ParserCommand::Delete(name) => Command::Delete(name),
        ParserCommand::View => Command::View,
        ParserCommand::Resolve => Command::Resolve,
        ParserCommand::Logs => Command::Logs,
    }
}

fn to_parse_error(err: ParseError) -> CommandParseError {
    match err {
        ParseError::UnknownCommand(word) => CommandParseError::UnknownCommand(word),
        ParseError::MissingArguments(kind) => CommandParseError::MissingArguments {
            usage: kind.usage(),
        },
        ParseError::NonNumericAmount(token) => CommandParseError::NonNumericAmount(token),
        ParseError::UnexpectedInput(line) => CommandParseError::UnexpectedInput(line),
    }
}

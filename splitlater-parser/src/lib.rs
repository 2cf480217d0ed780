#![warn(clippy::uninlined_format_args)]

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till, take_while1},
    character::complete::char,
    combinator::{all_consuming, not, opt, recognize},
    multi::{many0, separated_list1},
    number::complete::double,
    sequence::preceded,
};
use std::borrow::Cow;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    Start,
    Help,
    Include,
    Add,
    Split,
    Delete,
    View,
    Resolve,
    Logs,
}

impl CommandKind {
    pub const ALL: [CommandKind; 9] = [
        CommandKind::Start,
        CommandKind::Help,
        CommandKind::Include,
        CommandKind::Add,
        CommandKind::Split,
        CommandKind::Delete,
        CommandKind::View,
        CommandKind::Resolve,
        CommandKind::Logs,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            CommandKind::Start => "start",
            CommandKind::Help => "help",
            CommandKind::Include => "include",
            CommandKind::Add => "add",
            CommandKind::Split => "split",
            CommandKind::Delete => "del",
            CommandKind::View => "view",
            CommandKind::Resolve => "resolve",
            CommandKind::Logs => "logs",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            CommandKind::Start => "!start",
            CommandKind::Help => "!help",
            CommandKind::Include => "!include John Mary Alex",
            CommandKind::Add => "!add John 10",
            CommandKind::Split => "!split John 30 Mary Alex",
            CommandKind::Delete => "!del John",
            CommandKind::View => "!view",
            CommandKind::Resolve => "!resolve",
            CommandKind::Logs => "!logs",
        }
    }

    fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.keyword().eq_ignore_ascii_case(word))
    }
}

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

impl Command<'_> {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Start => CommandKind::Start,
            Command::Help => CommandKind::Help,
            Command::Include(_) => CommandKind::Include,
            Command::Add { .. } => CommandKind::Add,
            Command::Split { .. } => CommandKind::Split,
            Command::Delete(_) => CommandKind::Delete,
            Command::View => CommandKind::View,
            Command::Resolve => CommandKind::Resolve,
            Command::Logs => CommandKind::Logs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown command '!{0}'.")]
    UnknownCommand(String),
    #[error("Missing arguments. Usage: {}", .0.usage())]
    MissingArguments(CommandKind),
    #[error("'{0}' is not a number.")]
    NonNumericAmount(String),
    #[error("Unexpected input '{0}'. Send one command per message.")]
    UnexpectedInput(String),
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

fn line_comment(input: &str) -> IResult<&str, &str> {
    recognize((tag("//"), take_till(|c: char| c == '\n'))).parse(input)
}

fn sp(input: &str) -> IResult<&str, &str> {
    recognize(many0(alt((
        take_while1(|c: char| c.is_whitespace()),
        line_comment,
    ))))
    .parse(input)
}

fn command_word(input: &str) -> IResult<&str, &str> {
    preceded(char('!'), take_while1(|c: char| !c.is_whitespace())).parse(input)
}

fn token(input: &str) -> IResult<&str, &str> {
    preceded(not(tag("//")), take_while1(|c: char| !is_separator(c))).parse(input)
}

fn token_group(input: &str) -> IResult<&str, Vec<&str>> {
    many0(preceded(sp, token)).parse(input)
}

/// Argument tokens, grouped by the commas between them.
fn arguments(input: &str) -> IResult<&str, Vec<Vec<&str>>> {
    (separated_list1(preceded(sp, char(',')), token_group), sp)
        .map(|(groups, _)| groups)
        .parse(input)
}

fn amount(input: &str) -> IResult<&str, f64> {
    all_consuming(preceded(opt(char('$')), double)).parse(input)
}

fn parse_amount(token: &str) -> Result<f64, ParseError> {
    amount(token)
        .map(|(_, value)| value)
        .map_err(|_| ParseError::NonNumericAmount(token.to_string()))
}

fn join_name<'a>(tokens: &[&'a str]) -> Cow<'a, str> {
    match tokens {
        [single] => Cow::Borrowed(*single),
        _ => Cow::Owned(tokens.join(" ")),
    }
}

/// A list of names. Once a message contains a comma, commas alone separate
/// names, so `John Smith, Mary` is two people. Otherwise every token is a name.
fn names<'a>(tokens: &[(usize, &'a str)], comma_separated: bool) -> Vec<Cow<'a, str>> {
    if !comma_separated {
        return tokens.iter().map(|(_, token)| Cow::Borrowed(*token)).collect();
    }
    tokens
        .chunk_by(|a, b| a.0 == b.0)
        .map(|group| {
            let words: Vec<&str> = group.iter().map(|(_, token)| *token).collect();
            join_name(&words)
        })
        .collect()
}

/// Parses one chat message.
///
/// Returns `Ok(None)` when the message is not addressed to the bot (does not
/// start with `!`).
pub fn parse_command(input: &str) -> Result<Option<Command<'_>>, ParseError> {
    let mut lines = input.trim().lines().filter(|line| !line.trim().is_empty());
    let Some(first) = lines.next() else {
        return Ok(None);
    };

    let Ok((rest, word)) = command_word(first.trim_start()) else {
        return Ok(None);
    };
    let Some(kind) = CommandKind::from_keyword(word) else {
        return Err(ParseError::UnknownCommand(word.to_string()));
    };
    if let Some(extra) = lines.next() {
        return Err(ParseError::UnexpectedInput(extra.trim().to_string()));
    }

    let groups = match arguments(rest) {
        Ok((_, groups)) => groups,
        Err(_) => return Err(ParseError::MissingArguments(kind)),
    };
    let comma_separated = groups.len() > 1;
    // Each token tagged with the comma-separated group it came from.
    let tagged: Vec<(usize, &str)> = groups
        .iter()
        .enumerate()
        .flat_map(|(group, tokens)| tokens.iter().map(move |token| (group, *token)))
        .collect();
    let args: Vec<&str> = tagged.iter().map(|(_, token)| *token).collect();

    let command = match kind {
        CommandKind::Start => Command::Start,
        CommandKind::Help => Command::Help,
        CommandKind::View => Command::View,
        CommandKind::Resolve => Command::Resolve,
        CommandKind::Logs => Command::Logs,
        CommandKind::Include => {
            if args.is_empty() {
                return Err(ParseError::MissingArguments(kind));
            }
            Command::Include(names(&tagged, comma_separated))
        }
        CommandKind::Add => {
            let [name @ .., last] = args.as_slice() else {
                return Err(ParseError::MissingArguments(kind));
            };
            if name.is_empty() {
                return Err(ParseError::MissingArguments(kind));
            }
            Command::Add {
                payer: join_name(name),
                amount: parse_amount(last)?,
            }
        }
        CommandKind::Split => {
            // The payer runs up to the first token that reads as an amount.
            let Some(at) = args
                .iter()
                .skip(1)
                .position(|token| amount(token).is_ok())
                .map(|idx| idx + 1)
            else {
                return Err(match args.get(1) {
                    Some(token) => ParseError::NonNumericAmount(token.to_string()),
                    None => ParseError::MissingArguments(kind),
                });
            };
            let sharers = names(&tagged[at + 1..], comma_separated);
            if sharers.is_empty() {
                return Err(ParseError::MissingArguments(kind));
            }
            Command::Split {
                payer: join_name(&args[..at]),
                amount: parse_amount(args[at])?,
                sharers,
            }
        }
        CommandKind::Delete => {
            if args.is_empty() {
                return Err(ParseError::MissingArguments(kind));
            }
            Command::Delete(join_name(&args))
        }
    };

    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::start("!start", Command::Start)]
    #[case::help_uppercase("!HELP", Command::Help)]
    #[case::view_trailing_space("!view  ", Command::View)]
    #[case::resolve_ignores_extra("!resolve now", Command::Resolve)]
    #[case::logs_leading_space("  !logs", Command::Logs)]
    fn test_parse_simple_commands(#[case] input: &str, #[case] expected: Command<'_>) {
        assert_eq!(parse_command(input), Ok(Some(expected)));
    }

    #[rstest]
    #[case::spaces("!include John Mary Alex", &["John", "Mary", "Alex"])]
    #[case::commas("!include John, Mary,Alex", &["John", "Mary", "Alex"])]
    #[case::fullwidth_space("!include John\u{3000}Mary", &["John", "Mary"])]
    #[case::trailing_comment("!include John Mary // dinner crew", &["John", "Mary"])]
    #[case::multi_word_names("!include John Smith, Mary", &["John Smith", "Mary"])]
    #[case::commas_collapse_spacing("!include John   Smith,Mary Jane Lee", &["John Smith", "Mary Jane Lee"])]
    #[case::stray_commas("!include John,, Mary,", &["John", "Mary"])]
    fn test_parse_include(#[case] input: &str, #[case] expected: &[&str]) {
        let expected = expected.iter().copied().map(Cow::Borrowed).collect();
        assert_eq!(parse_command(input), Ok(Some(Command::Include(expected))));
    }

    #[rstest]
    #[case::single_name("!add John 10", "John", 10.0)]
    #[case::multi_word_name("!add John Smith 10", "John Smith", 10.0)]
    #[case::collapses_spacing("!add John   Smith 2.5", "John Smith", 2.5)]
    #[case::dollar_sign("!add John $12.40", "John", 12.4)]
    #[case::negative_adjustment("!add John -3", "John", -3.0)]
    #[case::exponent("!add John 1e2", "John", 100.0)]
    fn test_parse_add(#[case] input: &str, #[case] payer: &str, #[case] amount: f64) {
        let Ok(Some(Command::Add {
            payer: parsed_payer,
            amount: parsed_amount,
        })) = parse_command(input)
        else {
            panic!("expected add command for {input}");
        };
        assert_eq!(parsed_payer, payer);
        assert_eq!(parsed_amount, amount);
    }

    #[test]
    fn test_parse_add_keeps_non_finite_spellings() {
        let Ok(Some(Command::Add { amount, .. })) = parse_command("!add John inf") else {
            panic!("expected add command");
        };
        assert!(amount.is_infinite());
    }

    #[rstest]
    #[case::two_sharers("!split John 30 Mary Alex", "John", 30.0, &["Mary", "Alex"])]
    #[case::comma_sharers("!split John 30 Mary, Alex", "John", 30.0, &["Mary", "Alex"])]
    #[case::multi_word_payer("!split John Smith 30 Mary", "John Smith", 30.0, &["Mary"])]
    #[case::multi_word_sharers("!split Mary 30 John Smith, Alex", "Mary", 30.0, &["John Smith", "Alex"])]
    #[case::repeated_sharer("!split John 30 Mary Mary", "John", 30.0, &["Mary", "Mary"])]
    fn test_parse_split(
        #[case] input: &str,
        #[case] payer: &str,
        #[case] amount: f64,
        #[case] sharers: &[&str],
    ) {
        assert_eq!(
            parse_command(input),
            Ok(Some(Command::Split {
                payer: Cow::Borrowed(payer),
                amount,
                sharers: sharers.iter().copied().map(Cow::Borrowed).collect(),
            }))
        );
    }

    #[rstest]
    #[case::single("!del John", "John")]
    #[case::multi_word("!del John Smith", "John Smith")]
    fn test_parse_delete(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(
            parse_command(input),
            Ok(Some(Command::Delete(Cow::Borrowed(expected))))
        );
    }

    #[rstest]
    #[case::plain_text("hello there")]
    #[case::empty("")]
    #[case::bang_only("!")]
    #[case::blank_lines("\n  \n")]
    fn test_non_commands_are_ignored(#[case] input: &str) {
        assert_eq!(parse_command(input), Ok(None));
    }

    #[rstest]
    #[case::unknown("!settle", ParseError::UnknownCommand("settle".to_string()))]
    #[case::glued_suffix("!add10", ParseError::UnknownCommand("add10".to_string()))]
    #[case::add_without_amount("!add John", ParseError::MissingArguments(CommandKind::Add))]
    #[case::add_empty("!add", ParseError::MissingArguments(CommandKind::Add))]
    #[case::add_non_numeric("!add John ten", ParseError::NonNumericAmount("ten".to_string()))]
    #[case::add_trailing_garbage("!add John 10abc", ParseError::NonNumericAmount("10abc".to_string()))]
    #[case::split_without_sharers("!split John 30", ParseError::MissingArguments(CommandKind::Split))]
    #[case::split_non_numeric("!split John x Mary", ParseError::NonNumericAmount("x".to_string()))]
    #[case::split_payer_only("!split John", ParseError::MissingArguments(CommandKind::Split))]
    #[case::split_trailing_comma("!split John 30 ,", ParseError::MissingArguments(CommandKind::Split))]
    #[case::include_empty("!include", ParseError::MissingArguments(CommandKind::Include))]
    #[case::delete_empty("!del // nobody", ParseError::MissingArguments(CommandKind::Delete))]
    #[case::multiple_lines("!add John 10\n!add Mary 5", ParseError::UnexpectedInput("!add Mary 5".to_string()))]
    fn test_parse_errors(#[case] input: &str, #[case] expected: ParseError) {
        assert_eq!(parse_command(input), Err(expected));
    }

    #[test]
    fn test_usage_in_missing_arguments_message() {
        let err = ParseError::MissingArguments(CommandKind::Add);
        assert_eq!(err.to_string(), "Missing arguments. Usage: !add John 10");
    }

    #[test]
    fn test_every_keyword_round_trips() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_keyword(kind.keyword()), Some(kind));
        }
    }
}

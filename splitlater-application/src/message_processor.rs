use crate::{
    error::FailureKind,
    model::{Command, ContributionsView},
    ports::CommandParser,
    session::{LogEntry, Session},
    validation::{validate_participant, validate_participants},
};
use chrono::{DateTime, Utc};
use splitlater_domain::{LedgerError, Participant, Settlement};
use std::ops::Deref;

#[derive(Clone, Copy)]
pub struct MessageProcessor<'a> {
    parser: &'a dyn CommandParser,
}

#[derive(Debug, PartialEq)]
pub enum ProcessingOutcome {
    NotCommand,
    Started,
    Help,
    Included(Vec<Participant>),
    Added,
    Removed(Participant),
    View(ContributionsView),
    Resolved(Settlement),
    Logs(Vec<LogEntry>),
    Failed(FailureKind),
}

impl<'a> MessageProcessor<'a> {
    pub fn new(parser: &'a dyn CommandParser) -> Self {
        Self { parser }
    }

    /// Runs one chat message against `session`.
    ///
    /// A failed command leaves the session exactly as it was.
    pub fn process(
        &self,
        session: &mut Session,
        content: &str,
        sent_at: DateTime<Utc>,
    ) -> ProcessingOutcome {
        let command = match self.parser.parse(content) {
            Ok(Some(command)) => command,
            Ok(None) => return ProcessingOutcome::NotCommand,
            Err(err) => return ProcessingOutcome::Failed(err.into()),
        };

        Self::apply(session, command, content.trim(), sent_at)
            .unwrap_or_else(ProcessingOutcome::Failed)
    }

    fn apply(
        session: &mut Session,
        command: Command<'_>,
        text: &str,
        sent_at: DateTime<Utc>,
    ) -> Result<ProcessingOutcome, FailureKind> {
        let outcome = match command {
            Command::Start => {
                session.reset();
                ProcessingOutcome::Started
            }
            Command::Help => ProcessingOutcome::Help,
            Command::Include(names) => {
                let participants = validate_participants(names.iter().map(Deref::deref))?;
                session.ledger_mut().include(participants.iter().cloned());
                ProcessingOutcome::Included(participants)
            }
            Command::Add { payer, amount } => {
                let payer = validate_participant(&payer)?;
                session.ledger_mut().add_equal(payer, amount)?;
                session.record(sent_at, text);
                ProcessingOutcome::Added
            }
            Command::Split {
                payer,
                amount,
                sharers,
            } => {
                let payer = validate_participant(&payer)?;
                // Sharers form a set; repeats collapse in the ledger.
                let sharers = sharers
                    .iter()
                    .map(|name| validate_participant(name))
                    .collect::<Result<Vec<_>, _>>()?;
                session.ledger_mut().add_shared(payer, amount, sharers)?;
                session.record(sent_at, text);
                ProcessingOutcome::Added
            }
            Command::Delete(name) => {
                let participant = Participant::new(&name);
                if !session.ledger_mut().remove(participant.as_str()) {
                    return Err(LedgerError::UnknownParticipant(participant).into());
                }
                session.record(sent_at, text);
                ProcessingOutcome::Removed(participant)
            }
            Command::View => {
                let ledger = session.ledger();
                ProcessingOutcome::View(ContributionsView {
                    equal: ledger.equal_contributions().clone(),
                    shared: ledger.shared_contributions().clone(),
                })
            }
            Command::Resolve => ProcessingOutcome::Resolved(session.ledger().settle()),
            Command::Logs => ProcessingOutcome::Logs(session.log().entries().to_vec()),
        };

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{CommandParseError, InvalidNameReason, ValidationError},
        ports::CommandParser,
    };
    use chrono::TimeZone;
    use rstest::{fixture, rstest};
    use splitlater_domain::{MembershipPolicy, Money, Transaction};
    use std::borrow::Cow;

    /// Whitespace-splitting parser covering the command shapes the tests use.
    struct StubParser;

    impl CommandParser for StubParser {
        fn parse<'a>(&self, content: &'a str) -> Result<Option<Command<'a>>, CommandParseError> {
            let mut words = content.split_whitespace();
            let amount = |word: Option<&str>| {
                let word = word.unwrap_or_default();
                word.parse::<f64>()
                    .map_err(|_| CommandParseError::NonNumericAmount(word.to_string()))
            };
            let command = match words.next() {
                Some("!start") => Command::Start,
                Some("!help") => Command::Help,
                Some("!include") => Command::Include(words.map(Cow::Borrowed).collect()),
                Some("!add") => Command::Add {
                    payer: Cow::Borrowed(words.next().unwrap_or_default()),
                    amount: amount(words.next())?,
                },
                Some("!split") => Command::Split {
                    payer: Cow::Borrowed(words.next().unwrap_or_default()),
                    amount: amount(words.next())?,
                    sharers: words.map(Cow::Borrowed).collect(),
                },
                Some("!del") => Command::Delete(Cow::Borrowed(words.next().unwrap_or_default())),
                Some("!view") => Command::View,
                Some("!resolve") => Command::Resolve,
                Some("!logs") => Command::Logs,
                Some(word) if word.starts_with('!') => {
                    return Err(CommandParseError::UnknownCommand(word[1..].to_string()));
                }
                _ => return Ok(None),
            };
            Ok(Some(command))
        }
    }

    #[fixture]
    fn processor() -> MessageProcessor<'static> {
        MessageProcessor::new(&StubParser)
    }

    #[fixture]
    fn session() -> Session {
        Session::default()
    }

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 4, 11, minute, 0).unwrap()
    }

    fn run(processor: &MessageProcessor<'_>, session: &mut Session, lines: &[&str]) {
        for (idx, line) in lines.iter().enumerate() {
            let outcome = processor.process(session, line, at(idx as u32));
            assert!(
                !matches!(outcome, ProcessingOutcome::Failed(_)),
                "{line}: {outcome:?}"
            );
        }
    }

    #[rstest]
    fn ordinary_chat_is_not_a_command(processor: MessageProcessor<'_>, mut session: Session) {
        assert_eq!(
            processor.process(&mut session, "see you tonight", at(0)),
            ProcessingOutcome::NotCommand
        );
        assert!(session.log().is_empty());
    }

    #[rstest]
    fn add_then_resolve(processor: MessageProcessor<'_>, mut session: Session) {
        run(
            &processor,
            &mut session,
            &["!include A B", "!add A 30", "!add B 0"],
        );

        let ProcessingOutcome::Resolved(settlement) =
            processor.process(&mut session, "!resolve", at(10))
        else {
            panic!("expected settlement");
        };
        assert_eq!(
            settlement.transactions,
            vec![Transaction {
                debtor: "B".into(),
                creditor: "A".into(),
                amount: Money::from_i64(15),
            }]
        );
    }

    #[rstest]
    fn successful_changes_are_logged(processor: MessageProcessor<'_>, mut session: Session) {
        run(
            &processor,
            &mut session,
            &["!include A B C", "!add A 30", "!split B 20 C", "!del C", "!view"],
        );

        let texts: Vec<&str> = session
            .log()
            .entries()
            .iter()
            .map(|entry| entry.text.as_str())
            .collect();
        assert_eq!(texts, vec!["!add A 30", "!split B 20 C", "!del C"]);
        assert_eq!(session.log().entries()[0].recorded_at, at(1));
    }

    #[rstest]
    fn start_resets_everything(processor: MessageProcessor<'_>, mut session: Session) {
        run(&processor, &mut session, &["!include A B", "!add A 30"]);

        assert_eq!(
            processor.process(&mut session, "!start", at(5)),
            ProcessingOutcome::Started
        );
        assert!(session.ledger().is_empty());
        assert!(session.log().is_empty());
    }

    #[rstest]
    fn include_reports_participants(processor: MessageProcessor<'_>, mut session: Session) {
        assert_eq!(
            processor.process(&mut session, "!include A B", at(0)),
            ProcessingOutcome::Included(vec!["A".into(), "B".into()])
        );
    }

    #[rstest]
    #[case::unknown_command(
        "!settle",
        FailureKind::Parse(CommandParseError::UnknownCommand("settle".to_string()))
    )]
    #[case::non_numeric(
        "!add A ten",
        FailureKind::Parse(CommandParseError::NonNumericAmount("ten".to_string()))
    )]
    #[case::numeric_name(
        "!add 12 10",
        FailureKind::Validation(ValidationError::InvalidParticipant {
            name: "12".to_string(),
            reason: InvalidNameReason::Numeric,
        })
    )]
    #[case::duplicate_include(
        "!include A B A",
        FailureKind::Validation(ValidationError::DuplicateParticipant("A".to_string()))
    )]
    #[case::self_only_split("!split A 10 A", FailureKind::Ledger(LedgerError::EmptySharerSet))]
    #[case::unknown_delete(
        "!del Z",
        FailureKind::Ledger(LedgerError::UnknownParticipant("Z".into()))
    )]
    fn failures_leave_session_untouched(
        processor: MessageProcessor<'_>,
        mut session: Session,
        #[case] input: &str,
        #[case] expected: FailureKind,
    ) {
        run(&processor, &mut session, &["!include A B", "!add A 30"]);
        let before = session.ledger().settle();

        assert_eq!(
            processor.process(&mut session, input, at(9)),
            ProcessingOutcome::Failed(expected)
        );
        assert_eq!(session.ledger().settle(), before);
        assert_eq!(session.log().entries().len(), 1);
    }

    #[rstest]
    fn infinite_amount_is_rejected(processor: MessageProcessor<'_>, mut session: Session) {
        let ProcessingOutcome::Failed(FailureKind::Ledger(LedgerError::InvalidAmount(amount))) =
            processor.process(&mut session, "!add A inf", at(0))
        else {
            panic!("expected invalid amount");
        };
        assert!(amount.is_infinite());
        assert!(session.ledger().is_empty());
    }

    #[rstest]
    fn strict_session_rejects_strangers(processor: MessageProcessor<'_>) {
        let mut session = Session::new(MembershipPolicy::Strict);
        run(&processor, &mut session, &["!include A B"]);

        assert_eq!(
            processor.process(&mut session, "!add Z 10", at(3)),
            ProcessingOutcome::Failed(FailureKind::Ledger(LedgerError::UnknownParticipant(
                "Z".into()
            )))
        );
    }

    #[rstest]
    fn repeated_sharers_count_once(processor: MessageProcessor<'_>, mut session: Session) {
        run(&processor, &mut session, &["!include A B", "!split A 10 B B"]);

        let ProcessingOutcome::Resolved(settlement) =
            processor.process(&mut session, "!resolve", at(2))
        else {
            panic!("expected settlement");
        };
        assert_eq!(
            settlement.transactions,
            vec![Transaction {
                debtor: "B".into(),
                creditor: "A".into(),
                amount: Money::from_i64(5),
            }]
        );
    }

    #[rstest]
    fn numeric_sharer_is_rejected(
        processor: MessageProcessor<'_>,
        mut session: Session,
    ) {
        assert_eq!(
            processor.process(&mut session, "!split A 10 B 7", at(0)),
            ProcessingOutcome::Failed(FailureKind::Validation(
                ValidationError::InvalidParticipant {
                    name: "7".to_string(),
                    reason: InvalidNameReason::Numeric,
                }
            ))
        );
        assert!(session.ledger().is_empty());
    }

    #[rstest]
    fn oversized_amount_keeps_session_usable(
        processor: MessageProcessor<'_>,
        mut session: Session,
    ) {
        run(&processor, &mut session, &["!include A B", "!add A 1e15"]);

        assert!(matches!(
            processor.process(&mut session, "!add A 5e28", at(3)),
            ProcessingOutcome::Failed(FailureKind::Ledger(LedgerError::InvalidAmount(_)))
        ));
        assert!(matches!(
            processor.process(&mut session, "!resolve", at(4)),
            ProcessingOutcome::Resolved(_)
        ));
    }

    #[rstest]
    fn view_and_logs_are_snapshots(processor: MessageProcessor<'_>, mut session: Session) {
        run(&processor, &mut session, &["!include A B", "!split A 10 B"]);

        let ProcessingOutcome::View(view) = processor.process(&mut session, "!view", at(4)) else {
            panic!("expected view");
        };
        assert_eq!(view.equal.len(), 2);
        assert_eq!(view.shared.len(), 1);

        let ProcessingOutcome::Logs(entries) = processor.process(&mut session, "!logs", at(5))
        else {
            panic!("expected logs");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "!split A 10 B");
    }
}

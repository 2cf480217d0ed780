use chrono::Utc;
use splitlater_application::{MessageProcessor, Session};
use splitlater_domain::MembershipPolicy;
use splitlater_infrastructure::SplitLaterCommandParser;
use splitlater_presentation::{
    LogPresenter, ReplyPresenter,
    log_presenter::{DEFAULT_UTC_OFFSET_HOURS, utc_offset_from_hours},
};
use std::{borrow::Cow, env, fs, process};

type CliResult<T> = Result<T, Cow<'static, str>>;

const USAGE: &str = "Usage: splitlater-interpreter [--strict] <file>";

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let mut policy = MembershipPolicy::AutoRegister;
    let mut path = None;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--strict" => policy = MembershipPolicy::Strict,
            _ if path.is_none() => path = Some(arg),
            _ => return Err(USAGE.into()),
        }
    }
    let Some(path) = path else {
        return Err(USAGE.into());
    };

    let source =
        fs::read_to_string(&path).map_err(|err| format!("Failed to read '{path}': {err}"))?;

    let offset = utc_offset_from_hours(DEFAULT_UTC_OFFSET_HOURS)
        .ok_or("Default log offset is out of range")?;
    let presenter = ReplyPresenter::new(LogPresenter::new(offset));
    let processor = MessageProcessor::new(&SplitLaterCommandParser);
    let mut session = Session::new(policy);

    for line in source.lines().filter(|line| !line.trim().is_empty()) {
        let outcome = processor.process(&mut session, line, Utc::now());
        if let Some(reply) = presenter.render(&outcome) {
            println!("> {}", line.trim());
            println!("{reply}");
            println!();
        }
    }

    Ok(())
}

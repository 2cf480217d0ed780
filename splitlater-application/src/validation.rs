use crate::error::{InvalidNameReason, ValidationError};
use fxhash::FxHashSet;
use splitlater_domain::Participant;

pub const MAX_NAME_CHARS: usize = 64;

fn looks_numeric(name: &str) -> bool {
    // "nan" and "inf" are valid names; only reject things with digits that
    // would be read back as an amount.
    name.bytes().any(|b| b.is_ascii_digit()) && name.trim_start_matches('$').parse::<f64>().is_ok()
}

pub fn validate_participant(name: &str) -> Result<Participant, ValidationError> {
    let reason = if name.is_empty() {
        Some(InvalidNameReason::Empty)
    } else if name.chars().count() > MAX_NAME_CHARS {
        Some(InvalidNameReason::TooLong)
    } else if name.chars().any(char::is_control) {
        Some(InvalidNameReason::ControlCharacter)
    } else if name.starts_with('!') {
        Some(InvalidNameReason::CommandPrefix)
    } else if looks_numeric(name) {
        Some(InvalidNameReason::Numeric)
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ValidationError::InvalidParticipant {
            name: name.to_string(),
            reason,
        }),
        None => Ok(Participant::new(name)),
    }
}

/// Validates every name and rejects lists that mention someone twice.
pub fn validate_participants<'a, I>(names: I) -> Result<Vec<Participant>, ValidationError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = FxHashSet::default();
    let mut participants = Vec::new();
    for name in names {
        let participant = validate_participant(name)?;
        if !seen.insert(participant.clone()) {
            return Err(ValidationError::DuplicateParticipant(name.to_string()));
        }
        participants.push(participant);
    }
    Ok(participants)
}

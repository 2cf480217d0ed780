pub const COMMAND_PREFIXES: &[&str] = &[
    "!start", "!help", "!include", "!add", "!split", "!del", "!view", "!resolve", "!logs",
];

pub fn is_command_prefix(content: &str, cmd: &str) -> bool {
    let is_prefix = content
        .get(..cmd.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(cmd));

    if !is_prefix {
        return false;
    }

    content
        .get(cmd.len()..)
        .and_then(|rest| rest.chars().next())
        .is_none_or(char::is_whitespace)
}

pub fn is_command_message(content: &str) -> bool {
    let content = content.trim_start();
    COMMAND_PREFIXES
        .iter()
        .any(|&cmd| is_command_prefix(content, cmd))
}

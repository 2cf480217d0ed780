pub const START: &str = "I'm SplitLaterBot, here to help calculate who you should pay after a group evening out!\n\n\
Type !help to view all commands\n\n\
*Note: When encountering an error, re-enter the instruction rather than editing the previous message.";

pub const HELP: &str = "Here are all the commands available to you!\n\n\
!start: Restarts the session and clears all previous records\nUsage: !start\n\n\
!help: Displays all commands\nUsage: !help\n\n\
!include: Sets who is taking part. Separate names with commas when a name has spaces\nUsage: !include John Mary Alex\nUsage: !include John Smith, Mary\n\n\
!add: Adds an expense shared by everyone\nUsage: !add John 10\n\n\
!split: Adds an expense shared by the payer and the people listed\nUsage: !split John 30 Mary Alex\nUsage: !split John Smith 30 Mary Jones, Alex\n\n\
!del: Deletes an individual and their expenses from record\nUsage: !del John\n\n\
!view: Displays accumulated expenses of all individuals\nUsage: !view\n\n\
!resolve: Calculates which individual needs to pay who\nUsage: !resolve\n\n\
!logs: Displays all transactions since the start\nUsage: !logs";

pub const ADDED: &str = "Added!";
pub const REMOVED: &str = "Removed!";
pub const NO_RECORDS: &str = "Error: No records have been added.";
pub const NOTHING_TO_SETTLE: &str = "Nothing to settle";
pub const NO_LOGS: &str = "No transactions since the start.";
pub const EDITED_COMMAND: &str = "Error: Either a wrong command has been entered, or a previous message has been edited. \
Please retype as opposed to editing the previous message :)";

pub fn included(names: &[impl std::fmt::Display]) -> String {
    let listing = names
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("Participants: {listing}")
}

use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);
pub(crate) const STATUS_TTL: Duration = Duration::from_secs(5);

pub(crate) const COMMAND_HELP: &str =
    "Commands: /help, /add <text>, /edit <id> [text], /done <id>, /delete <id>, /quit";

pub(crate) const STATUS_ENTER_ADD: &str = "Type a new task • Enter to add • Esc to close";
pub(crate) const STATUS_ENTER_EDIT: &str = "Edit task • Enter to save • Esc to cancel";
pub(crate) const STATUS_COMMAND_PALETTE: &str =
    "Type a /command • Up/Down: navigate • Tab/Right: complete • Enter: run • Esc: cancel";
pub(crate) const STATUS_VIEW_DETAILS: &str = "Viewing task details • Enter/Esc to close";
pub(crate) const STATUS_HELP: &str = "Keyboard reference — Enter/Esc to close";
pub(crate) const STATUS_CONFIRM_DELETE: &str =
    "Confirm deletion — arrows choose, Enter confirms, Esc cancels";
pub(crate) const STATUS_EMPTY_ADD: &str = "Enter some text before adding a task";
pub(crate) const STATUS_NOTHING_SELECTED: &str = "No tasks yet! Press 'a' to add one";

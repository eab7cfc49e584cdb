pub mod command;
pub mod controller;
pub mod intent;
pub mod model;
pub mod snapshot;

pub use command::{CommandError, SlashCommand};
pub use controller::TaskListController;
pub use intent::{IgnoreReason, Intent, Outcome};
pub use model::*;
pub use snapshot::{EditSession, Snapshot};

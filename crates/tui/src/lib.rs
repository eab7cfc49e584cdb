pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod tui;

pub use tasklist_core as core;
pub use tasklist_core::command;
pub use tasklist_core::model;

pub use config::AppConfig;

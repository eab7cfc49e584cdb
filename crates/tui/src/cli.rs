use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tasklist",
    version,
    about = "A keyboard-first task list that lives for one terminal session.",
    after_help = "Examples:\n  tasklist                          Launch the TUI (same as `tasklist tui`)\n  tasklist --task \"Buy milk\" tui    Start with a task already on the list\n  tasklist apply \"/add Buy milk\" \"/done 1\"\n  tasklist --log-file /tmp/tasklist.log --log debug"
)]
pub struct Cli {
    /// Seed the list with a task (repeat for more)
    #[arg(long = "task", value_name = "TEXT", global = true)]
    pub tasks: Vec<String>,

    /// Tracing filter directive (falls back to TASKLIST_LOG, then "info")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    /// Write logs to this file (falls back to TASKLIST_LOG_FILE)
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the terminal UI (default command)
    Tui,
    /// Run slash commands against a fresh list and print the result
    Apply(ApplyArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ApplyArgs {
    /// Emit the final list as JSON instead of a text summary
    #[arg(long)]
    pub json: bool,

    /// Commands such as "/add Buy milk", "/done 1", "/edit 1 Buy oat milk", "/delete 1"
    #[arg(value_name = "COMMAND", required = true)]
    pub commands: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_seed_tasks_and_apply_args() {
        let cli = Cli::try_parse_from([
            "tasklist",
            "apply",
            "--task",
            "Seeded",
            "--json",
            "/add One",
            "/done 1",
        ])
        .unwrap();

        assert_eq!(cli.tasks, vec!["Seeded".to_string()]);
        match cli.command {
            Some(CliCommand::Apply(args)) => {
                assert!(args.json);
                assert_eq!(args.commands, vec!["/add One", "/done 1"]);
            }
            other => panic!("expected apply, got {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["tasklist"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.tasks.is_empty());
    }
}

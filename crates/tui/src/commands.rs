use std::io::Write;

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::cli::{ApplyArgs, CliCommand};
use crate::config::AppConfig;
use crate::core::command::{self, CommandError, SlashCommand};
use crate::core::{Counts, Outcome, Snapshot, TaskListController};

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::Apply(args) => handle_apply(config, &args, &mut writer),
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

fn handle_apply<W: Write>(config: &AppConfig, args: &ApplyArgs, mut writer: W) -> Result<()> {
    let mut controller = TaskListController::with_tasks(config.seed_tasks());
    let mut notes = Vec::new();

    for raw in &args.commands {
        match command::parse(raw) {
            Ok(SlashCommand::Help | SlashCommand::Quit) => notes.push(ApplyNote::Ignored {
                raw: raw.clone(),
                reason: String::from("interactive-only command"),
            }),
            Ok(parsed) => {
                for intent in parsed.intents() {
                    let outcome = controller.dispatch(intent);
                    if let Outcome::Ignored { reason } = outcome {
                        notes.push(ApplyNote::Ignored {
                            raw: raw.clone(),
                            reason: reason.to_string(),
                        });
                        break;
                    }
                }
            }
            Err(err) => notes.push(ApplyNote::skipped(raw, &err)),
        }
    }

    // A trailing `/edit <id>` without text never gets committed.
    controller.cancel_edit();

    let snapshot = controller.snapshot();
    if args.json {
        let report = ApplyReport::new(&snapshot, &notes);
        serde_json::to_writer_pretty(&mut writer, &report)?;
        writeln!(writer)?;
    } else {
        write_summary(&snapshot, &notes, &mut writer)?;
    }
    Ok(())
}

fn write_summary<W: Write>(snapshot: &Snapshot, notes: &[ApplyNote], mut writer: W) -> Result<()> {
    if snapshot.is_empty() {
        writeln!(writer, "No tasks yet!")?;
    }
    for task in snapshot.tasks() {
        let mark = if task.completed { 'x' } else { ' ' };
        writeln!(writer, "[{mark}] #{} {}", task.id, task.text)?;
    }
    let counts = snapshot.counts();
    writeln!(
        writer,
        "Total tasks: {} • Completed: {} • Remaining: {}",
        counts.total,
        counts.completed,
        counts.remaining()
    )?;
    for note in notes {
        writeln!(writer, "{}", note.line())?;
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum ApplyNote {
    Skipped { raw: String, error: String },
    Ignored { raw: String, reason: String },
}

impl ApplyNote {
    fn skipped(raw: &str, err: &CommandError) -> Self {
        ApplyNote::Skipped {
            raw: raw.to_string(),
            error: err.to_string(),
        }
    }

    fn line(&self) -> String {
        match self {
            ApplyNote::Skipped { raw, error } => format!("Skipped '{raw}': {error}"),
            ApplyNote::Ignored { raw, reason } => format!("Ignored '{raw}': {reason}"),
        }
    }
}

/// The final snapshot plus derived counts and per-command notes.
#[derive(Serialize)]
struct ApplyReport<'a> {
    #[serde(flatten)]
    snapshot: &'a Snapshot,
    counts: CountsReport,
    notes: &'a [ApplyNote],
}

#[derive(Serialize)]
struct CountsReport {
    completed: usize,
    total: usize,
    remaining: usize,
}

impl From<Counts> for CountsReport {
    fn from(counts: Counts) -> Self {
        Self {
            completed: counts.completed,
            total: counts.total,
            remaining: counts.remaining(),
        }
    }
}

impl<'a> ApplyReport<'a> {
    fn new(snapshot: &'a Snapshot, notes: &'a [ApplyNote]) -> Self {
        Self {
            snapshot,
            counts: snapshot.counts().into(),
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(config: &AppConfig, commands: &[&str], json: bool) -> String {
        let args = ApplyArgs {
            json,
            commands: commands.iter().map(|c| c.to_string()).collect(),
        };
        let mut output = Vec::new();
        execute(config, CliCommand::Apply(args), &mut output).expect("execute apply");
        String::from_utf8(output).expect("utf8")
    }

    #[test]
    fn apply_prints_list_and_counts() {
        let output = run(
            &AppConfig::default(),
            &["/add A", "/add B", "/done 1"],
            false,
        );

        assert_eq!(
            output,
            "[x] #1 A\n[ ] #2 B\nTotal tasks: 2 • Completed: 1 • Remaining: 1\n"
        );
    }

    #[test]
    fn apply_reports_skipped_and_ignored_commands() {
        let output = run(
            &AppConfig::default(),
            &["/add A", "/nope", "/delete 9", "/add    "],
            false,
        );

        assert!(output.contains("[ ] #1 A"));
        assert!(output.contains("Skipped '/nope': unknown command: nope"));
        assert!(output.contains("Ignored '/delete 9': no task #9"));
        assert!(output.contains("Skipped '/add    ': usage: /add"));
    }

    #[test]
    fn apply_notes_an_edit_of_a_missing_task_once() {
        let output = run(&AppConfig::default(), &["/edit 4 Anything"], false);
        let ignored: Vec<&str> = output
            .lines()
            .filter(|line| line.starts_with("Ignored"))
            .collect();

        assert_eq!(ignored, vec!["Ignored '/edit 4 Anything': no task #4"]);
    }

    #[test]
    fn apply_edits_seeded_tasks() {
        let config = AppConfig::default().with_seed_tasks(vec!["Buy milk".into()]);
        let output = run(&config, &["/edit 1 Buy oat milk", "/edit 1"], false);

        assert!(output.contains("[ ] #1 Buy oat milk"));
        assert!(output.contains("Total tasks: 1"));
    }

    #[test]
    fn apply_handles_empty_result() {
        let output = run(&AppConfig::default(), &["/add X", "/rm 1"], false);
        assert!(output.starts_with("No tasks yet!\n"));
        assert!(output.contains("Total tasks: 0"));
    }

    #[test]
    fn apply_json_includes_counts_and_notes() {
        let output = run(&AppConfig::default(), &["/add A", "/done 5"], true);
        let value: serde_json::Value = serde_json::from_str(&output).expect("json");

        assert_eq!(value["tasks"][0]["text"], "A");
        assert_eq!(value["counts"]["remaining"], 1);
        assert_eq!(value["notes"][0]["kind"], "ignored");
    }

    #[test]
    fn apply_json_carries_the_full_snapshot() {
        let output = run(&AppConfig::default(), &["/add A", "/edit 1"], true);
        let value: serde_json::Value = serde_json::from_str(&output).expect("json");

        assert_eq!(value["tasks"][0]["id"], 1);
        assert_eq!(value["draft"], "");
        assert!(value["editing"].is_null());
    }

    #[test]
    fn apply_notes_interactive_only_commands() {
        let output = run(&AppConfig::default(), &["/add A", "/help", "/quit"], false);

        assert!(output.contains("[ ] #1 A"));
        assert!(output.contains("Ignored '/help': interactive-only command"));
        assert!(output.contains("Ignored '/quit': interactive-only command"));
    }

    #[test]
    fn tui_command_is_rejected() {
        let mut output = Vec::new();
        assert!(execute(&AppConfig::default(), CliCommand::Tui, &mut output).is_err());
    }
}

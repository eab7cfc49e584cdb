use crate::core::command::{self, SlashCommand};
use crate::tui::constants::COMMAND_HELP;

use super::{App, InputMode};

#[derive(Debug, Clone)]
pub(crate) struct Suggestion {
    pub(crate) fill: String,
    pub(crate) label: String,
}

impl Suggestion {
    fn new(fill: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            fill: fill.into(),
            label: label.into(),
        }
    }
}

impl App {
    pub(crate) fn run_command(&mut self) {
        let parsed = command::parse(self.input.as_str());
        self.finish_command();

        let parsed = match parsed {
            Ok(parsed) => parsed,
            Err(err) => {
                self.set_status_error(err.to_string());
                return;
            }
        };

        match parsed {
            SlashCommand::Help => {
                self.show_help_overlay();
                self.set_status_info(COMMAND_HELP);
            }
            SlashCommand::Quit => self.should_quit = true,
            SlashCommand::Edit { id, text: None } => self.begin_edit(id),
            other => {
                let mut last = None;
                for intent in other.intents() {
                    let outcome = self.apply(intent);
                    last = Some(outcome);
                    if !outcome.is_change() {
                        break;
                    }
                }
                if let Some(outcome) = last {
                    if let Some(id) = outcome.task_id() {
                        self.select_task(id);
                    }
                    self.report(outcome);
                }
            }
        }
    }

    pub(crate) fn finish_command(&mut self) {
        self.input.clear();
        self.suggestions.clear();
        self.suggestion_index = 0;
        self.input_mode = InputMode::Normal;
    }

    pub(crate) fn update_command_suggestions(&mut self) {
        self.suggestions = build_command_suggestions(self);
        if self.suggestion_index >= self.suggestions.len() {
            self.suggestion_index = 0;
        }
    }

    pub(crate) fn accept_suggestion(&mut self) {
        if let Some(s) = self.suggestions.get(self.suggestion_index) {
            self.input.set(s.fill.clone());
            self.update_command_suggestions();
        }
    }
}

fn build_command_suggestions(app: &App) -> Vec<Suggestion> {
    let raw = app.input.as_str();
    let Some(without) = raw.strip_prefix('/') else {
        return Vec::new();
    };
    let without = without.trim_start();
    let (first, rest) = match without.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_ascii_lowercase(), rest.trim()),
        None => (without.to_ascii_lowercase(), ""),
    };
    let has_args = without.contains(char::is_whitespace);
    let selected = app.selected_id();

    if !has_args {
        let with_selected = |name: &str| match selected {
            Some(id) => format!("/{name} {id}"),
            None => format!("/{name} "),
        };
        let base = vec![
            Suggestion::new("/add ", "➕ Add a task"),
            Suggestion::new(with_selected("done"), "✅ Toggle selected (or id)"),
            Suggestion::new(
                match selected {
                    Some(id) => format!("/edit {id} "),
                    None => String::from("/edit "),
                },
                "✏️ Edit selected (or id)",
            ),
            Suggestion::new(with_selected("delete"), "🗑️ Delete selected (or id)"),
            Suggestion::new("/help", "❓ Help — show available commands"),
            Suggestion::new("/quit", "🚪 Quit the application"),
        ];
        return base
            .into_iter()
            .filter(|s| s.fill[1..].starts_with(&first))
            .collect();
    }

    match first.as_str() {
        "add" | "a" => {
            if rest.is_empty() {
                vec![Suggestion::new("/add ", "Enter task text…")]
            } else {
                vec![Suggestion::new(format!("/add {rest}"), "Add this task")]
            }
        }
        "done" | "toggle" | "delete" | "del" | "rm" | "edit" | "e" => {
            let snapshot = app.snapshot();
            let partial = rest.trim_start_matches('#');
            let name = if first == "e" { "edit" } else { first.as_str() };
            snapshot
                .tasks()
                .iter()
                .filter(|task| partial.is_empty() || task.id.to_string().starts_with(partial))
                .take(6)
                .map(|task| {
                    let fill = if name == "edit" {
                        format!("/edit {} ", task.id)
                    } else {
                        format!("/{name} {}", task.id)
                    };
                    Suggestion::new(fill, task.text.clone())
                })
                .collect()
        }
        _ => Vec::new(),
    }
}

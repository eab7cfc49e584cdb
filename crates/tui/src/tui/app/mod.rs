use std::sync::Arc;
use std::time::Instant;

use ratatui::style::{Color, Style};
use ratatui::widgets::ListState;

use super::buffer::LineBuffer;
use super::constants::*;
use crate::core::{Counts, Intent, Outcome, Snapshot, TaskId, TaskListController};

mod commands;
mod input;
mod render;

use commands::Suggestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Add,
    Edit,
    Command,
    Inspect,
    Help,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmChoice {
    Yes,
    No,
}

impl ConfirmChoice {
    fn toggle(self) -> Self {
        match self {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Info,
    Error,
}

pub(crate) struct App {
    controller: TaskListController,
    selected: usize,
    list_state: ListState,
    input_mode: InputMode,
    input: LineBuffer,
    suggestions: Vec<Suggestion>,
    suggestion_index: usize,
    status: Option<StatusMessage>,
    inspect_task: Option<TaskId>,
    confirm_choice: ConfirmChoice,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(controller: TaskListController) -> Self {
        let mut app = Self {
            controller,
            selected: 0,
            list_state: ListState::default(),
            input_mode: InputMode::Normal,
            input: LineBuffer::new(),
            suggestions: Vec::new(),
            suggestion_index: 0,
            status: None,
            inspect_task: None,
            confirm_choice: ConfirmChoice::No,
            should_quit: false,
        };
        app.sync_selection();
        app
    }

    pub(crate) fn snapshot(&self) -> Arc<Snapshot> {
        self.controller.snapshot()
    }

    pub(crate) fn counts(&self) -> Counts {
        self.controller.counts()
    }

    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn apply(&mut self, intent: Intent) -> Outcome {
        let outcome = self.controller.dispatch(intent);
        self.sync_selection();
        outcome
    }

    fn sync_selection(&mut self) {
        let len = self.controller.tasks().len();
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.controller
            .tasks()
            .get(self.selected)
            .map(|task| task.id)
    }

    fn select_next(&mut self) {
        let len = self.controller.tasks().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
        self.list_state.select(Some(self.selected));
    }

    fn select_prev(&mut self) {
        if self.controller.tasks().is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
        self.list_state.select(Some(self.selected));
    }

    fn select_first(&mut self) {
        self.selected = 0;
        self.sync_selection();
    }

    fn select_last(&mut self) {
        self.selected = self.controller.tasks().len().saturating_sub(1);
        self.sync_selection();
    }

    fn select_task(&mut self, id: TaskId) {
        if let Some(idx) = self.controller.snapshot().position(id) {
            self.selected = idx;
            self.list_state.select(Some(idx));
        }
    }

    fn start_add(&mut self) {
        let draft = self.controller.snapshot().draft().to_string();
        self.input.set(draft);
        self.input_mode = InputMode::Add;
        self.set_status_info(STATUS_ENTER_ADD);
    }

    fn submit_add(&mut self) {
        match self.apply(Intent::SubmitDraft) {
            Outcome::Added { id } => {
                self.input.clear();
                self.input_mode = InputMode::Normal;
                self.select_task(id);
                let text = self.task_text(id);
                self.set_status_info(format!("Added #{id} {text}"));
            }
            _ => self.set_status_error(STATUS_EMPTY_ADD),
        }
    }

    fn close_add(&mut self) {
        self.input.clear();
        self.input_mode = InputMode::Normal;
        self.status = None;
    }

    fn start_edit_selected(&mut self) {
        match self.selected_id() {
            Some(id) => self.begin_edit(id),
            None => self.set_status_info(STATUS_NOTHING_SELECTED),
        }
    }

    fn begin_edit(&mut self, id: TaskId) {
        let outcome = self.apply(Intent::BeginEdit(id));
        let Outcome::EditStarted { discarded, .. } = outcome else {
            self.report(outcome);
            return;
        };

        let scratch = self
            .controller
            .snapshot()
            .editing()
            .map(|session| session.scratch.clone())
            .unwrap_or_default();
        self.input.set(scratch);
        self.input_mode = InputMode::Edit;
        self.select_task(id);
        match discarded {
            Some(previous) if previous != id => {
                self.set_status_info(format!("Discarded unsaved edit of #{previous}"))
            }
            _ => self.set_status_info(STATUS_ENTER_EDIT),
        }
    }

    fn commit_edit(&mut self) {
        let outcome = self.apply(Intent::CommitEdit);
        self.leave_edit_mode();
        self.report(outcome);
    }

    fn cancel_edit(&mut self) {
        self.apply(Intent::CancelEdit);
        self.leave_edit_mode();
        self.status = None;
    }

    fn leave_edit_mode(&mut self) {
        self.input.clear();
        self.input_mode = InputMode::Normal;
    }

    fn toggle_selected(&mut self) {
        match self.selected_id() {
            Some(id) => {
                let outcome = self.apply(Intent::Toggle(id));
                self.report(outcome);
            }
            None => self.set_status_info(STATUS_NOTHING_SELECTED),
        }
    }

    fn show_selected_details(&mut self) {
        match self.selected_id() {
            Some(id) => {
                self.inspect_task = Some(id);
                self.input_mode = InputMode::Inspect;
                self.set_status_info(STATUS_VIEW_DETAILS);
            }
            None => self.set_status_info(STATUS_NOTHING_SELECTED),
        }
    }

    fn show_help_overlay(&mut self) {
        self.inspect_task = None;
        self.input_mode = InputMode::Help;
        self.set_status_info(STATUS_HELP);
    }

    fn prompt_delete(&mut self) {
        if self.selected_id().is_none() {
            self.set_status_info(STATUS_NOTHING_SELECTED);
            return;
        }
        self.confirm_choice = ConfirmChoice::No;
        self.input_mode = InputMode::ConfirmDelete;
        self.set_status_info(STATUS_CONFIRM_DELETE);
    }

    fn perform_delete(&mut self) {
        if let Some(id) = self.selected_id() {
            let outcome = self.apply(Intent::Remove(id));
            self.report(outcome);
        }
    }

    fn task_text(&self, id: TaskId) -> String {
        self.controller
            .snapshot()
            .task(id)
            .map(|task| task.text.clone())
            .unwrap_or_default()
    }

    /// Translate an outcome into a status line message.
    fn report(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Added { id } => {
                let text = self.task_text(id);
                self.set_status_info(format!("Added #{id} {text}"));
            }
            Outcome::Removed { id } => self.set_status_info(format!("Deleted task #{id} 🗑️")),
            Outcome::Toggled {
                id,
                completed: true,
            } => {
                let text = self.task_text(id);
                self.set_status_info(format!("Completed #{id} {text} ✅"));
            }
            Outcome::Toggled {
                id,
                completed: false,
            } => {
                let text = self.task_text(id);
                self.set_status_info(format!("Reopened #{id} {text}"));
            }
            Outcome::EditCommitted { id } => {
                let text = self.task_text(id);
                self.set_status_info(format!("Saved #{id} {text}"));
            }
            Outcome::EditRejected { id } => {
                self.set_status_error(format!("Edited text was empty, kept #{id} unchanged"));
            }
            Outcome::EditCancelled { .. } => self.set_status_info("Edit cancelled"),
            Outcome::EditStarted { .. } => self.set_status_info(STATUS_ENTER_EDIT),
            Outcome::DraftUpdated => {}
            Outcome::Ignored { reason } => {
                self.set_status_error(format!("Nothing changed: {reason}"));
            }
        }
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("ℹ️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("⚠️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Error));
    }
}

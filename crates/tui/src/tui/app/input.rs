use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::Intent;
use crate::tui::constants::STATUS_COMMAND_PALETTE;

use super::{App, ConfirmChoice, InputMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NormalAction {
    Quit,
    EnterAdd,
    EnterEdit,
    ToggleDone,
    Delete,
    ShowDetails,
    ShowHelp,
    EnterCommand,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
}

impl NormalAction {
    pub(super) fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('a') => Some(Self::EnterAdd),
            KeyCode::Char('e') | KeyCode::Enter => Some(Self::EnterEdit),
            KeyCode::Char(' ') | KeyCode::Char('d') => Some(Self::ToggleDone),
            KeyCode::Char('x') | KeyCode::Delete => Some(Self::Delete),
            KeyCode::Char('i') => Some(Self::ShowDetails),
            KeyCode::Char('h') | KeyCode::Char('?') => Some(Self::ShowHelp),
            KeyCode::Char('/') => Some(Self::EnterCommand),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Home | KeyCode::Char('g') => Some(Self::SelectFirst),
            KeyCode::End | KeyCode::Char('G') => Some(Self::SelectLast),
            _ => None,
        }
    }
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Add => self.handle_add_mode(key),
            InputMode::Edit => self.handle_edit_mode(key),
            InputMode::Command => self.handle_command_mode(key),
            InputMode::Inspect => self.handle_inspect_mode(key),
            InputMode::Help => self.handle_help_mode(key),
            InputMode::ConfirmDelete => self.handle_confirm_delete_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        if let Some(action) = NormalAction::from_event(&key) {
            self.execute_normal_action(action);
        }
    }

    fn execute_normal_action(&mut self, action: NormalAction) {
        match action {
            NormalAction::Quit => self.should_quit = true,
            NormalAction::EnterAdd => self.start_add(),
            NormalAction::EnterEdit => self.start_edit_selected(),
            NormalAction::ToggleDone => self.toggle_selected(),
            NormalAction::Delete => self.prompt_delete(),
            NormalAction::ShowDetails => self.show_selected_details(),
            NormalAction::ShowHelp => self.show_help_overlay(),
            NormalAction::EnterCommand => {
                self.input_mode = InputMode::Command;
                self.input.set("/");
                self.update_command_suggestions();
                self.set_status_info(STATUS_COMMAND_PALETTE);
            }
            NormalAction::SelectNext => self.select_next(),
            NormalAction::SelectPrev => self.select_prev(),
            NormalAction::SelectFirst => self.select_first(),
            NormalAction::SelectLast => self.select_last(),
        }
    }

    /// Shared line editing for every text-entry mode. Returns true when the
    /// text itself changed.
    fn edit_input(&mut self, key: &KeyEvent) -> bool {
        let before = self.input.as_str().len();
        match key.code {
            KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.delete_word_back();
            }
            KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Char(c) => {
                self.input.insert_char(c);
                return true;
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete_char(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
        self.input.as_str().len() != before
    }

    fn handle_add_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_add(),
            KeyCode::Esc => self.close_add(),
            _ => {
                if self.edit_input(&key) {
                    let text = self.input.as_str().to_string();
                    self.apply(Intent::SetDraft(text));
                }
            }
        }
    }

    fn handle_edit_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Esc => self.cancel_edit(),
            _ => {
                if self.edit_input(&key) {
                    let text = self.input.as_str().to_string();
                    self.apply(Intent::UpdateEditDraft(text));
                }
            }
        }
    }

    fn handle_inspect_mode(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('i')) {
            self.inspect_task = None;
            self.input_mode = InputMode::Normal;
            self.status = None;
        }
    }

    fn handle_help_mode(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('h') | KeyCode::Char('?')
        ) {
            self.input_mode = InputMode::Normal;
            self.status = None;
        }
    }

    fn handle_confirm_delete_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => {
                self.input_mode = InputMode::Normal;
                self.set_status_info("Deletion cancelled");
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char(' ') => {
                self.confirm_choice = self.confirm_choice.toggle();
            }
            KeyCode::Char('y') => {
                self.input_mode = InputMode::Normal;
                self.perform_delete();
            }
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                if self.confirm_choice == ConfirmChoice::Yes {
                    self.perform_delete();
                } else {
                    self.set_status_info("Deletion cancelled");
                }
            }
            _ => {}
        }
    }

    fn handle_command_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let current = self.input.as_str().trim_end().to_string();
                let pick = self
                    .suggestions
                    .get(self.suggestion_index)
                    .map(|s| s.fill.clone())
                    .filter(|fill| fill.starts_with(&current));
                match pick {
                    Some(fill) if fill.ends_with(' ') && fill != self.input.as_str() => {
                        self.input.set(fill);
                        self.update_command_suggestions();
                    }
                    Some(fill) if fill.trim_end() == current => self.run_command(),
                    Some(fill) => {
                        self.input.set(fill);
                        self.run_command();
                    }
                    None => self.run_command(),
                }
            }
            KeyCode::Esc => {
                self.finish_command();
                self.status = None;
            }
            KeyCode::Tab => self.accept_suggestion(),
            KeyCode::Right if self.input.cursor_column() == self.input.as_str().chars().count() => {
                self.accept_suggestion()
            }
            KeyCode::Up => {
                if !self.suggestions.is_empty() {
                    if self.suggestion_index == 0 {
                        self.suggestion_index = self.suggestions.len() - 1;
                    } else {
                        self.suggestion_index -= 1;
                    }
                }
            }
            KeyCode::Down => {
                if !self.suggestions.is_empty() {
                    self.suggestion_index = (self.suggestion_index + 1) % self.suggestions.len();
                }
            }
            _ => {
                if self.edit_input(&key) {
                    self.update_command_suggestions();
                }
            }
        }
    }
}

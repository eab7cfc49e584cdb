use std::str::FromStr;

use thiserror::Error;

use crate::intent::Intent;
use crate::model::{ParseTaskIdError, TaskId};

/// A parsed `/command` line, shared by the command palette and `apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Add(String),
    Toggle(TaskId),
    Remove(TaskId),
    Edit { id: TaskId, text: Option<String> },
    Help,
    Quit,
}

impl SlashCommand {
    /// Intents this command feeds the controller. UI-only commands yield none.
    pub fn intents(&self) -> Vec<Intent> {
        match self {
            SlashCommand::Add(text) => vec![Intent::Add(text.clone())],
            SlashCommand::Toggle(id) => vec![Intent::Toggle(*id)],
            SlashCommand::Remove(id) => vec![Intent::Remove(*id)],
            SlashCommand::Edit { id, text: None } => vec![Intent::BeginEdit(*id)],
            SlashCommand::Edit {
                id,
                text: Some(text),
            } => vec![
                Intent::BeginEdit(*id),
                Intent::UpdateEditDraft(text.clone()),
                Intent::CommitEdit,
            ],
            SlashCommand::Help | SlashCommand::Quit => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("commands must start with '/'")]
    MissingSlash,
    #[error("enter a command after '/'")]
    Empty,
    #[error("unknown command: {0} (try /help)")]
    Unknown(String),
    #[error("usage: /{command} <id>")]
    MissingId { command: &'static str },
    #[error(transparent)]
    InvalidId(#[from] ParseTaskIdError),
    #[error("usage: /add <task description>")]
    MissingText,
}

pub fn parse(raw: &str) -> Result<SlashCommand, CommandError> {
    let trimmed = raw.trim();
    let body = trimmed
        .strip_prefix('/')
        .ok_or(CommandError::MissingSlash)?;
    let (name, rest) = match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (body, ""),
    };
    if name.is_empty() {
        return Err(CommandError::Empty);
    }

    match name.to_ascii_lowercase().as_str() {
        "add" | "a" => {
            if rest.is_empty() {
                Err(CommandError::MissingText)
            } else {
                Ok(SlashCommand::Add(rest.to_string()))
            }
        }
        "done" | "toggle" => Ok(SlashCommand::Toggle(required_id(rest, "done")?)),
        "delete" | "del" | "rm" => Ok(SlashCommand::Remove(required_id(rest, "delete")?)),
        "edit" | "e" => {
            let (id, text) = match rest.split_once(char::is_whitespace) {
                Some((id, text)) => (id, Some(text.trim().to_string())),
                None => (rest, None),
            };
            Ok(SlashCommand::Edit {
                id: required_id(id, "edit")?,
                text,
            })
        }
        "help" | "h" => Ok(SlashCommand::Help),
        "quit" | "q" | "exit" => Ok(SlashCommand::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn required_id(value: &str, command: &'static str) -> Result<TaskId, CommandError> {
    if value.is_empty() {
        return Err(CommandError::MissingId { command });
    }
    Ok(value.parse()?)
}

impl FromStr for SlashCommand {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("/add Buy milk", SlashCommand::Add("Buy milk".into()))]
    #[case("  /ADD   spaced out  ", SlashCommand::Add("spaced out".into()))]
    #[case("/done 3", SlashCommand::Toggle(TaskId::new(3)))]
    #[case("/toggle #4", SlashCommand::Toggle(TaskId::new(4)))]
    #[case("/rm 2", SlashCommand::Remove(TaskId::new(2)))]
    #[case("/edit 1", SlashCommand::Edit { id: TaskId::new(1), text: None })]
    #[case("/edit 1 New words", SlashCommand::Edit { id: TaskId::new(1), text: Some("New words".into()) })]
    #[case("/help", SlashCommand::Help)]
    #[case("/q", SlashCommand::Quit)]
    fn parses_known_commands(#[case] raw: &str, #[case] expected: SlashCommand) {
        assert_eq!(parse(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("add milk", CommandError::MissingSlash)]
    #[case("/", CommandError::Empty)]
    #[case("/add   ", CommandError::MissingText)]
    #[case("/done", CommandError::MissingId { command: "done" })]
    #[case("/frobnicate 1", CommandError::Unknown("frobnicate".into()))]
    fn rejects_malformed_commands(#[case] raw: &str, #[case] expected: CommandError) {
        assert_eq!(parse(raw).unwrap_err(), expected);
    }

    #[test]
    fn invalid_id_reports_the_offending_value() {
        let err = parse("/delete seven").unwrap_err();
        assert!(matches!(err, CommandError::InvalidId(_)));
        assert!(err.to_string().contains("'seven'"));

        let signed = parse("/done +3").unwrap_err();
        assert!(matches!(signed, CommandError::InvalidId(_)));
    }

    #[test]
    fn edit_with_text_expands_to_full_edit_cycle() {
        let command: SlashCommand = "/edit 2 Rewritten".parse().unwrap();
        assert_eq!(
            command.intents(),
            vec![
                Intent::BeginEdit(TaskId::new(2)),
                Intent::UpdateEditDraft("Rewritten".into()),
                Intent::CommitEdit,
            ]
        );
        assert!(SlashCommand::Help.intents().is_empty());
    }
}

use std::fmt;

use serde::Serialize;

use crate::model::TaskId;

/// A single user action, already stripped of whatever input event carried it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SetDraft(String),
    SubmitDraft,
    Add(String),
    Remove(TaskId),
    Toggle(TaskId),
    BeginEdit(TaskId),
    UpdateEditDraft(String),
    CommitEdit,
    CancelEdit,
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::SetDraft(_) => "set_draft",
            Intent::SubmitDraft => "submit_draft",
            Intent::Add(_) => "add",
            Intent::Remove(_) => "remove",
            Intent::Toggle(_) => "toggle",
            Intent::BeginEdit(_) => "begin_edit",
            Intent::UpdateEditDraft(_) => "update_edit_draft",
            Intent::CommitEdit => "commit_edit",
            Intent::CancelEdit => "cancel_edit",
        }
    }
}

/// What an intent did to the list. Refusals are reported as
/// [`Outcome::Ignored`] rather than as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Added {
        id: TaskId,
    },
    Removed {
        id: TaskId,
    },
    Toggled {
        id: TaskId,
        completed: bool,
    },
    EditStarted {
        id: TaskId,
        discarded: Option<TaskId>,
    },
    EditCommitted {
        id: TaskId,
    },
    /// The scratch text was blank, so the stored text was kept.
    EditRejected {
        id: TaskId,
    },
    EditCancelled {
        id: TaskId,
    },
    DraftUpdated,
    Ignored {
        reason: IgnoreReason,
    },
}

impl Outcome {
    pub fn is_change(&self) -> bool {
        !matches!(self, Outcome::Ignored { .. })
    }

    pub fn task_id(&self) -> Option<TaskId> {
        match *self {
            Outcome::Added { id }
            | Outcome::Removed { id }
            | Outcome::Toggled { id, .. }
            | Outcome::EditStarted { id, .. }
            | Outcome::EditCommitted { id }
            | Outcome::EditRejected { id }
            | Outcome::EditCancelled { id } => Some(id),
            Outcome::Ignored {
                reason: IgnoreReason::UnknownTask(id),
            } => Some(id),
            Outcome::DraftUpdated | Outcome::Ignored { .. } => None,
        }
    }

    pub(crate) fn ignored(reason: IgnoreReason) -> Self {
        Outcome::Ignored { reason }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Added { id } => write!(f, "added task #{id}"),
            Outcome::Removed { id } => write!(f, "removed task #{id}"),
            Outcome::Toggled { id, completed } => {
                let state = if *completed { "completed" } else { "open" };
                write!(f, "marked task #{id} {state}")
            }
            Outcome::EditStarted { id, discarded } => match discarded {
                Some(previous) if previous != id => write!(
                    f,
                    "editing task #{id} (unsaved edit of #{previous} discarded)"
                ),
                _ => write!(f, "editing task #{id}"),
            },
            Outcome::EditCommitted { id } => write!(f, "saved task #{id}"),
            Outcome::EditRejected { id } => {
                write!(f, "kept task #{id}: edited text was empty")
            }
            Outcome::EditCancelled { id } => write!(f, "cancelled edit of task #{id}"),
            Outcome::DraftUpdated => write!(f, "draft updated"),
            Outcome::Ignored { reason } => write!(f, "ignored: {reason}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    EmptyText,
    UnknownTask(TaskId),
    NoActiveEdit,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::EmptyText => write!(f, "task text cannot be empty"),
            IgnoreReason::UnknownTask(id) => write!(f, "no task #{id}"),
            IgnoreReason::NoActiveEdit => write!(f, "no edit in progress"),
        }
    }
}

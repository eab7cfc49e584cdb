use serde::Serialize;

use crate::model::{Counts, Task, TaskId};

/// The task currently being revised and its unsaved text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditSession {
    pub task_id: TaskId,
    pub scratch: String,
}

/// Immutable view of the controller after an operation. The rendering layer
/// draws from this and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub(crate) tasks: Vec<Task>,
    pub(crate) draft: String,
    pub(crate) editing: Option<EditSession>,
}

impl Snapshot {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self, id: TaskId) -> bool {
        self.editing
            .as_ref()
            .is_some_and(|session| session.task_id == id)
    }

    pub fn counts(&self) -> Counts {
        Counts::from_tasks(&self.tasks)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    pub(crate) fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }
}

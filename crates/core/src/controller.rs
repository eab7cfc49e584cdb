//! The in-memory task list and its edit-mode state machine.

use std::sync::Arc;

use tracing::debug;

use crate::intent::{IgnoreReason, Intent, Outcome};
use crate::model::{normalize_text, Counts, Task, TaskId};
use crate::snapshot::{EditSession, Snapshot};

/// Owns the task list for one session. Every accepted operation publishes a
/// fresh [`Snapshot`]; refused operations leave the current one in place.
#[derive(Debug, Clone)]
pub struct TaskListController {
    current: Arc<Snapshot>,
    next_id: u64,
}

impl Default for TaskListController {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskListController {
    pub fn new() -> Self {
        Self {
            current: Arc::new(Snapshot::default()),
            next_id: 1,
        }
    }

    /// Build a controller pre-populated with `texts`, skipping blank entries.
    pub fn with_tasks<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut controller = Self::new();
        for text in texts {
            controller.add(text.as_ref());
        }
        controller
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current)
    }

    pub fn tasks(&self) -> &[Task] {
        self.current.tasks()
    }

    pub fn counts(&self) -> Counts {
        self.current.counts()
    }

    pub fn dispatch(&mut self, intent: Intent) -> Outcome {
        let name = intent.name();
        let outcome = match intent {
            Intent::SetDraft(text) => self.set_draft(text),
            Intent::SubmitDraft => self.submit_draft(),
            Intent::Add(text) => self.add(&text),
            Intent::Remove(id) => self.remove(id),
            Intent::Toggle(id) => self.toggle_completed(id),
            Intent::BeginEdit(id) => self.begin_edit(id),
            Intent::UpdateEditDraft(text) => self.update_edit_draft(text),
            Intent::CommitEdit => self.commit_edit(),
            Intent::CancelEdit => self.cancel_edit(),
        };
        debug!(
            intent = name,
            task_id = outcome.task_id().map(TaskId::get),
            outcome = %outcome,
            "applied intent"
        );
        outcome
    }

    pub fn set_draft(&mut self, text: impl Into<String>) -> Outcome {
        let mut next = self.fork();
        next.draft = text.into();
        self.publish(next);
        Outcome::DraftUpdated
    }

    /// Add the pending draft. The draft is only cleared when a task was created.
    pub fn submit_draft(&mut self) -> Outcome {
        let draft = self.current.draft().to_string();
        self.add(&draft)
    }

    pub fn add(&mut self, raw: &str) -> Outcome {
        let Some(text) = normalize_text(raw) else {
            return Outcome::ignored(IgnoreReason::EmptyText);
        };

        let id = self.allocate_id();
        let mut next = self.fork();
        next.tasks.push(Task::new(id, text));
        next.draft.clear();
        self.publish(next);
        Outcome::Added { id }
    }

    pub fn remove(&mut self, id: TaskId) -> Outcome {
        let Some(index) = self.current.position(id) else {
            return Outcome::ignored(IgnoreReason::UnknownTask(id));
        };

        let mut next = self.fork();
        next.tasks.remove(index);
        if next.is_editing(id) {
            next.editing = None;
        }
        self.publish(next);
        Outcome::Removed { id }
    }

    pub fn toggle_completed(&mut self, id: TaskId) -> Outcome {
        let mut next = self.fork();
        let Some(task) = next.task_mut(id) else {
            return Outcome::ignored(IgnoreReason::UnknownTask(id));
        };
        task.completed = !task.completed;
        let completed = task.completed;
        self.publish(next);
        Outcome::Toggled { id, completed }
    }

    /// Start editing `id`, replacing any edit already in progress without
    /// saving it.
    pub fn begin_edit(&mut self, id: TaskId) -> Outcome {
        let Some(task) = self.current.task(id) else {
            return Outcome::ignored(IgnoreReason::UnknownTask(id));
        };

        let session = EditSession {
            task_id: id,
            scratch: task.text.clone(),
        };
        let mut next = self.fork();
        let discarded = next.editing.replace(session).map(|prior| prior.task_id);
        self.publish(next);
        Outcome::EditStarted { id, discarded }
    }

    pub fn update_edit_draft(&mut self, text: impl Into<String>) -> Outcome {
        if self.current.editing().is_none() {
            return Outcome::ignored(IgnoreReason::NoActiveEdit);
        }

        let mut next = self.fork();
        if let Some(session) = next.editing.as_mut() {
            session.scratch = text.into();
        }
        self.publish(next);
        Outcome::DraftUpdated
    }

    /// Write the scratch text back if it is non-blank. Edit mode ends either way.
    pub fn commit_edit(&mut self) -> Outcome {
        let mut next = self.fork();
        let Some(session) = next.editing.take() else {
            return Outcome::ignored(IgnoreReason::NoActiveEdit);
        };

        let id = session.task_id;
        let outcome = match (normalize_text(&session.scratch), next.task_mut(id)) {
            (Some(text), Some(task)) => {
                task.text = text;
                Outcome::EditCommitted { id }
            }
            _ => Outcome::EditRejected { id },
        };
        self.publish(next);
        outcome
    }

    pub fn cancel_edit(&mut self) -> Outcome {
        let mut next = self.fork();
        let Some(session) = next.editing.take() else {
            return Outcome::ignored(IgnoreReason::NoActiveEdit);
        };
        self.publish(next);
        Outcome::EditCancelled {
            id: session.task_id,
        }
    }

    fn allocate_id(&mut self) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn fork(&self) -> Snapshot {
        Snapshot::clone(&self.current)
    }

    fn publish(&mut self, next: Snapshot) {
        self.current = Arc::new(next);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn texts(controller: &TaskListController) -> Vec<String> {
        controller
            .tasks()
            .iter()
            .map(|task| task.text.clone())
            .collect()
    }

    fn added_id(outcome: Outcome) -> TaskId {
        match outcome {
            Outcome::Added { id } => id,
            other => panic!("expected Added, got {other:?}"),
        }
    }

    #[test]
    fn blank_input_is_not_added() {
        let mut controller = TaskListController::new();
        controller.add("Buy milk");
        let outcome = controller.add("  ");

        assert_eq!(
            outcome,
            Outcome::Ignored {
                reason: IgnoreReason::EmptyText
            }
        );
        assert_eq!(texts(&controller), vec!["Buy milk"]);
    }

    #[test]
    fn add_trims_text_and_starts_incomplete() {
        let mut controller = TaskListController::new();
        let id = added_id(controller.add("  Walk the dog \t"));

        let task = &controller.tasks()[0];
        assert_eq!(task.id, id);
        assert_eq!(task.text, "Walk the dog");
        assert!(!task.completed);
    }

    #[test]
    fn add_clears_the_new_task_draft() {
        let mut controller = TaskListController::new();
        controller.set_draft("Call mum");
        controller.add("Something else");

        assert_eq!(controller.snapshot().draft(), "");
    }

    #[test]
    fn submit_draft_adds_and_clears_but_keeps_blank_drafts() {
        let mut controller = TaskListController::new();
        controller.dispatch(Intent::SetDraft("   ".into()));
        let outcome = controller.dispatch(Intent::SubmitDraft);
        assert!(!outcome.is_change());
        assert_eq!(controller.snapshot().draft(), "   ");

        controller.dispatch(Intent::SetDraft(" Pay rent ".into()));
        let id = added_id(controller.dispatch(Intent::SubmitDraft));
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.draft(), "");
        assert_eq!(snapshot.task(id).map(|t| t.text.as_str()), Some("Pay rent"));
    }

    #[test]
    fn toggle_twice_restores_flag() {
        let mut controller = TaskListController::new();
        let id = added_id(controller.add("Write report"));

        assert_eq!(
            controller.toggle_completed(id),
            Outcome::Toggled {
                id,
                completed: true
            }
        );
        controller.toggle_completed(id);
        assert!(!controller.tasks()[0].completed);
    }

    #[test]
    fn toggle_unknown_id_is_ignored() {
        let mut controller = TaskListController::with_tasks(["A"]);
        let before = controller.snapshot();

        let outcome = controller.toggle_completed(TaskId::new(42));
        assert_eq!(
            outcome,
            Outcome::Ignored {
                reason: IgnoreReason::UnknownTask(TaskId::new(42))
            }
        );
        assert!(Arc::ptr_eq(&before, &controller.snapshot()));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut controller = TaskListController::with_tasks(["A", "B"]);
        let id = controller.tasks()[0].id;

        assert_eq!(controller.remove(id), Outcome::Removed { id });
        assert_eq!(controller.tasks().len(), 1);

        assert!(!controller.remove(id).is_change());
        assert_eq!(controller.tasks().len(), 1);
        assert_eq!(texts(&controller), vec!["B"]);
    }

    #[test]
    fn cancel_edit_keeps_stored_text() {
        let mut controller = TaskListController::with_tasks(["Old text"]);
        let id = controller.tasks()[0].id;

        controller.begin_edit(id);
        controller.update_edit_draft("New text");
        assert_eq!(controller.cancel_edit(), Outcome::EditCancelled { id });

        assert_eq!(texts(&controller), vec!["Old text"]);
        assert!(controller.snapshot().editing().is_none());
    }

    #[test]
    fn commit_edit_writes_text_and_ends_edit_mode() {
        let mut controller = TaskListController::with_tasks(["Old text"]);
        let id = controller.tasks()[0].id;

        controller.begin_edit(id);
        controller.update_edit_draft("New text");
        assert_eq!(controller.commit_edit(), Outcome::EditCommitted { id });
        assert_eq!(texts(&controller), vec!["New text"]);
        assert!(controller.snapshot().editing().is_none());

        assert_eq!(
            controller.commit_edit(),
            Outcome::Ignored {
                reason: IgnoreReason::NoActiveEdit
            }
        );
        assert_eq!(texts(&controller), vec!["New text"]);
    }

    #[test]
    fn blank_commit_is_rejected_but_still_ends_edit_mode() {
        let mut controller = TaskListController::with_tasks(["Keep me"]);
        let id = controller.tasks()[0].id;

        controller.begin_edit(id);
        controller.update_edit_draft("   ");
        assert_eq!(controller.commit_edit(), Outcome::EditRejected { id });

        assert_eq!(texts(&controller), vec!["Keep me"]);
        assert!(controller.snapshot().editing().is_none());
    }

    #[test]
    fn commit_edit_trims_scratch_text() {
        let mut controller = TaskListController::with_tasks(["A"]);
        let id = controller.tasks()[0].id;

        controller.begin_edit(id);
        controller.update_edit_draft("  Padded  ");
        controller.commit_edit();
        assert_eq!(texts(&controller), vec!["Padded"]);
    }

    #[test]
    fn begin_edit_seeds_scratch_from_task_text() {
        let mut controller = TaskListController::with_tasks(["Draft me"]);
        let id = controller.tasks()[0].id;

        controller.begin_edit(id);
        let snapshot = controller.snapshot();
        let session = snapshot.editing().unwrap();
        assert_eq!(session.task_id, id);
        assert_eq!(session.scratch, "Draft me");
        assert!(snapshot.is_editing(id));
    }

    #[test]
    fn begin_edit_on_another_task_discards_prior_scratch() {
        let mut controller = TaskListController::with_tasks(["First", "Second"]);
        let first = controller.tasks()[0].id;
        let second = controller.tasks()[1].id;

        controller.begin_edit(first);
        controller.update_edit_draft("Unsaved");
        assert_eq!(
            controller.begin_edit(second),
            Outcome::EditStarted {
                id: second,
                discarded: Some(first)
            }
        );
        controller.commit_edit();

        assert_eq!(texts(&controller), vec!["First", "Second"]);
    }

    #[test]
    fn begin_edit_unknown_id_keeps_current_session() {
        let mut controller = TaskListController::with_tasks(["A"]);
        let id = controller.tasks()[0].id;
        controller.begin_edit(id);
        controller.update_edit_draft("Changed");

        assert!(!controller.begin_edit(TaskId::new(99)).is_change());
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.editing().map(|s| s.scratch.as_str()), Some("Changed"));
    }

    #[test]
    fn edit_operations_without_session_are_ignored() {
        let mut controller = TaskListController::with_tasks(["A"]);
        let before = controller.snapshot();

        assert!(!controller.update_edit_draft("x").is_change());
        assert!(!controller.commit_edit().is_change());
        assert!(!controller.cancel_edit().is_change());
        assert!(Arc::ptr_eq(&before, &controller.snapshot()));
    }

    #[test]
    fn removing_the_edited_task_ends_edit_mode() {
        let mut controller = TaskListController::with_tasks(["A", "B"]);
        let id = controller.tasks()[0].id;
        controller.begin_edit(id);

        controller.remove(id);
        assert!(controller.snapshot().editing().is_none());
    }

    #[test]
    fn counts_and_order_after_toggle() {
        let mut controller = TaskListController::new();
        let a = added_id(controller.add("A"));
        controller.add("B");
        controller.toggle_completed(a);

        assert_eq!(
            controller.counts(),
            Counts {
                completed: 1,
                total: 2
            }
        );
        assert_eq!(texts(&controller), vec!["A", "B"]);
    }

    #[test]
    fn earlier_snapshots_are_not_affected_by_later_operations() {
        let mut controller = TaskListController::with_tasks(["A"]);
        let before = controller.snapshot();
        let id = before.tasks()[0].id;

        controller.toggle_completed(id);
        controller.add("B");

        assert_eq!(before.len(), 1);
        assert!(!before.tasks()[0].completed);
        assert_eq!(controller.snapshot().len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut controller = TaskListController::new();
        let first = added_id(controller.add("A"));
        controller.remove(first);
        let second = added_id(controller.add("B"));

        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn with_tasks_skips_blank_entries() {
        let controller = TaskListController::with_tasks(["A", "  ", "B"]);
        assert_eq!(texts(&controller), vec!["A", "B"]);
    }

    #[test]
    fn snapshot_serializes_tasks_and_edit_state() {
        let mut controller = TaskListController::with_tasks(["A"]);
        let id = controller.tasks()[0].id;
        controller.begin_edit(id);

        let json = serde_json::to_value(&*controller.snapshot()).unwrap();
        assert_eq!(json["tasks"][0]["id"], 1);
        assert_eq!(json["tasks"][0]["text"], "A");
        assert_eq!(json["editing"]["task_id"], 1);
        assert_eq!(json["draft"], "");
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(String),
        RemoveNth(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            "[ a-z]{0,6}".prop_map(Op::Add),
            (0usize..8).prop_map(Op::RemoveNth),
        ]
    }

    proptest! {
        #[test]
        fn ids_assigned_by_add_are_pairwise_distinct(ops in prop::collection::vec(op_strategy(), 0..64)) {
            let mut controller = TaskListController::new();
            let mut seen = HashSet::new();

            for op in ops {
                match op {
                    Op::Add(text) => {
                        if let Outcome::Added { id } = controller.add(&text) {
                            prop_assert!(seen.insert(id), "id {} handed out twice", id);
                        }
                    }
                    Op::RemoveNth(n) => {
                        let target = controller.tasks().get(n).map(|task| task.id);
                        if let Some(id) = target {
                            controller.remove(id);
                        }
                    }
                }

                let live: HashSet<TaskId> = controller.tasks().iter().map(|t| t.id).collect();
                prop_assert_eq!(live.len(), controller.tasks().len());
            }
        }
    }
}

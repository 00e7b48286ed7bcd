use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::theme::ClassList;

pub const EMPTY_TASK_NOTICE: &str = "Please enter a task.";
pub const ITEM_CLASS: &str = "list";
pub const REMOVE_CLASS: &str = "remove-btn";
pub const REMOVE_LABEL: &str = "Remove";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("{}", EMPTY_TASK_NOTICE)]
    EmptyText,

    #[error("No task with id {0}")]
    UnknownTask(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(Uuid);

impl TaskId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The task text box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub value: String,
}

/// The per-item remove button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveControl {
    pub label: String,
    pub classes: ClassList,
    /// Entry this button detaches.
    pub target: TaskId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: TaskId,
    pub text: String,
    pub classes: ClassList,
    pub remove: RemoveControl,
}

impl TaskItem {
    fn new(text: String) -> Self {
        let id = TaskId::new();
        let mut classes = ClassList::new();
        classes.add(ITEM_CLASS);
        let mut remove_classes = ClassList::new();
        remove_classes.add(REMOVE_CLASS);
        Self {
            id,
            text,
            classes,
            remove: RemoveControl {
                label: REMOVE_LABEL.to_string(),
                classes: remove_classes,
                target: id,
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskList {
    items: Vec<TaskItem>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry for `text` unless it is empty. Text is kept verbatim.
    pub fn add(&mut self, text: &str) -> Result<TaskId, TaskError> {
        if text.is_empty() {
            return Err(TaskError::EmptyText);
        }
        let item = TaskItem::new(text.to_string());
        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    /// Take the input's text, add it, and clear the input on success.
    pub fn add_from(&mut self, input: &mut TaskInput) -> Result<TaskId, TaskError> {
        let id = self.add(&input.value)?;
        input.value.clear();
        Ok(id)
    }

    /// Detach exactly one entry; the rest keep their order.
    pub fn remove(&mut self, id: TaskId) -> Result<TaskItem, TaskError> {
        let pos = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(TaskError::UnknownTask(id))?;
        Ok(self.items.remove(pos))
    }

    pub fn get(&self, id: TaskId) -> Option<&TaskItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> &[TaskItem] {
        &self.items
    }

    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

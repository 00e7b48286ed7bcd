pub mod board;
pub mod dispatch;
pub mod tasks;
pub mod theme;

pub use board::{Board, Event, EventKind, Page};
pub use dispatch::{Dispatcher, HandlerId};
pub use tasks::{TaskError, TaskId, TaskInput, TaskItem, TaskList, EMPTY_TASK_NOTICE};
pub use theme::{ClassList, Theme, ThemeToggle};

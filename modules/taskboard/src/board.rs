use handoff_common::Notice;
use tracing::{debug, info};

use crate::dispatch::{Dispatcher, HandlerId, Keyed};
use crate::tasks::{TaskId, TaskInput, TaskList};
use crate::theme::{ClassList, Theme, ThemeToggle};

/// Everything the handlers read and write, passed in explicitly.
#[derive(Debug, Clone)]
pub struct Page {
    pub body: ClassList,
    pub theme_toggle: ThemeToggle,
    pub task_input: TaskInput,
    pub tasks: TaskList,
}

impl Page {
    pub fn new(theme: Theme) -> Self {
        let mut body = ClassList::new();
        body.add(theme.class());
        Self {
            body,
            theme_toggle: ThemeToggle::for_theme(theme),
            task_input: TaskInput::default(),
            tasks: TaskList::new(),
        }
    }

    pub fn theme(&self) -> Option<Theme> {
        Theme::of(&self.body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ToggleTheme,
    AddTask,
    RemoveTask(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ToggleTheme,
    AddTask,
    RemoveTask,
}

impl Keyed for Event {
    type Kind = EventKind;

    fn kind(&self) -> EventKind {
        match self {
            Event::ToggleTheme => EventKind::ToggleTheme,
            Event::AddTask => EventKind::AddTask,
            Event::RemoveTask(_) => EventKind::RemoveTask,
        }
    }
}

fn toggle_theme(page: &mut Page, _event: &Event) -> Vec<Notice> {
    page.theme_toggle.click(&mut page.body);
    debug!(class_name = %page.body, label = %page.theme_toggle.label, "Current class name");
    Vec::new()
}

fn add_task(page: &mut Page, _event: &Event) -> Vec<Notice> {
    match page.tasks.add_from(&mut page.task_input) {
        Ok(id) => {
            info!(%id, count = page.tasks.len(), "Task added");
            Vec::new()
        }
        Err(e) => vec![Notice::info(e.to_string())],
    }
}

fn remove_task(page: &mut Page, event: &Event) -> Vec<Notice> {
    if let Event::RemoveTask(id) = event {
        match page.tasks.remove(*id) {
            Ok(_) => info!(%id, count = page.tasks.len(), "Task removed"),
            // The entry is already gone; a stale control does nothing.
            Err(e) => debug!(%id, error = %e, "Remove for unknown task"),
        }
    }
    Vec::new()
}

/// A page with its handlers wired up.
pub struct Board {
    page: Page,
    dispatcher: Dispatcher<Page, Event>,
    wired: Vec<HandlerId>,
}

impl Board {
    /// Build the page and register the default handlers.
    pub fn new(theme: Theme) -> Self {
        let mut dispatcher = Dispatcher::new();
        let wired = vec![
            dispatcher.register(EventKind::ToggleTheme, toggle_theme),
            dispatcher.register(EventKind::AddTask, add_task),
            dispatcher.register(EventKind::RemoveTask, remove_task),
        ];
        Self {
            page: Page::new(theme),
            dispatcher,
            wired,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<Page, Event> {
        &mut self.dispatcher
    }

    /// Type into the task box.
    pub fn type_task(&mut self, text: &str) {
        self.page.task_input.value = text.to_string();
    }

    pub fn fire(&mut self, event: Event) -> Vec<Notice> {
        self.dispatcher.dispatch(&mut self.page, &event)
    }

    pub fn click_theme_toggle(&mut self) -> Vec<Notice> {
        self.fire(Event::ToggleTheme)
    }

    pub fn click_add(&mut self) -> Vec<Notice> {
        self.fire(Event::AddTask)
    }

    /// Click the remove control attached to the entry `id`.
    pub fn click_remove(&mut self, id: TaskId) -> Vec<Notice> {
        let target = match self.page.tasks.get(id) {
            Some(item) => item.remove.target,
            None => id,
        };
        self.fire(Event::RemoveTask(target))
    }

    /// Unregister the default handlers. Events after this are ignored.
    pub fn teardown(&mut self) {
        for id in self.wired.drain(..) {
            self.dispatcher.unregister(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::EMPTY_TASK_NOTICE;

    #[test]
    fn new_page_has_one_theme_class() {
        let board = Board::new(Theme::Dark);
        assert_eq!(board.page().theme(), Some(Theme::Dark));
        assert_eq!(board.page().theme_toggle.label, "Light");
    }

    #[test]
    fn empty_add_alerts() {
        let mut board = Board::new(Theme::Light);
        let notices = board.click_add();
        assert_eq!(notices, vec![Notice::info(EMPTY_TASK_NOTICE)]);
        assert!(board.page().tasks.is_empty());
    }

    #[test]
    fn teardown_detaches_handlers() {
        let mut board = Board::new(Theme::Light);
        board.teardown();
        board.click_theme_toggle();
        board.type_task("ignored");
        board.click_add();
        assert_eq!(board.page().theme(), Some(Theme::Light));
        assert!(board.page().tasks.is_empty());
    }
}

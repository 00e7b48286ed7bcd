use std::fmt;

use tracing::debug;

pub const LIGHT_CLASS: &str = "light-theme";
pub const DARK_CLASS: &str = "dark-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn class(self) -> &'static str {
        match self {
            Theme::Light => LIGHT_CLASS,
            Theme::Dark => DARK_CLASS,
        }
    }

    /// Label of the toggle while this theme is active: it names the other one.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Dark",
            Theme::Dark => "Light",
        }
    }

    /// The theme carried by `classes`, or `None` unless exactly one theme class is present.
    pub fn of(classes: &ClassList) -> Option<Theme> {
        match (classes.contains(LIGHT_CLASS), classes.contains(DARK_CLASS)) {
            (true, false) => Some(Theme::Light),
            (false, true) => Some(Theme::Dark),
            _ => None,
        }
    }
}

/// Ordered set of class names, as on an element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_string());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.0.retain(|c| c != class);
    }

    /// Remove if present, add otherwise. Returns whether it is now present.
    pub fn toggle(&mut self, class: &str) -> bool {
        if self.contains(class) {
            self.remove(class);
            false
        } else {
            self.add(class);
            true
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// The theme button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeToggle {
    pub label: String,
}

impl ThemeToggle {
    pub fn for_theme(theme: Theme) -> Self {
        Self {
            label: theme.toggle_label().to_string(),
        }
    }

    /// Flip both theme classes on `body` and relabel the button.
    pub fn click(&mut self, body: &mut ClassList) -> Option<Theme> {
        body.toggle(LIGHT_CLASS);
        body.toggle(DARK_CLASS);

        let theme = Theme::of(body);
        self.label = theme.unwrap_or(Theme::Dark).toggle_label().to_string();
        debug!(class_name = %body, "Theme toggled");
        theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(theme: Theme) -> ClassList {
        let mut classes = ClassList::new();
        classes.add(theme.class());
        classes
    }

    #[test]
    fn toggle_flips_between_themes() {
        let mut classes = body(Theme::Light);
        let mut button = ThemeToggle::for_theme(Theme::Light);
        assert_eq!(button.label, "Dark");

        assert_eq!(button.click(&mut classes), Some(Theme::Dark));
        assert_eq!(button.label, "Light");
        assert_eq!(classes.to_string(), "dark-theme");

        assert_eq!(button.click(&mut classes), Some(Theme::Light));
        assert_eq!(button.label, "Dark");
    }

    #[test]
    fn exactly_one_theme_class_after_every_click() {
        let mut classes = body(Theme::Dark);
        classes.add("page");
        let mut button = ThemeToggle::for_theme(Theme::Dark);
        for _ in 0..7 {
            button.click(&mut classes);
            let count = classes
                .iter()
                .filter(|c| *c == LIGHT_CLASS || *c == DARK_CLASS)
                .count();
            assert_eq!(count, 1);
            assert!(classes.contains("page"));
        }
    }

    #[test]
    fn theme_of_requires_exactly_one_class() {
        let mut classes = ClassList::new();
        assert_eq!(Theme::of(&classes), None);
        classes.add(LIGHT_CLASS);
        classes.add(DARK_CLASS);
        assert_eq!(Theme::of(&classes), None);
    }

    #[test]
    fn class_list_add_is_idempotent() {
        let mut classes = ClassList::new();
        classes.add("list");
        classes.add("list");
        assert_eq!(classes.iter().count(), 1);
    }
}

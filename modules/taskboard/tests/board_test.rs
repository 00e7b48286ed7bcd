use handoff_common::Notice;
use taskboard::{Board, EventKind, Theme, EMPTY_TASK_NOTICE};

fn theme_classes(board: &Board) -> Vec<String> {
    board
        .page()
        .body
        .iter()
        .filter(|c| *c == "light-theme" || *c == "dark-theme")
        .map(String::from)
        .collect()
}

#[test]
fn every_click_flips_and_keeps_exactly_one_theme_class() {
    let mut board = Board::new(Theme::Light);
    assert_eq!(theme_classes(&board), vec!["light-theme"]);

    let mut expected = Theme::Light;
    for _ in 0..6 {
        board.click_theme_toggle();
        expected = match expected {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        assert_eq!(theme_classes(&board), vec![expected.class().to_string()]);
        assert_eq!(board.page().theme_toggle.label, expected.toggle_label());
    }
}

#[test]
fn adding_buy_milk_creates_one_working_entry() {
    let mut board = Board::new(Theme::Light);
    board.type_task("Buy milk");

    let notices = board.click_add();

    assert!(notices.is_empty());
    let items = board.page().tasks.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].text, "Buy milk");
    assert!(board.page().task_input.value.is_empty());

    let id = items[0].id;
    board.click_remove(id);
    assert!(board.page().tasks.is_empty());
}

#[test]
fn empty_input_adds_nothing_and_alerts() {
    let mut board = Board::new(Theme::Light);
    board.type_task("Existing");
    board.click_add();

    board.type_task("");
    let notices = board.click_add();

    assert_eq!(notices, vec![Notice::info(EMPTY_TASK_NOTICE)]);
    assert_eq!(board.page().tasks.texts(), vec!["Existing"]);
}

#[test]
fn remove_takes_exactly_the_clicked_entry() {
    let mut board = Board::new(Theme::Dark);
    for text in ["one", "two", "three", "four"] {
        board.type_task(text);
        board.click_add();
    }
    let third = board.page().tasks.items()[2].id;

    board.click_remove(third);

    assert_eq!(board.page().tasks.texts(), vec!["one", "two", "four"]);
}

#[test]
fn stale_remove_is_harmless() {
    let mut board = Board::new(Theme::Dark);
    board.type_task("only");
    board.click_add();
    let id = board.page().tasks.items()[0].id;

    board.click_remove(id);
    let notices = board.click_remove(id);

    assert!(notices.is_empty());
    assert!(board.page().tasks.is_empty());
}

#[test]
fn extra_handlers_can_be_registered_and_removed() {
    let mut board = Board::new(Theme::Light);
    let id = board
        .dispatcher_mut()
        .register(EventKind::ToggleTheme, |_, _| vec![Notice::info("toggled")]);

    assert_eq!(board.click_theme_toggle(), vec![Notice::info("toggled")]);

    assert!(board.dispatcher_mut().unregister(id));
    assert!(board.click_theme_toggle().is_empty());
    assert_eq!(board.page().theme(), Some(Theme::Light));
}

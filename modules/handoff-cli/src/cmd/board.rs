//! Line commands for the task board:
//!
//! ```text
//! add <text>     type <text> and click Add
//! remove <n>     click Remove on the n-th entry (1-based)
//! toggle         click the theme button
//! list           print theme and entries
//! quit
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Result;
use handoff_common::Notice;
use taskboard::{Board, Theme};

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Add(&'a str),
    Remove(usize),
    Toggle,
    List,
    Quit,
    Unknown(&'a str),
}

fn parse(line: &str) -> Line<'_> {
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    match word {
        "add" => Line::Add(rest),
        "remove" => match rest.trim().parse() {
            Ok(n) => Line::Remove(n),
            Err(_) => Line::Unknown(line),
        },
        "toggle" => Line::Toggle,
        "list" => Line::List,
        "quit" | "exit" => Line::Quit,
        _ => Line::Unknown(line),
    }
}

fn render(board: &Board) -> String {
    let page = board.page();
    let mut out = format!("[{}] button: {}", page.body, page.theme_toggle.label);
    for (i, item) in page.tasks.items().iter().enumerate() {
        out.push_str(&format!("\n{:>3}. {}", i + 1, item.text));
    }
    out
}

/// Apply one line. Returns `None` on quit, otherwise the notices and output.
fn apply(board: &mut Board, line: &str) -> Option<(Vec<Notice>, Option<String>)> {
    let notices = match parse(line) {
        Line::Add(text) => {
            board.type_task(text);
            board.click_add()
        }
        Line::Remove(n) => {
            let id = n
                .checked_sub(1)
                .and_then(|i| board.page().tasks.items().get(i))
                .map(|item| item.id);
            match id {
                Some(id) => board.click_remove(id),
                None => vec![Notice::info(format!("No entry {n}"))],
            }
        }
        Line::Toggle => board.click_theme_toggle(),
        Line::List => return Some((Vec::new(), Some(render(board)))),
        Line::Quit => return None,
        Line::Unknown(raw) => vec![Notice::info(format!("Unknown command: {raw}"))],
    };
    Some((notices, None))
}

pub fn run(dark: bool) -> Result<()> {
    let mut board = Board::new(if dark { Theme::Dark } else { Theme::Light });
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", render(&board));
    for line in stdin.lock().lines() {
        let line = line?;
        let Some((notices, output)) = apply(&mut board, line.trim_end()) else {
            break;
        };
        for notice in notices {
            println!("{notice}");
        }
        if let Some(output) = output {
            println!("{output}");
        }
        stdout.flush()?;
    }
    board.teardown();
    Ok(())
}

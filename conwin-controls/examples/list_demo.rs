use std::cell::Cell;
use std::fs::File;
use std::rc::Rc;
use std::time::{Duration, Instant};

use conwin::{Event, InputTranslator, Key, Rect, ScreenEvent, Terminal, Window, WindowConfig};
use conwin_controls::{ListHandle, ListStyle};
use simplelog::{Config, LevelFilter, WriteLogger};

const FILES: &[&str] = &[
    "Cargo.toml",
    "README.md",
    "src/lib.rs",
    "src/main.rs",
    "src/border.rs",
    "src/buffer/mod.rs",
    "src/buffer/cell.rs",
    "src/control/window.rs",
    "src/control/context.rs",
    "src/event.rs",
    "src/hit.rs",
    "src/input.rs",
    "src/terminal/mod.rs",
    "tests/window.rs",
    "tests/input.rs",
    "漢字のファイル名.txt",
];

const PACKAGES: &[&str] = &[
    "crossterm", "log", "thiserror", "unicode-width", "simplelog", "serde", "regex", "uuid",
];

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("list_demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut term = Terminal::new()?;
    let (width, height) = term.size()?;
    let config = WindowConfig::new();
    let mut translator = InputTranslator::new(config.double_click_interval);
    let mut window = Window::new(width, height, config);

    let half = (width / 2).max(3);
    let files = ListHandle::create(
        &mut window,
        None,
        Rect::new(0, 0, half, height.saturating_sub(1).max(3)),
        ListStyle::new().vertical_scrollbar(true),
    )
    .expect("Failed to create file list");
    files.add_items(&mut window, FILES).expect("Failed to add files");

    let packages = ListHandle::create(
        &mut window,
        None,
        Rect::new(half, 0, width.saturating_sub(half).max(3), 8),
        ListStyle::new()
            .multi_select(true)
            .deselect_on_lose_focus(true),
    )
    .expect("Failed to create package list");
    packages
        .add_items(&mut window, PACKAGES)
        .expect("Failed to add packages");

    let changes = Rc::new(Cell::new(0usize));
    let counter = changes.clone();
    files
        .set_selection_callback(&mut window, move |window, list| {
            counter.set(counter.get() + 1);
            let mut text = String::new();
            if let Ok(active) = list.active(window) {
                if list.item_text(window, active, &mut text).is_ok() {
                    log::info!("file list now on {active}: {text}");
                }
            }
        })
        .expect("Failed to register callback");
    packages
        .set_selection_callback(&mut window, |window, list| {
            log::info!("packages selected: {:?}", list.selected_indices(window));
        })
        .expect("Failed to register callback");

    let _ = window.set_focus(files.id());

    loop {
        term.render(&mut window)?;

        for raw in term.poll(Some(Duration::from_millis(250)))? {
            let Some(input) = translator.translate(&raw, Instant::now()) else {
                continue;
            };
            if let ScreenEvent::Key {
                key: Key::Char('q') | Key::Escape,
                ..
            } = input
            {
                window.close();
                log::info!("{} selection changes in the file list", changes.get());
                return Ok(());
            }
            window.handle_input(input);
        }

        for note in window.take_notifications() {
            if let Event::Execute { source } = note.event {
                log::info!("execute from {source}");
            }
        }
    }
}

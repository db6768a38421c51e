use std::time::{Duration, Instant};

use conwin::{InputTranslator, Key, MouseButton, ScreenEvent, WheelDirection};
use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton as CtButton,
    MouseEvent, MouseEventKind,
};

fn press(column: u16, row: u16) -> CrosstermEvent {
    mouse(MouseEventKind::Down(CtButton::Left), column, row)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermEvent {
    CrosstermEvent::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

fn translator() -> InputTranslator {
    InputTranslator::new(Duration::from_millis(500))
}

// ============================================================================
// Double-click detection
// ============================================================================

#[test]
fn test_second_press_within_interval_is_double_click() {
    let mut input = translator();
    let t0 = Instant::now();

    assert_eq!(
        input.translate(&press(3, 4), t0),
        Some(ScreenEvent::MouseDown {
            x: 3,
            y: 4,
            button: MouseButton::Left
        })
    );
    assert_eq!(
        input.translate(&press(3, 4), t0 + Duration::from_millis(100)),
        Some(ScreenEvent::DoubleClick {
            x: 3,
            y: 4,
            button: MouseButton::Left
        })
    );
    // A third press starts over
    assert!(matches!(
        input.translate(&press(3, 4), t0 + Duration::from_millis(200)),
        Some(ScreenEvent::MouseDown { .. })
    ));
}

#[test]
fn test_slow_second_press_is_single_click() {
    let mut input = translator();
    let t0 = Instant::now();

    input.translate(&press(3, 4), t0);
    assert!(matches!(
        input.translate(&press(3, 4), t0 + Duration::from_millis(600)),
        Some(ScreenEvent::MouseDown { .. })
    ));
}

#[test]
fn test_press_on_other_cell_is_single_click() {
    let mut input = translator();
    let t0 = Instant::now();

    input.translate(&press(3, 4), t0);
    assert!(matches!(
        input.translate(&press(4, 4), t0 + Duration::from_millis(50)),
        Some(ScreenEvent::MouseDown { x: 4, .. })
    ));
}

#[test]
fn test_press_with_other_button_is_single_click() {
    let mut input = translator();
    let t0 = Instant::now();

    input.translate(&press(3, 4), t0);
    assert_eq!(
        input.translate(
            &mouse(MouseEventKind::Down(CtButton::Right), 3, 4),
            t0 + Duration::from_millis(50)
        ),
        Some(ScreenEvent::MouseDown {
            x: 3,
            y: 4,
            button: MouseButton::Right
        })
    );
}

// ============================================================================
// Other events
// ============================================================================

#[test]
fn test_key_release_is_dropped() {
    let mut input = translator();
    let now = Instant::now();

    let release = KeyEvent::new_with_kind(KeyCode::Down, KeyModifiers::NONE, KeyEventKind::Release);
    assert_eq!(input.translate(&CrosstermEvent::Key(release), now), None);

    let down = KeyEvent::new(KeyCode::Down, KeyModifiers::CONTROL);
    match input.translate(&CrosstermEvent::Key(down), now) {
        Some(ScreenEvent::Key { key, modifiers }) => {
            assert_eq!(key, Key::Down);
            assert!(modifiers.ctrl);
            assert!(!modifiers.none());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_keys_without_a_mapping_are_dropped() {
    let mut input = translator();
    let now = Instant::now();

    for code in [KeyCode::CapsLock, KeyCode::NumLock, KeyCode::Null, KeyCode::Menu] {
        let event = CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(input.translate(&event, now), None, "{code:?}");
    }
    assert_eq!(Key::from_crossterm(KeyCode::CapsLock), None);
    assert_eq!(Key::from_crossterm(KeyCode::Char('\0')), Some(Key::Char('\0')));
}

#[test]
fn test_wheel_and_drag() {
    let mut input = translator();
    let now = Instant::now();

    assert_eq!(
        input.translate(&mouse(MouseEventKind::ScrollUp, 1, 2), now),
        Some(ScreenEvent::Wheel {
            x: 1,
            y: 2,
            direction: WheelDirection::Up
        })
    );
    assert_eq!(
        input.translate(&mouse(MouseEventKind::Drag(CtButton::Left), 5, 6), now),
        Some(ScreenEvent::Drag {
            x: 5,
            y: 6,
            button: MouseButton::Left
        })
    );
    assert_eq!(input.translate(&mouse(MouseEventKind::Moved, 5, 6), now), None);
}

#[test]
fn test_resize() {
    let mut input = translator();
    assert_eq!(
        input.translate(&CrosstermEvent::Resize(120, 40), Instant::now()),
        Some(ScreenEvent::Resize {
            width: 120,
            height: 40
        })
    );
}

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use conwin::{
    Area, Attr, Color, Control, ControlContext, ControlError, ControlId, Event, EventResult, Key,
    Modifiers, MouseButton, Notification, Point, Rect, ScreenEvent, Window, WindowConfig,
};

type Log = Rc<RefCell<Vec<Event>>>;

/// Records every event it sees.
#[derive(Debug, Default)]
struct Recorder {
    log: Log,
    consume: bool,
    /// Send `Execute` to the parent on every key press.
    notify_on_key: bool,
}

impl Control for Recorder {
    fn handle_event(&mut self, cx: &mut ControlContext<'_>, event: &Event) -> EventResult {
        self.log.borrow_mut().push(event.clone());
        if self.notify_on_key && matches!(event, Event::KeyDown { .. }) {
            let source = cx.id();
            cx.notify_parent(Event::Execute { source });
        }
        self.consume.into()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn window() -> Window {
    Window::new(80, 25, WindowConfig::default())
}

fn recorder(
    window: &mut Window,
    parent: Option<ControlId>,
    rect: Rect,
    can_focus: bool,
    consume: bool,
) -> (ControlId, Log) {
    let log = Log::default();
    let widget = Recorder {
        log: log.clone(),
        consume,
        notify_on_key: false,
    };
    let id = window
        .create_control(parent, rect, can_focus, Box::new(widget))
        .unwrap();
    (id, log)
}

fn key(key: Key) -> ScreenEvent {
    ScreenEvent::Key {
        key,
        modifiers: Modifiers::new(),
    }
}

// ============================================================================
// Tree
// ============================================================================

#[test]
fn test_create_rejects_rect_outside_parent() {
    let mut window = window();
    let (parent, _) = recorder(&mut window, None, Rect::new(0, 0, 10, 5), false, false);

    let err = window
        .create_control(
            Some(parent),
            Rect::new(8, 0, 5, 1),
            false,
            Box::new(Recorder::default()),
        )
        .unwrap_err();
    assert_eq!(err, ControlError::InvalidGeometry(Rect::new(8, 0, 5, 1)));

    let err = window
        .create_control(None, Rect::new(0, 0, 0, 3), false, Box::new(Recorder::default()))
        .unwrap_err();
    assert!(matches!(err, ControlError::InvalidGeometry(_)));
}

#[test]
fn test_destroy_notifies_children_first() {
    let mut window = window();
    let (parent, parent_log) = recorder(&mut window, None, Rect::new(0, 0, 10, 5), false, false);
    let (child, child_log) = recorder(&mut window, Some(parent), Rect::new(1, 1, 3, 1), false, false);

    window.destroy(parent).unwrap();

    assert_eq!(*child_log.borrow(), vec![Event::ParentDestroyed]);
    assert!(parent_log.borrow().is_empty());
    assert!(!window.exists(parent));
    assert!(!window.exists(child));
    assert!(window.top_level().is_empty());
    assert_eq!(window.destroy(parent), Err(ControlError::NoSuchControl(parent)));
}

#[test]
fn test_close_tears_down_top_level() {
    let mut window = window();
    let (a, a_log) = recorder(&mut window, None, Rect::new(0, 0, 10, 5), false, false);
    let (b, b_log) = recorder(&mut window, None, Rect::new(20, 0, 10, 5), false, false);

    window.close();

    assert_eq!(*a_log.borrow(), vec![Event::ParentDestroyed]);
    assert_eq!(*b_log.borrow(), vec![Event::ParentDestroyed]);
    assert!(!window.exists(a) && !window.exists(b));
}

#[test]
fn test_absolute_rect_adds_parent_offsets() {
    let mut window = window();
    let (parent, _) = recorder(&mut window, None, Rect::new(5, 3, 20, 10), false, false);
    let (child, _) = recorder(&mut window, Some(parent), Rect::new(2, 1, 5, 5), false, false);
    let (grandchild, _) = recorder(&mut window, Some(child), Rect::new(1, 1, 2, 2), false, false);

    assert_eq!(window.absolute_rect(grandchild), Some(Rect::new(8, 5, 2, 2)));
}

/// A control type nothing else in these tests uses.
#[derive(Debug)]
struct Other;

impl Control for Other {
    fn handle_event(&mut self, _: &mut ControlContext<'_>, _: &Event) -> EventResult {
        EventResult::Ignored
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[test]
fn test_with_control_wrong_kind() {
    let mut window = window();
    let (id, _) = recorder(&mut window, None, Rect::new(0, 0, 4, 4), false, false);

    let result = window.with_control::<Other, _, _>(id, |_, _| ());
    assert!(matches!(result, Err(ControlError::WrongKind { .. })));
    // The payload went back into its node
    assert!(window.control::<Recorder>(id).is_some());
}

#[test]
fn test_try_control_names_the_failure() {
    let mut window = window();
    let (id, _) = recorder(&mut window, None, Rect::new(0, 0, 4, 4), false, false);

    assert!(window.try_control::<Recorder>(id).is_ok());
    match window.try_control::<Other>(id) {
        Err(ControlError::WrongKind { id: reported, expected }) => {
            assert_eq!(reported, id);
            assert!(expected.ends_with("Other"));
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(window.control::<Other>(id).is_none());

    window.destroy(id).unwrap();
    assert!(matches!(
        window.try_control::<Recorder>(id),
        Err(ControlError::NoSuchControl(_))
    ));
}

// ============================================================================
// Dispatch and deferral
// ============================================================================

#[test]
fn test_parent_notification_runs_after_dispatch() {
    let mut window = window();
    let (parent, parent_log) = recorder(&mut window, None, Rect::new(0, 0, 10, 5), false, true);
    let child_log = Log::default();
    let child = window
        .create_control(
            Some(parent),
            Rect::new(1, 1, 3, 1),
            true,
            Box::new(Recorder {
                log: child_log.clone(),
                consume: true,
                notify_on_key: true,
            }),
        )
        .unwrap();

    window.dispatch(
        child,
        &Event::KeyDown {
            key: Key::Enter,
            modifiers: Modifiers::new(),
        },
    );

    assert_eq!(*parent_log.borrow(), vec![Event::Execute { source: child }]);
    assert!(window.take_notifications().is_empty());
}

#[test]
fn test_unconsumed_notification_reaches_outbox() {
    let mut window = window();
    let (parent, parent_log) = recorder(&mut window, None, Rect::new(0, 0, 10, 5), false, false);
    let child = window
        .create_control(
            Some(parent),
            Rect::new(1, 1, 3, 1),
            true,
            Box::new(Recorder {
                log: Log::default(),
                consume: true,
                notify_on_key: true,
            }),
        )
        .unwrap();

    window.dispatch(
        child,
        &Event::KeyDown {
            key: Key::Enter,
            modifiers: Modifiers::new(),
        },
    );

    // The parent saw it, did not consume it, so it bubbled past the top
    assert_eq!(parent_log.borrow().len(), 1);
    assert_eq!(
        window.take_notifications(),
        vec![Notification {
            source: child,
            event: Event::Execute { source: child },
        }]
    );
    assert!(window.take_notifications().is_empty());
}

#[test]
fn test_deferred_task_sees_control_back_in_place() {
    #[derive(Debug)]
    struct Deferring {
        seen: Rc<Cell<bool>>,
    }
    impl Control for Deferring {
        fn handle_event(&mut self, cx: &mut ControlContext<'_>, _: &Event) -> EventResult {
            let id = cx.id();
            let seen = self.seen.clone();
            cx.defer(move |window| seen.set(window.control::<Deferring>(id).is_some()));
            EventResult::Consumed
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    let mut window = window();
    let seen = Rc::new(Cell::new(false));
    let id = window
        .create_control(
            None,
            Rect::new(0, 0, 4, 4),
            false,
            Box::new(Deferring { seen: seen.clone() }),
        )
        .unwrap();

    window.dispatch(id, &Event::GotFocus);
    assert!(seen.get());
}

#[test]
fn test_dispatch_to_destroyed_control_is_ignored() {
    let mut window = window();
    let (id, log) = recorder(&mut window, None, Rect::new(0, 0, 4, 4), false, true);
    window.destroy(id).unwrap();

    assert_eq!(window.dispatch(id, &Event::GotFocus), EventResult::Ignored);
    assert!(log.borrow().is_empty());
}

// ============================================================================
// Focus
// ============================================================================

#[test]
fn test_set_focus_sends_lost_then_got() {
    let mut window = window();
    let (a, a_log) = recorder(&mut window, None, Rect::new(0, 0, 5, 5), true, false);
    let (b, b_log) = recorder(&mut window, None, Rect::new(10, 0, 5, 5), true, false);

    assert_eq!(window.set_focus(a), Ok(true));
    assert_eq!(window.set_focus(a), Ok(false));
    assert_eq!(window.set_focus(b), Ok(true));

    assert_eq!(*a_log.borrow(), vec![Event::GotFocus, Event::LostFocus]);
    assert_eq!(*b_log.borrow(), vec![Event::GotFocus]);
    assert_eq!(window.focused(), Some(b));
}

#[test]
fn test_unfocusable_control_is_refused() {
    let mut window = window();
    let (id, log) = recorder(&mut window, None, Rect::new(0, 0, 5, 5), false, false);

    assert_eq!(window.set_focus(id), Ok(false));
    assert_eq!(window.focused(), None);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_tab_cycles_focus_in_tree_order() {
    let mut window = window();
    let (a, _) = recorder(&mut window, None, Rect::new(0, 0, 10, 5), true, false);
    let (_, _) = recorder(&mut window, Some(a), Rect::new(1, 1, 2, 2), false, false);
    let (b, _) = recorder(&mut window, Some(a), Rect::new(4, 1, 2, 2), true, false);
    let (c, _) = recorder(&mut window, None, Rect::new(20, 0, 5, 5), true, false);

    window.handle_input(key(Key::Tab));
    assert_eq!(window.focused(), Some(a));
    window.handle_input(key(Key::Tab));
    assert_eq!(window.focused(), Some(b));
    window.handle_input(key(Key::Tab));
    assert_eq!(window.focused(), Some(c));
    window.handle_input(key(Key::Tab));
    assert_eq!(window.focused(), Some(a));
    window.handle_input(key(Key::BackTab));
    assert_eq!(window.focused(), Some(c));
}

#[test]
fn test_consumed_tab_does_not_move_focus() {
    let mut window = window();
    let (a, _) = recorder(&mut window, None, Rect::new(0, 0, 5, 5), true, true);
    let (_, _) = recorder(&mut window, None, Rect::new(10, 0, 5, 5), true, true);

    window.set_focus(a).unwrap();
    window.handle_input(key(Key::Tab));
    assert_eq!(window.focused(), Some(a));
}

// ============================================================================
// Mouse routing
// ============================================================================

fn bordered(window: &mut Window, rect: Rect) -> (ControlId, Log) {
    let (id, log) = recorder(window, None, rect, true, true);
    window
        .with_control::<Recorder, _, _>(id, |_, cx| {
            let client = cx.full_rect().at_origin().inset(1);
            cx.set_client_rect(client)
        })
        .unwrap()
        .unwrap();
    (id, log)
}

#[test]
fn test_mouse_down_focuses_and_maps_to_client() {
    let mut window = window();
    let (id, log) = bordered(&mut window, Rect::new(5, 5, 10, 5));

    window.handle_input(ScreenEvent::MouseDown {
        x: 7,
        y: 6,
        button: MouseButton::Left,
    });

    assert_eq!(window.focused(), Some(id));
    assert_eq!(
        *log.borrow(),
        vec![
            Event::GotFocus,
            Event::MouseDown {
                area: Area::Client,
                location: Point::new(1, 0),
                button: MouseButton::Left,
            },
        ]
    );
}

#[test]
fn test_border_click_is_non_client() {
    let mut window = window();
    let (_, log) = bordered(&mut window, Rect::new(5, 5, 10, 5));

    window.handle_input(ScreenEvent::MouseDown {
        x: 14,
        y: 7,
        button: MouseButton::Left,
    });

    assert_eq!(
        log.borrow().last(),
        Some(&Event::MouseDown {
            area: Area::NonClient,
            location: Point::new(9, 2),
            button: MouseButton::Left,
        })
    );
}

#[test]
fn test_mouse_capture_until_release() {
    let mut window = window();
    let (_, log) = bordered(&mut window, Rect::new(5, 5, 10, 5));

    window.handle_input(ScreenEvent::MouseDown {
        x: 7,
        y: 6,
        button: MouseButton::Left,
    });
    window.handle_input(ScreenEvent::Drag {
        x: 0,
        y: 0,
        button: MouseButton::Left,
    });
    window.handle_input(ScreenEvent::MouseUp {
        x: 0,
        y: 0,
        button: MouseButton::Left,
    });
    let before = log.borrow().len();
    let result = window.handle_input(ScreenEvent::Drag {
        x: 0,
        y: 0,
        button: MouseButton::Left,
    });

    let log = log.borrow();
    assert_eq!(
        log[2],
        Event::Drag {
            area: Area::NonClient,
            location: Point::new(0, 0),
            button: MouseButton::Left,
        }
    );
    assert!(matches!(log[3], Event::MouseUp { .. }));
    assert_eq!(log.len(), before);
    assert_eq!(result, EventResult::Ignored);
}

#[test]
fn test_wheel_uses_configured_lines() {
    let mut window = Window::new(80, 25, WindowConfig::new().wheel_lines(5));
    let (_, log) = recorder(&mut window, None, Rect::new(0, 0, 10, 5), false, true);

    window.handle_input(ScreenEvent::Wheel {
        x: 2,
        y: 2,
        direction: conwin::WheelDirection::Down,
    });

    assert!(matches!(
        log.borrow()[0],
        Event::Wheel {
            lines: 5,
            area: Area::Client,
            ..
        }
    ));
}

#[test]
fn test_click_on_empty_screen_is_ignored() {
    let mut window = window();
    let (_, log) = recorder(&mut window, None, Rect::new(0, 0, 10, 5), true, true);

    let result = window.handle_input(ScreenEvent::MouseDown {
        x: 50,
        y: 20,
        button: MouseButton::Left,
    });

    assert_eq!(result, EventResult::Ignored);
    assert!(log.borrow().is_empty());
    assert_eq!(window.focused(), None);
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_compose_draws_children_over_parents() {
    let mut window = window();
    let (parent, _) = recorder(&mut window, None, Rect::new(2, 1, 6, 4), false, false);
    let (child, _) = recorder(&mut window, Some(parent), Rect::new(1, 1, 2, 2), false, false);
    let attr = Attr::new(Color::Yellow, Color::Blue);

    window
        .with_control::<Recorder, _, _>(parent, |_, cx| cx.set_cell(1, 1, 'P', attr))
        .unwrap();
    window
        .with_control::<Recorder, _, _>(child, |_, cx| cx.set_cell(0, 0, 'C', attr))
        .unwrap();

    let screen = window.compose();
    assert_eq!(screen.get(3, 2).unwrap().char, 'C');
    assert_eq!(screen.get(3, 2).unwrap().attr, attr);
    // Parent background carries the window's default attributes
    assert_eq!(screen.get(2, 1).unwrap().attr, Attr::new(Color::Black, Color::LightGray));
    // Outside every control
    assert_eq!(screen.get(0, 0).unwrap().attr, Attr::default());
}

#[test]
fn test_cursor_position_only_for_focused_visible_cursor() {
    let mut window = window();
    let (id, _) = bordered(&mut window, Rect::new(5, 5, 10, 5));

    window
        .with_control::<Recorder, _, _>(id, |_, cx| {
            cx.set_cursor_state(true, 20);
            cx.set_client_cursor_location(2, 1);
        })
        .unwrap();
    assert_eq!(window.cursor_position(), None);

    window.set_focus(id).unwrap();
    assert_eq!(window.cursor_position(), Some((8, 7, 20)));
}

#[test]
fn test_resize_grows_screen() {
    let mut window = window();
    window.handle_input(ScreenEvent::Resize {
        width: 100,
        height: 30,
    });
    assert_eq!(window.size(), (100, 30));
    assert_eq!(window.compose().width(), 100);
}

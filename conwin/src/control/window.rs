use std::collections::VecDeque;
use std::fmt;

use super::{Control, ControlContext, ControlHeader, ControlId, EventResult};
use crate::buffer::Buffer;
use crate::config::WindowConfig;
use crate::error::ControlError;
use crate::event::{Event, Key, Point};
use crate::hit::{find_top_level_at, resolve, ChildHit};
use crate::input::ScreenEvent;
use crate::layout::Rect;

type Deferred = Box<dyn FnOnce(&mut Window)>;

/// An event that bubbled past every control without being consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The control that raised the event.
    pub source: ControlId,
    pub event: Event,
}

struct Node {
    header: ControlHeader,
    /// `None` while the control is handling an event.
    widget: Option<Box<dyn Control>>,
}

/// The host: owns the control arena, routes input and composes the screen.
pub struct Window {
    config: WindowConfig,
    screen: Buffer,
    nodes: Vec<Option<Node>>,
    top_level: Vec<ControlId>,
    focused: Option<ControlId>,
    captured: Option<ControlId>,
    deferred: VecDeque<Deferred>,
    depth: usize,
    draining: bool,
    notifications: Vec<Notification>,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("size", &(self.screen.width(), self.screen.height()))
            .field("controls", &self.nodes.iter().flatten().count())
            .field("focused", &self.focused)
            .field("pending", &self.deferred.len())
            .finish()
    }
}

impl Window {
    pub fn new(width: u16, height: u16, config: WindowConfig) -> Self {
        Self {
            config,
            screen: Buffer::new(width, height),
            nodes: Vec::new(),
            top_level: Vec::new(),
            focused: None,
            captured: None,
            deferred: VecDeque::new(),
            depth: 0,
            draining: false,
            notifications: Vec::new(),
        }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn size(&self) -> (u16, u16) {
        (self.screen.width(), self.screen.height())
    }

    // -------------------------------------------------------------------------
    // Creation and teardown
    // -------------------------------------------------------------------------

    /// Register a control. `rect` is in the parent's coordinates and must fit
    /// inside it (inside the screen for top-level controls).
    pub fn create_control(
        &mut self,
        parent: Option<ControlId>,
        rect: Rect,
        can_focus: bool,
        widget: Box<dyn Control>,
    ) -> Result<ControlId, ControlError> {
        self.check_geometry(parent, rect)?;

        let id = ControlId::new(self.nodes.len());
        let header = ControlHeader::new(rect, parent, can_focus, self.config.default_attr);
        self.nodes.push(Some(Node {
            header,
            widget: Some(widget),
        }));

        match parent {
            Some(parent_id) => {
                if let Some(node) = self.node_mut(parent_id) {
                    node.header.children.push(id);
                }
            }
            None => self.top_level.push(id),
        }

        log::debug!("created control {id} at {rect:?} (parent {parent:?})");
        Ok(id)
    }

    /// Remove a control and its subtree. Every child receives
    /// [`Event::ParentDestroyed`] before it is removed.
    pub fn destroy(&mut self, id: ControlId) -> Result<(), ControlError> {
        let children = self
            .header(id)
            .ok_or(ControlError::NoSuchControl(id))?
            .children
            .clone();

        for child in children {
            self.dispatch(child, &Event::ParentDestroyed);
            self.destroy(child)?;
        }

        let parent = self.header(id).and_then(|h| h.parent);
        match parent {
            Some(parent_id) => {
                if let Some(node) = self.node_mut(parent_id) {
                    node.header.children.retain(|c| *c != id);
                }
            }
            None => self.top_level.retain(|c| *c != id),
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        if self.captured == Some(id) {
            self.captured = None;
        }
        self.nodes[id.index()] = None;

        log::debug!("destroyed control {id}");
        Ok(())
    }

    /// Tear down every control, as when the host window closes.
    pub fn close(&mut self) {
        let top_level = self.top_level.clone();
        for id in top_level {
            self.dispatch(id, &Event::ParentDestroyed);
            if let Err(e) = self.destroy(id) {
                log::warn!("failed to destroy {id} on close: {e}");
            }
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn exists(&self, id: ControlId) -> bool {
        self.node(id).is_some()
    }

    pub fn header(&self, id: ControlId) -> Option<&ControlHeader> {
        self.node(id).map(|n| &n.header)
    }

    pub fn surface(&self, id: ControlId) -> Option<&Buffer> {
        self.header(id).map(|h| &h.surface)
    }

    pub fn top_level(&self) -> &[ControlId] {
        &self.top_level
    }

    /// Shared access to a control's payload. `None` if the id is stale, the
    /// type does not match, or the control is handling an event.
    pub fn control<T: Control>(&self, id: ControlId) -> Option<&T> {
        self.try_control(id).ok()
    }

    /// Like [`Window::control`], reporting why the payload is unavailable.
    pub fn try_control<T: Control>(&self, id: ControlId) -> Result<&T, ControlError> {
        let node = self.node(id).ok_or(ControlError::NoSuchControl(id))?;
        let widget = node.widget.as_ref().ok_or(ControlError::Busy(id))?;
        widget.as_any().downcast_ref::<T>().ok_or(ControlError::WrongKind {
            id,
            expected: std::any::type_name::<T>(),
        })
    }

    /// Rectangle of a control in screen coordinates.
    pub fn absolute_rect(&self, id: ControlId) -> Option<Rect> {
        let header = self.header(id)?;
        let mut rect = header.full_rect;
        let mut parent = header.parent;
        while let Some(parent_id) = parent {
            let parent_header = self.header(parent_id)?;
            rect = rect.offset(parent_header.full_rect.x, parent_header.full_rect.y);
            parent = parent_header.parent;
        }
        Some(rect)
    }

    /// Take every event that bubbled to the top since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Deliver an event to one control.
    pub fn dispatch(&mut self, id: ControlId, event: &Event) -> EventResult {
        let Some(mut widget) = self.take_widget(id) else {
            log::trace!("dropping {event:?} for unavailable control {id}");
            return EventResult::Ignored;
        };

        log::trace!("dispatch {event:?} to {id}");
        self.depth += 1;
        let result = {
            let mut cx = ControlContext::new(self, id);
            widget.handle_event(&mut cx, event)
        };
        self.put_widget(id, widget);
        self.depth -= 1;
        self.run_deferred();
        result
    }

    /// Run `f` with typed mutable access to a control and its context.
    pub fn with_control<T, R, F>(&mut self, id: ControlId, f: F) -> Result<R, ControlError>
    where
        T: Control,
        F: FnOnce(&mut T, &mut ControlContext<'_>) -> R,
    {
        let node = self.node_mut(id).ok_or(ControlError::NoSuchControl(id))?;
        let mut widget = node.widget.take().ok_or(ControlError::Busy(id))?;

        if widget.as_any().downcast_ref::<T>().is_none() {
            self.put_widget(id, widget);
            return Err(ControlError::WrongKind {
                id,
                expected: std::any::type_name::<T>(),
            });
        }

        self.depth += 1;
        let result = match widget.as_any_mut().downcast_mut::<T>() {
            Some(typed) => {
                let mut cx = ControlContext::new(self, id);
                Ok(f(typed, &mut cx))
            }
            None => Err(ControlError::WrongKind {
                id,
                expected: std::any::type_name::<T>(),
            }),
        };
        self.put_widget(id, widget);
        self.depth -= 1;
        self.run_deferred();
        result
    }

    /// Queue work to run once the outermost dispatch has finished and every
    /// control is back in its node.
    pub fn defer(&mut self, task: impl FnOnce(&mut Window) + 'static) {
        self.deferred.push_back(Box::new(task));
        self.run_deferred();
    }

    /// Send `event` to the parent of `source` after the current dispatch.
    /// Unconsumed events keep bubbling; past the top level they land in the
    /// notification outbox.
    pub fn notify_parent(&mut self, source: ControlId, event: Event) {
        let parent = self.header(source).and_then(|h| h.parent);
        self.defer(move |window| window.bubble(source, parent, event));
    }

    fn bubble(&mut self, source: ControlId, mut target: Option<ControlId>, event: Event) {
        while let Some(id) = target {
            if self.dispatch(id, &event).is_handled() {
                return;
            }
            target = self.header(id).and_then(|h| h.parent);
        }
        self.notifications.push(Notification { source, event });
    }

    fn run_deferred(&mut self) {
        if self.depth > 0 || self.draining {
            return;
        }
        self.draining = true;
        while let Some(task) = self.deferred.pop_front() {
            task(self);
        }
        self.draining = false;
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    pub fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    /// Move keyboard focus. Returns `Ok(false)` if it was already there.
    pub fn set_focus(&mut self, id: ControlId) -> Result<bool, ControlError> {
        let header = self.header(id).ok_or(ControlError::NoSuchControl(id))?;
        if !header.can_focus {
            log::warn!("control {id} cannot take focus");
            return Ok(false);
        }
        if self.focused == Some(id) {
            return Ok(false);
        }

        let previous = self.focused.replace(id);
        log::debug!("focus {previous:?} -> {id}");
        if let Some(previous) = previous {
            self.dispatch(previous, &Event::LostFocus);
        }
        self.dispatch(id, &Event::GotFocus);
        Ok(true)
    }

    /// Drop keyboard focus. Returns true if something was focused.
    pub fn clear_focus(&mut self) -> bool {
        match self.focused.take() {
            Some(previous) => {
                self.dispatch(previous, &Event::LostFocus);
                true
            }
            None => false,
        }
    }

    /// Focus the next focusable control in tree order (Tab navigation).
    pub fn focus_next(&mut self) -> Option<ControlId> {
        self.cycle_focus(false)
    }

    /// Focus the previous focusable control (Shift+Tab navigation).
    pub fn focus_prev(&mut self) -> Option<ControlId> {
        self.cycle_focus(true)
    }

    fn cycle_focus(&mut self, backwards: bool) -> Option<ControlId> {
        let focusable = self.collect_focusable();
        if focusable.is_empty() {
            return None;
        }

        let len = focusable.len();
        let next = match self.focused.and_then(|f| focusable.iter().position(|id| *id == f)) {
            Some(i) if backwards => focusable[(i + len - 1) % len],
            Some(i) => focusable[(i + 1) % len],
            None if backwards => focusable[len - 1],
            None => focusable[0],
        };

        match self.set_focus(next) {
            Ok(true) => Some(next),
            _ => None,
        }
    }

    fn collect_focusable(&self) -> Vec<ControlId> {
        fn walk(window: &Window, id: ControlId, out: &mut Vec<ControlId>) {
            let Some(header) = window.header(id) else {
                return;
            };
            if header.can_focus {
                out.push(id);
            }
            for child in &header.children {
                walk(window, *child, out);
            }
        }

        let mut result = Vec::new();
        for id in &self.top_level {
            walk(self, *id, &mut result);
        }
        result
    }

    // -------------------------------------------------------------------------
    // Input routing
    // -------------------------------------------------------------------------

    /// Route a screen-level input event to the right control.
    ///
    /// Keys go to the focused control; unconsumed Tab/BackTab cycle focus.
    /// Mouse events go to the top-level control under the pointer, or to the
    /// control that captured the mouse on button press until release.
    pub fn handle_input(&mut self, input: ScreenEvent) -> EventResult {
        match input {
            ScreenEvent::Key { key, modifiers } => {
                let result = match self.focused {
                    Some(id) => self.dispatch(id, &Event::KeyDown { key, modifiers }),
                    None => EventResult::Ignored,
                };
                if result.is_handled() || modifiers.ctrl || modifiers.alt {
                    return result;
                }
                match key {
                    Key::Tab => self.focus_next().is_some().into(),
                    Key::BackTab => self.focus_prev().is_some().into(),
                    _ => result,
                }
            }
            ScreenEvent::Resize { width, height } => {
                self.screen.resize(width, height);
                EventResult::Consumed
            }
            ScreenEvent::MouseDown { x, y, button } => {
                let Some(hit) = find_top_level_at(self, x, y) else {
                    return EventResult::Ignored;
                };
                if self.header(hit.id).is_some_and(|h| h.can_focus) {
                    let _ = self.set_focus(hit.id);
                }
                self.captured = Some(hit.id);
                self.dispatch(
                    hit.id,
                    &Event::MouseDown {
                        area: hit.area,
                        location: hit.location,
                        button,
                    },
                )
            }
            ScreenEvent::DoubleClick { x, y, button } => {
                let Some(hit) = find_top_level_at(self, x, y) else {
                    return EventResult::Ignored;
                };
                self.captured = Some(hit.id);
                self.dispatch(
                    hit.id,
                    &Event::DoubleClick {
                        area: hit.area,
                        location: hit.location,
                        button,
                    },
                )
            }
            ScreenEvent::MouseUp { x, y, button } => {
                let Some(hit) = self.mouse_target(x, y) else {
                    return EventResult::Ignored;
                };
                self.captured = None;
                self.dispatch(
                    hit.id,
                    &Event::MouseUp {
                        area: hit.area,
                        location: hit.location,
                        button,
                    },
                )
            }
            ScreenEvent::Drag { x, y, button } => {
                let Some(hit) = self.mouse_target(x, y) else {
                    return EventResult::Ignored;
                };
                self.dispatch(
                    hit.id,
                    &Event::Drag {
                        area: hit.area,
                        location: hit.location,
                        button,
                    },
                )
            }
            ScreenEvent::Wheel { x, y, direction } => {
                let Some(hit) = find_top_level_at(self, x, y) else {
                    return EventResult::Ignored;
                };
                let lines = self.config.wheel_lines;
                self.dispatch(
                    hit.id,
                    &Event::Wheel {
                        area: hit.area,
                        location: hit.location,
                        direction,
                        lines,
                    },
                )
            }
        }
    }

    /// The captured control (with the point mapped into it), else whatever
    /// top-level control is under the pointer.
    fn mouse_target(&self, x: u16, y: u16) -> Option<ChildHit> {
        let Some(id) = self.captured else {
            return find_top_level_at(self, x, y);
        };
        let rect = self.absolute_rect(id)?;
        let local = Point::new(x.saturating_sub(rect.x), y.saturating_sub(rect.y));
        Some(resolve(id, self.header(id)?, local))
    }

    // -------------------------------------------------------------------------
    // Composition
    // -------------------------------------------------------------------------

    /// Paint every control surface onto the screen buffer, parents first.
    pub fn compose(&mut self) -> &Buffer {
        let mut screen = std::mem::replace(&mut self.screen, Buffer::new(0, 0));
        screen.clear();
        let clip = screen.area();
        for id in &self.top_level {
            self.blit_tree(&mut screen, *id, 0, 0, clip);
        }
        self.screen = screen;
        &self.screen
    }

    fn blit_tree(&self, screen: &mut Buffer, id: ControlId, origin_x: u16, origin_y: u16, clip: Rect) {
        let Some(header) = self.header(id) else {
            return;
        };
        let rect = header.full_rect.offset(origin_x, origin_y);
        let clip = clip.intersection(rect);
        if clip.is_empty() {
            return;
        }
        screen.blit(&header.surface, rect.x, rect.y, clip);
        for child in &header.children {
            self.blit_tree(screen, *child, rect.x, rect.y, clip);
        }
    }

    /// Screen position and size of the focused control's cursor, if shown.
    pub fn cursor_position(&self) -> Option<(u16, u16, u8)> {
        let id = self.focused?;
        let header = self.header(id)?;
        if !header.cursor.visible {
            return None;
        }
        let rect = self.absolute_rect(id)?;
        Some((
            rect.x + header.client_rect.x + header.cursor.x,
            rect.y + header.client_rect.y + header.cursor.y,
            header.cursor.size_percent,
        ))
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn check_geometry(&self, parent: Option<ControlId>, rect: Rect) -> Result<(), ControlError> {
        if rect.is_empty() {
            return Err(ControlError::InvalidGeometry(rect));
        }
        let bounds = match parent {
            Some(parent_id) => self
                .header(parent_id)
                .ok_or(ControlError::NoSuchControl(parent_id))?
                .full_rect
                .at_origin(),
            None => self.screen.area(),
        };
        if !bounds.contains_rect(rect) {
            return Err(ControlError::InvalidGeometry(rect));
        }
        Ok(())
    }

    pub(crate) fn check_reposition(&self, id: ControlId, rect: Rect) -> Result<(), ControlError> {
        let parent = self.header(id).ok_or(ControlError::NoSuchControl(id))?.parent;
        self.check_geometry(parent, rect)
    }

    fn node(&self, id: ControlId) -> Option<&Node> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: ControlId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub(crate) fn header_mut(&mut self, id: ControlId) -> Option<&mut ControlHeader> {
        self.node_mut(id).map(|n| &mut n.header)
    }

    fn take_widget(&mut self, id: ControlId) -> Option<Box<dyn Control>> {
        self.node_mut(id)?.widget.take()
    }

    fn put_widget(&mut self, id: ControlId, widget: Box<dyn Control>) {
        match self.node_mut(id) {
            Some(node) => node.widget = Some(widget),
            None => log::trace!("control {id} was destroyed while busy"),
        }
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use evdesk_core::Field;
use ratatui::crossterm::event::KeyEvent;
use ratatui::prelude::*;

use crate::tui::component::{Component, Message};
use crate::tui::component_form::{Access, Form, FormItem, Input, RadioGroup};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_store::EventBodyStore;

pub struct EventEditor<S: EventBodyStore>(SinglePage<S, EventForm<S>>);

impl<S: EventBodyStore + 'static> EventEditor<S> {
    pub fn new(title: &str) -> Self {
        Self(SinglePage::new(title, EventForm::new()))
    }
}

impl<S: EventBodyStore> Component<S> for EventEditor<S> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        self.0.render(store, area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        self.0.get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        self.0.on_key(dispatcher, store, area, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.0.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.0.deactivate(dispatcher, store);
    }
}

/// Title, start, end, visibility and description of one event.
pub struct EventForm<S: EventBodyStore>(Form<S, Box<dyn FormItem<S>>>);

impl<S: EventBodyStore + 'static> EventForm<S> {
    pub fn new() -> Self {
        Self(Form::new(vec![
            Box::new(new_title()),
            Box::new(new_start()),
            Box::new(new_end()),
            Box::new(new_private()),
            Box::new(new_description()),
        ]))
    }

    /// Rows the form needs: three per item plus the margins.
    pub const HEIGHT: u16 = 5 * 3 + 2;
}

impl<S: EventBodyStore> Component<S> for EventForm<S> {
    fn render(&self, store: &RefCell<S>, area: Rect, buf: &mut Buffer) {
        self.0.render(store, area, buf);
    }

    fn get_cursor_position(&self, store: &RefCell<S>, area: Rect) -> Option<(u16, u16)> {
        self.0.get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<S>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        self.0.on_key(dispatcher, store, area, event)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.0.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<S>) {
        self.0.deactivate(dispatcher, store);
    }
}

fn body_is_locked<S: EventBodyStore>(store: &RefCell<S>) -> bool {
    store.borrow().body().is_none_or(|body| body.is_read_only())
}

fn error_of<S: EventBodyStore>(store: &RefCell<S>, field: Field) -> Option<String> {
    let store = store.borrow();
    if !store.shows_errors() {
        return None;
    }
    store
        .body()
        .and_then(|body| body.error_for(field))
        .map(|e| e.to_string())
}

macro_rules! new_input {
    ($fn: ident, $title:expr, $acc: ident, $getter: ident, $field: ident, $action: ident) => {
        fn $fn<S: EventBodyStore>() -> Input<S, $acc> {
            Input::new($title)
        }

        struct $acc;

        impl<S: EventBodyStore> Access<S, String> for $acc {
            fn get(store: &RefCell<S>) -> String {
                store
                    .borrow()
                    .body()
                    .map(|body| body.$getter().to_owned())
                    .unwrap_or_default()
            }

            fn set(dispatcher: &mut Dispatcher, store: &RefCell<S>, value: String) -> bool {
                if body_is_locked(store) {
                    return false;
                }
                dispatcher.dispatch(Action::$action(value));
                true
            }

            fn is_read_only(store: &RefCell<S>) -> bool {
                body_is_locked(store)
            }

            fn error(store: &RefCell<S>) -> Option<String> {
                error_of(store, Field::$field)
            }
        }
    };
}

new_input!(new_title, "Title", TitleAccess, title, Title, UpdateTitle);
new_input!(new_start, "Start (YYYY-MM-DD HH:MM)", StartAccess, start, Start, UpdateStart);
new_input!(new_end, "End (YYYY-MM-DD HH:MM)", EndAccess, end, End, UpdateEnd);
new_input!(
    new_description,
    "Description",
    DescriptionAccess,
    description,
    Description,
    UpdateDescription
);

fn new_private<S: EventBodyStore>() -> RadioGroup<S, bool, PrivateAccess> {
    let values = vec![false, true];
    let options = vec!["Public".to_string(), "Private".to_string()];
    RadioGroup::new("Visibility", values, options)
}

struct PrivateAccess;

impl<S: EventBodyStore> Access<S, bool> for PrivateAccess {
    fn get(store: &RefCell<S>) -> bool {
        store.borrow().body().is_some_and(|body| body.is_private())
    }

    fn set(dispatcher: &mut Dispatcher, store: &RefCell<S>, value: bool) -> bool {
        if body_is_locked(store) {
            return false;
        }
        dispatcher.dispatch(Action::UpdatePrivate(value));
        true
    }

    fn is_read_only(store: &RefCell<S>) -> bool {
        body_is_locked(store)
    }
}

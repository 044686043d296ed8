// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use evdesk_core::{AddEvent, EventBody};

use crate::tui::dispatcher::{Action, Dispatcher};

/// A store holding the event body the editor works on.
pub trait EventBodyStore {
    /// The body being edited, if any.
    fn body(&self) -> Option<&EventBody>;

    /// Whether validation messages should be shown yet.
    fn shows_errors(&self) -> bool;
}

/// Applies a form update to `body`; returns whether the action was a form update.
pub fn apply_to_body(body: &mut EventBody, action: &Action) -> bool {
    let applied = match action {
        Action::UpdateTitle(v) => body.set_title(v.clone()),
        Action::UpdateStart(v) => body.set_start(v.clone()),
        Action::UpdateEnd(v) => body.set_end(v.clone()),
        Action::UpdateDescription(v) => body.set_description(v.clone()),
        Action::UpdatePrivate(v) => body.set_private(*v),
        _ => return false,
    };
    if !applied {
        tracing::debug!(?action, "form is read-only, ignoring update");
    }
    true
}

/// Store of the add-event editor.
#[derive(Debug)]
pub struct AddStore {
    pub flow: AddEvent,

    /// Whether the user submitted a valid draft.
    pub submit: bool,

    /// Whether a submit was attempted, valid or not.
    attempted: bool,
}

impl AddStore {
    pub fn new(flow: AddEvent) -> Self {
        Self {
            flow,
            submit: false,
            attempted: false,
        }
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            let mut that = that.borrow_mut();
            if apply_to_body(that.flow.body_mut(), action) {
                return;
            }

            if let Action::SubmitChanges = action {
                that.attempted = true;
                that.submit = that.flow.can_submit();
            }
        }));
        dispatcher.register(callback);
    }
}

impl EventBodyStore for AddStore {
    fn body(&self) -> Option<&EventBody> {
        Some(self.flow.body())
    }

    fn shows_errors(&self) -> bool {
        self.attempted
    }
}

#[cfg(test)]
mod tests {
    use evdesk_core::{Auth, AuthContext};

    use super::*;

    fn logged_in() -> AuthContext {
        AuthContext::new(Some(Auth {
            user_id: "u1".to_string(),
            token: None,
        }))
    }

    #[test]
    fn test_add_store_applies_updates() {
        let store = Rc::new(RefCell::new(AddStore::new(AddEvent::new(logged_in()))));
        let mut dispatcher = Dispatcher::new();
        AddStore::register_to(store.clone(), &mut dispatcher);

        dispatcher.dispatch(Action::UpdateTitle("Retro".to_string()));
        dispatcher.dispatch(Action::UpdatePrivate(true));

        let store = store.borrow();
        assert_eq!(store.flow.body().title(), "Retro");
        assert!(store.flow.body().is_private());
    }

    #[test]
    fn test_add_store_submit_requires_valid_draft() {
        let store = Rc::new(RefCell::new(AddStore::new(AddEvent::new(logged_in()))));
        let mut dispatcher = Dispatcher::new();
        AddStore::register_to(store.clone(), &mut dispatcher);

        dispatcher.dispatch(Action::SubmitChanges);
        assert!(!store.borrow().submit);
        assert!(store.borrow().shows_errors());

        dispatcher.dispatch(Action::UpdateTitle("Retro".to_string()));
        dispatcher.dispatch(Action::UpdateStart("2030-05-01 09:00".to_string()));
        dispatcher.dispatch(Action::UpdateEnd("2030-05-01 10:00".to_string()));
        dispatcher.dispatch(Action::SubmitChanges);
        assert!(store.borrow().submit);
    }

    #[test]
    fn test_add_store_logged_out_is_read_only() {
        let flow = AddEvent::new(AuthContext::new(None));
        let store = Rc::new(RefCell::new(AddStore::new(flow)));
        let mut dispatcher = Dispatcher::new();
        AddStore::register_to(store.clone(), &mut dispatcher);

        dispatcher.dispatch(Action::UpdateTitle("Retro".to_string()));

        assert_eq!(store.borrow().flow.body().title(), "");
    }
}

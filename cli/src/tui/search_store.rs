// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use evdesk_core::{EventBody, EventInput, EventsQuery, FlowError, SearchEvents};

use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_store::{EventBodyStore, apply_to_body};

/// Remote work requested by the browser, run by the app loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Query(EventsQuery),
    Save(EventInput),
    Delete(String),
}

/// Store of the event browser.
#[derive(Debug)]
pub struct SearchStore {
    pub flow: SearchEvents,

    /// Highlighted card on the current page.
    pub selected: usize,

    /// Effects not yet picked up by the app loop.
    pub effects: Vec<Effect>,

    /// Last refused modal action, e.g. saving somebody else's event.
    pub notice: Option<String>,

    attempted_save: bool,
}

impl SearchStore {
    pub fn new(mut flow: SearchEvents) -> Self {
        let first = flow.start();
        Self {
            flow,
            selected: 0,
            effects: vec![Effect::Query(first)],
            notice: None,
            attempted_save: false,
        }
    }

    /// Moves the highlight by `offset`, clamped to the current page.
    pub fn move_selection(&mut self, offset: isize) {
        let len = self.flow.events().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let index = self.selected as isize + offset;
        self.selected = index.clamp(0, len as isize - 1) as usize;
    }

    pub fn push_query(&mut self, query: Option<EventsQuery>) {
        if let Some(query) = query {
            self.selected = 0;
            self.effects.push(Effect::Query(query));
        }
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| {
            let mut that = that.borrow_mut();
            if let Some(modal) = that.flow.modal_mut()
                && apply_to_body(modal.body_mut(), action)
            {
                return;
            }

            match action {
                Action::UpdateSearchText(v) => that.flow.set_search_text(v.clone()),
                Action::SubmitSearch => {
                    let query = that.flow.submit_search();
                    that.push_query(Some(query));
                }
                Action::SelectFilter(v) => {
                    let query = that.flow.select_filter(*v);
                    that.push_query(query);
                }
                Action::GoToPage(v) => {
                    let query = that.flow.go_to_page(*v);
                    that.push_query(query);
                }
                Action::OpenEvent(index) => {
                    if that.flow.select_index(*index) {
                        that.notice = None;
                        that.attempted_save = false;
                    }
                }
                Action::CloseModal => {
                    that.notice = match that.flow.close_modal() {
                        true => None,
                        false => Some(FlowError::InFlight.to_string()),
                    };
                }
                Action::SaveEvent | Action::SubmitChanges => {
                    that.attempted_save = true;
                    match that.flow.begin_save() {
                        Ok(input) => that.effects.push(Effect::Save(input)),
                        Err(FlowError::InvalidDraft(_)) => {} // shown next to the fields
                        Err(e) => that.notice = Some(e.to_string()),
                    }
                }
                Action::DeleteEvent => match that.flow.begin_delete() {
                    Ok(id) => that.effects.push(Effect::Delete(id)),
                    Err(e) => that.notice = Some(e.to_string()),
                },
                _ => (),
            }
        }));
        dispatcher.register(callback);
    }
}

impl EventBodyStore for SearchStore {
    fn body(&self) -> Option<&EventBody> {
        self.flow.modal().map(|modal| modal.body())
    }

    fn shows_errors(&self) -> bool {
        self.attempted_save
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use evdesk_core::{Auth, AuthContext, Creator, Event, EventsPage, FilterSelection};
    use jiff::tz::TimeZone;

    use super::*;

    fn event(id: &str, creator: &str) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            start: "2030-05-01T09:00:00Z".parse().unwrap(),
            end: "2030-05-01T10:00:00Z".parse().unwrap(),
            is_private: false,
            description: String::new(),
            created_by: Creator {
                id: creator.to_string(),
                username: String::new(),
            },
            created_at: None,
            updated_at: None,
            url: None,
        }
    }

    fn setup() -> (Rc<RefCell<SearchStore>>, Dispatcher) {
        let auth = AuthContext::new(Some(Auth {
            user_id: "u1".to_string(),
            token: None,
        }));
        let flow = SearchEvents::new(auth, Duration::from_millis(500)).with_time_zone(TimeZone::UTC);
        let store = Rc::new(RefCell::new(SearchStore::new(flow)));
        let mut dispatcher = Dispatcher::new();
        SearchStore::register_to(store.clone(), &mut dispatcher);

        // Answer the first query
        let mut s = store.borrow_mut();
        let Some(Effect::Query(query)) = s.effects.pop() else {
            panic!("Expected the first query");
        };
        let page = EventsPage {
            events: vec![event("e1", "u1"), event("e2", "u2")],
            total_count: 45,
        };
        assert!(s.flow.finish_query(query.id, Ok(page)));
        drop(s);

        (store, dispatcher)
    }

    #[test]
    fn test_search_store_starts_with_query() {
        let auth = AuthContext::new(None);
        let store = SearchStore::new(SearchEvents::new(auth, Duration::from_millis(500)));
        assert!(matches!(store.effects.as_slice(), [Effect::Query(_)]));
    }

    #[test]
    fn test_search_store_page_and_filter_queue_queries() {
        let (store, mut dispatcher) = setup();

        dispatcher.dispatch(Action::GoToPage(2));
        dispatcher.dispatch(Action::GoToPage(2)); // unchanged, no query
        dispatcher.dispatch(Action::SelectFilter(FilterSelection::Expired));

        let store = store.borrow();
        let pages: Vec<u32> = store
            .effects
            .iter()
            .map(|e| match e {
                Effect::Query(q) => q.filter.page_number,
                _ => panic!("Expected queries only"),
            })
            .collect();
        assert_eq!(pages, vec![2, 1]);
    }

    #[test]
    fn test_search_store_move_selection_clamps() {
        let (store, _dispatcher) = setup();
        let mut store = store.borrow_mut();

        store.move_selection(5);
        assert_eq!(store.selected, 1);

        store.move_selection(-5);
        assert_eq!(store.selected, 0);
    }

    #[test]
    fn test_search_store_save_own_event() {
        let (store, mut dispatcher) = setup();

        dispatcher.dispatch(Action::OpenEvent(0));
        dispatcher.dispatch(Action::UpdateTitle("Renamed".to_string()));
        dispatcher.dispatch(Action::SaveEvent);

        let store = store.borrow();
        match store.effects.as_slice() {
            [Effect::Save(input)] => {
                assert_eq!(input.id, "e1");
                assert_eq!(input.title, "Renamed");
            }
            effects => panic!("Expected a save, got {effects:?}"),
        }
        assert!(store.flow.modal().is_some_and(|m| m.is_saving()));
    }

    #[test]
    fn test_search_store_refuses_foreign_event() {
        let (store, mut dispatcher) = setup();

        dispatcher.dispatch(Action::OpenEvent(1));
        dispatcher.dispatch(Action::UpdateTitle("Hijacked".to_string()));
        dispatcher.dispatch(Action::SaveEvent);
        dispatcher.dispatch(Action::DeleteEvent);

        let store = store.borrow();
        assert!(store.effects.is_empty());
        assert_eq!(store.body().map(|b| b.title()), Some("Event e2"));
        assert!(store.notice.is_some());
    }

    #[test]
    fn test_search_store_keeps_modal_while_saving() {
        let (store, mut dispatcher) = setup();

        dispatcher.dispatch(Action::OpenEvent(0));
        dispatcher.dispatch(Action::SaveEvent);
        dispatcher.dispatch(Action::CloseModal);
        dispatcher.dispatch(Action::OpenEvent(1));

        let store = store.borrow();
        let modal = store.flow.modal().unwrap();
        assert_eq!(modal.event().id, "e1");
        assert!(modal.is_saving());
        assert!(store.notice.is_some());
    }

    #[test]
    fn test_search_store_close_modal() {
        let (store, mut dispatcher) = setup();

        dispatcher.dispatch(Action::OpenEvent(0));
        assert!(store.borrow().body().is_some());

        dispatcher.dispatch(Action::CloseModal);
        assert!(store.borrow().body().is_none());
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory [`EventGateway`] that serves a fixed event list.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use evdesk_core::{Creator, Event, EventGateway, EventsPage, GatewayError, SearchFilter};
use evdesk_graphql::EventInput;

use crate::common::fixtures::USER;

/// A recorded gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    GetEvents(SearchFilter),
    SaveEvent(EventInput),
    DeleteEvent(String),
}

/// Gateway backed by a vector, with switchable failures.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    events: Mutex<Vec<Event>>,
    calls: Mutex<Vec<Call>>,
    created: AtomicUsize,
    fail_query: AtomicBool,
    fail_save: AtomicBool,
    fail_delete: AtomicBool,
}

#[allow(dead_code)]
impl ScriptedGateway {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: Mutex::new(events),
            ..Default::default()
        }
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// The filters of every query received so far.
    pub fn queries(&self) -> Vec<SearchFilter> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::GetEvents(filter) => Some(filter),
                _ => None,
            })
            .collect()
    }

    /// The stored events.
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn fail_query(&self, fail: bool) {
        self.fail_query.store(fail, Ordering::SeqCst);
    }

    pub fn fail_save(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl EventGateway for ScriptedGateway {
    async fn get_events(&self, filter: &SearchFilter) -> Result<EventsPage, GatewayError> {
        self.record(Call::GetEvents(filter.clone()));
        if self.fail_query.load(Ordering::SeqCst) {
            return Err(GatewayError::Other("Network error".to_string()));
        }

        let needle = filter.search_text.to_lowercase();
        let matched: Vec<Event> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        let size = filter.page_size as usize;
        let skip = (filter.page_number.saturating_sub(1) as usize) * size;
        Ok(EventsPage {
            total_count: matched.len() as u64,
            events: matched.into_iter().skip(skip).take(size).collect(),
        })
    }

    async fn save_event(&self, input: &EventInput) -> Result<Event, GatewayError> {
        self.record(Call::SaveEvent(input.clone()));
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(GatewayError::Other("Save failed".to_string()));
        }

        let mut events = self.events.lock().unwrap();
        let id = match input.id.is_empty() {
            true => format!("new-{}", self.created.fetch_add(1, Ordering::SeqCst) + 1),
            false => input.id.clone(),
        };
        let event = Event {
            id: id.clone(),
            title: input.title.clone(),
            start: input.start.parse().unwrap(),
            end: input.end.parse().unwrap(),
            is_private: input.is_private,
            description: input.description.clone(),
            created_by: Creator {
                id: USER.to_string(),
                username: "ada".to_string(),
            },
            created_at: None,
            updated_at: None,
            url: None,
        };
        match events.iter_mut().find(|e| e.id == id) {
            Some(existing) => *existing = event.clone(),
            None => events.push(event.clone()),
        }
        Ok(event)
    }

    async fn delete_event(&self, id: &str) -> Result<(), GatewayError> {
        self.record(Call::DeleteEvent(id.to_string()));
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(GatewayError::Other("Delete failed".to_string()));
        }

        self.events.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }
}

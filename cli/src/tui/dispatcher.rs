// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use evdesk_core::FilterSelection;

type Callback = Rc<RefCell<dyn FnMut(&Action)>>;

pub struct Dispatcher {
    subscribers: Vec<Callback>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: Callback) {
        self.subscribers.push(callback);
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatching action");
        for sub in &self.subscribers {
            (sub.borrow_mut())(&action);
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    UpdateTitle(String),
    UpdateStart(String),
    UpdateEnd(String),
    UpdateDescription(String),
    UpdatePrivate(bool),
    SubmitChanges,

    UpdateSearchText(String),
    SubmitSearch,
    SelectFilter(FilterSelection),
    GoToPage(u32),
    OpenEvent(usize),
    CloseModal,
    SaveEvent,
    DeleteEvent,
}

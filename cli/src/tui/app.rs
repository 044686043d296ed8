// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::mpsc::{self, Receiver, Sender};
use std::{cell::RefCell, error::Error, rc::Rc, time::Duration};

use evdesk_core::{
    AddEvent, Event, EventGateway, EventsPage, GatewayError, GraphQlClient, SearchEvents,
};
use ratatui::crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{DefaultTerminal, layout::Rect};
use tokio::runtime::Handle;

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;
use crate::tui::event_editor::EventEditor;
use crate::tui::event_store::AddStore;
use crate::tui::search_page::SearchPage;
use crate::tui::search_store::{Effect, SearchStore};

/// How long to wait for input before polling the flow again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Lets the user fill the add-event form. Returns the flow if they submitted a valid draft.
pub fn draft_event(flow: AddEvent) -> Result<Option<AddEvent>, Box<dyn Error>> {
    let store = Rc::new(RefCell::new(AddStore::new(flow)));

    let mut terminal = ratatui::init();
    let result = {
        let mut dispatcher = Dispatcher::new();
        AddStore::register_to(store.clone(), &mut dispatcher);
        let mut app = App::new(dispatcher, EventEditor::new("Add Event"), &store);

        loop {
            if let Err(e) = app.draw(&store, &mut terminal) {
                break Err(e);
            }

            match app.read_event(&store, None) {
                Err(e) => break Err(e),
                Ok(Some(Message::Exit)) => break Ok(()),
                Ok(_) if store.borrow().submit => break Ok(()),
                Ok(_) => {} // Continue the loop to render the next frame
            }
        }
    }; // release dispatcher and view here to avoid borrow conflicts
    ratatui::restore();
    result?;

    let owned_store = Rc::try_unwrap(store)
        .map_err(|_| "Store still has references")?
        .into_inner();
    Ok(owned_store.submit.then_some(owned_store.flow))
}

/// Runs the event browser until the user leaves it.
///
/// Must be called from a multi-threaded tokio runtime; requests run on it
/// while the terminal loop keeps drawing.
pub fn browse(flow: SearchEvents, gateway: GraphQlClient) -> Result<(), Box<dyn Error>> {
    let handle = Handle::current();
    tokio::task::block_in_place(move || run_browser(flow, gateway, handle))
}

fn run_browser(
    flow: SearchEvents,
    gateway: GraphQlClient,
    handle: Handle,
) -> Result<(), Box<dyn Error>> {
    let store = Rc::new(RefCell::new(SearchStore::new(flow)));
    let (tx, rx) = mpsc::channel();
    let runner = EffectRunner {
        gateway,
        handle,
        tx,
    };

    let mut terminal = ratatui::init();
    let result = {
        let mut dispatcher = Dispatcher::new();
        SearchStore::register_to(store.clone(), &mut dispatcher);
        let mut app = App::new(dispatcher, SearchPage::new(), &store);

        loop {
            apply_outcomes(&store, &rx);

            let tick = store.borrow_mut().flow.tick();
            store.borrow_mut().push_query(tick);

            let effects = std::mem::take(&mut store.borrow_mut().effects);
            for effect in effects {
                runner.run(effect);
            }

            if let Err(e) = app.draw(&store, &mut terminal) {
                break Err(e);
            }

            match app.read_event(&store, Some(POLL_INTERVAL)) {
                Err(e) => break Err(e),
                Ok(Some(Message::Exit)) => break Ok(()),
                Ok(_) => {}
            }
        }
    };
    ratatui::restore();
    result
}

struct App<S, C: Component<S>> {
    dispatcher: Dispatcher,
    view: C,
    area: Rect,
    _phantom: std::marker::PhantomData<S>,
}

impl<S, C: Component<S>> App<S, C> {
    fn new(mut dispatcher: Dispatcher, mut view: C, store: &RefCell<S>) -> Self {
        view.activate(&mut dispatcher, store);
        Self {
            dispatcher,
            view,
            area: Rect::default(),
            _phantom: std::marker::PhantomData,
        }
    }

    fn draw(&mut self, store: &RefCell<S>, terminal: &mut DefaultTerminal) -> Result<(), Box<dyn Error>> {
        terminal.draw(|frame| {
            let area = frame.area();
            self.area = area;
            self.view.render(store, area, frame.buffer_mut());
            if let Some(position) = self.view.get_cursor_position(store, area) {
                frame.set_cursor_position(position);
            }
        })?;
        Ok(())
    }

    /// Waits for one key press, at most `timeout` if given, and hands it to the view.
    fn read_event(
        &mut self,
        store: &RefCell<S>,
        timeout: Option<Duration>,
    ) -> Result<Option<Message>, Box<dyn Error>> {
        if let Some(timeout) = timeout
            && !event::poll(timeout)?
        {
            return Ok(None);
        }

        match event::read()? {
            event::Event::Key(key) if key.kind == KeyEventKind::Press => {
                Ok(self.on_key(store, key))
            }
            _ => Ok(None),
        }
    }

    fn on_key(&mut self, store: &RefCell<S>, key: KeyEvent) -> Option<Message> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Message::Exit);
        }
        self.view.on_key(&mut self.dispatcher, store, self.area, key)
    }
}

/// Response of a remote call, sent back to the terminal thread.
#[derive(Debug)]
enum Outcome {
    Query(u64, Result<EventsPage, GatewayError>),
    Save(Result<Event, GatewayError>),
    Delete(Result<(), GatewayError>),
}

struct EffectRunner {
    gateway: GraphQlClient,
    handle: Handle,
    tx: Sender<Outcome>,
}

impl EffectRunner {
    fn run(&self, effect: Effect) {
        let gateway = self.gateway.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let outcome = match effect {
                Effect::Query(query) => {
                    let result = EventGateway::get_events(&gateway, &query.filter).await;
                    Outcome::Query(query.id, result)
                }
                Effect::Save(input) => {
                    Outcome::Save(EventGateway::save_event(&gateway, &input).await)
                }
                Effect::Delete(id) => {
                    Outcome::Delete(EventGateway::delete_event(&gateway, &id).await)
                }
            };
            if tx.send(outcome).is_err() {
                tracing::debug!("browser closed, dropping response");
            }
        });
    }
}

fn apply_outcomes(store: &RefCell<SearchStore>, rx: &Receiver<Outcome>) {
    while let Ok(outcome) = rx.try_recv() {
        let mut store = store.borrow_mut();
        let next = match outcome {
            Outcome::Query(id, result) => {
                store.flow.finish_query(id, result);
                None
            }
            Outcome::Save(result) => store.flow.finish_save(result).ok(),
            Outcome::Delete(result) => store.flow.finish_delete(result).ok(),
        };
        store.push_query(next);
    }
}

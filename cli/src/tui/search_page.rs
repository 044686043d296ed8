// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;

use evdesk_core::{Alert, AlertKind, Event, FilterSelection, expired_marker, format_display};
use jiff::{Timestamp, tz::TimeZone};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::symbols::border;
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Paragraph};

use crate::tui::component::{Component, Message};
use crate::tui::component_form::{Access, Input, RadioGroup};
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::event_editor::EventForm;
use crate::tui::search_store::SearchStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Filter,
    Search,
    List,
}

/// Filter, search box, event cards and pagination, with the edit modal on top.
pub struct SearchPage {
    focus: Focus,
    filter: RadioGroup<SearchStore, FilterSelection, FilterAccess>,
    search: Input<SearchStore, SearchTextAccess>,
    editor: EventForm<SearchStore>,
    editor_open: bool,
}

impl SearchPage {
    pub fn new() -> Self {
        let values = FilterSelection::ALL.to_vec();
        let options = values.iter().map(ToString::to_string).collect();
        Self {
            focus: Focus::List,
            filter: RadioGroup::new("Filter", values, options),
            search: Input::new("Search"),
            editor: EventForm::new(),
            editor_open: false,
        }
    }

    fn block(&self) -> Block<'_> {
        Block::bordered().border_set(border::ROUNDED)
    }

    fn layout(&self, store: &RefCell<SearchStore>, area: Rect) -> PageLayout {
        let alerts = store.borrow().flow.alerts().len() as u16;
        let [filter, search, alerts, list, pagination] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(alerts),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(self.block().inner(area));

        let [_, filter] =
            Layout::horizontal([Constraint::Length(8), Constraint::Min(0)]).areas(filter);
        let [_, search] =
            Layout::horizontal([Constraint::Length(8), Constraint::Min(0)]).areas(search);

        PageLayout {
            filter,
            search,
            alerts,
            list,
            pagination,
            modal: modal_area(area),
        }
    }

    fn set_focus(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<SearchStore>, focus: Focus) {
        match self.focus {
            Focus::Filter => self.filter.deactivate(dispatcher, store),
            Focus::Search => self.search.deactivate(dispatcher, store),
            Focus::List => {}
        }
        self.focus = focus;
        match self.focus {
            Focus::Filter => self.filter.activate(dispatcher, store),
            Focus::Search => self.search.activate(dispatcher, store),
            Focus::List => {}
        }
    }

    /// Keeps the editor's focus in step with the modal, which may close on its own.
    fn sync_editor(&mut self, dispatcher: &mut Dispatcher, store: &RefCell<SearchStore>) {
        let modal_open = store.borrow().flow.modal().is_some();
        if modal_open && !self.editor_open {
            self.editor.activate(dispatcher, store);
        } else if !modal_open && self.editor_open {
            self.editor.deactivate(dispatcher, store);
        }
        self.editor_open = modal_open;
    }

    fn on_modal_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<SearchStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        match event.code {
            KeyCode::Char('s') if ctrl => dispatcher.dispatch(Action::SaveEvent),
            KeyCode::Char('d') if ctrl => dispatcher.dispatch(Action::DeleteEvent),
            KeyCode::Esc => dispatcher.dispatch(Action::CloseModal),
            _ => {
                let inner = modal_block("").inner(area);
                self.editor.on_key(dispatcher, store, inner, event);
            }
        }
        self.sync_editor(dispatcher, store);
        Some(Message::CursorUpdated)
    }

    fn on_list_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<SearchStore>,
        event: KeyEvent,
    ) -> Option<Message> {
        let (current, has_previous, has_next) = {
            let store = store.borrow();
            let pagination = store.flow.pagination();
            (
                pagination.current_page(),
                pagination.has_previous(),
                pagination.has_next(),
            )
        };

        match event.code {
            KeyCode::Up | KeyCode::Char('k') => store.borrow_mut().move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => store.borrow_mut().move_selection(1),
            KeyCode::Left | KeyCode::PageUp if has_previous => {
                dispatcher.dispatch(Action::GoToPage(current - 1))
            }
            KeyCode::Right | KeyCode::PageDown if has_next => {
                dispatcher.dispatch(Action::GoToPage(current + 1))
            }
            KeyCode::Char('r') => dispatcher.dispatch(Action::SubmitSearch),
            KeyCode::Enter => {
                let selected = store.borrow().selected;
                dispatcher.dispatch(Action::OpenEvent(selected));
                self.sync_editor(dispatcher, store);
            }
            _ => return None,
        }
        Some(Message::Handled)
    }
}

impl Component<SearchStore> for SearchPage {
    fn render(&self, store: &RefCell<SearchStore>, area: Rect, buf: &mut Buffer) {
        let layout = self.layout(store, area);

        let block = self
            .block()
            .title(Line::from(" Events ".bold()).centered())
            .title_bottom(instructions(self.focus).centered())
            .white();
        block.render(area, buf);

        let label_area = |a: Rect| Rect::new(a.x.saturating_sub(8), a.y, 8, 1);
        Paragraph::new(" Filter").bold().render(label_area(layout.filter), buf);
        self.filter.render(store, layout.filter, buf);
        Paragraph::new(" Search").bold().render(label_area(layout.search), buf);
        self.search.render(store, layout.search, buf);

        let s = store.borrow();
        render_alerts(&s.flow.alerts(), layout.alerts, buf);

        if s.flow.is_loading() {
            Paragraph::new("Loading…")
                .centered()
                .dark_gray()
                .render(layout.list, buf);
        } else {
            render_cards(
                s.flow.events(),
                s.selected,
                s.flow.time_zone(),
                Timestamp::now(),
                layout.list,
                buf,
            );
        }

        if s.flow.shows_pagination() {
            let pagination = s.flow.pagination();
            let mut line = Line::from(vec![
                if pagination.has_previous() { "‹ Prev " } else { "       " }.into(),
                format!(
                    "Page {} / {}",
                    pagination.current_page(),
                    pagination.total_pages().max(1)
                )
                .bold(),
                if pagination.has_next() { " Next ›" } else { "       " }.into(),
                format!("  {} events", pagination.total()).dark_gray(),
            ]);
            if s.flow.is_refetching() {
                line.push_span("  Refreshing…".yellow());
            }
            Paragraph::new(line).centered().render(layout.pagination, buf);
        }

        let modal = s.flow.modal().map(|modal| {
            let mut buttons = Vec::new();
            if modal.show_save() {
                let label = if modal.is_saving() { " Saving… " } else { " Save " };
                buttons.push(button(label, "<C-s>", modal.save_disabled()));
            }
            if modal.show_delete() {
                let label = if modal.is_deleting() { " Deleting… " } else { " Delete " };
                buttons.push(button(label, "<C-d>", modal.delete_disabled()));
            }
            buttons.push(button(&format!(" {} ", modal.close_label()), "<Esc> ", false));
            (modal.title(), buttons)
        });
        let notice = s.notice.clone();
        drop(s); // the editor borrows the store again

        if let Some((title, buttons)) = modal {
            Clear.render(layout.modal, buf);
            let block = modal_block(title)
                .title_bottom(Line::from(buttons.concat()).centered());
            let inner = block.inner(layout.modal);
            block.render(layout.modal, buf);
            self.editor.render(store, inner, buf);

            if let Some(notice) = notice {
                let notice_area = Rect::new(inner.x, inner.bottom().saturating_sub(1), inner.width, 1);
                Paragraph::new(notice).red().render(notice_area, buf);
            }
        }
    }

    fn get_cursor_position(&self, store: &RefCell<SearchStore>, area: Rect) -> Option<(u16, u16)> {
        let layout = self.layout(store, area);
        if store.borrow().flow.modal().is_some() {
            let inner = modal_block("").inner(layout.modal);
            return self.editor.get_cursor_position(store, inner);
        }

        match self.focus {
            Focus::Filter => self.filter.cursor_at(store, layout.filter),
            Focus::Search => self.search.cursor_at(store, layout.search),
            Focus::List => None,
        }
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &RefCell<SearchStore>,
        area: Rect,
        event: KeyEvent,
    ) -> Option<Message> {
        self.sync_editor(dispatcher, store);
        let layout = self.layout(store, area);
        if self.editor_open {
            return self.on_modal_key(dispatcher, store, layout.modal, event);
        }

        match event.code {
            KeyCode::Tab => {
                let next = match self.focus {
                    Focus::Filter => Focus::Search,
                    Focus::Search => Focus::List,
                    Focus::List => Focus::Filter,
                };
                self.set_focus(dispatcher, store, next);
                return Some(Message::CursorUpdated);
            }
            KeyCode::BackTab => {
                let next = match self.focus {
                    Focus::Filter => Focus::List,
                    Focus::Search => Focus::Filter,
                    Focus::List => Focus::Search,
                };
                self.set_focus(dispatcher, store, next);
                return Some(Message::CursorUpdated);
            }
            KeyCode::Esc => return Some(Message::Exit),
            _ => {}
        }

        match self.focus {
            Focus::Filter => self.filter.on_key(dispatcher, store, layout.filter, event),
            Focus::Search if event.code == KeyCode::Enter => {
                dispatcher.dispatch(Action::SubmitSearch);
                Some(Message::Handled)
            }
            Focus::Search => self.search.on_key(dispatcher, store, layout.search, event),
            Focus::List => self.on_list_key(dispatcher, store, event),
        }
    }
}

struct PageLayout {
    filter: Rect,
    search: Rect,
    alerts: Rect,
    list: Rect,
    pagination: Rect,
    modal: Rect,
}

struct FilterAccess;

impl Access<SearchStore, FilterSelection> for FilterAccess {
    fn get(store: &RefCell<SearchStore>) -> FilterSelection {
        store.borrow().flow.selection()
    }

    fn set(dispatcher: &mut Dispatcher, _store: &RefCell<SearchStore>, value: FilterSelection) -> bool {
        dispatcher.dispatch(Action::SelectFilter(value));
        true
    }
}

struct SearchTextAccess;

impl Access<SearchStore, String> for SearchTextAccess {
    fn get(store: &RefCell<SearchStore>) -> String {
        store.borrow().flow.search_text().to_owned()
    }

    fn set(dispatcher: &mut Dispatcher, _store: &RefCell<SearchStore>, value: String) -> bool {
        dispatcher.dispatch(Action::UpdateSearchText(value));
        true
    }
}

fn render_alerts(alerts: &[Alert], area: Rect, buf: &mut Buffer) {
    let lines: Vec<Line> = alerts
        .iter()
        .map(|alert| {
            let color = match alert.kind {
                AlertKind::Success => Color::Green,
                AlertKind::Warning => Color::Yellow,
                AlertKind::Danger => Color::Red,
            };
            Line::from(alert.message.clone()).fg(color)
        })
        .collect();
    Paragraph::new(lines).render(area, buf);
}

fn render_cards(
    events: &[Event],
    selected: usize,
    tz: &TimeZone,
    now: Timestamp,
    area: Rect,
    buf: &mut Buffer,
) {
    let items: Vec<ListItem> = events
        .iter()
        .map(|event| {
            let mut title = Line::from(event.title.clone().bold());
            let marker = expired_marker(event.end, now);
            if !marker.is_empty() {
                title.push_span("  ");
                title.push_span(marker.red());
            }
            if event.is_private {
                title.push_span("  Private".yellow());
            }

            let creator = match event.created_by.username.as_str() {
                "" => event.created_by.id.as_str(),
                username => username,
            };
            let detail = Line::from(format!(
                "{} ~ {}  by {}",
                format_display(event.start, tz),
                format_display(event.end, tz),
                creator
            ))
            .dark_gray();

            ListItem::new(vec![title, detail, Line::default()])
        })
        .collect();

    let list = List::new(items)
        .highlight_symbol("▶ ")
        .highlight_style(Style::new().fg(Color::Blue));
    let mut state = ListState::default().with_selected((!events.is_empty()).then_some(selected));
    StatefulWidget::render(list, area, buf, &mut state);
}

fn modal_block(title: &str) -> Block<'_> {
    Block::bordered()
        .border_set(border::ROUNDED)
        .title(Line::from(format!(" {title} ").bold()).centered())
        .blue()
}

fn modal_area(area: Rect) -> Rect {
    let width = area.width.saturating_sub(8).min(72);
    let height = (EventForm::<SearchStore>::HEIGHT + 3).min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

fn button(label: &str, key: &'static str, disabled: bool) -> Vec<Span<'static>> {
    let label = label.to_string();
    match disabled {
        true => vec![label.dark_gray(), key.dark_gray()],
        false => vec![label.into(), key.blue().bold()],
    }
}

fn instructions(focus: Focus) -> Line<'static> {
    let mut spans = vec![" Focus ".into(), "<Tab>".blue().bold()];
    if focus == Focus::List {
        spans.extend([
            " Move ".into(),
            "<Up/Down>".blue().bold(),
            " Page ".into(),
            "<Left/Right>".blue().bold(),
            " Open ".into(),
            "<Enter>".blue().bold(),
        ]);
    } else if focus == Focus::Search {
        spans.extend([" Search now ".into(), "<Enter>".blue().bold()]);
    }
    spans.extend([" Exit ".into(), "<Esc> ".blue().bold()]);
    Line::from(spans)
}

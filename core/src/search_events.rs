// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use evdesk_graphql::EventInput;
use jiff::tz::TimeZone;

use crate::alert::{Alert, MSG_NO_RESULTS};
use crate::auth::{AuthContext, Subscription};
use crate::debounce::Debouncer;
use crate::error::FlowError;
use crate::event::Event;
use crate::filter::{EVENTS_PER_PAGE, FilterSelection, SearchFilter};
use crate::form::EventBody;
use crate::gateway::{EventGateway, EventsPage, GatewayError};
use crate::pagination::Pagination;

/// Lifecycle of the events query.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    /// Nothing requested yet.
    #[default]
    Idle,

    /// First load, nothing to show yet.
    Loading,

    /// Re-fetching after the variables changed.
    SetVariables,

    /// Re-fetching with the same variables.
    Refetch,

    /// The last response was applied.
    Ready,

    /// The last request failed.
    Error,
}

/// A query the front end should run, tagged so its response can be matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsQuery {
    /// Request id, passed back to [`SearchEvents::finish_query`].
    pub id: u64,

    /// Variables of the query.
    pub filter: SearchFilter,

    /// Status reported while the query runs.
    pub status: NetworkStatus,
}

/// Result of the events query as seen by the list.
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    status: NetworkStatus,
    data: Option<EventsPage>,
    error: Option<String>,
    in_flight: Option<u64>,
}

impl QueryState {
    pub fn status(&self) -> NetworkStatus {
        self.status
    }

    /// The last page received; kept across refetches and errors.
    pub fn data(&self) -> Option<&EventsPage> {
        self.data.as_ref()
    }

    /// Message of the last failed request, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Id of the only request whose response is still accepted.
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }
}

/// A mutation running from the edit modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Save,
    Delete,
}

/// The modal editing one selected event.
///
/// Whether the user is the creator is decided when the event is selected and
/// not re-evaluated while the modal stays open.
#[derive(Debug, Clone)]
pub struct EditModal {
    event: Event,
    body: EventBody,
    is_creator: bool,
    in_flight: Option<ModalAction>,
}

impl EditModal {
    fn new(event: &Event, is_creator: bool, tz: TimeZone) -> Self {
        let mut body = EventBody::from_event(event, tz);
        body.set_read_only(!is_creator);
        Self {
            event: event.clone(),
            body,
            is_creator,
            in_flight: None,
        }
    }

    pub fn title(&self) -> &'static str {
        "Update Event"
    }

    /// Label of the control that closes the modal.
    pub fn close_label(&self) -> &'static str {
        if self.is_creator { "Cancel" } else { "Close" }
    }

    /// The event as it was when selected.
    pub fn event(&self) -> &Event {
        &self.event
    }

    pub fn body(&self) -> &EventBody {
        &self.body
    }

    /// The draft; read-only for non-creators and while a mutation runs.
    pub fn body_mut(&mut self) -> &mut EventBody {
        &mut self.body
    }

    pub fn is_creator(&self) -> bool {
        self.is_creator
    }

    pub fn in_flight(&self) -> Option<ModalAction> {
        self.in_flight
    }

    pub fn is_saving(&self) -> bool {
        self.in_flight == Some(ModalAction::Save)
    }

    pub fn is_deleting(&self) -> bool {
        self.in_flight == Some(ModalAction::Delete)
    }

    pub fn show_delete(&self) -> bool {
        self.is_creator
    }

    pub fn show_save(&self) -> bool {
        self.is_creator
    }

    pub fn save_disabled(&self) -> bool {
        !self.is_creator || self.in_flight.is_some() || !self.body.is_valid()
    }

    pub fn delete_disabled(&self) -> bool {
        !self.is_creator || self.in_flight.is_some()
    }

    fn begin(&mut self, action: ModalAction) -> Result<(), FlowError> {
        if self.in_flight.is_some() {
            return Err(FlowError::InFlight);
        }
        if !self.is_creator {
            return Err(FlowError::NotCreator);
        }
        self.in_flight = Some(action);
        self.body.set_read_only(true);
        Ok(())
    }

    fn finish(&mut self) {
        self.in_flight = None;
        self.body.set_read_only(!self.is_creator);
    }
}

/// Flow listing, filtering and paging events, and editing them in a modal.
///
/// The flow never performs I/O on its own: state changes return the
/// [`EventsQuery`] to run, and responses come back through the `finish_*`
/// methods. The async helpers wire both ends to an [`EventGateway`].
#[derive(Debug)]
pub struct SearchEvents {
    auth: AuthContext,
    identity_changed: Arc<AtomicBool>,
    _subscription: Subscription,
    search_text: String,
    debouncer: Debouncer<String>,
    selection: FilterSelection,
    pagination: Pagination,
    query: QueryState,
    next_request: u64,
    modal: Option<EditModal>,
    save_error: Option<String>,
    delete_error: Option<String>,
    tz: TimeZone,
}

impl SearchEvents {
    /// Creates the flow; search text settles after `debounce` of quiet.
    pub fn new(auth: AuthContext, debounce: Duration) -> Self {
        let identity_changed = Arc::new(AtomicBool::new(false));
        let flag = identity_changed.clone();
        let subscription = auth.subscribe(move |_| flag.store(true, Ordering::SeqCst));
        Self {
            auth,
            identity_changed,
            _subscription: subscription,
            search_text: String::new(),
            debouncer: Debouncer::new(String::new(), debounce),
            selection: FilterSelection::default(),
            pagination: Pagination::new(EVENTS_PER_PAGE),
            query: QueryState::default(),
            next_request: 1,
            modal: None,
            save_error: None,
            delete_error: None,
            tz: TimeZone::system(),
        }
    }

    /// Interprets and shows dates in `tz` instead of the system zone.
    pub fn with_time_zone(mut self, tz: TimeZone) -> Self {
        self.tz = tz;
        self
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    /// Variables of the next query.
    pub fn filter(&self) -> SearchFilter {
        SearchFilter::new(
            self.debouncer.value(),
            self.pagination.current_page(),
            self.selection,
        )
    }

    /// The first query.
    pub fn start(&mut self) -> EventsQuery {
        self.issue(NetworkStatus::Loading)
    }

    /// The raw search input, as typed.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// The search text currently used by the query.
    pub fn debounced_search_text(&self) -> &str {
        self.debouncer.value()
    }

    /// Updates the raw search input. The query follows once it settles.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.debouncer.push(self.search_text.trim().to_string());
    }

    /// When the pending search text settles, if any.
    pub fn search_deadline(&self) -> Option<tokio::time::Instant> {
        self.debouncer.deadline()
    }

    /// Picks up identity changes and settled search text.
    ///
    /// Call periodically; returns the query to run when either changed.
    pub fn tick(&mut self) -> Option<EventsQuery> {
        let identity_changed = self.identity_changed.swap(false, Ordering::SeqCst);
        let text_changed = self.debouncer.poll_settled().is_some();
        if identity_changed {
            tracing::debug!("identity changed, refetching from page 1");
            self.pagination.reset();
            Some(self.issue(NetworkStatus::Refetch))
        } else if text_changed {
            Some(self.variables_changed())
        } else {
            None
        }
    }

    /// Waits for the pending search text to settle.
    ///
    /// Returns the query to run if the settled text differs from the last one.
    pub async fn settle_search(&mut self) -> Option<EventsQuery> {
        self.debouncer.settle().await?;
        Some(self.variables_changed())
    }

    /// Runs the search now with whatever text was typed.
    pub fn submit_search(&mut self) -> EventsQuery {
        if self.debouncer.flush().is_some() {
            self.pagination.reset();
        }
        self.issue(NetworkStatus::Refetch)
    }

    pub fn selection(&self) -> FilterSelection {
        self.selection
    }

    /// Switches the filter; returns the query to run if it changed.
    pub fn select_filter(&mut self, selection: FilterSelection) -> Option<EventsQuery> {
        if selection == self.selection {
            return None;
        }
        self.selection = selection;
        Some(self.variables_changed())
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Moves to `page`; returns the query to run if the page changed.
    pub fn go_to_page(&mut self, page: u32) -> Option<EventsQuery> {
        if !self.pagination.go_to(page) {
            return None;
        }
        Some(self.issue(NetworkStatus::SetVariables))
    }

    /// Re-runs the query with the current variables.
    pub fn refetch(&mut self) -> EventsQuery {
        self.issue(NetworkStatus::Refetch)
    }

    /// Applies the response of query `id`.
    ///
    /// Responses to anything but the latest query are dropped. Returns
    /// whether the response was applied.
    pub fn finish_query(&mut self, id: u64, result: Result<EventsPage, GatewayError>) -> bool {
        if self.query.in_flight != Some(id) {
            tracing::warn!(id, latest = ?self.query.in_flight, "dropping stale events response");
            return false;
        }

        self.query.in_flight = None;
        match result {
            Ok(page) => {
                tracing::debug!(
                    id,
                    count = page.events.len(),
                    total = page.total_count,
                    "events received"
                );
                self.pagination.set_total(page.total_count);
                self.query.data = Some(page);
                self.query.error = None;
                self.query.status = NetworkStatus::Ready;
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "failed to query events");
                self.query.error = Some(e.to_string());
                self.query.status = NetworkStatus::Error;
            }
        }
        true
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    /// Events of the current page, empty before the first response.
    pub fn events(&self) -> &[Event] {
        self.query
            .data
            .as_ref()
            .map(|page| page.events.as_slice())
            .unwrap_or_default()
    }

    /// Whether the first load is still running.
    pub fn is_loading(&self) -> bool {
        self.query.status == NetworkStatus::Loading
    }

    /// Whether a refetch runs while the previous list stays visible.
    pub fn is_refetching(&self) -> bool {
        matches!(
            self.query.status,
            NetworkStatus::SetVariables | NetworkStatus::Refetch
        )
    }

    /// The pagination control is hidden during the first load.
    pub fn shows_pagination(&self) -> bool {
        !self.is_loading()
    }

    /// Banners to show above the list.
    pub fn alerts(&self) -> Vec<Alert> {
        let mut alerts = Vec::new();
        if let Some(error) = &self.query.error {
            alerts.push(Alert::danger(error.clone()));
        }
        if let Some(error) = &self.save_error {
            alerts.push(Alert::danger(error.clone()));
        }
        if let Some(error) = &self.delete_error {
            alerts.push(Alert::danger(error.clone()));
        }
        if self.query.status == NetworkStatus::Ready
            && self.query.error.is_none()
            && self.events().is_empty()
        {
            alerts.push(Alert::warning(MSG_NO_RESULTS));
        }
        alerts
    }

    /// Opens the modal for `event`.
    ///
    /// Refused while the open modal has a save or delete running.
    pub fn select(&mut self, event: &Event) -> bool {
        if self.has_mutation_in_flight() {
            tracing::debug!(id = %event.id, "mutation in flight, keeping the current modal");
            return false;
        }

        let is_creator = self
            .auth
            .user_id()
            .is_some_and(|user_id| event.is_created_by(&user_id));
        tracing::debug!(id = %event.id, is_creator, "event selected");
        self.save_error = None;
        self.delete_error = None;
        self.modal = Some(EditModal::new(event, is_creator, self.tz.clone()));
        true
    }

    /// Opens the modal for the `index`-th event of the current page.
    pub fn select_index(&mut self, index: usize) -> bool {
        match self.events().get(index).cloned() {
            Some(event) => self.select(&event),
            None => false,
        }
    }

    pub fn modal(&self) -> Option<&EditModal> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut EditModal> {
        self.modal.as_mut()
    }

    /// Closes the modal, discarding the draft.
    ///
    /// Refused while a save or delete is running.
    pub fn close_modal(&mut self) -> bool {
        if self.has_mutation_in_flight() {
            tracing::debug!("mutation in flight, keeping the modal open");
            return false;
        }
        self.modal = None;
        true
    }

    fn has_mutation_in_flight(&self) -> bool {
        self.modal.as_ref().is_some_and(|m| m.in_flight.is_some())
    }

    /// The open modal, if it runs `action`.
    fn modal_running(&mut self, action: ModalAction) -> Result<&mut EditModal, FlowError> {
        match self.modal.as_mut() {
            Some(modal) if modal.in_flight == Some(action) => Ok(modal),
            _ => {
                tracing::warn!(?action, "no modal waits for this outcome, dropping it");
                Err(FlowError::NoSelection)
            }
        }
    }

    /// Starts saving the modal's draft as an update of the selected event.
    pub fn begin_save(&mut self) -> Result<EventInput, FlowError> {
        let modal = self.modal.as_mut().ok_or(FlowError::NoSelection)?;
        if modal.in_flight.is_some() {
            return Err(FlowError::InFlight);
        }
        if !modal.is_creator {
            return Err(FlowError::NotCreator);
        }
        let input = modal.body.to_input(&modal.event.id)?;
        modal.begin(ModalAction::Save)?;
        self.save_error = None;
        tracing::debug!(id = %input.id, "updating event");
        Ok(input)
    }

    /// Applies the outcome of the save started by [`begin_save`](Self::begin_save).
    ///
    /// On success the modal closes and the current page is refetched.
    pub fn finish_save(
        &mut self,
        result: Result<Event, GatewayError>,
    ) -> Result<EventsQuery, FlowError> {
        self.modal_running(ModalAction::Save)?.finish();
        match result {
            Ok(event) => {
                tracing::debug!(id = %event.id, "event updated");
                self.modal = None;
                Ok(self.issue(NetworkStatus::Refetch))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to update event");
                self.save_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Starts deleting the selected event; returns its id.
    pub fn begin_delete(&mut self) -> Result<String, FlowError> {
        let modal = self.modal.as_mut().ok_or(FlowError::NoSelection)?;
        modal.begin(ModalAction::Delete)?;
        self.delete_error = None;
        tracing::debug!(id = %modal.event.id, "deleting event");
        Ok(modal.event.id.clone())
    }

    /// Applies the outcome of the delete started by [`begin_delete`](Self::begin_delete).
    ///
    /// On success the modal closes and the list reloads from page 1.
    pub fn finish_delete(&mut self, result: Result<(), GatewayError>) -> Result<EventsQuery, FlowError> {
        self.modal_running(ModalAction::Delete)?.finish();
        match result {
            Ok(()) => {
                self.modal = None;
                self.pagination.reset();
                Ok(self.issue(NetworkStatus::Refetch))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to delete event");
                self.delete_error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Runs `query` and applies its response.
    pub async fn load<G>(&mut self, gateway: &G, query: EventsQuery) -> bool
    where
        G: EventGateway + ?Sized,
    {
        let result = gateway.get_events(&query.filter).await;
        self.finish_query(query.id, result)
    }

    /// Saves the modal's draft, then refetches the current page.
    pub async fn save<G>(&mut self, gateway: &G) -> Result<(), FlowError>
    where
        G: EventGateway + ?Sized,
    {
        let input = self.begin_save()?;
        let result = gateway.save_event(&input).await;
        let query = self.finish_save(result)?;
        self.load(gateway, query).await;
        Ok(())
    }

    /// Deletes the selected event, then reloads page 1.
    pub async fn delete<G>(&mut self, gateway: &G) -> Result<(), FlowError>
    where
        G: EventGateway + ?Sized,
    {
        let id = self.begin_delete()?;
        let result = gateway.delete_event(&id).await;
        let query = self.finish_delete(result)?;
        self.load(gateway, query).await;
        Ok(())
    }

    fn variables_changed(&mut self) -> EventsQuery {
        self.pagination.reset();
        self.issue(NetworkStatus::SetVariables)
    }

    fn issue(&mut self, status: NetworkStatus) -> EventsQuery {
        let status = match self.query.data {
            None => NetworkStatus::Loading,
            Some(_) => status,
        };
        let id = self.next_request;
        self.next_request += 1;
        self.query.in_flight = Some(id);
        self.query.status = status;

        let filter = self.filter();
        tracing::debug!(id, ?status, ?filter, "issuing events query");
        EventsQuery { id, filter, status }
    }
}

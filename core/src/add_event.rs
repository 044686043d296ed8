// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use evdesk_graphql::EventInput;
use jiff::tz::TimeZone;

use crate::alert::{Alert, MSG_EVENT_ADDED, MSG_LOGIN_REQUIRED, MSG_SAVE_FAILED};
use crate::auth::AuthContext;
use crate::error::FlowError;
use crate::event::Event;
use crate::form::EventBody;
use crate::gateway::{EventGateway, GatewayError};

/// Flow creating a single event from an empty form.
///
/// Front ends that run the mutation themselves call
/// [`begin_submit`](Self::begin_submit), perform the save, then hand the
/// outcome to [`finish_submit`](Self::finish_submit). [`submit`](Self::submit)
/// does all three.
#[derive(Debug)]
pub struct AddEvent {
    auth: AuthContext,
    body: EventBody,
    saving: bool,
    saved: Option<Event>,
    failed: bool,
}

impl AddEvent {
    pub fn new(auth: AuthContext) -> Self {
        Self::with_time_zone(auth, TimeZone::system())
    }

    /// Creates the flow with dates interpreted in `tz`.
    pub fn with_time_zone(auth: AuthContext, tz: TimeZone) -> Self {
        Self {
            auth,
            body: EventBody::new(tz),
            saving: false,
            saved: None,
            failed: false,
        }
    }

    pub fn body(&self) -> &EventBody {
        &self.body
    }

    /// The draft for editing; locked when logged out or while saving.
    pub fn body_mut(&mut self) -> &mut EventBody {
        self.sync_lock();
        &mut self.body
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth.is_logged_in()
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Whether the form is shown; a loading indicator replaces it while saving.
    pub fn displays_form(&self) -> bool {
        !self.saving
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        self.is_logged_in() && !self.saving && self.body.is_valid()
    }

    /// The last event created by this flow, if the last submit succeeded.
    pub fn saved(&self) -> Option<&Event> {
        self.saved.as_ref()
    }

    /// Validates the draft and marks the save as in flight.
    ///
    /// Returns the create input: the draft with an empty id.
    pub fn begin_submit(&mut self) -> Result<EventInput, FlowError> {
        if !self.is_logged_in() {
            return Err(FlowError::NotLoggedIn);
        }
        if self.saving {
            return Err(FlowError::InFlight);
        }

        let input = self.body.to_input("")?;
        self.saving = true;
        self.saved = None;
        self.failed = false;
        self.sync_lock();
        tracing::debug!(title = %input.title, "creating event");
        Ok(input)
    }

    /// Applies the outcome of the save started by [`begin_submit`](Self::begin_submit).
    ///
    /// On success the draft is emptied. The form is restored either way.
    pub fn finish_submit(&mut self, result: Result<Event, GatewayError>) -> Result<Event, FlowError> {
        self.saving = false;
        let outcome = match result {
            Ok(event) => {
                tracing::debug!(id = %event.id, "event created");
                self.body.clear();
                self.saved = Some(event.clone());
                Ok(event)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create event");
                self.failed = true;
                Err(e.into())
            }
        };
        self.sync_lock();
        outcome
    }

    /// Creates the drafted event through `gateway`.
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<Event, FlowError>
    where
        G: EventGateway + ?Sized,
    {
        let input = self.begin_submit()?;
        let result = gateway.save_event(&input).await;
        self.finish_submit(result)
    }

    /// Banners to show above the form.
    pub fn alerts(&self) -> Vec<Alert> {
        let mut alerts = Vec::new();
        if !self.is_logged_in() {
            alerts.push(Alert::warning(MSG_LOGIN_REQUIRED));
        }
        if self.saved.is_some() {
            alerts.push(Alert::success(MSG_EVENT_ADDED));
        }
        if self.failed {
            alerts.push(Alert::danger(MSG_SAVE_FAILED));
        }
        alerts
    }

    /// Hides the banners of the last submit.
    pub fn dismiss_alerts(&mut self) {
        self.saved = None;
        self.failed = false;
    }

    fn sync_lock(&mut self) {
        let locked = !self.auth.is_logged_in() || self.saving;
        self.body.set_read_only(locked);
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! GraphQL client for event operations.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::config::GraphQlConfig;
use crate::error::GraphQlError;
use crate::http::HttpClient;
use crate::request::GraphQlRequest;
use crate::response::{DeleteEventData, GetEventsData, GraphQlResponse, SaveEventData};
use crate::types::{EventFilterInput, EventInput, EventRecord, EventsData};

/// GraphQL client for listing, saving and deleting events.
///
/// # Example
///
/// ```ignore
/// use evdesk_graphql::{EventFilterInput, GraphQlClient, GraphQlConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = GraphQlConfig {
///     endpoint: "https://events.example.com/graphql".to_string(),
///     ..Default::default()
/// };
///
/// let client = GraphQlClient::new(config)?;
/// let filter = EventFilterInput { page_size: 20, page_number: 1, ..Default::default() };
/// let page = client.get_events(&filter).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: Arc<HttpClient>,
}

impl GraphQlClient {
    /// Creates a new GraphQL client.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is empty or HTTP client initialization fails.
    pub fn new(config: GraphQlConfig) -> Result<Self, GraphQlError> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            http: Arc::new(http),
        })
    }

    /// Replaces the bearer token used by this client and all of its clones.
    pub fn set_bearer_token(&self, token: Option<String>) {
        self.http.set_token(token);
    }

    /// Lists one page of events matching the filter.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or when the server reports errors.
    pub async fn get_events(&self, filter: &EventFilterInput) -> Result<EventsData, GraphQlError> {
        tracing::debug!(?filter, "querying events");
        let req = GraphQlRequest::get_events(filter)?;
        let data: GetEventsData = self.send(&req, "eventsData").await?;
        data.events_data.ok_or(GraphQlError::MissingData("eventsData"))
    }

    /// Creates (empty id) or updates an event.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or when the server reports errors.
    pub async fn save_event(&self, event: &EventInput) -> Result<EventRecord, GraphQlError> {
        tracing::debug!(id = %event.id, create = event.is_create(), "saving event");
        let req = GraphQlRequest::save_event(event)?;
        let data: SaveEventData = self.send(&req, "saveEvent").await?;
        data.save_event.ok_or(GraphQlError::MissingData("saveEvent"))
    }

    /// Deletes an event, returning the server's acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or when the server reports errors.
    pub async fn delete_event(&self, id: &str) -> Result<bool, GraphQlError> {
        tracing::debug!(id, "deleting event");
        let req = GraphQlRequest::delete_event(id);
        let data: DeleteEventData = self.send(&req, "deleteEvent").await?;
        Ok(data.acknowledged())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: &GraphQlRequest,
        field: &'static str,
    ) -> Result<T, GraphQlError> {
        let resp = self
            .http
            .execute(self.http.build_request().json(req))
            .await?;
        let body = resp.text().await?;
        GraphQlResponse::<T>::from_json(&body)?.into_data(field)
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use evdesk_graphql::{EventFilterInput, EventInput, EventsData, GraphQlClient, GraphQlError};

use crate::auth::{AuthContext, Subscription};
use crate::event::Event;
use crate::filter::SearchFilter;

/// One page of events together with the total match count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventsPage {
    /// Events on the requested page.
    pub events: Vec<Event>,

    /// Number of events matching the filter across all pages.
    pub total_count: u64,
}

impl From<EventsData> for EventsPage {
    /// Keeps every usable record; unusable ones are logged and skipped.
    fn from(data: EventsData) -> Self {
        let events = data
            .events
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                Event::try_from(record)
                    .inspect_err(|e| tracing::warn!(?id, error = %e, "skipping event record"))
                    .ok()
            })
            .collect();
        Self {
            events,
            total_count: data.total_count,
        }
    }
}

/// Failure of a remote event operation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// Transport or server-reported failure.
    #[error(transparent)]
    GraphQl(#[from] GraphQlError),

    /// The server returned an event the client cannot use.
    #[error("invalid event data: {0}")]
    InvalidData(String),

    /// The server did not confirm a deletion.
    #[error("the server did not acknowledge the deletion")]
    NotAcknowledged,

    /// Any other failure, reported as-is.
    #[error("{0}")]
    Other(String),
}

/// Remote operations the flows rely on.
#[async_trait]
pub trait EventGateway: Send + Sync {
    /// Fetches one page of events matching the filter.
    async fn get_events(&self, filter: &SearchFilter) -> Result<EventsPage, GatewayError>;

    /// Creates (empty id) or updates an event and returns the stored record.
    async fn save_event(&self, input: &EventInput) -> Result<Event, GatewayError>;

    /// Deletes the event with the given id.
    async fn delete_event(&self, id: &str) -> Result<(), GatewayError>;
}

#[async_trait]
impl EventGateway for GraphQlClient {
    async fn get_events(&self, filter: &SearchFilter) -> Result<EventsPage, GatewayError> {
        let data = GraphQlClient::get_events(self, &EventFilterInput::from(filter)).await?;
        Ok(EventsPage::from(data))
    }

    async fn save_event(&self, input: &EventInput) -> Result<Event, GatewayError> {
        let record = GraphQlClient::save_event(self, input).await?;
        Event::try_from(record)
    }

    async fn delete_event(&self, id: &str) -> Result<(), GatewayError> {
        match GraphQlClient::delete_event(self, id).await? {
            true => Ok(()),
            false => Err(GatewayError::NotAcknowledged),
        }
    }
}

#[async_trait]
impl<G: EventGateway + ?Sized> EventGateway for Arc<G> {
    async fn get_events(&self, filter: &SearchFilter) -> Result<EventsPage, GatewayError> {
        (**self).get_events(filter).await
    }

    async fn save_event(&self, input: &EventInput) -> Result<Event, GatewayError> {
        (**self).save_event(input).await
    }

    async fn delete_event(&self, id: &str) -> Result<(), GatewayError> {
        (**self).delete_event(id).await
    }
}

/// Keeps the client's bearer token in sync with the identity context.
///
/// The token is applied immediately and on every identity change until the
/// returned subscription is dropped.
pub fn bind_token(auth: &AuthContext, client: &GraphQlClient) -> Subscription {
    client.set_bearer_token(auth.get_auth().and_then(|a| a.token));
    let client = client.clone();
    auth.subscribe(move |auth| {
        client.set_bearer_token(auth.and_then(|a| a.token.clone()));
    })
}

#[cfg(test)]
mod tests {
    use evdesk_graphql::EventRecord;

    use super::*;

    fn record(id: &str, start: &str) -> EventRecord {
        EventRecord {
            id: Some(id.to_string()),
            title: Some(format!("Event {id}")),
            start: Some(start.to_string()),
            end: Some("2030-05-01T10:00:00Z".to_string()),
            ..EventRecord::default()
        }
    }

    #[test]
    fn test_events_page_skips_unusable_records() {
        let data = EventsData {
            events: vec![
                record("e1", "2030-05-01T09:00:00Z"),
                record("e2", "soon"),
                EventRecord {
                    id: None,
                    ..record("e3", "2030-05-01T09:00:00Z")
                },
                record("e4", "2030-05-01T09:30:00Z"),
            ],
            total_count: 4,
        };

        let page = EventsPage::from(data);

        let ids: Vec<&str> = page.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e1", "e4"]);
        assert_eq!(page.total_count, 4);
    }
}

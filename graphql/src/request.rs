// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! GraphQL documents and request bodies.

use serde::Serialize;
use serde_json::json;

use crate::error::GraphQlError;
use crate::types::{EventFilterInput, EventInput};

/// Query listing one page of events matching a filter.
pub const GET_EVENTS: &str = "\
query GetEvents($filter: EventFilter!) {
  eventsData(filter: $filter) {
    totalCount
    events {
      id title start end isPrivate description url createdAt updatedAt
      createdBy { _id username }
    }
  }
}";

/// Mutation creating (empty id) or updating an event.
pub const SAVE_EVENT: &str = "\
mutation SaveEvent($event: EventInput!) {
  saveEvent(event: $event) {
    id title start end isPrivate description url createdAt updatedAt
    createdBy { _id username }
  }
}";

/// Mutation deleting an event by id.
pub const DELETE_EVENT: &str = "\
mutation DeleteEvent($id: String!) {
  deleteEvent(id: $id)
}";

/// JSON body of a GraphQL-over-HTTP request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    /// The document.
    pub query: &'static str,
    /// Operation to execute within the document.
    pub operation_name: &'static str,
    /// Operation variables.
    pub variables: serde_json::Value,
}

impl GraphQlRequest {
    /// Builds a `GetEvents` request.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter cannot be serialized.
    pub fn get_events(filter: &EventFilterInput) -> Result<Self, GraphQlError> {
        Ok(Self {
            query: GET_EVENTS,
            operation_name: "GetEvents",
            variables: json!({ "filter": serde_json::to_value(filter)? }),
        })
    }

    /// Builds a `SaveEvent` request.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be serialized.
    pub fn save_event(event: &EventInput) -> Result<Self, GraphQlError> {
        Ok(Self {
            query: SAVE_EVENT,
            operation_name: "SaveEvent",
            variables: json!({ "event": serde_json::to_value(event)? }),
        })
    }

    /// Builds a `DeleteEvent` request.
    #[must_use]
    pub fn delete_event(id: &str) -> Self {
        Self {
            query: DELETE_EVENT,
            operation_name: "DeleteEvent",
            variables: json!({ "id": id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_events_wraps_filter() {
        let filter = EventFilterInput {
            search_text: "conf".into(),
            page_size: 20,
            page_number: 1,
            ..Default::default()
        };
        let req = GraphQlRequest::get_events(&filter).unwrap();
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["operationName"], "GetEvents");
        assert_eq!(body["variables"]["filter"]["searchText"], "conf");
        assert_eq!(body["variables"]["filter"]["pageNumber"], 1);
        assert!(body["query"].as_str().unwrap().contains("eventsData(filter: $filter)"));
    }

    #[test]
    fn delete_event_carries_id() {
        let body = serde_json::to_value(GraphQlRequest::delete_event("e42")).unwrap();
        assert_eq!(body["operationName"], "DeleteEvent");
        assert_eq!(body["variables"], json!({ "id": "e42" }));
    }
}

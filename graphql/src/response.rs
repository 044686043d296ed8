// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! GraphQL response envelope.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::GraphQlError;
use crate::types::{EventRecord, EventsData};

/// The `{ data, errors }` envelope of every GraphQL response.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    /// Operation result, absent when execution failed before producing one.
    pub data: Option<T>,
    /// Errors raised while executing the operation.
    #[serde(default)]
    pub errors: Vec<ResponseError>,
}

/// A single entry of the `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseError {
    /// Human readable message.
    pub message: String,
}

impl<T: DeserializeOwned> GraphQlResponse<T> {
    /// Parses a response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a GraphQL envelope.
    pub fn from_json(body: &str) -> Result<Self, GraphQlError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Turns the envelope into its data, failing on any reported error.
    ///
    /// # Errors
    ///
    /// Returns [`GraphQlError::Response`] when `errors` is non-empty and
    /// [`GraphQlError::MissingData`] when there is no data.
    pub fn into_data(self, field: &'static str) -> Result<T, GraphQlError> {
        if !self.errors.is_empty() {
            let messages = self.errors.into_iter().map(|e| e.message).collect();
            return Err(GraphQlError::Response(messages));
        }
        self.data.ok_or(GraphQlError::MissingData(field))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GetEventsData {
    pub events_data: Option<EventsData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaveEventData {
    pub save_event: Option<EventRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeleteEventData {
    pub delete_event: Option<serde_json::Value>,
}

impl DeleteEventData {
    /// Interprets the acknowledgement; anything but an explicit `false` counts.
    pub fn acknowledged(&self) -> bool {
        !matches!(self.delete_event, Some(serde_json::Value::Bool(false)))
    }
}

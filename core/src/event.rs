// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use evdesk_graphql::{EventRecord, UserRef};
use jiff::Timestamp;

use crate::datetime::parse_timestamp;
use crate::gateway::GatewayError;

/// Marker shown next to events whose end lies in the past.
pub const EXPIRED: &str = "Expired";

/// A calendar event as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Server-assigned identifier.
    pub id: String,

    /// The title of the event.
    pub title: String,

    /// When the event starts.
    pub start: Timestamp,

    /// When the event ends.
    pub end: Timestamp,

    /// Whether only the creator can see the event.
    pub is_private: bool,

    /// Free-form description, empty if none.
    pub description: String,

    /// Who created the event; only they may change it.
    pub created_by: Creator,

    /// When the event was created, if the server reported it.
    pub created_at: Option<Timestamp>,

    /// When the event was last updated, if the server reported it.
    pub updated_at: Option<Timestamp>,

    /// Optional external link.
    pub url: Option<String>,
}

impl Event {
    /// Whether the event has already ended at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.end < now
    }

    /// Whether `user_id` is the creator of this event.
    pub fn is_created_by(&self, user_id: &str) -> bool {
        self.created_by.id == user_id
    }
}

/// Reference to the user that created an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Creator {
    /// User identifier.
    pub id: String,

    /// Display name, empty if unknown.
    pub username: String,
}

impl From<UserRef> for Creator {
    fn from(user: UserRef) -> Self {
        Self {
            id: user.id,
            username: user.username.unwrap_or_default(),
        }
    }
}

impl TryFrom<EventRecord> for Event {
    type Error = GatewayError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let required = |value: Option<String>, name: &str| {
            value.ok_or_else(|| GatewayError::InvalidData(format!("event without {name}")))
        };
        let timestamp = |value: &str| {
            parse_timestamp(value).map_err(|e| GatewayError::InvalidData(e.to_string()))
        };
        let optional_timestamp = |value: Option<String>| match value {
            Some(v) => timestamp(&v).map(Some),
            None => Ok(None),
        };

        Ok(Self {
            id: required(record.id, "id")?,
            title: record.title.unwrap_or_default(),
            start: timestamp(&required(record.start, "start")?)?,
            end: timestamp(&required(record.end, "end")?)?,
            is_private: record.is_private,
            description: record.description.unwrap_or_default(),
            created_by: record.created_by.map(Creator::from).unwrap_or_default(),
            created_at: optional_timestamp(record.created_at)?,
            updated_at: optional_timestamp(record.updated_at)?,
            url: record.url.filter(|u| !u.is_empty()),
        })
    }
}

/// The marker for an event ending at `end`, evaluated against `now`.
///
/// Purely client side: it is only as fresh as the last render.
pub fn expired_marker(end: Timestamp, now: Timestamp) -> &'static str {
    if end < now { EXPIRED } else { "" }
}

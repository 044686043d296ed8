// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Wire types, shaped exactly like the GraphQL schema.

use serde::{Deserialize, Serialize};

/// Variables of the `getEvents` query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilterInput {
    /// Free text matched against event titles.
    pub search_text: String,
    /// Number of events per page.
    pub page_size: u32,
    /// 1-based page number.
    pub page_number: u32,
    /// Only events that have not ended yet.
    pub current_check: bool,
    /// Only events that have already ended.
    pub expired_check: bool,
}

/// Input of the `saveEvent` mutation. An empty `id` creates a new event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    /// Identifier of the event to update, or empty to create.
    pub id: String,
    /// Title.
    pub title: String,
    /// Start timestamp, RFC 3339.
    pub start: String,
    /// End timestamp, RFC 3339.
    pub end: String,
    /// Whether the event is only visible to its creator.
    pub is_private: bool,
    /// Free-form description.
    pub description: String,
}

impl EventInput {
    /// Whether this input creates a new event rather than updating one.
    #[must_use]
    pub fn is_create(&self) -> bool {
        self.id.is_empty()
    }
}

/// Reference to the user that created an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserRef {
    /// User identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub username: Option<String>,
}

/// An event as returned by the API.
///
/// Timestamps are kept as the raw strings the server sent; servers disagree
/// on whether they are RFC 3339 or epoch milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Title.
    #[serde(default)]
    pub title: Option<String>,
    /// Start timestamp.
    #[serde(default, deserialize_with = "de_timestamp")]
    pub start: Option<String>,
    /// End timestamp.
    #[serde(default, deserialize_with = "de_timestamp")]
    pub end: Option<String>,
    /// Visibility flag.
    #[serde(default)]
    pub is_private: bool,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// External url.
    #[serde(default)]
    pub url: Option<String>,
    /// Creation timestamp.
    #[serde(default, deserialize_with = "de_timestamp")]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default, deserialize_with = "de_timestamp")]
    pub updated_at: Option<String>,
    /// Creator.
    #[serde(default)]
    pub created_by: Option<UserRef>,
}

/// Payload of the `eventsData` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsData {
    /// Events of the requested page.
    #[serde(default)]
    pub events: Vec<EventRecord>,
    /// Number of events matching the filter across all pages.
    #[serde(default)]
    pub total_count: u64,
}

/// Accepts timestamps sent either as strings or as bare numbers.
fn de_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use evdesk_core::{Auth, AuthContext, Creator, Event};
use jiff::Timestamp;

/// The logged-in user in most tests.
pub const USER: &str = "u1";

/// A user that did not create the test events.
pub const OTHER_USER: &str = "u2";

/// Parses an RFC 3339 timestamp.
///
/// # Panics
///
/// Panics if `s` is not a valid timestamp.
#[must_use]
pub fn at(s: &str) -> Timestamp {
    s.parse().unwrap()
}

/// An auth context logged in as `user_id`.
#[must_use]
pub fn logged_in(user_id: &str) -> AuthContext {
    AuthContext::new(Some(Auth {
        user_id: user_id.to_string(),
        token: Some(format!("token-{user_id}")),
    }))
}

/// An anonymous auth context.
#[must_use]
pub fn logged_out() -> AuthContext {
    AuthContext::default()
}

/// Creates an event created by [`USER`].
///
/// # Example
///
/// ```ignore
/// let event = test_event("e1", "Conference");
/// ```
#[must_use]
pub fn test_event(id: &str, title: &str) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        start: at("2030-05-01T09:00:00Z"),
        end: at("2030-05-01T17:00:00Z"),
        is_private: false,
        description: format!("About {title}"),
        created_by: Creator {
            id: USER.to_string(),
            username: "ada".to_string(),
        },
        created_at: Some(at("2025-01-01T00:00:00Z")),
        updated_at: None,
        url: None,
    }
}

/// Creates `n` events titled "Event 1" to "Event n".
#[must_use]
pub fn numbered_events(n: usize) -> Vec<Event> {
    (1..=n)
        .map(|i| test_event(&format!("e{i}"), &format!("Event {i}")))
        .collect()
}

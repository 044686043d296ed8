// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Create flow tests.

use evdesk_core::{AddEvent, Alert, AlertKind, FlowError};
use jiff::tz::TimeZone;

use crate::common::{Call, ScriptedGateway, USER, logged_in, logged_out};

fn fill(flow: &mut AddEvent) {
    let body = flow.body_mut();
    body.set_title("Conference");
    body.set_start("2030-05-01 09:00");
    body.set_end("2030-05-01 17:00");
    body.set_description("Annual meetup");
    body.set_private(true);
}

#[tokio::test]
async fn add_event_requires_login() {
    // Arrange
    let gateway = ScriptedGateway::default();
    let mut flow = AddEvent::with_time_zone(logged_out(), TimeZone::UTC);

    // Act
    let applied = flow.body_mut().set_title("Conference");
    let result = flow.submit(&gateway).await;

    // Assert
    assert!(!applied, "form is locked when logged out");
    assert!(matches!(result, Err(FlowError::NotLoggedIn)));
    assert!(!flow.can_submit());
    assert_eq!(
        flow.alerts(),
        vec![Alert::warning("You must log in to be able to add events.")]
    );
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn add_event_blocks_invalid_draft_without_banner() {
    // Arrange
    let gateway = ScriptedGateway::default();
    let mut flow = AddEvent::with_time_zone(logged_in(USER), TimeZone::UTC);
    fill(&mut flow);
    flow.body_mut().set_end("2030-05-01 08:00");

    // Act
    let result = flow.submit(&gateway).await;

    // Assert
    assert!(!flow.can_submit());
    assert!(matches!(result, Err(FlowError::InvalidDraft(_))));
    assert!(flow.alerts().is_empty());
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn add_event_create_clears_fields() {
    // Arrange
    let gateway = ScriptedGateway::default();
    let mut flow = AddEvent::with_time_zone(logged_in(USER), TimeZone::UTC);
    fill(&mut flow);
    assert!(flow.can_submit());

    // Act
    let event = flow.submit(&gateway).await.unwrap();

    // Assert - exactly one create mutation with an empty id
    let calls = gateway.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        Call::SaveEvent(input) => {
            assert_eq!(input.id, "");
            assert_eq!(input.title, "Conference");
            assert_eq!(input.start, "2030-05-01T09:00:00Z");
            assert_eq!(input.end, "2030-05-01T17:00:00Z");
            assert!(input.is_private);
        }
        other => panic!("unexpected call {other:?}"),
    }
    assert_eq!(event.title, "Conference");

    // Assert - fields cleared and form re-enabled
    let body = flow.body();
    assert_eq!(body.title(), "");
    assert_eq!(body.description(), "");
    assert_eq!(body.start(), "");
    assert_eq!(body.end(), "");
    assert!(!body.is_private());
    assert!(!flow.is_saving());
    assert!(flow.displays_form());
    assert!(flow.body_mut().set_title("Next"));
    assert_eq!(flow.saved().map(|e| e.id.as_str()), Some("new-1"));
    assert_eq!(flow.alerts()[0].kind, AlertKind::Success);
}

#[tokio::test]
async fn add_event_failure_restores_form() {
    // Arrange
    let gateway = ScriptedGateway::default();
    gateway.fail_save(true);
    let mut flow = AddEvent::with_time_zone(logged_in(USER), TimeZone::UTC);
    fill(&mut flow);

    // Act
    let result = flow.submit(&gateway).await;

    // Assert
    assert!(matches!(result, Err(FlowError::Gateway(_))));
    assert!(!flow.is_saving());
    assert!(flow.displays_form());
    assert!(flow.can_submit(), "draft is kept for another try");
    assert_eq!(flow.body().title(), "Conference");
    assert_eq!(
        flow.alerts(),
        vec![Alert::danger(
            "Error occurred while saving event! Please try again later."
        )]
    );
}

#[test]
fn add_event_in_flight_disables_submit() {
    // Arrange
    let mut flow = AddEvent::with_time_zone(logged_in(USER), TimeZone::UTC);
    fill(&mut flow);

    // Act
    let input = flow.begin_submit().unwrap();

    // Assert
    assert_eq!(input.id, "");
    assert!(flow.is_saving());
    assert!(!flow.displays_form());
    assert!(!flow.can_submit());
    assert!(matches!(flow.begin_submit(), Err(FlowError::InFlight)));
    assert!(!flow.body_mut().set_title("Changed"));
}

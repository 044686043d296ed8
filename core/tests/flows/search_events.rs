// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Search-and-edit flow tests.

use std::time::Duration;

use evdesk_core::{
    Alert, AlertKind, EventGateway, FilterSelection, FlowError, GatewayError, NetworkStatus,
    SearchEvents, expired_marker,
};
use jiff::tz::TimeZone;

use crate::common::{
    Call, OTHER_USER, ScriptedGateway, USER, at, logged_in, numbered_events, test_event,
};

const DEBOUNCE: Duration = Duration::from_millis(500);

fn flow(user: &str) -> SearchEvents {
    SearchEvents::new(logged_in(user), DEBOUNCE).with_time_zone(TimeZone::UTC)
}

async fn loaded(gateway: &ScriptedGateway, user: &str) -> SearchEvents {
    let mut flow = flow(user);
    let query = flow.start();
    assert!(flow.load(gateway, query).await);
    flow
}

#[tokio::test]
async fn search_initial_load_is_not_a_refetch() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(3));
    let mut flow = flow(USER);

    // Act
    let query = flow.start();

    // Assert - loading, pagination hidden
    assert_eq!(query.status, NetworkStatus::Loading);
    assert!(flow.is_loading());
    assert!(!flow.is_refetching());
    assert!(!flow.shows_pagination());
    assert_eq!(query.filter.page_number, 1);
    assert_eq!(query.filter.page_size, 20);

    // Act - response arrives
    flow.load(&gateway, query).await;

    // Assert
    assert_eq!(flow.query().status(), NetworkStatus::Ready);
    assert_eq!(flow.events().len(), 3);
    assert!(flow.shows_pagination());

    // Act - a later refetch keeps the list
    let refetch = flow.refetch();
    assert_eq!(refetch.status, NetworkStatus::Refetch);
    assert!(flow.is_refetching());
    assert_eq!(flow.events().len(), 3);
}

#[tokio::test]
async fn search_pages_through_45_events() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(45));
    let mut flow = loaded(&gateway, USER).await;

    // Assert - three pages
    assert_eq!(flow.pagination().total(), 45);
    assert_eq!(flow.pagination().total_pages(), 3);
    assert_eq!(flow.events().len(), 20);

    // Act
    let query = flow.go_to_page(3).unwrap();

    // Assert
    assert_eq!(query.filter.page_number, 3);
    assert_eq!(query.status, NetworkStatus::SetVariables);
    flow.load(&gateway, query).await;
    let titles: Vec<_> = flow.events().iter().map(|e| e.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Event 41", "Event 42", "Event 43", "Event 44", "Event 45"]
    );
    assert!(flow.go_to_page(4).is_none());
}

#[tokio::test(start_paused = true)]
async fn search_debounced_text_issues_one_query() {
    // Arrange
    let mut events = numbered_events(3);
    events.push(test_event("c1", "Conference"));
    let gateway = ScriptedGateway::new(events);
    let mut flow = loaded(&gateway, USER).await;

    // Act - typing, each keystroke within the quiet period
    for text in ["C", "Co", "Conf", "Conference"] {
        flow.set_search_text(text);
        tokio::time::advance(Duration::from_millis(100)).await;
        assert!(flow.tick().is_none());
    }
    assert_eq!(flow.search_text(), "Conference");
    assert_eq!(flow.debounced_search_text(), "");

    tokio::time::advance(Duration::from_millis(400)).await;
    let query = flow.tick().unwrap();
    flow.load(&gateway, query).await;

    // Assert - exactly one query for the settled text, on page 1
    let searched: Vec<_> = gateway
        .queries()
        .into_iter()
        .filter(|f| !f.search_text.is_empty())
        .collect();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].search_text.to_lowercase(), "conference");
    assert_eq!(searched[0].page_number, 1);
    assert_eq!(flow.events().len(), 1);
    assert!(flow.tick().is_none());
}

#[tokio::test(start_paused = true)]
async fn search_text_change_resets_page() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(45));
    let mut flow = loaded(&gateway, USER).await;
    let query = flow.go_to_page(2).unwrap();
    flow.load(&gateway, query).await;

    // Act
    flow.set_search_text("  Event 4 ");
    let query = flow.settle_search().await.unwrap();

    // Assert
    assert_eq!(query.filter.page_number, 1);
    assert_eq!(query.filter.search_text, "Event 4");
    assert_eq!(query.status, NetworkStatus::SetVariables);
    assert_eq!(flow.pagination().current_page(), 1);
}

#[tokio::test(start_paused = true)]
async fn search_whitespace_only_change_does_not_refetch() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(2));
    let mut flow = loaded(&gateway, USER).await;

    // Act
    flow.set_search_text("   ");

    // Assert
    assert!(flow.settle_search().await.is_none());
}

#[tokio::test]
async fn search_submit_runs_typed_text_immediately() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(45));
    let mut flow = loaded(&gateway, USER).await;
    flow.go_to_page(2).unwrap();

    // Act
    flow.set_search_text("Event 1");
    let query = flow.submit_search();

    // Assert
    assert_eq!(query.status, NetworkStatus::Refetch);
    assert_eq!(query.filter.search_text, "Event 1");
    assert_eq!(query.filter.page_number, 1);
}

#[tokio::test]
async fn search_filter_toggle_resets_page() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(45));
    let mut flow = loaded(&gateway, USER).await;
    let query = flow.go_to_page(3).unwrap();
    flow.load(&gateway, query).await;

    for selection in [
        FilterSelection::Current,
        FilterSelection::Expired,
        FilterSelection::All,
    ] {
        // Act
        let query = flow.select_filter(selection).unwrap();

        // Assert - exactly one selection, page reset
        assert_eq!(flow.selection(), selection);
        let checks = [
            selection.all_check(),
            query.filter.current_check,
            query.filter.expired_check,
        ];
        assert_eq!(checks.iter().filter(|c| **c).count(), 1);
        assert_eq!(query.filter.page_number, 1);
        assert_eq!(query.status, NetworkStatus::SetVariables);
        flow.load(&gateway, query).await;
    }

    assert!(flow.select_filter(FilterSelection::All).is_none());
}

#[tokio::test]
async fn search_drops_stale_responses() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(3));
    let mut flow = flow(USER);
    let first = flow.start();
    let second = flow.select_filter(FilterSelection::Current).unwrap();

    // Act - the responses arrive out of order
    let newest = gateway.get_events(&second.filter).await;
    let applied_newest = flow.finish_query(second.id, newest);
    let stale = gateway.get_events(&first.filter).await;
    let applied_stale = flow.finish_query(first.id, stale);

    // Assert
    assert!(applied_newest);
    assert!(!applied_stale);
    assert_eq!(flow.query().status(), NetworkStatus::Ready);
}

#[tokio::test]
async fn search_error_keeps_previous_content() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(3));
    let mut flow = loaded(&gateway, USER).await;
    gateway.fail_query(true);

    // Act
    let query = flow.refetch();
    flow.load(&gateway, query).await;

    // Assert
    assert_eq!(flow.query().status(), NetworkStatus::Error);
    assert_eq!(flow.events().len(), 3);
    assert_eq!(flow.alerts(), vec![Alert::danger("Network error")]);

    // Act - recovery clears the error
    gateway.fail_query(false);
    let query = flow.refetch();
    flow.load(&gateway, query).await;
    assert!(flow.alerts().is_empty());
}

#[tokio::test]
async fn search_without_results_shows_notice() {
    // Arrange
    let gateway = ScriptedGateway::default();

    // Act
    let flow = loaded(&gateway, USER).await;

    // Assert
    assert!(flow.events().is_empty());
    assert_eq!(flow.alerts(), vec![Alert::warning("No results were found.")]);
}

#[tokio::test]
async fn search_identity_change_refetches_from_first_page() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(45));
    let auth = logged_in(USER);
    let mut flow = SearchEvents::new(auth.clone(), DEBOUNCE);
    let query = flow.start();
    flow.load(&gateway, query).await;
    let query = flow.go_to_page(2).unwrap();
    flow.load(&gateway, query).await;
    assert!(flow.tick().is_none());

    // Act
    auth.logout();
    let query = flow.tick().unwrap();

    // Assert
    assert_eq!(query.status, NetworkStatus::Refetch);
    assert_eq!(query.filter.page_number, 1);
    assert!(flow.tick().is_none());
}

#[tokio::test]
async fn modal_for_other_creator_hides_controls() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(2));
    let mut flow = loaded(&gateway, OTHER_USER).await;

    // Act
    assert!(flow.select_index(0));

    // Assert
    let modal = flow.modal().unwrap();
    assert_eq!(modal.title(), "Update Event");
    assert_eq!(modal.close_label(), "Close");
    assert!(!modal.is_creator());
    assert!(!modal.show_delete());
    assert!(!modal.show_save());
    assert!(modal.save_disabled());
    assert!(modal.body().is_read_only());
    assert!(matches!(flow.begin_save(), Err(FlowError::NotCreator)));
    assert!(matches!(flow.begin_delete(), Err(FlowError::NotCreator)));
}

#[tokio::test]
async fn modal_creator_predicate_is_snapshotted() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(2));
    let auth = logged_in(USER);
    let mut flow = SearchEvents::new(auth.clone(), DEBOUNCE);
    let query = flow.start();
    flow.load(&gateway, query).await;
    flow.select_index(1);

    // Act
    auth.logout();

    // Assert
    let modal = flow.modal().unwrap();
    assert!(modal.is_creator());
    assert!(modal.show_delete());
    assert_eq!(modal.close_label(), "Cancel");
}

#[tokio::test]
async fn modal_save_updates_and_refetches_current_page() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(25));
    let mut flow = loaded(&gateway, USER).await;
    let query = flow.go_to_page(2).unwrap();
    flow.load(&gateway, query).await;
    flow.select_index(0);
    let modal = flow.modal_mut().unwrap();
    assert!(!modal.save_disabled());
    modal.body_mut().set_title("Renamed");

    // Act
    flow.save(&gateway).await.unwrap();

    // Assert - update keyed by the existing id, modal closed, same page refetched
    let calls = gateway.calls();
    match &calls[calls.len() - 2] {
        Call::SaveEvent(input) => {
            assert_eq!(input.id, "e21");
            assert_eq!(input.title, "Renamed");
        }
        other => panic!("unexpected call {other:?}"),
    }
    match &calls[calls.len() - 1] {
        Call::GetEvents(filter) => assert_eq!(filter.page_number, 2),
        other => panic!("unexpected call {other:?}"),
    }
    assert!(flow.modal().is_none());
    assert_eq!(flow.events()[0].title, "Renamed");
}

#[tokio::test]
async fn modal_save_disables_both_controls_while_in_flight() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(2));
    let mut flow = loaded(&gateway, USER).await;
    flow.select_index(0);

    // Act
    flow.begin_save().unwrap();

    // Assert - in flight
    let modal = flow.modal().unwrap();
    assert!(modal.is_saving());
    assert!(modal.save_disabled());
    assert!(modal.delete_disabled());
    assert!(matches!(flow.begin_delete(), Err(FlowError::InFlight)));

    // Act - failure
    let result = flow.finish_save(Err(GatewayError::Other("Save failed".to_string())));

    // Assert - controls restored, modal still open
    assert!(result.is_err());
    let modal = flow.modal().unwrap();
    assert!(!modal.save_disabled());
    assert!(!modal.delete_disabled());
    assert!(!modal.body().is_read_only());
    assert_eq!(flow.alerts(), vec![Alert::danger("Save failed")]);
}

#[tokio::test]
async fn modal_failed_delete_keeps_list_and_reenables_controls() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(3));
    let mut flow = loaded(&gateway, USER).await;
    let before = flow.events().to_vec();
    gateway.fail_delete(true);
    flow.select_index(1);

    // Act
    let result = flow.delete(&gateway).await;

    // Assert
    assert!(matches!(result, Err(FlowError::Gateway(_))));
    assert_eq!(flow.events(), before.as_slice());
    let modal = flow.modal().unwrap();
    assert!(!modal.delete_disabled());
    assert!(!modal.save_disabled());
    assert!(!modal.is_deleting());
    let alerts = flow.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::Danger);
}

#[tokio::test]
async fn modal_delete_resets_to_first_page() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(45));
    let mut flow = loaded(&gateway, USER).await;
    let query = flow.go_to_page(3).unwrap();
    flow.load(&gateway, query).await;
    flow.select_index(4);

    // Act
    flow.delete(&gateway).await.unwrap();

    // Assert
    assert_eq!(
        gateway.calls().iter().rev().nth(1),
        Some(&Call::DeleteEvent("e45".to_string()))
    );
    assert!(flow.modal().is_none());
    assert_eq!(flow.pagination().current_page(), 1);
    assert_eq!(flow.pagination().total(), 44);
    assert_eq!(gateway.queries().last().unwrap().page_number, 1);
}

#[tokio::test]
async fn modal_close_discards_draft() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(1));
    let mut flow = loaded(&gateway, USER).await;
    flow.select_index(0);
    flow.modal_mut().unwrap().body_mut().set_title("Draft");

    // Act
    flow.close_modal();
    flow.select_index(0);

    // Assert
    assert_eq!(flow.modal().unwrap().body().title(), "Event 1");

    flow.close_modal();
    assert!(matches!(flow.begin_save(), Err(FlowError::NoSelection)));
}

#[tokio::test]
async fn modal_stays_open_while_mutation_in_flight() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(2));
    let mut flow = loaded(&gateway, USER).await;
    flow.select_index(0);
    let input = flow.begin_save().unwrap();

    // Act - try to leave for another event while e1 saves
    assert!(!flow.close_modal());
    assert!(!flow.select_index(1));

    // Assert - still the e1 modal, locked
    let modal = flow.modal().unwrap();
    assert_eq!(modal.event().id, input.id);
    assert!(modal.is_saving());

    // Act - the save lands on its own modal
    let saved = gateway.save_event(&input).await;
    assert!(flow.finish_save(saved).is_ok());
    assert!(flow.modal().is_none());

    // Act - now another event opens normally
    assert!(flow.select_index(1));
    assert!(flow.close_modal());
}

#[tokio::test]
async fn modal_ignores_outcome_it_did_not_start() {
    // Arrange
    let gateway = ScriptedGateway::new(numbered_events(2));
    let mut flow = loaded(&gateway, USER).await;
    flow.select_index(1);
    flow.modal_mut().unwrap().body_mut().set_title("Half-typed draft");

    // Act - a delete outcome arrives while this modal only edits
    let result = flow.finish_delete(Ok(()));

    // Assert - draft and page untouched
    assert!(matches!(result, Err(FlowError::NoSelection)));
    let modal = flow.modal().unwrap();
    assert_eq!(modal.body().title(), "Half-typed draft");
    assert!(!modal.save_disabled());
    assert!(flow.alerts().is_empty());
}

#[test]
fn expired_marker_compares_end_with_now() {
    let event = test_event("e1", "Old");
    assert_eq!(expired_marker(event.end, at("2031-01-01T00:00:00Z")), "Expired");
    assert_eq!(expired_marker(event.end, at("2030-05-01T12:00:00Z")), "");
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Headless core of evdesk: the event model, the identity context, and the
//! create / search-and-edit flows that drive any front end.

mod add_event;
mod alert;
mod auth;
mod config;
mod datetime;
mod debounce;
mod error;
mod event;
mod evdesk;
mod filter;
mod form;
mod gateway;
mod pagination;
mod search_events;

pub use crate::add_event::AddEvent;
pub use crate::alert::{
    Alert, AlertKind, MSG_EVENT_ADDED, MSG_LOGIN_REQUIRED, MSG_NO_RESULTS, MSG_SAVE_FAILED,
};
pub use crate::auth::{Auth, AuthContext, Subscription};
pub use crate::config::{APP_NAME, AuthConfig, Config, ConfigDebounce};
pub use crate::datetime::{
    DateTimeError, format_display, format_input, parse_input, parse_timestamp,
};
pub use crate::debounce::Debouncer;
pub use crate::error::FlowError;
pub use crate::event::{Creator, EXPIRED, Event, expired_marker};
pub use crate::evdesk::Evdesk;
pub use crate::filter::{EVENTS_PER_PAGE, FilterSelection, SearchFilter};
pub use crate::form::{EventBody, Field, FieldError};
pub use crate::gateway::{EventGateway, EventsPage, GatewayError, bind_token};
pub use crate::pagination::Pagination;
pub use crate::search_events::{
    EditModal, EventsQuery, ModalAction, NetworkStatus, QueryState, SearchEvents,
};
pub use evdesk_graphql::{EventInput, GraphQlClient, GraphQlConfig};

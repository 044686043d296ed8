// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use crate::form::FieldError;
use crate::gateway::GatewayError;

/// Why a flow refused or failed an action.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FlowError {
    /// The action requires a logged-in user.
    #[error("you must be logged in")]
    NotLoggedIn,

    /// The draft has validation errors.
    #[error("{}", join_errors(.0))]
    InvalidDraft(Vec<FieldError>),

    /// Another mutation is still in flight.
    #[error("another request is still in progress")]
    InFlight,

    /// No event is selected.
    #[error("no event is selected")]
    NoSelection,

    /// Only the creator may change the event.
    #[error("only the creator can change this event")]
    NotCreator,

    /// The remote operation failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

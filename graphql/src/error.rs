// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// GraphQL client errors.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum GraphQlError {
    /// Transport failure or non-success HTTP status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The response body is not the JSON we expected.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The server answered with a non-empty `errors` array.
    #[error("{}", .0.join("; "))]
    Response(Vec<String>),

    /// The server answered without `data` for the named field.
    #[error("Missing data in response: {0}")]
    MissingData(&'static str),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for GraphQlError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Http(e.to_string())
        }
    }
}

impl From<serde_json::Error> for GraphQlError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt;
use std::time::Duration;

use evdesk_graphql::GraphQlConfig;
use serde::de;

use crate::auth::Auth;

/// The name of the evdesk application.
pub const APP_NAME: &str = "evdesk";

/// Configuration for the evdesk application.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    /// GraphQL endpoint settings.
    pub graphql: GraphQlConfig,

    /// Quiet period before search text reaches the query.
    #[serde(default)]
    pub debounce: ConfigDebounce,

    /// Identity to start with; absent means logged out.
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}

impl Config {
    /// The identity to seed the auth context with.
    pub fn initial_auth(&self) -> Option<Auth> {
        self.auth.as_ref().map(|a| Auth {
            user_id: a.user_id.clone(),
            token: a.token.clone().filter(|t| !t.is_empty()),
        })
    }
}

/// Identity configured in the `[core.auth]` table.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AuthConfig {
    /// User id matched against event creators.
    pub user_id: String,

    /// Bearer token, if the server requires one.
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigDebounce(Duration);

impl ConfigDebounce {
    pub const DEFAULT: ConfigDebounce = ConfigDebounce(Duration::from_millis(500));

    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl Default for ConfigDebounce {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl<'de> serde::Deserialize<'de> for ConfigDebounce {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct DebounceVisitor;

        impl<'de> de::Visitor<'de> for DebounceVisitor {
            type Value = ConfigDebounce;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str(r#"a duration string like "500ms", "1s", "2m", or "HH:MM""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                parse_duration(value)
                    .map(ConfigDebounce)
                    .map_err(|e| de::Error::custom(e.to_string()))
            }
        }

        deserializer.deserialize_str(DebounceVisitor)
    }
}

/// Parse a duration string in the format "HH:MM" / "2h" / "2m" / "1s" / "500ms".
fn parse_duration(s: &str) -> Result<Duration, Box<dyn Error>> {
    let s = s.trim();
    // Try to parse "HH:MM" format
    if let Some((h, m)) = s.split_once(':') {
        let hours: u64 = h.trim().parse()?;
        let minutes: u64 = m.trim().parse()?;
        Ok(Duration::from_secs((hours * 60 + minutes) * 60))
    }
    // Match suffix-based formats, "ms" before "m" and "s"
    else if let Some(rest) = s.strip_suffix("ms") {
        let millis: u64 = rest.trim().parse()?;
        Ok(Duration::from_millis(millis))
    } else if let Some(rest) = s.strip_suffix("h") {
        let hours: u64 = rest.trim().parse()?;
        Ok(Duration::from_secs(hours * 3600))
    } else if let Some(rest) = s.strip_suffix("m") {
        let minutes: u64 = rest.trim().parse()?;
        Ok(Duration::from_secs(minutes * 60))
    } else if let Some(rest) = s.strip_suffix("s") {
        let seconds: u64 = rest.trim().parse()?;
        Ok(Duration::from_secs(seconds))
    } else {
        Err(format!("Invalid duration format: {s}").into())
    }
}

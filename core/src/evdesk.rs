// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use evdesk_graphql::GraphQlClient;

use crate::add_event::AddEvent;
use crate::auth::{AuthContext, Subscription};
use crate::config::Config;
use crate::gateway::{EventGateway, GatewayError, bind_token};
use crate::search_events::SearchEvents;

/// evdesk application core: the gateway, the identity, and flow factories.
#[derive(Debug)]
pub struct Evdesk {
    config: Config,
    client: GraphQlClient,
    auth: AuthContext,
    _token: Subscription,
}

impl Evdesk {
    /// Creates a new evdesk instance with the given configuration.
    pub fn new(config: Config) -> Result<Self, Box<dyn Error>> {
        let client = GraphQlClient::new(config.graphql.clone())
            .map_err(|e| format!("Failed to initialize GraphQL client: {e}"))?;
        let auth = AuthContext::new(config.initial_auth());
        let token = bind_token(&auth, &client);
        Ok(Self {
            config,
            client,
            auth,
            _token: token,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The remote gateway. Clones share the bearer token.
    pub fn gateway(&self) -> &GraphQlClient {
        &self.client
    }

    /// The shared identity context.
    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// A search-and-edit flow bound to this instance's identity.
    pub fn search_events(&self) -> SearchEvents {
        SearchEvents::new(self.auth.clone(), self.config.debounce.duration())
    }

    /// A create flow bound to this instance's identity.
    pub fn add_event(&self) -> AddEvent {
        AddEvent::new(self.auth.clone())
    }

    /// Deletes an event by id.
    pub async fn delete_event(&self, id: &str) -> Result<(), GatewayError> {
        EventGateway::delete_event(&self.client, id).await
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use evdesk_core::Evdesk;

use crate::tui;

#[derive(Debug, Clone, Copy)]
pub struct CmdBrowse;

impl CmdBrowse {
    pub const NAME: &str = "browse";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("b")
            .about("Search, edit and delete events interactively")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub async fn run(self, evdesk: &Evdesk) -> Result<(), Box<dyn Error>> {
        tracing::debug!("opening event browser...");
        tui::browse(evdesk.search_events(), evdesk.gateway().clone())
    }
}

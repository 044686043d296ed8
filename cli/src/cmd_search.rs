// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use evdesk_core::{Evdesk, FilterSelection, SearchEvents};
use jiff::{Timestamp, tz::TimeZone};

use crate::event_formatter::EventFormatter;
use crate::util::{ArgOutputFormat, format_alert};

#[derive(Debug, Clone)]
pub struct CmdSearch {
    pub text: Option<String>,
    pub filter: FilterSelection,
    pub page: u32,
    pub output_format: ArgOutputFormat,
}

impl CmdSearch {
    pub const NAME: &str = "search";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("s")
            .about("Search events by title")
            .arg(arg!(text: [TEXT] "Text to look for in event titles"))
            .arg(
                arg!(-f --filter <FILTER> "Which events to list")
                    .value_parser(value_parser!(FilterSelection))
                    .default_value("all"),
            )
            .arg(
                arg!(-p --page <PAGE> "Page to show, starting from 1")
                    .value_parser(value_parser!(u32).range(1..))
                    .default_value("1"),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            text: matches.get_one::<String>("text").cloned(),
            filter: matches
                .get_one::<FilterSelection>("filter")
                .copied()
                .unwrap_or_default(),
            page: matches.get_one::<u32>("page").copied().unwrap_or(1),
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, evdesk: &Evdesk) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "searching events...");
        let gateway = evdesk.gateway();
        let mut flow = evdesk.search_events();

        let query = match &self.text {
            Some(text) => {
                flow.set_search_text(text.clone());
                flow.submit_search()
            }
            None => flow.start(),
        };
        let query = flow.select_filter(self.filter).unwrap_or(query);
        flow.load(gateway, query).await;

        if self.page > 1 && flow.query().error().is_none() {
            let total = flow.pagination().total_pages();
            if self.page > total {
                return Err(format!("Page {} is out of range, {total} page(s) found", self.page).into());
            }
            if let Some(query) = flow.go_to_page(self.page) {
                flow.load(gateway, query).await;
            }
        }

        self.print(&flow);
        Ok(())
    }

    fn print(&self, flow: &SearchEvents) {
        for alert in flow.alerts() {
            println!("{}", format_alert(&alert));
        }
        if flow.events().is_empty() {
            return;
        }

        let tz = TimeZone::system();
        let formatter = EventFormatter::new(Timestamp::now(), tz).with_output_format(self.output_format);
        println!("{}", formatter.format(flow.events()));

        if self.output_format == ArgOutputFormat::Table {
            let pagination = flow.pagination();
            println!(
                "Page {} / {} ({} events)",
                pagination.current_page(),
                pagination.total_pages(),
                pagination.total()
            );
        }
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use evdesk_core::{AddEvent, Evdesk, Event};
use jiff::{Timestamp, tz::TimeZone};

use crate::event_formatter::EventFormatter;
use crate::tui;
use crate::util::{ArgOutputFormat, format_alert};

#[derive(Debug, Clone)]
pub struct CmdNew {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
    pub private: bool,

    pub tui: bool,
    pub output_format: ArgOutputFormat,
}

impl CmdNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new event, opens a form when no field is given")
            .arg(arg!(-t --title <TITLE> "Title of the event"))
            .arg(arg!(-s --start <START> "Start date and time, e.g. 2025-01-31 09:00"))
            .arg(arg!(-e --end <END> "End date and time, e.g. 2025-01-31 10:00"))
            .arg(arg!(-d --description <DESCRIPTION> "Description of the event"))
            .arg(arg!(--private "Only show the event to its creator"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let title = matches.get_one::<String>("title").cloned();
        let start = matches.get_one::<String>("start").cloned();
        let end = matches.get_one::<String>("end").cloned();
        let description = matches.get_one::<String>("description").cloned();
        let private = matches.get_flag("private");

        let tui = title.is_none()
            && start.is_none()
            && end.is_none()
            && description.is_none()
            && !private;

        Self {
            title,
            start,
            end,
            description,
            private,

            tui,
            output_format: ArgOutputFormat::from(matches),
        }
    }

    pub async fn run(self, evdesk: &Evdesk) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let mut flow = evdesk.add_event();
        if !flow.is_logged_in() {
            print_alerts(&flow);
            return Ok(());
        }

        if self.tui {
            flow = match tui::draft_event(flow)? {
                Some(flow) => flow,
                None => {
                    tracing::info!("user cancel the event creation");
                    return Ok(());
                }
            };
        } else {
            self.fill(&mut flow);
            let errors = flow.body().validate();
            if !errors.is_empty() {
                for error in errors {
                    println!("{}", error.to_string().red());
                }
                return Err("Event is not valid".into());
            }
        }

        let result = flow.submit(evdesk.gateway()).await;
        print_alerts(&flow);
        let event = result?;
        print_event(&event, self.output_format);
        Ok(())
    }

    fn fill(&self, flow: &mut AddEvent) {
        let body = flow.body_mut();
        body.set_title(self.title.clone().unwrap_or_default());
        body.set_start(self.start.clone().unwrap_or_default());
        body.set_end(self.end.clone().unwrap_or_default());
        body.set_description(self.description.clone().unwrap_or_default());
        body.set_private(self.private);
    }
}

#[derive(Debug, Clone)]
pub struct CmdDelete {
    pub id: String,
}

impl CmdDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event by id")
            .arg(arg!(id: <ID> "The id of the event to delete"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let id = matches
            .get_one::<String>("id")
            .cloned()
            .unwrap_or_default();
        Self { id }
    }

    pub async fn run(self, evdesk: &Evdesk) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        evdesk.delete_event(&self.id).await?;
        println!("{}", format!("Event {} was deleted.", self.id).green());
        Ok(())
    }
}

fn print_alerts(flow: &AddEvent) {
    for alert in flow.alerts() {
        println!("{}", format_alert(&alert));
    }
}

fn print_event(event: &Event, output_format: ArgOutputFormat) {
    let formatter =
        EventFormatter::new(Timestamp::now(), TimeZone::system()).with_output_format(output_format);
    println!("{}", formatter.format(std::slice::from_ref(event)));
}

#[cfg(test)]
mod tests {
    use evdesk_core::{Auth, AuthContext};

    use super::*;

    fn parse_new(args: &[&str]) -> CmdNew {
        let cmd = Command::new("test").subcommand(CmdNew::command());
        let matches = cmd
            .try_get_matches_from(["test", "new"].iter().chain(args))
            .unwrap();
        CmdNew::from(matches.subcommand_matches("new").unwrap())
    }

    #[test]
    fn test_parse_new_without_fields_opens_tui() {
        let parsed = parse_new(&[]);
        assert!(parsed.tui);
        assert!(!parsed.private);
    }

    #[test]
    fn test_parse_new_with_fields() {
        let parsed = parse_new(&[
            "--title",
            "Retro",
            "--start",
            "2030-05-01 09:00",
            "--end",
            "2030-05-01 10:00",
            "--private",
            "--output-format",
            "json",
        ]);
        assert!(!parsed.tui);
        assert_eq!(parsed.title.as_deref(), Some("Retro"));
        assert_eq!(parsed.start.as_deref(), Some("2030-05-01 09:00"));
        assert_eq!(parsed.end.as_deref(), Some("2030-05-01 10:00"));
        assert!(parsed.private);
        assert_eq!(parsed.output_format, ArgOutputFormat::Json);
    }

    #[test]
    fn test_parse_new_private_only_skips_tui() {
        let parsed = parse_new(&["--private"]);
        assert!(!parsed.tui);
    }

    #[test]
    fn test_fill_copies_fields_into_draft() {
        let parsed = parse_new(&["-t", "Retro", "-s", "2030-05-01 09:00", "-e", "2030-05-01 10:00"]);
        let auth = AuthContext::new(Some(Auth {
            user_id: "u1".to_string(),
            token: None,
        }));
        let mut flow = AddEvent::with_time_zone(auth, TimeZone::UTC);

        parsed.fill(&mut flow);

        assert_eq!(flow.body().title(), "Retro");
        assert_eq!(flow.body().start(), "2030-05-01 09:00");
        assert!(flow.body().is_valid());
        assert!(flow.can_submit());
    }

    #[test]
    fn test_parse_delete() {
        let cmd = Command::new("test").subcommand(CmdDelete::command());
        let matches = cmd.try_get_matches_from(["test", "delete", "e1"]).unwrap();
        let parsed = CmdDelete::from(matches.subcommand_matches("delete").unwrap());
        assert_eq!(parsed.id, "e1");
    }
}

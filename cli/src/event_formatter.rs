// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use evdesk_core::{Event, expired_marker, format_display};
use jiff::{Timestamp, tz::TimeZone};

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::ArgOutputFormat;

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: ArgOutputFormat,
}

impl EventFormatter {
    pub fn new(now: Timestamp, tz: TimeZone) -> Self {
        Self {
            columns: vec![
                EventColumn::Id(EventColumnId),
                EventColumn::TimeRange(EventColumnTimeRange { tz }),
                EventColumn::Title(EventColumnTitle),
                EventColumn::Creator(EventColumnCreator),
                EventColumn::Visibility(EventColumnVisibility),
                EventColumn::Expired(EventColumnExpired { now }),
            ],
            format: ArgOutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: ArgOutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, events: &'a [Event]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [Event],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            ArgOutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), &self.formatter.columns, self.events)
            ),
            ArgOutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), &self.formatter.columns, self.events)
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub enum EventColumn {
    Creator(EventColumnCreator),
    Expired(EventColumnExpired),
    Id(EventColumnId),
    TimeRange(EventColumnTimeRange),
    Title(EventColumnTitle),
    Visibility(EventColumnVisibility),
}

impl TableColumn<Event> for EventColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            EventColumn::Creator(_) => "Created By",
            EventColumn::Expired(_) => "Status",
            EventColumn::Id(_) => "ID",
            EventColumn::TimeRange(_) => "Time Range",
            EventColumn::Title(_) => "Title",
            EventColumn::Visibility(_) => "Visibility",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a Event) -> Cow<'a, str> {
        match self {
            EventColumn::Creator(a) => a.format(data),
            EventColumn::Expired(a) => a.format(data),
            EventColumn::Id(a) => a.format(data),
            EventColumn::TimeRange(a) => a.format(data),
            EventColumn::Title(a) => a.format(data),
            EventColumn::Visibility(a) => a.format(data),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::Id(_) => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, data: &Event) -> Option<Color> {
        match self {
            EventColumn::Expired(a) => a.get_color(data),
            EventColumn::Visibility(a) => a.get_color(data),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnId;

impl EventColumnId {
    fn format<'a>(&self, event: &'a Event) -> Cow<'a, str> {
        format!("#{}", event.id).into()
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnTitle;

impl EventColumnTitle {
    fn format<'a>(&self, event: &'a Event) -> Cow<'a, str> {
        event.title.as_str().into()
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnTimeRange {
    tz: TimeZone,
}

impl EventColumnTimeRange {
    fn format<'a>(&self, event: &'a Event) -> Cow<'a, str> {
        let start = event.start.to_zoned(self.tz.clone());
        let end = event.end.to_zoned(self.tz.clone());
        let range = if start.date() == end.date() {
            format!(
                "{} {}~{}",
                start.strftime("%Y-%m-%d"),
                start.strftime("%H:%M"),
                end.strftime("%H:%M")
            )
        } else {
            format!(
                "{}~{}",
                format_display(event.start, &self.tz),
                format_display(event.end, &self.tz)
            )
        };
        range.into()
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnCreator;

impl EventColumnCreator {
    fn format<'a>(&self, event: &'a Event) -> Cow<'a, str> {
        match event.created_by.username.as_str() {
            "" => event.created_by.id.as_str().into(),
            username => username.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnVisibility;

impl EventColumnVisibility {
    fn format<'a>(&self, event: &'a Event) -> Cow<'a, str> {
        Cow::Borrowed(if event.is_private { "Private" } else { "Public" })
    }

    fn get_color(&self, event: &Event) -> Option<Color> {
        event.is_private.then_some(Color::Yellow)
    }
}

#[derive(Debug, Clone)]
pub struct EventColumnExpired {
    now: Timestamp,
}

impl EventColumnExpired {
    fn format<'a>(&self, event: &'a Event) -> Cow<'a, str> {
        expired_marker(event.end, self.now).into()
    }

    fn get_color(&self, event: &Event) -> Option<Color> {
        event.is_expired(self.now).then_some(Color::Red)
    }
}

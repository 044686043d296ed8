// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;

use evdesk_graphql::EventInput;
use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::datetime::{format_input, parse_input};
use crate::error::FlowError;
use crate::event::Event;

/// An editable field of the event form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Start,
    End,
    Description,
    IsPrivate,
}

/// A validation failure attached to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message)
    }
}

const TITLE_REQUIRED: &str = "Title is required";
const START_REQUIRED: &str = "Start date is required";
const START_INVALID: &str = "Start date is invalid";
const END_REQUIRED: &str = "End date is required";
const END_INVALID: &str = "End date is invalid";
const END_BEFORE_START: &str = "End date must not be before start date";

/// Draft state of the title / start / end / description / visibility form.
///
/// Dates are kept as typed so invalid input can be shown back to the user;
/// they are parsed in the form's time zone when validated.
#[derive(Debug, Clone)]
pub struct EventBody {
    title: String,
    start: String,
    end: String,
    is_private: bool,
    description: String,
    read_only: bool,
    tz: TimeZone,
}

impl Default for EventBody {
    fn default() -> Self {
        Self::new(TimeZone::system())
    }
}

impl EventBody {
    /// An empty, editable draft interpreting dates in `tz`.
    pub fn new(tz: TimeZone) -> Self {
        Self {
            title: String::new(),
            start: String::new(),
            end: String::new(),
            is_private: false,
            description: String::new(),
            read_only: false,
            tz,
        }
    }

    /// A draft pre-filled from an existing event.
    pub fn from_event(event: &Event, tz: TimeZone) -> Self {
        Self {
            title: event.title.clone(),
            start: format_input(event.start, &tz),
            end: format_input(event.end, &tz),
            is_private: event.is_private,
            description: event.description.clone(),
            read_only: false,
            tz,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn is_private(&self) -> bool {
        self.is_private
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Locks or unlocks every field. Setters are ignored while locked.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Sets the title. Returns whether the value was applied.
    pub fn set_title(&mut self, value: impl Into<String>) -> bool {
        self.apply(|body| body.title = value.into())
    }

    /// Sets the raw start date. Returns whether the value was applied.
    pub fn set_start(&mut self, value: impl Into<String>) -> bool {
        self.apply(|body| body.start = value.into())
    }

    /// Sets the raw end date. Returns whether the value was applied.
    pub fn set_end(&mut self, value: impl Into<String>) -> bool {
        self.apply(|body| body.end = value.into())
    }

    /// Sets the visibility. Returns whether the value was applied.
    pub fn set_private(&mut self, value: bool) -> bool {
        self.apply(|body| body.is_private = value)
    }

    /// Sets the description. Returns whether the value was applied.
    pub fn set_description(&mut self, value: impl Into<String>) -> bool {
        self.apply(|body| body.description = value.into())
    }

    /// Empties every field, keeping the time zone and the lock.
    pub fn clear(&mut self) {
        self.title.clear();
        self.start.clear();
        self.end.clear();
        self.is_private = false;
        self.description.clear();
    }

    /// Checks the draft, returning every failure in field order.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError {
                field: Field::Title,
                message: TITLE_REQUIRED,
            });
        }

        let start = self.parse(Field::Start, &self.start, START_REQUIRED, START_INVALID);
        let end = self.parse(Field::End, &self.end, END_REQUIRED, END_INVALID);
        match (start, end) {
            (Ok(start), Ok(end)) if end < start => errors.push(FieldError {
                field: Field::End,
                message: END_BEFORE_START,
            }),
            (start, end) => errors.extend(start.err().into_iter().chain(end.err())),
        }
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// The first error reported for `field`, if any.
    pub fn error_for(&self, field: Field) -> Option<FieldError> {
        self.validate().into_iter().find(|e| e.field == field)
    }

    /// Builds the mutation input for the event with the given id.
    ///
    /// An empty `id` creates a new event.
    pub fn to_input(&self, id: &str) -> Result<EventInput, FlowError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(FlowError::InvalidDraft(errors));
        }

        // Both dates parsed during validation.
        let start = parse_input(&self.start, &self.tz).map_err(|_| invalid(Field::Start))?;
        let end = parse_input(&self.end, &self.tz).map_err(|_| invalid(Field::End))?;
        Ok(EventInput {
            id: id.to_string(),
            title: self.title.clone(),
            start: start.to_string(),
            end: end.to_string(),
            is_private: self.is_private,
            description: self.description.clone(),
        })
    }

    fn apply(&mut self, f: impl FnOnce(&mut Self)) -> bool {
        if self.read_only {
            return false;
        }
        f(self);
        true
    }

    fn parse(
        &self,
        field: Field,
        value: &str,
        required: &'static str,
        invalid: &'static str,
    ) -> Result<Timestamp, FieldError> {
        if value.trim().is_empty() {
            return Err(FieldError {
                field,
                message: required,
            });
        }
        parse_input(value, &self.tz).map_err(|_| FieldError {
            field,
            message: invalid,
        })
    }
}

fn invalid(field: Field) -> FlowError {
    let message = match field {
        Field::Start => START_INVALID,
        _ => END_INVALID,
    };
    FlowError::InvalidDraft(vec![FieldError { field, message }])
}

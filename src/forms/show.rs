use chrono::NaiveDateTime;
use serde::Serialize;
use validator::{Validate, ValidationError};

use super::{field_error, required, FieldErrors, Form, FormData};
use crate::models::NewShow;

pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ACCEPTED_START_TIME_FORMATS: &[&str] = &[
    START_TIME_FORMAT,
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct ShowForm {
    #[validate(custom(function = "record_id"))]
    pub artist_id: String,
    #[validate(custom(function = "record_id"))]
    pub venue_id: String,
    #[validate(custom(function = "start_time"))]
    pub start_time: String,
}

impl ShowForm {
    pub fn from_data(data: &FormData) -> Self {
        ShowForm {
            artist_id: data.text("artist_id"),
            venue_id: data.text("venue_id"),
            start_time: data.text("start_time"),
        }
    }

    /// Empty form with the start time prefilled.
    pub fn blank(now: NaiveDateTime) -> Self {
        ShowForm {
            start_time: now.format(START_TIME_FORMAT).to_string(),
            ..Default::default()
        }
    }
}

impl Form for ShowForm {
    type Record = NewShow;
    const NAME: &'static str = "show";

    fn validate_record(&self) -> Result<NewShow, FieldErrors> {
        self.validate()?;

        match (
            parse_id(&self.artist_id),
            parse_id(&self.venue_id),
            parse_start_time(&self.start_time),
        ) {
            (Some(artist_id), Some(venue_id), Some(start_time)) => Ok(NewShow {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => Err(FieldErrors::single(Self::NAME, "Form could not be read.")),
        }
    }
}

fn parse_id(value: &str) -> Option<i32> {
    value.trim().parse::<i32>().ok().filter(|id| *id > 0)
}

fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    ACCEPTED_START_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

fn record_id(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    parse_id(value)
        .map(|_| ())
        .ok_or_else(|| field_error("integer", "Not a valid integer value."))
}

fn start_time(value: &str) -> Result<(), ValidationError> {
    required(value)?;
    parse_start_time(value)
        .map(|_| ())
        .ok_or_else(|| field_error("datetime", "Not a valid datetime value."))
}

//! Splitting a collection of shows into past and upcoming ones.
//!
//! The split is a pure function of the shows and a reference instant, so
//! it can be exercised without a database or an HTTP server.

use chrono::{NaiveDateTime, Utc};
use serde::Serialize;

/// The current instant as naive UTC, the form timestamps are stored in.
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Anything with a start time that can be placed before or after "now".
pub trait Scheduled {
    fn start_time(&self) -> NaiveDateTime;
}

impl Scheduled for NaiveDateTime {
    fn start_time(&self) -> NaiveDateTime {
        *self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partition<T> {
    pub past: Vec<T>,
    pub upcoming: Vec<T>,
}

impl<T> Default for Partition<T> {
    fn default() -> Self {
        Self {
            past: Vec::new(),
            upcoming: Vec::new(),
        }
    }
}

/// A show starting strictly before `now` is past; one starting at or after
/// `now` is upcoming. Input order is kept within each half.
pub fn partition<T, I>(shows: I, now: NaiveDateTime) -> Partition<T>
where
    T: Scheduled,
    I: IntoIterator<Item = T>,
{
    let (past, upcoming) = shows
        .into_iter()
        .partition(|show| show.start_time() < now);

    Partition { past, upcoming }
}

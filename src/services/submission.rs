//! submission.rs
//!
//! Creating venues, artists and shows from submitted forms.
//!
//! A submission moves `Received → Validated → Committed | RolledBack`, or
//! stops at `Rejected` when a field rule fails. A rejected submission never
//! opens a transaction. A validated one is written inside exactly one
//! transaction that is either committed or rolled back in full; the
//! transaction handle is consumed on both paths, which releases its
//! connection.
//!
//! Storage is reached through [`Store`] and [`StoreTransaction`], so the
//! whole flow runs against an in-memory store in tests.

use std::future::Future;
use tracing::{debug, error, info, warn};

use crate::forms::{FieldErrors, Form};
use crate::models::{NewArtist, NewShow, NewVenue};

/// Opens write transactions.
pub trait Store: Sync {
    type Tx: StoreTransaction;

    fn begin(&self) -> impl Future<Output = Result<Self::Tx, sqlx::Error>> + Send;

    fn tracks_modifications(&self) -> bool {
        false
    }
}

/// One open write transaction. `commit` and `rollback` consume it.
pub trait StoreTransaction: Send {
    fn insert_venue(&mut self, venue: &NewVenue) -> impl Future<Output = Result<i32, sqlx::Error>> + Send;

    fn insert_artist(&mut self, artist: &NewArtist) -> impl Future<Output = Result<i32, sqlx::Error>> + Send;

    fn insert_show(&mut self, show: &NewShow) -> impl Future<Output = Result<i32, sqlx::Error>> + Send;

    fn commit(self) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    fn rollback(self) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}

/// A validated record that knows how to insert itself.
pub trait Record: Send + Sync {
    const KIND: &'static str;

    fn insert<T: StoreTransaction>(&self, tx: &mut T) -> impl Future<Output = Result<i32, sqlx::Error>> + Send;
}

impl Record for NewVenue {
    const KIND: &'static str = "Venue";

    fn insert<T: StoreTransaction>(&self, tx: &mut T) -> impl Future<Output = Result<i32, sqlx::Error>> + Send {
        tx.insert_venue(self)
    }
}

impl Record for NewArtist {
    const KIND: &'static str = "Artist";

    fn insert<T: StoreTransaction>(&self, tx: &mut T) -> impl Future<Output = Result<i32, sqlx::Error>> + Send {
        tx.insert_artist(self)
    }
}

impl Record for NewShow {
    const KIND: &'static str = "Show";

    fn insert<T: StoreTransaction>(&self, tx: &mut T) -> impl Future<Output = Result<i32, sqlx::Error>> + Send {
        tx.insert_show(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Received,
    Validated,
    Committed,
    RolledBack,
    Rejected,
}

/// Terminal state of a submission.
#[derive(Debug)]
pub enum Outcome {
    Committed { id: i32 },
    Rejected(FieldErrors),
    RolledBack(sqlx::Error),
}

impl Outcome {
    pub fn state(&self) -> SubmissionState {
        match self {
            Outcome::Committed { .. } => SubmissionState::Committed,
            Outcome::Rejected(_) => SubmissionState::Rejected,
            Outcome::RolledBack(_) => SubmissionState::RolledBack,
        }
    }
}

pub async fn submit<S, F>(store: &S, form: &F) -> Outcome
where
    S: Store,
    F: Form + Sync,
{
    debug!(form = F::NAME, state = ?SubmissionState::Received, "submission received");

    let record = match form.validate_record() {
        Ok(record) => record,
        Err(errors) => {
            info!(
                form = F::NAME,
                state = ?SubmissionState::Rejected,
                fields = ?errors.fields().collect::<Vec<_>>(),
                "submission rejected"
            );
            return Outcome::Rejected(errors);
        }
    };
    debug!(form = F::NAME, state = ?SubmissionState::Validated, "submission validated");

    match persist(store, &record).await {
        Ok(id) => {
            info!(form = F::NAME, state = ?SubmissionState::Committed, id, "submission committed");
            if store.tracks_modifications() {
                info!(target: "fyyur::modifications", kind = <F::Record as Record>::KIND, id, "insert");
            }
            Outcome::Committed { id }
        }
        Err(e) => {
            error!(form = F::NAME, state = ?SubmissionState::RolledBack, "submission failed: {}", e);
            Outcome::RolledBack(e)
        }
    }
}

/// Inserts `record` in its own transaction. Any failure after `begin`
/// rolls the transaction back before the error is returned.
pub async fn persist<S, R>(store: &S, record: &R) -> Result<i32, sqlx::Error>
where
    S: Store,
    R: Record,
{
    let mut tx = store.begin().await?;

    match record.insert(&mut tx).await {
        Ok(id) => {
            // A failed commit leaves nothing behind
            tx.commit().await?;
            Ok(id)
        }
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("rollback failed, connection will be discarded: {}", rollback_err);
            }
            Err(e)
        }
    }
}

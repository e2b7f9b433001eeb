use std::io;
use thiserror::Error;

mod row;
mod store;
pub use row::*;
pub use store::*;

use crate::matcher::MatchResult;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Turns match results into rows and hands them to the injected store.
pub struct MatchRecorder<S: MatchStore> {
    store: S,
}

impl<S: MatchStore> MatchRecorder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Records `result`. Returns `false` when an identical
    /// `(address, latitude, longitude)` row was already present.
    pub fn record(&mut self, result: &MatchResult) -> bool {
        self.store.upsert(MatchRow::from(result))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

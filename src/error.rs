// Errors shared across the crate.

use std::fmt::Display;

use thiserror::Error;

use crate::competition::Format;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
#[derive(Clone, PartialEq)]
pub enum Error {
    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("no scoring algorithm for {0:?} competitions")]
    UnsupportedFormat(Format),
}

impl Error {
    // Build a NotFound error from an entity name and its ID.
    pub fn not_found<T: Display>(what: &str, id: T) -> Self {
        Error::NotFound(format!("{what} {id}"))
    }
}

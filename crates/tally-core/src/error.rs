//! Error types for `tally-core`.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("Case does not exist")]
  CaseNotFound,

  #[error("{0} is required")]
  MissingField(&'static str),

  #[error("a case is already recorded for date {0}")]
  DuplicateDate(DateTime<Utc>),
}

impl Error {
  /// The HTTP status code a consumer should answer with.
  pub fn status(&self) -> u16 {
    match self {
      Self::CaseNotFound => 404,
      Self::MissingField(_) => 400,
      Self::DuplicateDate(_) => 409,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

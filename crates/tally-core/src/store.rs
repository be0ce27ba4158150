//! The `CaseStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `tally-store-sqlite`).
//! The read helpers in [`crate::query`] are written against this abstraction,
//! not against any concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  Error,
  case::{CaseId, CaseRecord, NewCase},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Field-equality constraints for [`CaseStore::find_cases`]. `None` fields
/// add no constraint; the default filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseFilter {
  pub location: Option<String>,
  pub date:     Option<DateTime<Utc>>,
}

impl CaseFilter {
  pub fn is_empty(&self) -> bool { self.location.is_none() && self.date.is_none() }

  pub fn matches(&self, record: &CaseRecord) -> bool {
    self.location.as_ref().is_none_or(|l| *l == record.location)
      && self.date.is_none_or(|d| d == record.date)
  }
}

/// A skip/limit window over a sorted result sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
  pub skip:  u64,
  pub limit: u64,
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Bound satisfied by every backend error type.
///
/// Backends wrap [`Error`] so that domain failures (not found, duplicate
/// date) surface through the same type as infrastructure failures.
pub trait StoreError: std::error::Error + From<Error> + Send + Sync + 'static {
  /// The wrapped core error, if this is one.
  fn as_core(&self) -> Option<&Error>;

  /// HTTP-style status for this error; infrastructure failures are 500.
  fn status(&self) -> u16 { self.as_core().map_or(500, Error::status) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a case store backend.
///
/// Records are insert-only. All methods return `Send` futures so the trait
/// can be used in multi-threaded async runtimes.
pub trait CaseStore: Send + Sync {
  type Error: StoreError;

  /// Validate and persist a new record. The store assigns the identifier and
  /// both timestamps.
  ///
  /// Fails with [`Error::DuplicateDate`] if a record with the same `date`
  /// already exists.
  fn insert_case(
    &self,
    input: NewCase,
  ) -> impl Future<Output = Result<CaseRecord, Self::Error>> + Send + '_;

  /// Retrieve a record by identifier. Returns `None` if not found.
  fn find_case(
    &self,
    id: CaseId,
  ) -> impl Future<Output = Result<Option<CaseRecord>, Self::Error>> + Send + '_;

  /// Return records matching `filter`, most recently created first, with
  /// `window` applied after sorting. `None` returns every match.
  fn find_cases<'a>(
    &'a self,
    filter: &'a CaseFilter,
    window: Option<Window>,
  ) -> impl Future<Output = Result<Vec<CaseRecord>, Self::Error>> + Send + 'a;
}

//! Case records — one day's case counts for one location.
//!
//! Records are created by the store and never updated in place. `created_at`
//! and `updated_at` are assigned by the store on write.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Identifier ──────────────────────────────────────────────────────────────

/// Store-assigned identifier of a [`CaseRecord`].
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct CaseId(Uuid);

impl CaseId {
  /// A fresh random identifier.
  pub fn new() -> Self { Self(Uuid::new_v4()) }

  /// Parse an identifier supplied from outside, e.g. a URL path segment.
  /// Returns `None` if `s` is not syntactically a valid identifier.
  pub fn parse(s: &str) -> Option<Self> { s.parse().ok() }

  pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl Default for CaseId {
  fn default() -> Self { Self::new() }
}

impl From<Uuid> for CaseId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl FromStr for CaseId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(Self(Uuid::parse_str(s)?)) }
}

impl fmt::Display for CaseId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0.hyphenated(), f)
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A persisted case-count entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
  pub id:                  CaseId,
  pub number_of_case:      i64,
  pub number_of_death:     i64,
  pub number_of_recovered: i64,
  pub location:            String,
  /// The day these counts describe. Unique across all records.
  pub date:                DateTime<Utc>,
  pub created_at:          DateTime<Utc>,
  pub updated_at:          DateTime<Utc>,
}

/// Input for [`CaseStore::insert_case`](crate::store::CaseStore::insert_case).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCase {
  pub number_of_case:      i64,
  pub number_of_death:     i64,
  pub number_of_recovered: i64,
  pub location:            String,
  pub date:                DateTime<Utc>,
}

impl NewCase {
  /// Check the fields the type system cannot. An empty `location` counts as
  /// missing.
  pub fn validate(&self) -> Result<()> {
    if self.location.trim().is_empty() {
      return Err(Error::MissingField("location"));
    }
    Ok(())
  }

  /// Build the stored record, stamping both timestamps with `now`.
  pub fn into_record(self, id: CaseId, now: DateTime<Utc>) -> CaseRecord {
    CaseRecord {
      id,
      number_of_case: self.number_of_case,
      number_of_death: self.number_of_death,
      number_of_recovered: self.number_of_recovered,
      location: self.location,
      date: self.date,
      created_at: now,
      updated_at: now,
    }
  }
}

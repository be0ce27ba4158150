//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 UTC strings with nanosecond
//! precision and a `Z` suffix. Identifiers are hyphenated lowercase UUIDs.

use chrono::{DateTime, SecondsFormat, Utc};
use tally_core::{CaseId, CaseRecord};

use crate::{Error, Result};

// ─── CaseId ──────────────────────────────────────────────────────────────────

pub fn encode_id(id: CaseId) -> String { id.to_string() }

pub fn decode_id(s: &str) -> Result<CaseId> { Ok(s.parse()?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// Fixed-width so that lexical order on the column equals time order.
pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawCase::from_row`].
pub const CASE_COLUMNS: &str = "case_id, number_of_case, number_of_death, \
                                number_of_recovered, location, date, \
                                created_at, updated_at";

/// Raw values read directly from a `cases` row.
pub struct RawCase {
  pub case_id:             String,
  pub number_of_case:      i64,
  pub number_of_death:     i64,
  pub number_of_recovered: i64,
  pub location:            String,
  pub date:                String,
  pub created_at:          String,
  pub updated_at:          String,
}

impl RawCase {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawCase {
      case_id:             row.get(0)?,
      number_of_case:      row.get(1)?,
      number_of_death:     row.get(2)?,
      number_of_recovered: row.get(3)?,
      location:            row.get(4)?,
      date:                row.get(5)?,
      created_at:          row.get(6)?,
      updated_at:          row.get(7)?,
    })
  }

  pub fn into_record(self) -> Result<CaseRecord> {
    Ok(CaseRecord {
      id:                  decode_id(&self.case_id)?,
      number_of_case:      self.number_of_case,
      number_of_death:     self.number_of_death,
      number_of_recovered: self.number_of_recovered,
      location:            self.location,
      date:                decode_dt(&self.date)?,
      created_at:          decode_dt(&self.created_at)?,
      updated_at:          decode_dt(&self.updated_at)?,
    })
  }
}

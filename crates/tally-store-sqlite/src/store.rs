//! [`SqliteStore`] — the SQLite implementation of [`CaseStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tally_core::{
  CaseFilter, CaseId, CaseRecord, CaseStore, NewCase, Window,
};

use crate::{
  Result, StoreConfig,
  encode::{CASE_COLUMNS, RawCase, encode_dt, encode_id},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Tally case store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "opening case store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open the store described by `config`.
  pub async fn from_config(config: &StoreConfig) -> Result<Self> {
    if config.is_in_memory() {
      Self::open_in_memory().await
    } else {
      Self::open(&config.path).await
    }
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CaseStore impl ──────────────────────────────────────────────────────────

impl CaseStore for SqliteStore {
  type Error = crate::Error;

  async fn insert_case(&self, input: NewCase) -> Result<CaseRecord> {
    input.validate()?;
    let record = input.into_record(CaseId::new(), Utc::now());

    let id_str       = encode_id(record.id);
    let date_str     = encode_dt(record.date);
    let created_str  = encode_dt(record.created_at);
    let updated_str  = encode_dt(record.updated_at);
    let location     = record.location.clone();
    let (cases, deaths, recovered) = (
      record.number_of_case,
      record.number_of_death,
      record.number_of_recovered,
    );

    let inserted = self
      .conn
      .call(move |conn| {
        let res = conn.execute(
          "INSERT INTO cases (
             case_id, number_of_case, number_of_death, number_of_recovered,
             location, date, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            cases,
            deaths,
            recovered,
            location,
            date_str,
            created_str,
            updated_str,
          ],
        );
        match res {
          Ok(_) => Ok(true),
          Err(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
          {
            Ok(false)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if !inserted {
      tracing::warn!(date = %record.date, "rejected case with duplicate date");
      return Err(tally_core::Error::DuplicateDate(record.date).into());
    }

    tracing::debug!(id = %record.id, date = %record.date, "inserted case");
    Ok(record)
  }

  async fn find_case(&self, id: CaseId) -> Result<Option<CaseRecord>> {
    let id_str = encode_id(id);

    let raw: Option<RawCase> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CASE_COLUMNS} FROM cases WHERE case_id = ?1"),
              rusqlite::params![id_str],
              RawCase::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    tracing::debug!(%id, found = raw.is_some(), "looked up case");
    raw.map(RawCase::into_record).transpose()
  }

  async fn find_cases(
    &self,
    filter: &CaseFilter,
    window: Option<Window>,
  ) -> Result<Vec<CaseRecord>> {
    let location = filter.location.clone();
    let date_str = filter.date.map(encode_dt);
    // SQLite takes -1 as "no limit".
    let (limit_val, offset_val) = match window {
      Some(w) => (
        i64::try_from(w.limit).unwrap_or(i64::MAX),
        i64::try_from(w.skip).unwrap_or(i64::MAX),
      ),
      None => (-1, 0),
    };

    let raws: Vec<RawCase> = self
      .conn
      .call(move |conn| {
        // Build WHERE clause from the present filter fields only.
        let mut conds: Vec<&'static str> = vec![];
        if location.is_some() {
          conds.push("location = ?1");
        }
        if date_str.is_some() {
          conds.push("date = ?2");
        }

        let where_clause = if conds.is_empty() {
          String::new()
        } else {
          format!("WHERE {}", conds.join(" AND "))
        };

        let sql = format!(
          "SELECT {CASE_COLUMNS}
           FROM cases
           {where_clause}
           ORDER BY created_at DESC, rowid DESC
           LIMIT ?3 OFFSET ?4"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![
              location.as_deref(),
              date_str.as_deref(),
              limit_val,
              offset_val,
            ],
            RawCase::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    tracing::debug!(?filter, ?window, rows = raws.len(), "listed cases");
    raws.into_iter().map(RawCase::into_record).collect()
  }
}

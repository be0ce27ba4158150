//! Read helpers over any [`CaseStore`]: fetch one record by identifier and
//! list records with equality filters and page-based pagination.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::{
  Error,
  case::{CaseId, CaseRecord},
  store::{CaseFilter, CaseStore, Window},
};

/// Records per page when the caller does not say.
pub const DEFAULT_PER_PAGE: i64 = 30;

// ─── List parameters ─────────────────────────────────────────────────────────

/// Parameters for [`list`]. Deserializes from camelCase query strings
/// (`?page=2&perPage=10&location=...`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListQuery {
  /// 1-based page number. Values below 1 are treated as 1.
  pub page:     u64,
  /// Page size. Zero or negative disables pagination.
  pub per_page: i64,
  pub location: Option<String>,
  pub date:     Option<DateTime<Utc>>,
}

impl Default for ListQuery {
  fn default() -> Self {
    Self { page: 1, per_page: DEFAULT_PER_PAGE, location: None, date: None }
  }
}

impl ListQuery {
  /// The equality filter built from whichever optional fields are present.
  pub fn filter(&self) -> CaseFilter {
    CaseFilter { location: self.location.clone(), date: self.date }
  }

  /// The skip/limit window for this page, or `None` when pagination is off.
  pub fn window(&self) -> Option<Window> {
    if self.per_page <= 0 {
      return None;
    }
    let limit = self.per_page as u64;
    let skip = limit.saturating_mul(self.page.max(1) - 1);
    Some(Window { skip, limit })
  }
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// Fetch the record identified by `id`.
///
/// An `id` that is not a valid identifier is never sent to the store; it
/// fails the same way as a well-formed identifier with no match.
pub async fn get<S>(store: &S, id: &str) -> Result<CaseRecord, S::Error>
where
  S: CaseStore,
{
  let Some(case_id) = CaseId::parse(id) else {
    tracing::debug!(id, "skipping lookup of malformed case id");
    return Err(Error::CaseNotFound.into());
  };

  store
    .find_case(case_id)
    .await?
    .ok_or_else(|| Error::CaseNotFound.into())
}

/// List records matching `query`, most recently created first.
pub async fn list<S>(store: &S, query: &ListQuery) -> Result<Vec<CaseRecord>, S::Error>
where
  S: CaseStore,
{
  let filter = query.filter();
  store.find_cases(&filter, query.window()).await
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use chrono::TimeZone;

  use super::*;
  use crate::{case::NewCase, store::StoreError};

  // A minimal in-process store so the helpers can be tested without a
  // database backend.

  #[derive(Debug, thiserror::Error)]
  enum MemError {
    #[error(transparent)]
    Core(#[from] Error),
  }

  impl StoreError for MemError {
    fn as_core(&self) -> Option<&Error> {
      let Self::Core(e) = self;
      Some(e)
    }
  }

  #[derive(Default)]
  struct MemStore {
    rows:    Mutex<Vec<CaseRecord>>,
    lookups: Mutex<usize>,
  }

  impl CaseStore for MemStore {
    type Error = MemError;

    async fn insert_case(&self, input: NewCase) -> Result<CaseRecord, MemError> {
      input.validate()?;
      let mut rows = self.rows.lock().unwrap();
      if rows.iter().any(|r| r.date == input.date) {
        return Err(Error::DuplicateDate(input.date).into());
      }
      let record = input.into_record(CaseId::new(), Utc::now());
      rows.push(record.clone());
      Ok(record)
    }

    async fn find_case(&self, id: CaseId) -> Result<Option<CaseRecord>, MemError> {
      *self.lookups.lock().unwrap() += 1;
      Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_cases(
      &self,
      filter: &CaseFilter,
      window: Option<Window>,
    ) -> Result<Vec<CaseRecord>, MemError> {
      let rows = self.rows.lock().unwrap();
      // Newest insert last in `rows`.
      let matched = rows.iter().rev().filter(|r| filter.matches(r)).cloned();
      Ok(match window {
        Some(w) => matched.skip(w.skip as usize).take(w.limit as usize).collect(),
        None => matched.collect(),
      })
    }
  }

  fn day(d: u32) -> DateTime<Utc> { Utc.with_ymd_and_hms(2020, 4, d, 0, 0, 0).unwrap() }

  fn new_case(location: &str, d: u32) -> NewCase {
    NewCase {
      number_of_case:      10 * d as i64,
      number_of_death:     d as i64,
      number_of_recovered: 2 * d as i64,
      location:            location.into(),
      date:                day(d),
    }
  }

  #[test]
  fn defaults_are_first_page_of_thirty() {
    let q = ListQuery::default();
    assert_eq!(q.page, 1);
    assert_eq!(q.per_page, 30);
    assert_eq!(q.window(), Some(Window { skip: 0, limit: 30 }));
    assert!(q.filter().is_empty());
  }

  #[test]
  fn window_skips_previous_pages() {
    let q = ListQuery { page: 3, per_page: 10, ..Default::default() };
    assert_eq!(q.window(), Some(Window { skip: 20, limit: 10 }));
  }

  #[test]
  fn window_treats_page_zero_as_first() {
    let q = ListQuery { page: 0, per_page: 5, ..Default::default() };
    assert_eq!(q.window(), Some(Window { skip: 0, limit: 5 }));
  }

  #[test]
  fn non_positive_per_page_disables_pagination() {
    for per_page in [0, -1, -30] {
      let q = ListQuery { page: 4, per_page, ..Default::default() };
      assert_eq!(q.window(), None);
    }
  }

  #[test]
  fn filter_keeps_only_present_fields() {
    let q = ListQuery { location: Some("Lyon".into()), ..Default::default() };
    let f = q.filter();
    assert_eq!(f.location.as_deref(), Some("Lyon"));
    assert!(f.date.is_none());
  }

  #[test]
  fn deserializes_camel_case_with_defaults() {
    let q: ListQuery = serde_json::from_str(r#"{"perPage":10,"location":"Lyon"}"#).unwrap();
    assert_eq!(q.page, 1);
    assert_eq!(q.per_page, 10);
    assert_eq!(q.location.as_deref(), Some("Lyon"));
  }

  #[tokio::test]
  async fn get_malformed_id_skips_store() {
    let store = MemStore::default();
    store.insert_case(new_case("Lyon", 1)).await.unwrap();

    let err = get(&store, "definitely-not-an-id").await.unwrap_err();
    assert!(matches!(err, MemError::Core(Error::CaseNotFound)));
    assert_eq!(err.status(), 404);
    assert_eq!(*store.lookups.lock().unwrap(), 0);
  }

  #[tokio::test]
  async fn get_unknown_id_is_not_found() {
    let store = MemStore::default();
    let err = get(&store, &CaseId::new().to_string()).await.unwrap_err();
    assert!(matches!(err, MemError::Core(Error::CaseNotFound)));
    assert_eq!(*store.lookups.lock().unwrap(), 1);
  }

  #[tokio::test]
  async fn get_returns_matching_record() {
    let store = MemStore::default();
    let stored = store.insert_case(new_case("Lyon", 1)).await.unwrap();
    store.insert_case(new_case("Lyon", 2)).await.unwrap();

    let fetched = get(&store, &stored.id.to_string()).await.unwrap();
    assert_eq!(fetched, stored);
  }

  #[tokio::test]
  async fn list_passes_filter_and_window_through() {
    let store = MemStore::default();
    for d in 1..=5 {
      store.insert_case(new_case(if d % 2 == 0 { "Lyon" } else { "Nice" }, d)).await.unwrap();
    }

    let q = ListQuery { location: Some("Nice".into()), per_page: 2, ..Default::default() };
    let page = list(&store, &q).await.unwrap();
    let days: Vec<_> = page.iter().map(|r| r.date).collect();
    assert_eq!(days, vec![day(5), day(3)]);
  }
}

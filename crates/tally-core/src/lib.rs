//! Core types and trait definitions for the Tally case store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::CaseStore`]; consumers go through the
//! read helpers in [`query`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod case;
pub mod error;
pub mod query;
pub mod store;

pub use case::{CaseId, CaseRecord, NewCase};
pub use error::{Error, Result};
pub use query::{ListQuery, get, list};
pub use store::{CaseFilter, CaseStore, StoreError, Window};

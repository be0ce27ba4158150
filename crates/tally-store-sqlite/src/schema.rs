//! SQL schema for the Tally SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout so later migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Records are insert-only.
-- Timestamps are fixed-width RFC 3339 UTC, so text order is time order.
CREATE TABLE IF NOT EXISTS cases (
    case_id             TEXT PRIMARY KEY,
    number_of_case      INTEGER NOT NULL,
    number_of_death     INTEGER NOT NULL,
    number_of_recovered INTEGER NOT NULL,
    location            TEXT NOT NULL CHECK (location != ''),
    date                TEXT NOT NULL UNIQUE,
    created_at          TEXT NOT NULL,   -- server-assigned
    updated_at          TEXT NOT NULL    -- server-assigned
);

CREATE INDEX IF NOT EXISTS cases_location_idx ON cases(location);
CREATE INDEX IF NOT EXISTS cases_created_idx  ON cases(created_at);

PRAGMA user_version = 1;
";

//! Store configuration, read from an optional TOML file layered with
//! `TALLY_`-prefixed environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;

/// Path value that selects an in-memory database.
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
  /// SQLite database file, or `:memory:`.
  pub path: PathBuf,
}

impl Default for StoreConfig {
  fn default() -> Self { Self { path: PathBuf::from("tally.db") } }
}

impl StoreConfig {
  /// Load from `file` (if it exists) and the environment, e.g.
  /// `TALLY_PATH=/var/lib/tally.db`. Missing keys fall back to
  /// [`StoreConfig::default`].
  pub fn load(file: impl AsRef<Path>) -> Result<Self> {
    let defaults = Self::default();
    let settings = config::Config::builder()
      .set_default("path", defaults.path.to_string_lossy().into_owned())?
      .add_source(config::File::from(file.as_ref()).required(false))
      .add_source(config::Environment::with_prefix("TALLY"))
      .build()?;

    Ok(settings.try_deserialize()?)
  }

  pub fn is_in_memory(&self) -> bool { self.path.as_os_str() == IN_MEMORY }
}

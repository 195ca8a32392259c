//! Error type for `lause-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// The bundled (or caller-supplied) seed dataset could not be parsed.
  #[error("seed dataset error: {0}")]
  Seed(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

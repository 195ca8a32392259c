//! Error types for `lause-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The remote backend reported an entity kind outside the wire
  /// contract. This is a hard failure: no caller can recover from a
  /// contract mismatch.
  #[error("unknown word kind on the wire: {0:?}")]
  UnknownWordKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Error type for `lause-store-api`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A response body that could not be parsed against the wire contract.
  /// Unlike transport failures, this does not degrade: it means the
  /// backend changed under us.
  #[error("wire contract mismatch: {0}")]
  Contract(String),

  /// An unrecognised entity kind on the wire (also a contract mismatch).
  #[error(transparent)]
  Core(#[from] lause_core::Error),

  /// A write could not reach the backend. Reads never surface this; they
  /// degrade to empty results instead.
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The collection has no remote resource (answer history is
  /// local-only).
  #[error("collection {0:?} is not available on the remote backend")]
  Unsupported(lause_core::record::Collection),

  /// The backend could not be reached at initialise time. The adapter
  /// manager treats this as a missing backend.
  #[error("remote backend unavailable: {0}")]
  Unavailable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

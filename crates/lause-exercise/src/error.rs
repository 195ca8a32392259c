//! Error type for `lause-exercise`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A store method was called before [`crate::StoreManager::initialize`]
  /// succeeded.
  #[error("no storage backend selected; call initialize first")]
  NotInitialized,

  #[error(transparent)]
  Embedded(#[from] lause_store_sqlite::Error),

  #[error(transparent)]
  Remote(#[from] lause_store_api::Error),

  #[error("config error: {0}")]
  Config(#[from] config::ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

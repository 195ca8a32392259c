//! Embedded SQLite backend for the lause word store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Owns the destructive seed
//! import from the bundled Finnish dataset.

mod schema;
mod store;

pub mod error;
pub mod seed;

pub use error::{Error, Result};
pub use store::{SqliteStore, supports_embedded_storage};

#[cfg(test)]
mod tests;

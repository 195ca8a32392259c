//! REST backend for the lause word store.
//!
//! Implements [`lause_core::WordStore`] over the app's JSON API.
//! Transport failures on reads degrade to empty results so screens can
//! render their own empty states without per-call error handling; a
//! response body that does not match the wire contract fails loudly.

mod store;
mod wire;

pub mod error;

pub use error::{Error, Result};
pub use store::ApiStore;

#[cfg(test)]
mod tests;

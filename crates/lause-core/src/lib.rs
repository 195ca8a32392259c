//! Core types and trait definition for the lause word store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Both storage backends and the exercise layer depend on it; it depends
//! on nothing heavier than serde.

pub mod error;
pub mod record;
pub mod store;
pub mod trio;
pub mod word;

pub use error::{Error, Result};
pub use record::{Collection, Filter, Id, Patch, Record};
pub use store::WordStore;

//! Exercise layer for lause: backend selection, typed entity
//! controllers, and the exercise-selection service.
//!
//! The [`StoreManager`] picks a storage backend (embedded SQLite when the
//! device supports it, the remote REST service otherwise), the
//! controllers in [`controllers`] give each entity a typed API over the
//! store contract, and [`ExerciseService`] walks a learner through the
//! verbs of a difficulty group.

pub mod controllers;
pub mod error;
pub mod exercise;
pub mod manager;
pub mod settings;

pub use error::{Error, Result};
pub use exercise::{ExerciseService, Round, Session};
pub use manager::{Backend, StoreManager};
pub use settings::{BackendChoice, Settings};

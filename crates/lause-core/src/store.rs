//! The [`WordStore`] trait — the contract every storage backend
//! implements.
//!
//! Implemented by `lause-store-sqlite` (embedded, on-device) and
//! `lause-store-api` (remote REST). Higher layers — the per-entity
//! controllers and the exercise-selection service — depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::record::{Collection, Filter, Id, Patch, Record};

/// Abstraction over a lause storage backend.
///
/// Each call is atomic at the single-record level; callers that need
/// sequencing ("insert then read back") must await each call rather than
/// fire concurrent requests. Returned records are always owned copies.
///
/// All methods return `Send` futures so the trait can be used on
/// multi-threaded async runtimes.
pub trait WordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Prepare the backing store for use. Must complete (or fail) before
  /// any other method is called; idempotent after the first successful
  /// call within a process lifetime.
  ///
  /// A failure here means the backend is unavailable and is the adapter
  /// manager's cue to fall back.
  fn initialize(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All records of `collection` matching every set field of `filter`
  /// (exact equality, conjunctive AND). The default filter matches
  /// everything; "no data" is an empty vec, never an error.
  fn query(
    &self,
    collection: Collection,
    filter: &Filter,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send;

  /// The record with the given primary key, or `None` if absent.
  fn find_by_id(
    &self,
    collection: Collection,
    id: Id,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + '_;

  /// Add `record` to its collection, replacing any existing record with
  /// the same primary key. Returns the stored copy.
  fn insert(
    &self,
    record: Record,
  ) -> impl Future<Output = Result<Record, Self::Error>> + Send + '_;

  /// Merge `patch` onto the record with the given id. Returns the
  /// updated copy, or `None` if no such record exists.
  fn update(
    &self,
    collection: Collection,
    id: Id,
    patch: Patch,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + '_;

  /// Remove the record with the given id; `true` iff something was
  /// actually removed.
  fn delete(
    &self,
    collection: Collection,
    id: Id,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Whether `(agent, verb, patient)` forms a grammatically valid
  /// sentence.
  ///
  /// This is part of the contract because the backends answer it
  /// differently: the embedded store checks its trio set, the remote
  /// store asks the validation endpoint (the source of truth on that
  /// path).
  fn is_valid_combination(
    &self,
    agent_id: Id,
    verb_id: Id,
    patient_id: Id,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

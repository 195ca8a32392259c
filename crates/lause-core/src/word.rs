//! Word entities — the vocabulary the exercises are built from.
//!
//! A verb belongs to exactly one group (a thematic/difficulty partition);
//! agents and patients carry no group and are shared freely across verbs.

use serde::{Deserialize, Serialize};

use crate::record::Id;

/// A verb, the pivot of every exercise round.
///
/// Created during seeding or remote insert; immutable in the normal
/// exercise flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verb {
  pub id:       Id,
  pub value:    String,
  /// Thematic/difficulty partition. Every trio built on this verb
  /// carries the same group id.
  pub group_id: Id,
}

/// A grammatical subject ("minä", "äiti", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
  pub id:    Id,
  pub value: String,
}

/// A grammatical object ("omenaa", "kirjaa", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
  pub id:    Id,
  pub value: String,
}

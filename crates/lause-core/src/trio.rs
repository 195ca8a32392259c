//! The trio join entity and the answer-history record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::Id;

/// Asserts that (agent, verb, patient) forms a grammatically valid
/// sentence.
///
/// References are by id, not owning pointers, and may dangle: cross-backend
/// consistency is not transactionally enforced, so consumers skip
/// unresolvable references rather than fail on them. `group_id` is
/// denormalised from the verb for query convenience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trio {
  pub id:         Id,
  pub verb_id:    Id,
  pub agent_id:   Id,
  pub patient_id: Id,
  pub group_id:   Id,
}

/// Records one successfully completed trio.
///
/// Consumed only by the history/progress screens; the exercise flow writes
/// these but never reads them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectAnswer {
  pub id:         Id,
  pub trio_id:    Id,
  pub created_at: DateTime<Utc>,
}

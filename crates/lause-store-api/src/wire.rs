//! Wire shapes of the REST backend and their mapping onto the entity
//! model.
//!
//! The wire speaks in `{success, data}` envelopes and a flat word table
//! discriminated by an upper-case `type` string; combinations nest their
//! referenced words. All mapping lives here so the store can stay about
//! transport and degrade policy.

use serde::{Deserialize, Serialize};

use lause_core::{
  Error as CoreError, Record,
  record::Id,
  trio::Trio,
  word::{Agent, Patient, Verb},
};

// ─── Envelope ────────────────────────────────────────────────────────────────

/// Response envelope common to every endpoint. Single-record endpoints
/// return a single-element `data`.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
  pub success: bool,
  #[serde(default)]
  pub data:    Vec<T>,
}

// ─── Words ───────────────────────────────────────────────────────────────────

/// A word as the backend serialises it. `group_id` is present only on
/// verbs; extra fields (`created_at`, `sentence`) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WireWord {
  pub id:       Id,
  pub text:     String,
  #[serde(rename = "type")]
  pub kind:     String,
  pub group_id: Option<Id>,
}

/// Map a wire word onto the entity model. An unrecognised `type` is a
/// hard error: it means the backend contract changed under us, and no
/// caller can meaningfully recover.
pub fn word_to_record(word: WireWord) -> Result<Record, CoreError> {
  Ok(match word.kind.as_str() {
    "VERB" => Record::Verb(Verb {
      id:       word.id,
      value:    word.text,
      group_id: word.group_id.unwrap_or(0),
    }),
    "SUBJECT" => Record::Agent(Agent { id: word.id, value: word.text }),
    "OBJECT" => Record::Patient(Patient { id: word.id, value: word.text }),
    _ => return Err(CoreError::UnknownWordKind(word.kind)),
  })
}

/// Body of the word write endpoints.
#[derive(Debug, Serialize)]
pub struct WordUpload<'a> {
  pub id:   Id,
  pub text: &'a str,
  #[serde(rename = "type")]
  pub kind: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub group_id: Option<Id>,
}

/// The upload form of a word record, or `None` if `record` is not a word.
pub fn word_upload(record: &Record) -> Option<WordUpload<'_>> {
  Some(match record {
    Record::Verb(v) => WordUpload {
      id:       v.id,
      text:     &v.value,
      kind:     "VERB",
      group_id: Some(v.group_id),
    },
    Record::Agent(a) => WordUpload {
      id:       a.id,
      text:     &a.value,
      kind:     "SUBJECT",
      group_id: None,
    },
    Record::Patient(p) => WordUpload {
      id:       p.id,
      text:     &p.value,
      kind:     "OBJECT",
      group_id: None,
    },
    _ => return None,
  })
}

// ─── Combinations ────────────────────────────────────────────────────────────

/// A nested word reference inside a combination. Only the id matters;
/// the embedded text is display convenience for the admin page.
#[derive(Debug, Clone, Deserialize)]
pub struct WireRef {
  pub id: Id,
}

/// A combination as the backend serialises it.
#[derive(Debug, Clone, Deserialize)]
pub struct WireCombination {
  pub id:      Id,
  pub subject: WireRef,
  pub verb:    WireRef,
  pub object:  WireRef,
}

/// Flatten a wire combination to the local trio shape. The wire carries
/// no group, so the caller resolves `group_id` from the verb.
pub fn combination_to_trio(combo: WireCombination, group_id: Id) -> Trio {
  Trio {
    id:         combo.id,
    verb_id:    combo.verb.id,
    agent_id:   combo.subject.id,
    patient_id: combo.object.id,
    group_id,
  }
}

/// Body of the combination write endpoints.
#[derive(Debug, Serialize)]
pub struct CombinationUpload {
  pub id:         Id,
  pub subject_id: Id,
  pub verb_id:    Id,
  pub object_id:  Id,
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Body of `POST /api/suggestions/validate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequest {
  pub agent_id:   Id,
  pub verb_id:    Id,
  pub patient_id: Id,
}

/// One validation verdict. `sentence` and `message` exist on the wire but
/// only `valid` drives behaviour.
#[derive(Debug, Deserialize)]
pub struct WireValidation {
  pub valid: bool,
}

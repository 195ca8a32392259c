//! The type-erased face of the store contract.
//!
//! Backends speak in terms of [`Collection`] + [`Record`] so a single
//! contract covers all five entity shapes; the typed controllers unwrap
//! the variants they asked for. The variant set replaces the original
//! app's string `type` discriminator with exhaustive matching.

use serde::{Deserialize, Serialize};

use crate::{
  trio::{CorrectAnswer, Trio},
  word::{Agent, Patient, Verb},
};

/// Entity primary key. Non-negative, unique within a collection, assigned
/// `max(existing) + 1` at seed/insert time and stable for a session.
pub type Id = u32;

// ─── Collection ──────────────────────────────────────────────────────────────

/// The five entity stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
  Verbs,
  Agents,
  Patients,
  Trios,
  CorrectAnswers,
}

impl Collection {
  /// The backing table name used by the embedded store.
  pub fn table(&self) -> &'static str {
    match self {
      Self::Verbs => "verbs",
      Self::Agents => "agents",
      Self::Patients => "patients",
      Self::Trios => "trios",
      Self::CorrectAnswers => "correct_answers",
    }
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One stored entity of any shape.
///
/// Stores hand out owned values only, so a caller can never mutate backend
/// state through a returned record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "collection", content = "data", rename_all = "snake_case")]
pub enum Record {
  Verb(Verb),
  Agent(Agent),
  Patient(Patient),
  Trio(Trio),
  CorrectAnswer(CorrectAnswer),
}

impl Record {
  pub fn id(&self) -> Id {
    match self {
      Self::Verb(v) => v.id,
      Self::Agent(a) => a.id,
      Self::Patient(p) => p.id,
      Self::Trio(t) => t.id,
      Self::CorrectAnswer(c) => c.id,
    }
  }

  pub fn collection(&self) -> Collection {
    match self {
      Self::Verb(_) => Collection::Verbs,
      Self::Agent(_) => Collection::Agents,
      Self::Patient(_) => Collection::Patients,
      Self::Trio(_) => Collection::Trios,
      Self::CorrectAnswer(_) => Collection::CorrectAnswers,
    }
  }

  // ── Typed downcasts used by the controllers ───────────────────────────

  pub fn into_verb(self) -> Option<Verb> {
    match self {
      Self::Verb(v) => Some(v),
      _ => None,
    }
  }

  pub fn into_agent(self) -> Option<Agent> {
    match self {
      Self::Agent(a) => Some(a),
      _ => None,
    }
  }

  pub fn into_patient(self) -> Option<Patient> {
    match self {
      Self::Patient(p) => Some(p),
      _ => None,
    }
  }

  pub fn into_trio(self) -> Option<Trio> {
    match self {
      Self::Trio(t) => Some(t),
      _ => None,
    }
  }

  pub fn into_correct_answer(self) -> Option<CorrectAnswer> {
    match self {
      Self::CorrectAnswer(c) => Some(c),
      _ => None,
    }
  }
}

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Conjunctive exact-match filter for [`crate::store::WordStore::query`].
///
/// Every set field must match; a set field the record shape lacks matches
/// nothing. The default filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
  pub value:      Option<String>,
  pub group_id:   Option<Id>,
  pub verb_id:    Option<Id>,
  pub agent_id:   Option<Id>,
  pub patient_id: Option<Id>,
  pub trio_id:    Option<Id>,
}

impl Filter {
  pub fn by_value(value: impl Into<String>) -> Self {
    Self { value: Some(value.into()), ..Self::default() }
  }

  pub fn by_group(group_id: Id) -> Self {
    Self { group_id: Some(group_id), ..Self::default() }
  }

  pub fn by_verb(verb_id: Id) -> Self {
    Self { verb_id: Some(verb_id), ..Self::default() }
  }

  /// Matches the single trio with exactly this (agent, verb, patient).
  pub fn triple(agent_id: Id, verb_id: Id, patient_id: Id) -> Self {
    Self {
      agent_id: Some(agent_id),
      verb_id: Some(verb_id),
      patient_id: Some(patient_id),
      ..Self::default()
    }
  }

  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }

  /// Whether `record` satisfies every set field. Shared by both backends:
  /// the embedded store cross-checks its SQL translation against this in
  /// tests, the remote store applies it to fetched lists.
  pub fn matches(&self, record: &Record) -> bool {
    if let Some(value) = &self.value {
      let got = match record {
        Record::Verb(v) => Some(v.value.as_str()),
        Record::Agent(a) => Some(a.value.as_str()),
        Record::Patient(p) => Some(p.value.as_str()),
        _ => None,
      };
      if got != Some(value.as_str()) {
        return false;
      }
    }
    if let Some(group_id) = self.group_id {
      let got = match record {
        Record::Verb(v) => Some(v.group_id),
        Record::Trio(t) => Some(t.group_id),
        _ => None,
      };
      if got != Some(group_id) {
        return false;
      }
    }
    if let Some(verb_id) = self.verb_id {
      let got = match record {
        Record::Trio(t) => Some(t.verb_id),
        _ => None,
      };
      if got != Some(verb_id) {
        return false;
      }
    }
    if let Some(agent_id) = self.agent_id {
      let got = match record {
        Record::Trio(t) => Some(t.agent_id),
        _ => None,
      };
      if got != Some(agent_id) {
        return false;
      }
    }
    if let Some(patient_id) = self.patient_id {
      let got = match record {
        Record::Trio(t) => Some(t.patient_id),
        _ => None,
      };
      if got != Some(patient_id) {
        return false;
      }
    }
    if let Some(trio_id) = self.trio_id {
      let got = match record {
        Record::CorrectAnswer(c) => Some(c.trio_id),
        _ => None,
      };
      if got != Some(trio_id) {
        return false;
      }
    }
    true
  }
}

// ─── Patch ───────────────────────────────────────────────────────────────────

/// A partial update merged onto an existing record by
/// [`crate::store::WordStore::update`]. Fields the record shape lacks are
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct Patch {
  pub value:      Option<String>,
  pub group_id:   Option<Id>,
  pub verb_id:    Option<Id>,
  pub agent_id:   Option<Id>,
  pub patient_id: Option<Id>,
  pub trio_id:    Option<Id>,
}

impl Patch {
  pub fn value(value: impl Into<String>) -> Self {
    Self { value: Some(value.into()), ..Self::default() }
  }

  pub fn group(group_id: Id) -> Self {
    Self { group_id: Some(group_id), ..Self::default() }
  }

  /// Merge the set fields onto `record`, leaving everything else alone.
  /// The primary key is never patched.
  pub fn apply(&self, record: &mut Record) {
    match record {
      Record::Verb(v) => {
        if let Some(value) = &self.value {
          v.value = value.clone();
        }
        if let Some(group_id) = self.group_id {
          v.group_id = group_id;
        }
      }
      Record::Agent(a) => {
        if let Some(value) = &self.value {
          a.value = value.clone();
        }
      }
      Record::Patient(p) => {
        if let Some(value) = &self.value {
          p.value = value.clone();
        }
      }
      Record::Trio(t) => {
        if let Some(verb_id) = self.verb_id {
          t.verb_id = verb_id;
        }
        if let Some(agent_id) = self.agent_id {
          t.agent_id = agent_id;
        }
        if let Some(patient_id) = self.patient_id {
          t.patient_id = patient_id;
        }
        if let Some(group_id) = self.group_id {
          t.group_id = group_id;
        }
      }
      Record::CorrectAnswer(c) => {
        if let Some(trio_id) = self.trio_id {
          c.trio_id = trio_id;
        }
      }
    }
  }
}

//! Typed per-entity controllers over the store contract.
//!
//! Each controller borrows a [`WordStore`] and exposes the operations the
//! exercise layer actually uses: group listings sorted by id, random
//! sampling for answer choices, and the distinct participants of a verb.
//! They unwrap the record variants they asked for and skip anything else,
//! so a dangling reference in the trio table degrades to a shorter list
//! rather than an error.

use std::collections::HashSet;

use rand::seq::{IndexedRandom, SliceRandom};

use lause_core::{
  record::{Collection, Filter, Id, Record},
  store::WordStore,
  trio::Trio,
  word::{Agent, Patient, Verb},
};

/// How many answer choices a round offers per slot.
pub const DEFAULT_CHOICES: usize = 3;

/// At most `count` elements of `items`, in random order.
fn sample<T>(mut items: Vec<T>, count: usize) -> Vec<T> {
  items.shuffle(&mut rand::rng());
  items.truncate(count);
  items
}

/// Distinct ids in first-seen order.
fn distinct(ids: impl IntoIterator<Item = Id>) -> Vec<Id> {
  let mut seen = HashSet::new();
  ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

// ─── Verbs ───────────────────────────────────────────────────────────────────

pub struct Verbs<'a, S> {
  store: &'a S,
}

impl<'a, S: WordStore> Verbs<'a, S> {
  pub fn new(store: &'a S) -> Self {
    Self { store }
  }

  pub async fn get(&self, id: Id) -> Result<Option<Verb>, S::Error> {
    let record = self.store.find_by_id(Collection::Verbs, id).await?;
    Ok(record.and_then(Record::into_verb))
  }

  pub async fn all(&self) -> Result<Vec<Verb>, S::Error> {
    self.collect(&Filter::default()).await
  }

  /// Verbs of a difficulty group, ascending by id. The stable order is
  /// what makes a session's verb sequence reproducible.
  pub async fn all_in_group(&self, group_id: Id) -> Result<Vec<Verb>, S::Error> {
    let mut verbs = self.collect(&Filter::by_group(group_id)).await?;
    verbs.sort_by_key(|v| v.id);
    Ok(verbs)
  }

  pub async fn random(&self) -> Result<Option<Verb>, S::Error> {
    let verbs = self.all().await?;
    Ok(verbs.choose(&mut rand::rng()).cloned())
  }

  async fn collect(&self, filter: &Filter) -> Result<Vec<Verb>, S::Error> {
    let records = self.store.query(Collection::Verbs, filter).await?;
    Ok(records.into_iter().filter_map(Record::into_verb).collect())
  }
}

// ─── Agents ──────────────────────────────────────────────────────────────────

pub struct Agents<'a, S> {
  store: &'a S,
}

impl<'a, S: WordStore> Agents<'a, S> {
  pub fn new(store: &'a S) -> Self {
    Self { store }
  }

  pub async fn get(&self, id: Id) -> Result<Option<Agent>, S::Error> {
    let record = self.store.find_by_id(Collection::Agents, id).await?;
    Ok(record.and_then(Record::into_agent))
  }

  pub async fn all(&self) -> Result<Vec<Agent>, S::Error> {
    let records = self
      .store
      .query(Collection::Agents, &Filter::default())
      .await?;
    Ok(records.into_iter().filter_map(Record::into_agent).collect())
  }

  /// Up to `count` distinct agents that appear in some trio of `verb_id`,
  /// in random order.
  pub async fn for_verb(
    &self,
    verb_id: Id,
    count: usize,
  ) -> Result<Vec<Agent>, S::Error> {
    let trios = self
      .store
      .query(Collection::Trios, &Filter::by_verb(verb_id))
      .await?;
    let ids = distinct(
      trios
        .into_iter()
        .filter_map(Record::into_trio)
        .map(|t| t.agent_id),
    );
    let mut agents = Vec::with_capacity(ids.len());
    for id in ids {
      if let Some(agent) = self.get(id).await? {
        agents.push(agent);
      }
    }
    Ok(sample(agents, count))
  }
}

// ─── Patients ────────────────────────────────────────────────────────────────

pub struct Patients<'a, S> {
  store: &'a S,
}

impl<'a, S: WordStore> Patients<'a, S> {
  pub fn new(store: &'a S) -> Self {
    Self { store }
  }

  pub async fn get(&self, id: Id) -> Result<Option<Patient>, S::Error> {
    let record = self.store.find_by_id(Collection::Patients, id).await?;
    Ok(record.and_then(Record::into_patient))
  }

  pub async fn all(&self) -> Result<Vec<Patient>, S::Error> {
    let records = self
      .store
      .query(Collection::Patients, &Filter::default())
      .await?;
    Ok(records.into_iter().filter_map(Record::into_patient).collect())
  }

  /// Up to `count` distinct patients that appear in some trio of
  /// `verb_id`, in random order.
  pub async fn for_verb(
    &self,
    verb_id: Id,
    count: usize,
  ) -> Result<Vec<Patient>, S::Error> {
    let trios = self
      .store
      .query(Collection::Trios, &Filter::by_verb(verb_id))
      .await?;
    let ids = distinct(
      trios
        .into_iter()
        .filter_map(Record::into_trio)
        .map(|t| t.patient_id),
    );
    let mut patients = Vec::with_capacity(ids.len());
    for id in ids {
      if let Some(patient) = self.get(id).await? {
        patients.push(patient);
      }
    }
    Ok(sample(patients, count))
  }
}

// ─── Trios ───────────────────────────────────────────────────────────────────

pub struct Trios<'a, S> {
  store: &'a S,
}

impl<'a, S: WordStore> Trios<'a, S> {
  pub fn new(store: &'a S) -> Self {
    Self { store }
  }

  pub async fn get(&self, id: Id) -> Result<Option<Trio>, S::Error> {
    let record = self.store.find_by_id(Collection::Trios, id).await?;
    Ok(record.and_then(Record::into_trio))
  }

  pub async fn for_verb(&self, verb_id: Id) -> Result<Vec<Trio>, S::Error> {
    let records = self
      .store
      .query(Collection::Trios, &Filter::by_verb(verb_id))
      .await?;
    Ok(records.into_iter().filter_map(Record::into_trio).collect())
  }

  /// Up to `count` trios of `verb_id`, sampled without replacement.
  pub async fn random_for_verb(
    &self,
    verb_id: Id,
    count: usize,
  ) -> Result<Vec<Trio>, S::Error> {
    let trios = self.for_verb(verb_id).await?;
    Ok(sample(trios, count))
  }

  pub async fn is_correct_combination(
    &self,
    agent_id: Id,
    verb_id: Id,
    patient_id: Id,
  ) -> Result<bool, S::Error> {
    self
      .store
      .is_valid_combination(agent_id, verb_id, patient_id)
      .await
  }
}

//! Seed dataset types and the import planner.
//!
//! The planner is pure: it turns dataset entries into the exact records
//! the store writes, assigning monotonic ids per entity type and
//! deduplicating agent/patient texts across the whole dataset
//! (first-seen wins). The store layer only has to write the plan.

use std::collections::HashMap;

use serde::Deserialize;

use lause_core::{
  record::Id,
  trio::Trio,
  word::{Agent, Patient, Verb},
};

/// The bundled Finnish dataset shipped with the app.
pub const BUNDLED_DATASET: &str = include_str!("../data/seed.json");

/// One dataset entry: a verb, its group, and the (agent, patient) pairs
/// that form valid sentences with it.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedEntry {
  pub verb:     String,
  pub group_id: Id,
  pub pairs:    Vec<(String, String)>,
}

/// The records produced by [`plan`], ready to be written in one pass.
#[derive(Debug, Clone, Default)]
pub struct SeedPlan {
  pub verbs:    Vec<Verb>,
  pub agents:   Vec<Agent>,
  pub patients: Vec<Patient>,
  pub trios:    Vec<Trio>,
}

/// Parse a seed dataset from its JSON form.
pub fn parse(json: &str) -> Result<Vec<SeedEntry>, serde_json::Error> {
  serde_json::from_str(json)
}

/// Turn dataset entries into records.
///
/// Verb ids count up in entry order; agent, patient, and trio ids count
/// up independently across the whole import. An agent or patient text
/// seen under several verbs resolves to the one record created at its
/// first appearance.
pub fn plan(entries: &[SeedEntry]) -> SeedPlan {
  let mut plan = SeedPlan::default();
  let mut agent_ids: HashMap<String, Id> = HashMap::new();
  let mut patient_ids: HashMap<String, Id> = HashMap::new();

  for entry in entries {
    let verb_id = plan.verbs.len() as Id;
    plan.verbs.push(Verb {
      id:       verb_id,
      value:    entry.verb.clone(),
      group_id: entry.group_id,
    });

    for (agent_text, patient_text) in &entry.pairs {
      let agent_id = match agent_ids.get(agent_text) {
        Some(id) => *id,
        None => {
          let id = plan.agents.len() as Id;
          plan.agents.push(Agent { id, value: agent_text.clone() });
          agent_ids.insert(agent_text.clone(), id);
          id
        }
      };
      let patient_id = match patient_ids.get(patient_text) {
        Some(id) => *id,
        None => {
          let id = plan.patients.len() as Id;
          plan.patients.push(Patient { id, value: patient_text.clone() });
          patient_ids.insert(patient_text.clone(), id);
          id
        }
      };

      let trio_id = plan.trios.len() as Id;
      plan.trios.push(Trio {
        id: trio_id,
        verb_id,
        agent_id,
        patient_id,
        group_id: entry.group_id,
      });
    }
  }

  plan
}

//! The exercise-selection service.
//!
//! A session walks the verbs of one difficulty group in id order. Each
//! round pairs the current verb with a sample of its real participants as
//! answer choices; a submitted answer is checked against the store's
//! validation path, and correct answers are recorded for later review.

use chrono::Utc;

use lause_core::{
  record::{Collection, Filter, Id, Record},
  store::WordStore,
  trio::{CorrectAnswer, Trio},
  word::{Agent, Patient, Verb},
};

use crate::controllers::{Agents, DEFAULT_CHOICES, Patients, Trios, Verbs};

/// One exercise round: a verb and the answer choices for its slots.
#[derive(Debug, Clone)]
pub struct Round {
  pub verb:     Verb,
  pub agents:   Vec<Agent>,
  pub patients: Vec<Patient>,
  pub trios:    Vec<Trio>,
}

/// Where a session currently stands. Plain data, inspectable and
/// serialisable by a UI layer; the service owns all transitions.
#[derive(Debug, Clone, Default)]
pub struct Session {
  pub current_group_id: Option<Id>,
  pub current_verb_id:  Option<Id>,
  verbs_in_group:       Vec<Id>,
  next:                 usize,
}

impl Session {
  /// Verb ids remaining in the group, including the current one.
  pub fn remaining(&self) -> usize {
    self.verbs_in_group.len().saturating_sub(self.next)
  }
}

// ─── Service ─────────────────────────────────────────────────────────────────

pub struct ExerciseService<S> {
  store:   S,
  session: Session,
}

impl<S: WordStore> ExerciseService<S> {
  pub fn new(store: S) -> Self {
    Self { store, session: Session::default() }
  }

  pub fn session(&self) -> &Session {
    &self.session
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  /// Start (or restart) a session on `group_id`. Returns the number of
  /// verbs in the group; zero means the group is empty and
  /// [`next_round`](Self::next_round) will immediately return `None`.
  pub async fn start_group(&mut self, group_id: Id) -> Result<usize, S::Error> {
    let verbs = Verbs::new(&self.store).all_in_group(group_id).await?;
    self.session = Session {
      current_group_id: Some(group_id),
      current_verb_id:  None,
      verbs_in_group:   verbs.iter().map(|v| v.id).collect(),
      next:             0,
    };
    Ok(self.session.verbs_in_group.len())
  }

  /// The next round of the session, or `None` when the group is
  /// exhausted (or no group was started).
  pub async fn next_round(&mut self) -> Result<Option<Round>, S::Error> {
    loop {
      let Some(&verb_id) = self.session.verbs_in_group.get(self.session.next)
      else {
        self.session.current_verb_id = None;
        return Ok(None);
      };
      self.session.next += 1;

      // A verb deleted since start_group is skipped, not an error.
      let Some(verb) = Verbs::new(&self.store).get(verb_id).await? else {
        tracing::warn!(verb_id, "verb vanished mid-session; skipping");
        continue;
      };
      self.session.current_verb_id = Some(verb.id);
      return Ok(Some(self.assemble(verb).await?));
    }
  }

  /// A one-off round for a random verb, outside any group sequence.
  pub async fn random_round(&mut self) -> Result<Option<Round>, S::Error> {
    let Some(verb) = Verbs::new(&self.store).random().await? else {
      return Ok(None);
    };
    self.session.current_verb_id = Some(verb.id);
    Ok(Some(self.assemble(verb).await?))
  }

  /// Check a submitted (agent, patient) answer against the current verb.
  /// `None` when no round is active. A correct answer is recorded; a
  /// failure to record is logged and swallowed so the learner still gets
  /// their verdict.
  pub async fn check_answer(
    &mut self,
    agent_id: Id,
    patient_id: Id,
  ) -> Result<Option<bool>, S::Error> {
    let Some(verb_id) = self.session.current_verb_id else {
      return Ok(None);
    };
    let correct = Trios::new(&self.store)
      .is_correct_combination(agent_id, verb_id, patient_id)
      .await?;
    if correct
      && let Err(e) = self.record_success(agent_id, verb_id, patient_id).await
    {
      tracing::warn!(error = %e, "could not record correct answer");
    }
    Ok(Some(correct))
  }

  async fn assemble(&self, verb: Verb) -> Result<Round, S::Error> {
    let agents = Agents::new(&self.store)
      .for_verb(verb.id, DEFAULT_CHOICES)
      .await?;
    let patients = Patients::new(&self.store)
      .for_verb(verb.id, DEFAULT_CHOICES)
      .await?;
    let trios = Trios::new(&self.store).for_verb(verb.id).await?;
    Ok(Round { verb, agents, patients, trios })
  }

  async fn record_success(
    &self,
    agent_id: Id,
    verb_id: Id,
    patient_id: Id,
  ) -> Result<(), S::Error> {
    let trios = self
      .store
      .query(
        Collection::Trios,
        &Filter::triple(agent_id, verb_id, patient_id),
      )
      .await?;
    // The remote validation path may accept combinations absent from the
    // fetched trio list; there is nothing to attach the answer to then.
    let Some(trio_id) = trios.first().map(Record::id) else {
      return Ok(());
    };

    let answers = self
      .store
      .query(Collection::CorrectAnswers, &Filter::default())
      .await?;
    let id = answers.iter().map(Record::id).max().map_or(0, |id| id + 1);

    self
      .store
      .insert(Record::CorrectAnswer(CorrectAnswer {
        id,
        trio_id,
        created_at: Utc::now(),
      }))
      .await?;
    Ok(())
  }
}

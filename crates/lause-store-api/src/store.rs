//! [`ApiStore`] — the remote implementation of [`WordStore`].

use std::{collections::HashMap, time::Duration};

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use lause_core::{
  record::{Collection, Filter, Id, Patch, Record},
  store::WordStore,
};

use crate::{Error, Result, wire};

/// A lause word store backed by the app's REST service.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone, Debug)]
pub struct ApiStore {
  client:   Client,
  base_url: String,
}

impl ApiStore {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{path}", self.base_url.trim_end_matches('/'))
  }

  /// GET `path`, degrading transport failures, error statuses, and
  /// `success: false` envelopes to `None`. A body that fails to parse is
  /// a contract mismatch and is an error.
  async fn get_envelope<T: DeserializeOwned>(
    &self,
    path: &str,
    query: &[(&str, String)],
  ) -> Result<Option<wire::Envelope<T>>> {
    let resp = match self
      .client
      .get(self.url(path))
      .query(query)
      .send()
      .await
    {
      Ok(resp) => resp,
      Err(e) => {
        tracing::warn!(path, error = %e, "request failed; treating as no data");
        return Ok(None);
      }
    };
    if !resp.status().is_success() {
      tracing::warn!(path, status = %resp.status(), "non-success status; treating as no data");
      return Ok(None);
    }
    let envelope: wire::Envelope<T> =
      resp.json().await.map_err(|e| Error::Contract(e.to_string()))?;
    Ok(envelope.success.then_some(envelope))
  }

  async fn fetch_words(&self, kind: &str) -> Result<Vec<Record>> {
    let query = [("type", kind.to_string())];
    let Some(envelope) =
      self.get_envelope::<wire::WireWord>("/words", &query).await?
    else {
      return Ok(Vec::new());
    };
    envelope
      .data
      .into_iter()
      .map(|word| wire::word_to_record(word).map_err(Error::from))
      .collect()
  }

  async fn fetch_trios(&self, verb_id: Option<Id>) -> Result<Vec<Record>> {
    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(verb_id) = verb_id {
      query.push(("verb_id", verb_id.to_string()));
    }
    let Some(envelope) = self
      .get_envelope::<wire::WireCombination>("/combinations", &query)
      .await?
    else {
      return Ok(Vec::new());
    };

    // The combination wire shape carries no group; resolve it from the
    // verb, once per distinct verb id.
    let mut groups: HashMap<Id, Id> = HashMap::new();
    let mut records = Vec::with_capacity(envelope.data.len());
    for combo in envelope.data {
      let group_id = match groups.get(&combo.verb.id) {
        Some(group_id) => *group_id,
        None => {
          let group_id = self.verb_group(combo.verb.id).await?;
          groups.insert(combo.verb.id, group_id);
          group_id
        }
      };
      records.push(Record::Trio(wire::combination_to_trio(combo, group_id)));
    }
    Ok(records)
  }

  /// The group of the verb with `verb_id`, or 0 when the verb cannot be
  /// fetched (dangling references are tolerated, not fatal).
  async fn verb_group(&self, verb_id: Id) -> Result<Id> {
    let path = format!("/words/{verb_id}");
    let Some(envelope) =
      self.get_envelope::<wire::WireWord>(&path, &[]).await?
    else {
      return Ok(0);
    };
    let group_id = envelope
      .data
      .into_iter()
      .next()
      .map(wire::word_to_record)
      .transpose()?
      .and_then(|record| match record {
        Record::Verb(v) => Some(v.group_id),
        _ => None,
      })
      .unwrap_or(0);
    Ok(group_id)
  }

  /// PUT or POST a record to its write endpoint. `update` distinguishes
  /// a missing resource; everything else surfaces as an error.
  async fn upload(
    &self,
    record: &Record,
    existing_id: Option<Id>,
  ) -> Result<StatusCode> {
    let request = match record {
      Record::Verb(_) | Record::Agent(_) | Record::Patient(_) => {
        let Some(body) = wire::word_upload(record) else {
          return Err(Error::Unsupported(record.collection()));
        };
        match existing_id {
          Some(id) => self.client.put(self.url(&format!("/words/{id}"))).json(&body),
          None => self.client.post(self.url("/words")).json(&body),
        }
      }
      Record::Trio(t) => {
        let body = wire::CombinationUpload {
          id:         t.id,
          subject_id: t.agent_id,
          verb_id:    t.verb_id,
          object_id:  t.patient_id,
        };
        match existing_id {
          Some(id) => {
            self.client.put(self.url(&format!("/combinations/{id}"))).json(&body)
          }
          None => self.client.post(self.url("/combinations")).json(&body),
        }
      }
      Record::CorrectAnswer(_) => {
        return Err(Error::Unsupported(Collection::CorrectAnswers));
      }
    };
    let resp = request.send().await?;
    Ok(resp.status())
  }
}

// ─── WordStore impl ──────────────────────────────────────────────────────────

impl WordStore for ApiStore {
  type Error = Error;

  /// Reachability check only; the backend needs no further preparation.
  async fn initialize(&self) -> Result<()> {
    self
      .client
      .get(self.url("/words"))
      .query(&[("type", "VERB")])
      .send()
      .await
      .map_err(|e| Error::Unavailable(e.to_string()))?;
    Ok(())
  }

  async fn query(
    &self,
    collection: Collection,
    filter: &Filter,
  ) -> Result<Vec<Record>> {
    let records = match collection {
      Collection::Verbs => self.fetch_words("VERB").await?,
      Collection::Agents => self.fetch_words("SUBJECT").await?,
      Collection::Patients => self.fetch_words("OBJECT").await?,
      Collection::Trios => self.fetch_trios(filter.verb_id).await?,
      // Answer history has no remote resource; reads are empty, not errors.
      Collection::CorrectAnswers => Vec::new(),
    };
    // The wire supports only the type/verb_id parameters; remaining
    // filter fields apply to the fetched list.
    Ok(records.into_iter().filter(|r| filter.matches(r)).collect())
  }

  async fn find_by_id(
    &self,
    collection: Collection,
    id: Id,
  ) -> Result<Option<Record>> {
    match collection {
      Collection::Verbs | Collection::Agents | Collection::Patients => {
        let path = format!("/words/{id}");
        let Some(envelope) =
          self.get_envelope::<wire::WireWord>(&path, &[]).await?
        else {
          return Ok(None);
        };
        let Some(word) = envelope.data.into_iter().next() else {
          return Ok(None);
        };
        let record = wire::word_to_record(word)?;
        // Asking for a verb and getting a subject back is "not found in
        // this collection", not an error.
        Ok((record.collection() == collection).then_some(record))
      }
      Collection::Trios => {
        let path = format!("/combinations/{id}");
        let Some(envelope) =
          self.get_envelope::<wire::WireCombination>(&path, &[]).await?
        else {
          return Ok(None);
        };
        let Some(combo) = envelope.data.into_iter().next() else {
          return Ok(None);
        };
        let group_id = self.verb_group(combo.verb.id).await?;
        Ok(Some(Record::Trio(wire::combination_to_trio(combo, group_id))))
      }
      Collection::CorrectAnswers => Ok(None),
    }
  }

  async fn insert(&self, record: Record) -> Result<Record> {
    let status = self.upload(&record, None).await?;
    if !status.is_success() {
      return Err(Error::Contract(format!(
        "insert into {:?} rejected with status {status}",
        record.collection()
      )));
    }
    Ok(record)
  }

  async fn update(
    &self,
    collection: Collection,
    id: Id,
    patch: Patch,
  ) -> Result<Option<Record>> {
    let Some(mut record) = self.find_by_id(collection, id).await? else {
      return Ok(None);
    };
    patch.apply(&mut record);

    let status = self.upload(&record, Some(id)).await?;
    if status == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    if !status.is_success() {
      return Err(Error::Contract(format!(
        "update of {collection:?}/{id} rejected with status {status}"
      )));
    }
    Ok(Some(record))
  }

  async fn delete(&self, collection: Collection, id: Id) -> Result<bool> {
    let path = match collection {
      Collection::Verbs | Collection::Agents | Collection::Patients => {
        format!("/words/{id}")
      }
      Collection::Trios => format!("/combinations/{id}"),
      Collection::CorrectAnswers => {
        return Err(Error::Unsupported(collection));
      }
    };
    let resp = self.client.delete(self.url(&path)).send().await?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(false);
    }
    resp.error_for_status()?;
    Ok(true)
  }

  /// The validate endpoint is the source of truth on this path — trio
  /// list data may be stale or partial, so no local membership check is
  /// attempted.
  async fn is_valid_combination(
    &self,
    agent_id: Id,
    verb_id: Id,
    patient_id: Id,
  ) -> Result<bool> {
    let body = wire::ValidateRequest { agent_id, verb_id, patient_id };
    let resp = match self
      .client
      .post(self.url("/suggestions/validate"))
      .json(&body)
      .send()
      .await
    {
      Ok(resp) => resp,
      Err(e) => {
        tracing::warn!(error = %e, "validate request failed; treating as invalid");
        return Ok(false);
      }
    };
    if !resp.status().is_success() {
      tracing::warn!(status = %resp.status(), "validate returned non-success; treating as invalid");
      return Ok(false);
    }
    let envelope: wire::Envelope<wire::WireValidation> =
      resp.json().await.map_err(|e| Error::Contract(e.to_string()))?;
    Ok(envelope.success && envelope.data.first().is_some_and(|v| v.valid))
  }
}

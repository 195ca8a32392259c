//! [`SqliteStore`] — the embedded implementation of [`WordStore`].

use std::{
  path::Path,
  sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
  },
};

use chrono::{DateTime, Utc};
use rusqlite::OptionalExtension as _;

use lause_core::{
  record::{Collection, Filter, Id, Patch, Record},
  store::WordStore,
  trio::{CorrectAnswer, Trio},
  word::{Agent, Patient, Verb},
};

use crate::{
  Error, Result,
  schema::SCHEMA,
  seed::{self, SeedPlan},
};

// ─── Capability probe ────────────────────────────────────────────────────────

/// Whether this runtime target can host the embedded store at `path`.
///
/// The adapter manager consults this before committing to the embedded
/// backend, instead of using construction failure as control flow.
pub async fn supports_embedded_storage(path: impl AsRef<Path>) -> bool {
  tokio_rusqlite::Connection::open(path).await.is_ok()
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lause word store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted, and
/// clones share the seeded-once flag.
#[derive(Clone, Debug)]
pub struct SqliteStore {
  conn:   tokio_rusqlite::Connection,
  seeded: Arc<AtomicBool>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, seeded: Arc::new(AtomicBool::new(false)) };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, seeded: Arc::new(AtomicBool::new(false)) };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Wipe all collections and import `entries` instead of the bundled
  /// dataset. Used by tests and by the admin tooling.
  pub async fn reseed(&self, entries: &[seed::SeedEntry]) -> Result<()> {
    self.write_seed(seed::plan(entries)).await
  }

  /// Replace the entire store content with `plan`, in one transaction.
  async fn write_seed(&self, plan: SeedPlan) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute_batch(
          "DELETE FROM correct_answers;
           DELETE FROM trios;
           DELETE FROM verbs;
           DELETE FROM agents;
           DELETE FROM patients;",
        )?;
        for v in &plan.verbs {
          tx.execute(
            "INSERT INTO verbs (id, value, group_id) VALUES (?1, ?2, ?3)",
            rusqlite::params![v.id, v.value, v.group_id],
          )?;
        }
        for a in &plan.agents {
          tx.execute(
            "INSERT INTO agents (id, value) VALUES (?1, ?2)",
            rusqlite::params![a.id, a.value],
          )?;
        }
        for p in &plan.patients {
          tx.execute(
            "INSERT INTO patients (id, value) VALUES (?1, ?2)",
            rusqlite::params![p.id, p.value],
          )?;
        }
        for t in &plan.trios {
          tx.execute(
            "INSERT INTO trios (id, verb_id, agent_id, patient_id, group_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![t.id, t.verb_id, t.agent_id, t.patient_id, t.group_id],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row mapping ─────────────────────────────────────────────────────────────

fn select_sql(collection: Collection) -> &'static str {
  match collection {
    Collection::Verbs => "SELECT id, value, group_id FROM verbs",
    Collection::Agents => "SELECT id, value FROM agents",
    Collection::Patients => "SELECT id, value FROM patients",
    Collection::Trios => {
      "SELECT id, verb_id, agent_id, patient_id, group_id FROM trios"
    }
    Collection::CorrectAnswers => {
      "SELECT id, trio_id, created_at FROM correct_answers"
    }
  }
}

fn record_from_row(
  collection: Collection,
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<Record> {
  Ok(match collection {
    Collection::Verbs => Record::Verb(Verb {
      id:       row.get(0)?,
      value:    row.get(1)?,
      group_id: row.get(2)?,
    }),
    Collection::Agents => Record::Agent(Agent {
      id:    row.get(0)?,
      value: row.get(1)?,
    }),
    Collection::Patients => Record::Patient(Patient {
      id:    row.get(0)?,
      value: row.get(1)?,
    }),
    Collection::Trios => Record::Trio(Trio {
      id:         row.get(0)?,
      verb_id:    row.get(1)?,
      agent_id:   row.get(2)?,
      patient_id: row.get(3)?,
      group_id:   row.get(4)?,
    }),
    Collection::CorrectAnswers => {
      let created_at: String = row.get(2)?;
      let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| {
          rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            Box::new(e),
          )
        })?
        .with_timezone(&Utc);
      Record::CorrectAnswer(CorrectAnswer {
        id: row.get(0)?,
        trio_id: row.get(1)?,
        created_at,
      })
    }
  })
}

/// Translate the set filter fields into a `WHERE` clause over
/// `collection`'s columns. Returns `None` when a set field has no column
/// in this collection — nothing can match, so the caller short-circuits
/// to an empty result.
fn where_clauses(
  collection: Collection,
  filter: &Filter,
) -> Option<(String, Vec<rusqlite::types::Value>)> {
  use rusqlite::types::Value;

  let mut conds: Vec<String> = vec![];
  let mut params: Vec<Value> = vec![];

  if let Some(value) = &filter.value {
    match collection {
      Collection::Verbs | Collection::Agents | Collection::Patients => {}
      _ => return None,
    }
    params.push(Value::Text(value.clone()));
    conds.push(format!("value = ?{}", params.len()));
  }
  if let Some(group_id) = filter.group_id {
    match collection {
      Collection::Verbs | Collection::Trios => {}
      _ => return None,
    }
    params.push(Value::Integer(i64::from(group_id)));
    conds.push(format!("group_id = ?{}", params.len()));
  }
  if let Some(verb_id) = filter.verb_id {
    if collection != Collection::Trios {
      return None;
    }
    params.push(Value::Integer(i64::from(verb_id)));
    conds.push(format!("verb_id = ?{}", params.len()));
  }
  if let Some(agent_id) = filter.agent_id {
    if collection != Collection::Trios {
      return None;
    }
    params.push(Value::Integer(i64::from(agent_id)));
    conds.push(format!("agent_id = ?{}", params.len()));
  }
  if let Some(patient_id) = filter.patient_id {
    if collection != Collection::Trios {
      return None;
    }
    params.push(Value::Integer(i64::from(patient_id)));
    conds.push(format!("patient_id = ?{}", params.len()));
  }
  if let Some(trio_id) = filter.trio_id {
    if collection != Collection::CorrectAnswers {
      return None;
    }
    params.push(Value::Integer(i64::from(trio_id)));
    conds.push(format!("trio_id = ?{}", params.len()));
  }

  let clause = if conds.is_empty() {
    String::new()
  } else {
    format!(" WHERE {}", conds.join(" AND "))
  };
  Some((clause, params))
}

// ─── WordStore impl ──────────────────────────────────────────────────────────

impl WordStore for SqliteStore {
  type Error = Error;

  /// Destructive by design: the first call in a process wipes any prior
  /// local data and re-imports the bundled dataset, so on-device content
  /// always matches the shipped dataset version. Local-only edits do not
  /// survive an app restart. Repeat calls within one process are no-ops.
  async fn initialize(&self) -> Result<()> {
    if self.seeded.load(Ordering::SeqCst) {
      return Ok(());
    }
    let entries = seed::parse(seed::BUNDLED_DATASET)?;
    self.write_seed(seed::plan(&entries)).await?;
    self.seeded.store(true, Ordering::SeqCst);
    Ok(())
  }

  async fn query(
    &self,
    collection: Collection,
    filter: &Filter,
  ) -> Result<Vec<Record>> {
    let Some((clause, params)) = where_clauses(collection, filter) else {
      return Ok(Vec::new());
    };
    let sql = format!("{}{clause} ORDER BY id", select_sql(collection));

    let records = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), |row| {
            record_from_row(collection, row)
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(records)
  }

  async fn find_by_id(
    &self,
    collection: Collection,
    id: Id,
  ) -> Result<Option<Record>> {
    let sql = format!("{} WHERE id = ?1", select_sql(collection));

    let record = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id], |row| {
              record_from_row(collection, row)
            })
            .optional()?,
        )
      })
      .await?;
    Ok(record)
  }

  async fn insert(&self, record: Record) -> Result<Record> {
    let stored = record.clone();
    self
      .conn
      .call(move |conn| {
        match &record {
          Record::Verb(v) => {
            conn.execute(
              "INSERT OR REPLACE INTO verbs (id, value, group_id)
               VALUES (?1, ?2, ?3)",
              rusqlite::params![v.id, v.value, v.group_id],
            )?;
          }
          Record::Agent(a) => {
            conn.execute(
              "INSERT OR REPLACE INTO agents (id, value) VALUES (?1, ?2)",
              rusqlite::params![a.id, a.value],
            )?;
          }
          Record::Patient(p) => {
            conn.execute(
              "INSERT OR REPLACE INTO patients (id, value) VALUES (?1, ?2)",
              rusqlite::params![p.id, p.value],
            )?;
          }
          Record::Trio(t) => {
            conn.execute(
              "INSERT OR REPLACE INTO trios
                 (id, verb_id, agent_id, patient_id, group_id)
               VALUES (?1, ?2, ?3, ?4, ?5)",
              rusqlite::params![
                t.id,
                t.verb_id,
                t.agent_id,
                t.patient_id,
                t.group_id
              ],
            )?;
          }
          Record::CorrectAnswer(c) => {
            conn.execute(
              "INSERT OR REPLACE INTO correct_answers (id, trio_id, created_at)
               VALUES (?1, ?2, ?3)",
              rusqlite::params![c.id, c.trio_id, c.created_at.to_rfc3339()],
            )?;
          }
        }
        Ok(())
      })
      .await?;
    Ok(stored)
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
    let stored = self.insert(record).await?;
    Ok(Some(stored))
  }

  async fn delete(&self, collection: Collection, id: Id) -> Result<bool> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", collection.table());
    let removed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params![id])?))
      .await?;
    Ok(removed > 0)
  }

  async fn is_valid_combination(
    &self,
    agent_id: Id,
    verb_id: Id,
    patient_id: Id,
  ) -> Result<bool> {
    let valid = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM trios
               WHERE agent_id = ?1 AND verb_id = ?2 AND patient_id = ?3",
              rusqlite::params![agent_id, verb_id, patient_id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(valid)
  }
}

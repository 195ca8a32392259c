//! Backend selection.
//!
//! [`StoreManager`] decides which [`WordStore`] implementation serves the
//! session: the embedded SQLite store when the device supports it, the
//! remote REST service otherwise, or whichever one the settings demand
//! outright. The decision is made once and memoised; [`set_backend`]
//! drops the memo so the next [`initialize`] re-selects.
//!
//! [`set_backend`]: StoreManager::set_backend
//! [`initialize`]: StoreManager::initialize

use lause_core::{
  record::{Collection, Filter, Id, Patch, Record},
  store::WordStore,
};
use lause_store_api::ApiStore;
use lause_store_sqlite::{SqliteStore, supports_embedded_storage};

use crate::{
  Error, Result,
  settings::{BackendChoice, Settings},
};

// ─── Backend ─────────────────────────────────────────────────────────────────

/// The selected storage backend.
///
/// An enum rather than a trait object because the store contract returns
/// `impl Future`, which rules out dynamic dispatch. Both variants are
/// cheap to clone.
#[derive(Clone, Debug)]
pub enum Backend {
  Embedded(SqliteStore),
  Remote(ApiStore),
}

impl Backend {
  pub fn name(&self) -> &'static str {
    match self {
      Self::Embedded(_) => "local",
      Self::Remote(_) => "api",
    }
  }
}

impl WordStore for Backend {
  type Error = Error;

  async fn initialize(&self) -> Result<()> {
    match self {
      Self::Embedded(s) => s.initialize().await?,
      Self::Remote(s) => s.initialize().await?,
    }
    Ok(())
  }

  async fn query(
    &self,
    collection: Collection,
    filter: &Filter,
  ) -> Result<Vec<Record>> {
    Ok(match self {
      Self::Embedded(s) => s.query(collection, filter).await?,
      Self::Remote(s) => s.query(collection, filter).await?,
    })
  }

  async fn find_by_id(
    &self,
    collection: Collection,
    id: Id,
  ) -> Result<Option<Record>> {
    Ok(match self {
      Self::Embedded(s) => s.find_by_id(collection, id).await?,
      Self::Remote(s) => s.find_by_id(collection, id).await?,
    })
  }

  async fn insert(&self, record: Record) -> Result<Record> {
    Ok(match self {
      Self::Embedded(s) => s.insert(record).await?,
      Self::Remote(s) => s.insert(record).await?,
    })
  }

  async fn update(
    &self,
    collection: Collection,
    id: Id,
    patch: Patch,
  ) -> Result<Option<Record>> {
    Ok(match self {
      Self::Embedded(s) => s.update(collection, id, patch).await?,
      Self::Remote(s) => s.update(collection, id, patch).await?,
    })
  }

  async fn delete(&self, collection: Collection, id: Id) -> Result<bool> {
    Ok(match self {
      Self::Embedded(s) => s.delete(collection, id).await?,
      Self::Remote(s) => s.delete(collection, id).await?,
    })
  }

  async fn is_valid_combination(
    &self,
    agent_id: Id,
    verb_id: Id,
    patient_id: Id,
  ) -> Result<bool> {
    Ok(match self {
      Self::Embedded(s) => {
        s.is_valid_combination(agent_id, verb_id, patient_id).await?
      }
      Self::Remote(s) => {
        s.is_valid_combination(agent_id, verb_id, patient_id).await?
      }
    })
  }
}

// ─── StoreManager ────────────────────────────────────────────────────────────

/// Owns the backend decision for a session.
pub struct StoreManager {
  settings: Settings,
  backend:  Option<Backend>,
}

impl StoreManager {
  pub fn new(settings: Settings) -> Self {
    Self { settings, backend: None }
  }

  /// Select and initialise a backend. Memoised: repeat calls after a
  /// success are no-ops.
  pub async fn initialize(&mut self) -> Result<&Backend> {
    if self.backend.is_none() {
      let backend = self.select().await?;
      tracing::info!(backend = backend.name(), "storage backend selected");
      self.backend = Some(backend);
    }
    Ok(self.backend.as_ref().ok_or(Error::NotInitialized)?)
  }

  async fn select(&self) -> Result<Backend> {
    match self.settings.backend {
      BackendChoice::Api => self.open_remote().await,
      BackendChoice::Local => {
        if supports_embedded_storage(&self.settings.store_path).await {
          match self.open_embedded().await {
            Ok(backend) => return Ok(backend),
            Err(e) => {
              tracing::warn!(error = %e, "embedded store failed; falling back to remote");
            }
          }
        } else {
          tracing::warn!(
            path = %self.settings.store_path.display(),
            "embedded storage unsupported here; falling back to remote"
          );
        }
        self.open_remote().await
      }
    }
  }

  async fn open_embedded(&self) -> Result<Backend> {
    let store = SqliteStore::open(&self.settings.store_path).await?;
    store.initialize().await?;
    Ok(Backend::Embedded(store))
  }

  async fn open_remote(&self) -> Result<Backend> {
    let store = ApiStore::new(self.settings.api_base_url.clone())?;
    store.initialize().await?;
    Ok(Backend::Remote(store))
  }

  /// Override the backend choice and drop the memoised selection; the
  /// next [`initialize`](Self::initialize) re-selects.
  pub fn set_backend(&mut self, choice: BackendChoice) {
    self.settings.backend = choice;
    self.backend = None;
  }

  /// The selected backend, or [`Error::NotInitialized`] before the first
  /// successful [`initialize`](Self::initialize).
  pub fn backend(&self) -> Result<&Backend> {
    self.backend.as_ref().ok_or(Error::NotInitialized)
  }

  /// Name of the selected backend (`"local"` or `"api"`), if any.
  pub fn selected(&self) -> Option<&'static str> {
    self.backend.as_ref().map(Backend::name)
  }
}

//! Runtime configuration, loaded from `lause.toml` and `LAUSE_*`
//! environment variables.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;

/// Which backend the user asked for, before availability is considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
  /// Embedded SQLite store, falling back to the remote service when the
  /// local store cannot be opened.
  #[default]
  Local,
  /// Remote REST service only.
  Api,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  pub backend:      BackendChoice,
  pub api_base_url: String,
  pub store_path:   PathBuf,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      backend:      BackendChoice::Local,
      api_base_url: "http://localhost:3000".into(),
      store_path:   PathBuf::from("lause.db"),
    }
  }
}

impl Settings {
  /// Load settings from the TOML file at `path` (optional) with `LAUSE_*`
  /// environment overrides, on top of the defaults.
  pub fn load(path: &Path) -> Result<Self> {
    let settings = config::Config::builder()
      .set_default("backend", "local")?
      .set_default("api_base_url", "http://localhost:3000")?
      .set_default("store_path", "lause.db")?
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("LAUSE"))
      .build()?;
    Ok(settings.try_deserialize()?)
  }
}

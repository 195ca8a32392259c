//! `lause` — sentence-building exercises on the terminal.
//!
//! Selects a storage backend (embedded SQLite, with remote fallback),
//! then walks the verbs of one difficulty group, printing each round's
//! verb and answer choices and checking a sample answer.

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::Parser;
use lause_core::store::WordStore as _;
use lause_exercise::{
  BackendChoice, ExerciseService, Settings, StoreManager,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lause", about = "Finnish sentence-building exercises")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "lause.toml")]
  config: PathBuf,

  /// Difficulty group to exercise.
  #[arg(short, long, default_value_t = 0)]
  group: u32,

  /// Storage backend override: "local" or "api".
  #[arg(short, long)]
  backend: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let mut settings =
    Settings::load(&cli.config).context("failed to load settings")?;
  if let Some(backend) = &cli.backend {
    settings.backend = match backend.as_str() {
      "local" => BackendChoice::Local,
      "api" => BackendChoice::Api,
      other => bail!("unknown backend {other:?} (expected \"local\" or \"api\")"),
    };
  }

  let mut manager = StoreManager::new(settings);
  let backend = manager
    .initialize()
    .await
    .context("no storage backend available")?
    .clone();
  tracing::info!(backend = backend.name(), "ready");

  let mut service = ExerciseService::new(backend);
  let verb_count = service.start_group(cli.group).await?;
  if verb_count == 0 {
    println!("group {} has no verbs", cli.group);
    return Ok(());
  }
  println!("group {}: {verb_count} verbs", cli.group);

  while let Some(round) = service.next_round().await? {
    println!("\nverb: {}", round.verb.value);
    println!(
      "  subjects: {}",
      round
        .agents
        .iter()
        .map(|a| a.value.as_str())
        .collect::<Vec<_>>()
        .join(", ")
    );
    println!(
      "  objects:  {}",
      round
        .patients
        .iter()
        .map(|p| p.value.as_str())
        .collect::<Vec<_>>()
        .join(", ")
    );

    // Demo mode: answer with the first choice of each slot.
    if let (Some(agent), Some(patient)) =
      (round.agents.first(), round.patients.first())
      && let Some(correct) = service.check_answer(agent.id, patient.id).await?
    {
      println!(
        "  \"{} {} {}\" -> {}",
        agent.value,
        round.verb.value,
        patient.value,
        if correct { "correct" } else { "incorrect" }
      );
    }
  }

  let answers = service
    .store()
    .query(
      lause_core::record::Collection::CorrectAnswers,
      &lause_core::record::Filter::default(),
    )
    .await?;
  println!("\n{} correct answers recorded", answers.len());

  Ok(())
}

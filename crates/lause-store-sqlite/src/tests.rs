//! Integration tests for `SqliteStore` against an in-memory database.

use lause_core::{
  record::{Collection, Filter, Patch, Record},
  store::WordStore,
  trio::Trio,
  word::{Agent, Verb},
};

use crate::{SqliteStore, seed};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn entries(json: &str) -> Vec<seed::SeedEntry> {
  seed::parse(json).expect("test dataset")
}

/// The worked example from the app's documentation: one verb, two pairs.
const SYODA: &str = r#"[
  { "verb": "syödä", "group_id": 0,
    "pairs": [["minä", "omenaa"], ["sinä", "leipää"]] }
]"#;

// ─── Seed planner ────────────────────────────────────────────────────────────

#[test]
fn plan_assigns_monotonic_ids() {
  let plan = seed::plan(&entries(SYODA));

  assert_eq!(plan.verbs, vec![Verb {
    id:       0,
    value:    "syödä".into(),
    group_id: 0,
  }]);
  assert_eq!(
    plan.agents.iter().map(|a| (a.id, a.value.as_str())).collect::<Vec<_>>(),
    vec![(0, "minä"), (1, "sinä")]
  );
  assert_eq!(
    plan.patients.iter().map(|p| (p.id, p.value.as_str())).collect::<Vec<_>>(),
    vec![(0, "omenaa"), (1, "leipää")]
  );
  assert_eq!(plan.trios.len(), 2);
  assert_eq!((plan.trios[0].agent_id, plan.trios[0].patient_id), (0, 0));
  assert_eq!((plan.trios[1].agent_id, plan.trios[1].patient_id), (1, 1));
}

#[test]
fn plan_dedups_words_across_verbs() {
  // The same agent text under three different verbs resolves to a single
  // agent record referenced by three distinct trios.
  let plan = seed::plan(&entries(
    r#"[
      { "verb": "syödä", "group_id": 0, "pairs": [["minä", "omenaa"]] },
      { "verb": "juoda", "group_id": 0, "pairs": [["minä", "vettä"]] },
      { "verb": "lukea", "group_id": 1, "pairs": [["minä", "kirjaa"]] }
    ]"#,
  ));

  assert_eq!(plan.agents.len(), 1);
  assert_eq!(plan.agents[0].value, "minä");
  assert_eq!(plan.trios.len(), 3);
  assert!(plan.trios.iter().all(|t| t.agent_id == 0));
  let trio_ids: Vec<_> = plan.trios.iter().map(|t| t.id).collect();
  assert_eq!(trio_ids, vec![0, 1, 2]);
}

#[test]
fn plan_trio_group_matches_verb_group() {
  let dataset = seed::parse(seed::BUNDLED_DATASET).expect("bundled dataset");
  let plan = seed::plan(&dataset);

  assert!(!plan.verbs.is_empty());
  for trio in &plan.trios {
    let verb = plan
      .verbs
      .iter()
      .find(|v| v.id == trio.verb_id)
      .expect("trio references a planned verb");
    assert_eq!(trio.group_id, verb.group_id);
  }
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn initialize_imports_bundled_dataset() {
  let s = store().await;
  s.initialize().await.unwrap();

  let verbs = s.query(Collection::Verbs, &Filter::default()).await.unwrap();
  let trios = s.query(Collection::Trios, &Filter::default()).await.unwrap();
  assert!(!verbs.is_empty());
  assert!(trios.len() >= verbs.len());
}

#[tokio::test]
async fn initialize_is_idempotent_within_a_process() {
  let s = store().await;
  s.initialize().await.unwrap();

  // A local write between calls survives: the wipe happens only on the
  // first initialize of the process.
  s.insert(Record::Agent(Agent { id: 900, value: "vieras".into() }))
    .await
    .unwrap();
  s.initialize().await.unwrap();

  let found = s.find_by_id(Collection::Agents, 900).await.unwrap();
  assert!(found.is_some());
}

#[tokio::test]
async fn reseed_replaces_all_content() {
  let s = store().await;
  s.initialize().await.unwrap();
  s.reseed(&entries(SYODA)).await.unwrap();

  let verbs = s.query(Collection::Verbs, &Filter::default()).await.unwrap();
  assert_eq!(verbs.len(), 1);
  assert_eq!(verbs[0], Record::Verb(Verb {
    id:       0,
    value:    "syödä".into(),
    group_id: 0,
  }));

  let agents = s.query(Collection::Agents, &Filter::default()).await.unwrap();
  assert_eq!(agents.len(), 2);
}

// ─── Query & filters ─────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_filter_returns_all_records() {
  let s = store().await;
  s.reseed(&entries(SYODA)).await.unwrap();

  let trios = s.query(Collection::Trios, &Filter::default()).await.unwrap();
  assert_eq!(trios.len(), 2);
}

#[tokio::test]
async fn filter_fields_are_conjunctive() {
  let s = store().await;
  s.reseed(&entries(SYODA)).await.unwrap();

  // verb 0 + agent 0 → exactly the (minä, syödä, omenaa) trio.
  let filter = Filter {
    verb_id: Some(0),
    agent_id: Some(0),
    ..Filter::default()
  };
  let trios = s.query(Collection::Trios, &filter).await.unwrap();
  assert_eq!(trios.len(), 1);
  let Record::Trio(trio) = &trios[0] else { panic!("expected a trio") };
  assert_eq!(trio.patient_id, 0);

  // Same verb, an agent it never pairs with that patient → empty.
  let filter = Filter {
    verb_id: Some(0),
    agent_id: Some(1),
    patient_id: Some(0),
    ..Filter::default()
  };
  assert!(s.query(Collection::Trios, &filter).await.unwrap().is_empty());
}

#[tokio::test]
async fn filter_field_absent_from_shape_matches_nothing() {
  let s = store().await;
  s.reseed(&entries(SYODA)).await.unwrap();

  // Agents have no group_id column.
  let agents = s
    .query(Collection::Agents, &Filter::by_group(0))
    .await
    .unwrap();
  assert!(agents.is_empty());
}

#[tokio::test]
async fn query_by_value_and_group() {
  let s = store().await;
  s.initialize().await.unwrap();

  let verbs = s
    .query(Collection::Verbs, &Filter::by_value("syödä"))
    .await
    .unwrap();
  assert_eq!(verbs.len(), 1);

  let group0 = s.query(Collection::Verbs, &Filter::by_group(0)).await.unwrap();
  assert!(!group0.is_empty());
  assert!(group0.iter().all(|r| matches!(r, Record::Verb(v) if v.group_id == 0)));
}

#[tokio::test]
async fn sql_filtering_agrees_with_filter_matches() {
  let s = store().await;
  s.initialize().await.unwrap();

  let all = s.query(Collection::Trios, &Filter::default()).await.unwrap();
  let filter = Filter::by_verb(1);
  let filtered = s.query(Collection::Trios, &filter).await.unwrap();

  let expected: Vec<_> =
    all.into_iter().filter(|r| filter.matches(r)).collect();
  assert_eq!(filtered, expected);
}

// ─── Round trips ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_then_find_returns_equal_record() {
  let s = store().await;

  let verb = Record::Verb(Verb { id: 42, value: "uida".into(), group_id: 3 });
  let stored = s.insert(verb.clone()).await.unwrap();
  assert_eq!(stored, verb);

  let found = s.find_by_id(Collection::Verbs, 42).await.unwrap();
  assert_eq!(found, Some(verb));
}

#[tokio::test]
async fn find_missing_returns_none() {
  let s = store().await;
  let found = s.find_by_id(Collection::Verbs, 999).await.unwrap();
  assert!(found.is_none());
}

#[tokio::test]
async fn insert_with_existing_id_replaces() {
  let s = store().await;

  s.insert(Record::Agent(Agent { id: 5, value: "hän".into() }))
    .await
    .unwrap();
  s.insert(Record::Agent(Agent { id: 5, value: "he".into() }))
    .await
    .unwrap();

  let agents = s.query(Collection::Agents, &Filter::default()).await.unwrap();
  assert_eq!(agents.len(), 1);
  assert_eq!(agents[0], Record::Agent(Agent { id: 5, value: "he".into() }));
}

#[tokio::test]
async fn update_patches_only_set_fields() {
  let s = store().await;
  s.insert(Record::Verb(Verb { id: 7, value: "juosta".into(), group_id: 1 }))
    .await
    .unwrap();

  let updated = s
    .update(Collection::Verbs, 7, Patch::group(2))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(
    updated,
    Record::Verb(Verb { id: 7, value: "juosta".into(), group_id: 2 })
  );

  let found = s.find_by_id(Collection::Verbs, 7).await.unwrap();
  assert_eq!(found, Some(updated));
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = store().await;
  let updated = s
    .update(Collection::Verbs, 999, Patch::value("x"))
    .await
    .unwrap();
  assert!(updated.is_none());
}

#[tokio::test]
async fn delete_then_find_returns_none() {
  let s = store().await;
  s.insert(Record::Patient(lause_core::word::Patient {
    id:    3,
    value: "vettä".into(),
  }))
  .await
  .unwrap();

  assert!(s.delete(Collection::Patients, 3).await.unwrap());
  assert!(s.find_by_id(Collection::Patients, 3).await.unwrap().is_none());
  // Second delete removes nothing.
  assert!(!s.delete(Collection::Patients, 3).await.unwrap());
}

#[tokio::test]
async fn returned_records_are_copies() {
  let s = store().await;
  s.insert(Record::Agent(Agent { id: 1, value: "minä".into() }))
    .await
    .unwrap();

  let mut fetched = s
    .find_by_id(Collection::Agents, 1)
    .await
    .unwrap()
    .unwrap();
  if let Record::Agent(a) = &mut fetched {
    a.value = "mutated".into();
  }

  let again = s.find_by_id(Collection::Agents, 1).await.unwrap().unwrap();
  assert_eq!(again, Record::Agent(Agent { id: 1, value: "minä".into() }));
}

// ─── Combination validity ────────────────────────────────────────────────────

#[tokio::test]
async fn valid_combination_is_a_membership_check() {
  let s = store().await;
  s.insert(Record::Trio(Trio {
    id:         0,
    verb_id:    5,
    agent_id:   10,
    patient_id: 20,
    group_id:   0,
  }))
  .await
  .unwrap();

  assert!(s.is_valid_combination(10, 5, 20).await.unwrap());
  // Each field off by itself invalidates the triple.
  assert!(!s.is_valid_combination(11, 5, 20).await.unwrap());
  assert!(!s.is_valid_combination(10, 6, 20).await.unwrap());
  assert!(!s.is_valid_combination(10, 5, 99).await.unwrap());
}

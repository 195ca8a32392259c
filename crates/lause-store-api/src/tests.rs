//! Tests for `ApiStore`: pure wire mapping, plus end-to-end behaviour
//! against a throwaway axum server bound to an ephemeral port.

use std::collections::HashMap;

use axum::{
  Json, Router,
  extract::{Path, Query},
  http::StatusCode,
  response::IntoResponse,
  routing::{get, post},
};
use serde_json::{Value, json};

use lause_core::{
  record::{Collection, Filter, Record},
  store::WordStore,
  word::Verb,
};

use crate::{ApiStore, Error, wire};

// ─── Wire mapping ────────────────────────────────────────────────────────────

#[test]
fn verb_maps_with_group() {
  let record = wire::word_to_record(wire::WireWord {
    id:       7,
    text:     "juoda".into(),
    kind:     "VERB".into(),
    group_id: Some(2),
  })
  .unwrap();
  assert_eq!(
    record,
    Record::Verb(Verb { id: 7, value: "juoda".into(), group_id: 2 })
  );
}

#[test]
fn verb_without_group_defaults_to_zero() {
  let record = wire::word_to_record(wire::WireWord {
    id:       7,
    text:     "juoda".into(),
    kind:     "VERB".into(),
    group_id: None,
  })
  .unwrap();
  assert!(matches!(record, Record::Verb(Verb { group_id: 0, .. })));
}

#[test]
fn subject_and_object_map_to_agent_and_patient() {
  let agent = wire::word_to_record(wire::WireWord {
    id:       1,
    text:     "minä".into(),
    kind:     "SUBJECT".into(),
    group_id: None,
  })
  .unwrap();
  assert_eq!(agent.collection(), Collection::Agents);

  let patient = wire::word_to_record(wire::WireWord {
    id:       3,
    text:     "vettä".into(),
    kind:     "OBJECT".into(),
    group_id: None,
  })
  .unwrap();
  assert_eq!(patient.collection(), Collection::Patients);
}

#[test]
fn unknown_kind_is_a_hard_error() {
  let err = wire::word_to_record(wire::WireWord {
    id:       1,
    text:     "iso".into(),
    kind:     "ADJEKTIIVI".into(),
    group_id: None,
  })
  .unwrap_err();
  assert!(matches!(err, lause_core::Error::UnknownWordKind(kind) if kind == "ADJEKTIIVI"));
}

#[test]
fn combination_flattens_nested_references() {
  let combo: wire::WireCombination = serde_json::from_value(json!({
    "id": 100,
    "subject": { "id": 1, "text": "minä" },
    "verb":    { "id": 7, "text": "juoda" },
    "object":  { "id": 3, "text": "vettä" },
    "sentence": "minä juon vettä"
  }))
  .unwrap();

  let trio = wire::combination_to_trio(combo, 2);
  assert_eq!(
    (trio.id, trio.agent_id, trio.verb_id, trio.patient_id, trio.group_id),
    (100, 1, 7, 3, 2)
  );
}

// ─── Mock backend ────────────────────────────────────────────────────────────

fn word_json(id: u32, text: &str, kind: &str, group_id: Option<u32>) -> Value {
  let mut word = json!({ "id": id, "text": text, "type": kind, "created_at": "2024-01-01T00:00:00Z" });
  if let Some(group_id) = group_id {
    word["group_id"] = json!(group_id);
  }
  word
}

fn combo_json(id: u32, subject: u32, verb: u32, object: u32) -> Value {
  json!({
    "id": id,
    "subject": { "id": subject, "text": "s" },
    "verb":    { "id": verb,    "text": "v" },
    "object":  { "id": object,  "text": "o" },
    "sentence": "lause"
  })
}

fn ok(data: Vec<Value>) -> Json<Value> {
  Json(json!({ "success": true, "data": data }))
}

fn not_found() -> impl IntoResponse {
  (StatusCode::NOT_FOUND, Json(json!({ "success": false, "data": [] })))
}

async fn words(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
  let data = match params.get("type").map(String::as_str) {
    Some("VERB") => vec![
      word_json(7, "juoda", "VERB", Some(2)),
      word_json(8, "syödä", "VERB", Some(0)),
    ],
    Some("SUBJECT") => vec![
      word_json(1, "minä", "SUBJECT", None),
      word_json(2, "sinä", "SUBJECT", None),
    ],
    Some("OBJECT") => vec![
      word_json(3, "vettä", "OBJECT", None),
      word_json(4, "omenaa", "OBJECT", None),
    ],
    _ => vec![],
  };
  ok(data)
}

async fn word(Path(id): Path<u32>) -> axum::response::Response {
  match id {
    7 => ok(vec![word_json(7, "juoda", "VERB", Some(2))]).into_response(),
    1 => ok(vec![word_json(1, "minä", "SUBJECT", None)]).into_response(),
    _ => not_found().into_response(),
  }
}

fn all_combos() -> Vec<(u32, u32, u32, u32)> {
  vec![(100, 1, 7, 3), (101, 2, 7, 3), (102, 1, 8, 4)]
}

async fn combinations(
  Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
  let verb_id: Option<u32> =
    params.get("verb_id").and_then(|v| v.parse().ok());
  let data = all_combos()
    .into_iter()
    .filter(|(_, _, verb, _)| verb_id.is_none_or(|want| *verb == want))
    .map(|(id, subject, verb, object)| combo_json(id, subject, verb, object))
    .collect();
  ok(data)
}

async fn combination(Path(id): Path<u32>) -> axum::response::Response {
  match all_combos().into_iter().find(|(combo_id, ..)| *combo_id == id) {
    Some((id, subject, verb, object)) => {
      ok(vec![combo_json(id, subject, verb, object)]).into_response()
    }
    None => not_found().into_response(),
  }
}

async fn validate(Json(body): Json<Value>) -> Json<Value> {
  let triple = (&body["agentId"], &body["verbId"], &body["patientId"]);
  let valid = all_combos()
    .into_iter()
    .any(|(_, subject, verb, object)| {
      triple == (&json!(subject), &json!(verb), &json!(object))
    });
  Json(json!({
    "success": true,
    "data": [{ "valid": valid, "sentence": "lause", "message": "" }]
  }))
}

/// Serve the mock API on an ephemeral port and return its base URL.
async fn mock_server(app: Router) -> String {
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  format!("http://{addr}")
}

async fn mock_store() -> ApiStore {
  let app = Router::new()
    .route("/api/words", get(words))
    .route("/api/words/{id}", get(word))
    .route("/api/combinations", get(combinations))
    .route("/api/combinations/{id}", get(combination))
    .route("/api/suggestions/validate", post(validate));
  ApiStore::new(mock_server(app).await).unwrap()
}

/// A store pointed at nothing: connections are refused immediately.
fn unreachable_store() -> ApiStore {
  ApiStore::new("http://127.0.0.1:9").unwrap()
}

// ─── Queries ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn query_verbs_maps_wire_words() {
  let s = mock_store().await;
  let verbs = s.query(Collection::Verbs, &Filter::default()).await.unwrap();
  assert_eq!(verbs.len(), 2);
  assert_eq!(
    verbs[0],
    Record::Verb(Verb { id: 7, value: "juoda".into(), group_id: 2 })
  );
}

#[tokio::test]
async fn query_applies_filter_client_side() {
  let s = mock_store().await;
  let agents = s
    .query(Collection::Agents, &Filter::by_value("minä"))
    .await
    .unwrap();
  assert_eq!(agents.len(), 1);
  assert_eq!(agents[0].id(), 1);
}

#[tokio::test]
async fn query_trios_resolves_group_from_verb() {
  let s = mock_store().await;
  let trios = s
    .query(Collection::Trios, &Filter::by_verb(7))
    .await
    .unwrap();
  assert_eq!(trios.len(), 2);
  for record in &trios {
    let Record::Trio(trio) = record else { panic!("expected a trio") };
    assert_eq!(trio.verb_id, 7);
    assert_eq!(trio.group_id, 2);
  }
}

#[tokio::test]
async fn query_correct_answers_is_empty_remotely() {
  let s = mock_store().await;
  let answers = s
    .query(Collection::CorrectAnswers, &Filter::default())
    .await
    .unwrap();
  assert!(answers.is_empty());
}

// ─── Single-record lookups ───────────────────────────────────────────────────

#[tokio::test]
async fn find_by_id_maps_the_single_record() {
  let s = mock_store().await;
  let found = s.find_by_id(Collection::Verbs, 7).await.unwrap();
  assert_eq!(
    found,
    Some(Record::Verb(Verb { id: 7, value: "juoda".into(), group_id: 2 }))
  );
}

#[tokio::test]
async fn find_by_id_wrong_collection_is_none() {
  // Word 7 exists but is a verb; asking the agents collection misses.
  let s = mock_store().await;
  let found = s.find_by_id(Collection::Agents, 7).await.unwrap();
  assert!(found.is_none());
}

#[tokio::test]
async fn find_by_id_missing_is_none() {
  let s = mock_store().await;
  assert!(s.find_by_id(Collection::Verbs, 999).await.unwrap().is_none());
  assert!(s.find_by_id(Collection::Trios, 999).await.unwrap().is_none());
}

#[tokio::test]
async fn find_trio_by_id_flattens_and_resolves_group() {
  let s = mock_store().await;
  let found = s.find_by_id(Collection::Trios, 100).await.unwrap().unwrap();
  let Record::Trio(trio) = found else { panic!("expected a trio") };
  assert_eq!((trio.agent_id, trio.verb_id, trio.patient_id), (1, 7, 3));
  assert_eq!(trio.group_id, 2);
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn validate_delegates_to_the_endpoint() {
  let s = mock_store().await;
  assert!(s.is_valid_combination(1, 7, 3).await.unwrap());
  assert!(s.is_valid_combination(2, 7, 3).await.unwrap());
  assert!(!s.is_valid_combination(2, 8, 4).await.unwrap());
}

// ─── Degrade policy ──────────────────────────────────────────────────────────

#[tokio::test]
async fn network_failure_degrades_reads_to_empty() {
  let s = unreachable_store();

  let verbs = s.query(Collection::Verbs, &Filter::default()).await.unwrap();
  assert!(verbs.is_empty());

  let found = s.find_by_id(Collection::Verbs, 7).await.unwrap();
  assert!(found.is_none());

  assert!(!s.is_valid_combination(1, 7, 3).await.unwrap());
}

#[tokio::test]
async fn network_failure_fails_initialize() {
  let s = unreachable_store();
  let err = s.initialize().await.unwrap_err();
  assert!(matches!(err, Error::Unavailable(_)));
}

#[tokio::test]
async fn unknown_wire_kind_fails_loudly() {
  async fn bad_words() -> Json<Value> {
    ok(vec![word_json(1, "iso", "ADJEKTIIVI", None)])
  }
  let app = Router::new().route("/api/words", get(bad_words));
  let s = ApiStore::new(mock_server(app).await).unwrap();

  let err = s
    .query(Collection::Verbs, &Filter::default())
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Core(lause_core::Error::UnknownWordKind(_))
  ));
}

#[tokio::test]
async fn correct_answer_writes_are_unsupported() {
  let s = mock_store().await;
  let err = s
    .insert(Record::CorrectAnswer(lause_core::trio::CorrectAnswer {
      id:         0,
      trio_id:    100,
      created_at: chrono::Utc::now(),
    }))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Unsupported(Collection::CorrectAnswers)));
}

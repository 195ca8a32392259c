//! SQL schema for the embedded lause store.
//!
//! Executed once at connection startup. Future migrations will be gated
//! on the `PRAGMA user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Foreign keys are deliberately not declared: trio references are allowed
/// to dangle (cross-backend consistency is not transactionally enforced)
/// and consumers filter unresolvable references out.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS verbs (
    id        INTEGER PRIMARY KEY,
    value     TEXT NOT NULL,
    group_id  INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS agents (
    id        INTEGER PRIMARY KEY,
    value     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS patients (
    id        INTEGER PRIMARY KEY,
    value     TEXT NOT NULL
);

-- One row per grammatically valid (agent, verb, patient) sentence.
-- group_id is denormalised from the verb for query convenience.
CREATE TABLE IF NOT EXISTS trios (
    id          INTEGER PRIMARY KEY,
    verb_id     INTEGER NOT NULL,
    agent_id    INTEGER NOT NULL,
    patient_id  INTEGER NOT NULL,
    group_id    INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS correct_answers (
    id          INTEGER PRIMARY KEY,
    trio_id     INTEGER NOT NULL,
    created_at  TEXT NOT NULL    -- ISO 8601 UTC
);

CREATE INDEX IF NOT EXISTS trios_verb_idx  ON trios(verb_id);
CREATE INDEX IF NOT EXISTS trios_group_idx ON trios(group_id);
CREATE INDEX IF NOT EXISTS verbs_group_idx ON verbs(group_id);

PRAGMA user_version = 1;
";

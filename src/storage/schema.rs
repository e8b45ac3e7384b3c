//! Database schema definitions.

/// Schema version reached once every migration has run.
pub const CURRENT_VERSION: i32 = 1;

/// Schema version tracking table.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Durable key/value slots; one row per persisted collection.
const KV_SLOTS: &str = r#"
CREATE TABLE IF NOT EXISTS kv_slots (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Migrations in ascending version order. Each entry is the version it brings
/// the database to and the SQL that gets it there.
pub const MIGRATIONS: &[(i32, &str)] = &[(1, KV_SLOTS)];

//! SQL DDL for initializing the model store.

/// Version stamped into `PRAGMA user_version` once the schema exists.
pub const STORE_VERSION: i64 = 1;

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT (ids are never reused)
/// - `thumbnail` holds a `data:` URL, empty when absent
/// - `glb_data` BLOB, stored as received
/// - `upload_date` TEXT, RFC3339
/// - non-unique index on `name`
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS models (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    thumbnail TEXT NOT NULL DEFAULT '',
    glb_data BLOB NOT NULL,
    file_name TEXT NOT NULL,
    upload_date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_models_name ON models(name);
"#;

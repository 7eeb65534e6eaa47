//! Database module: the persistent model store.
//!
//! Layout:
//! - `models.rs`: record structs and the file name rule
//! - `schema.rs`: SQL DDL and the fixed store version
//! - `sqlite.rs`: queries against the SQLite pool
//! - `actor.rs`: the actor that owns the pool and serializes transactions

pub mod actor;
pub mod models;
pub mod schema;
pub mod sqlite;

pub use actor::{StoreHandle, spawn};
pub use models::{ModelId, ModelRecord, NewModelRecord, derive_file_name};
pub use schema::SQLITE_INIT;
pub use sqlite::{ModelStorage, SqlitePool};

use crate::db::models::{ModelId, ModelRecord, NewModelRecord};
use crate::db::schema::{SQLITE_INIT, STORE_VERSION};
use crate::error::StorageError;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;
use std::time::Duration;

pub type SqlitePool = Pool<Sqlite>;

/// Open (creating if missing) the SQLite database at `database_url`.
pub async fn open_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let mut pool_opts = SqlitePoolOptions::new();
    if database_url.contains(":memory:") || database_url.contains("mode=memory") {
        // every connection would otherwise see its own empty database
        pool_opts = pool_opts
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
    }
    Ok(pool_opts.connect_with(connect_opts).await?)
}

#[derive(Clone)]
pub struct ModelStorage {
    pool: SqlitePool,
}

impl ModelStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the table and index, then check or stamp the store version.
    pub async fn init_schema(&self) -> Result<(), StorageError> {
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }

        let (version,): (i64,) = sqlx::query_as("PRAGMA user_version")
            .fetch_one(&self.pool)
            .await?;
        match version {
            0 => {
                sqlx::query(&format!("PRAGMA user_version = {STORE_VERSION}"))
                    .execute(&self.pool)
                    .await?;
            }
            STORE_VERSION => {}
            other => {
                return Err(StorageError::Unavailable(format!(
                    "unsupported store version {other}, expected {STORE_VERSION}"
                )));
            }
        }
        Ok(())
    }

    /// Insert a record and return the id assigned by SQLite.
    pub async fn insert(&self, model: NewModelRecord) -> Result<ModelId, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT INTO models (name, thumbnail, glb_data, file_name, upload_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(model.name)
        .bind(model.thumbnail)
        .bind(model.glb_data)
        .bind(model.file_name)
        .bind(model.upload_date.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn list_all(&self) -> Result<Vec<ModelRecord>, StorageError> {
        let rows = sqlx::query(
            r#"SELECT id, name, thumbnail, glb_data, file_name, upload_date
               FROM models ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    /// Delete by id; a missing id is not an error.
    pub async fn delete_by_id(&self, id: ModelId) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM models WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn row_to_model(row: SqliteRow) -> Result<ModelRecord, StorageError> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let thumbnail: String = row.try_get("thumbnail")?;
        let glb_data: Vec<u8> = row.try_get("glb_data")?;
        let file_name: String = row.try_get("file_name")?;
        let upload_date_str: String = row.try_get("upload_date")?;

        let upload_date: DateTime<Utc> = DateTime::parse_from_rfc3339(&upload_date_str)
            .map_err(|e| StorageError::Decode(format!("id {id}: bad upload_date: {e}")))?
            .with_timezone(&Utc);

        Ok(ModelRecord {
            id,
            name,
            thumbnail,
            glb_data,
            file_name,
            upload_date,
        })
    }
}

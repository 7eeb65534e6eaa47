use crate::db::{ModelId, ModelRecord, NewModelRecord, StoreHandle};
use crate::error::RepositoryError;
use tracing::info;

/// Names of the demonstration records inserted by [`ModelRepository::seed_samples`].
pub const SAMPLE_MODELS: [&str; 3] = ["Divine Krishna", "Golden Buddha", "Sacred Mandala"];

/// Typed model operations over the store.
#[derive(Clone)]
pub struct ModelRepository {
    store: StoreHandle,
}

impl ModelRepository {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Build a record from its parts and persist it.
    pub async fn create(
        &self,
        name: &str,
        thumbnail: String,
        glb_data: Vec<u8>,
    ) -> Result<ModelRecord, RepositoryError> {
        self.save(NewModelRecord::new(name, thumbnail, glb_data))
            .await
    }

    /// Persist an already built record and return it with its assigned id.
    pub async fn save(&self, model: NewModelRecord) -> Result<ModelRecord, RepositoryError> {
        let id = self.store.insert(model.clone()).await?;
        Ok(model.with_id(id))
    }

    pub async fn list(&self) -> Result<Vec<ModelRecord>, RepositoryError> {
        Ok(self.store.list_all().await?)
    }

    pub async fn remove(&self, id: ModelId) -> Result<(), RepositoryError> {
        Ok(self.store.delete_by_id(id).await?)
    }

    /// Insert the sample records with empty thumbnails and payloads.
    pub async fn seed_samples(&self) -> Result<Vec<ModelRecord>, RepositoryError> {
        let mut created = Vec::with_capacity(SAMPLE_MODELS.len());
        for name in SAMPLE_MODELS {
            created.push(self.create(name, String::new(), Vec::new()).await?);
        }
        info!(count = created.len(), "sample models added");
        Ok(created)
    }

    /// Seed only when the store holds no records. Returns how many were added.
    pub async fn seed_if_empty(&self) -> Result<usize, RepositoryError> {
        if !self.list().await?.is_empty() {
            return Ok(0);
        }
        Ok(self.seed_samples().await?.len())
    }
}

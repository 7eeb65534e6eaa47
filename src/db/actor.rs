use crate::db::models::{ModelId, ModelRecord, NewModelRecord};
use crate::db::sqlite::{ModelStorage, open_pool};
use crate::error::StorageError;

use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use tracing::{debug, info, warn};

/// Messages handled by the store actor. Each one is a single transaction.
#[derive(Debug)]
pub enum StoreMessage {
    Insert(NewModelRecord, RpcReplyPort<Result<ModelId, StorageError>>),
    ListAll(RpcReplyPort<Result<Vec<ModelRecord>, StorageError>>),
    Delete(ModelId, RpcReplyPort<Result<(), StorageError>>),
}

/// Handle for talking to the store actor. Cheap to clone; all clones share one store.
#[derive(Clone)]
pub struct StoreHandle {
    actor: ActorRef<StoreMessage>,
}

impl StoreHandle {
    /// Persist a record and return the id the store assigned to it.
    pub async fn insert(&self, model: NewModelRecord) -> Result<ModelId, StorageError> {
        ractor::call!(self.actor, StoreMessage::Insert, model)
            .map_err(|e| StorageError::Unavailable(format!("Insert RPC failed: {e}")))?
    }

    /// Every stored record, in insertion order.
    pub async fn list_all(&self) -> Result<Vec<ModelRecord>, StorageError> {
        ractor::call!(self.actor, StoreMessage::ListAll)
            .map_err(|e| StorageError::Unavailable(format!("ListAll RPC failed: {e}")))?
    }

    /// Remove a record. Unknown ids are ignored.
    pub async fn delete_by_id(&self, id: ModelId) -> Result<(), StorageError> {
        ractor::call!(self.actor, StoreMessage::Delete, id)
            .map_err(|e| StorageError::Unavailable(format!("Delete RPC failed: {e}")))?
    }

    /// Stop the actor and close the underlying pool.
    pub async fn shutdown(self) {
        if let Err(e) = self.actor.stop_and_wait(None, None).await {
            warn!(error = %e, "store actor did not stop cleanly");
        }
    }
}

struct StoreActor;

#[ractor::async_trait]
impl Actor for StoreActor {
    type Msg = StoreMessage;
    type State = ModelStorage;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let pool = open_pool(&database_url).await?;
        let storage = ModelStorage::new(pool);
        storage.init_schema().await?;
        info!(database_url = %database_url, "model store opened");
        Ok(storage)
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            StoreMessage::Insert(model, rp) => {
                let result = state.insert(model).await;
                if let Ok(id) = &result {
                    debug!("ID: {id}, model inserted");
                }
                let _ = rp.send(result);
            }
            StoreMessage::ListAll(rp) => {
                let _ = rp.send(state.list_all().await);
            }
            StoreMessage::Delete(id, rp) => {
                let result = state.delete_by_id(id).await;
                if result.is_ok() {
                    debug!("ID: {id}, model deleted");
                }
                let _ = rp.send(result);
            }
        }
        Ok(())
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        state.pool().close().await;
        Ok(())
    }
}

/// Open the store at `database_url` and spawn the actor that owns it.
pub async fn spawn(database_url: &str) -> Result<StoreHandle, StorageError> {
    let (actor, _jh) = Actor::spawn(None, StoreActor, database_url.to_string())
        .await
        .map_err(|e| StorageError::Unavailable(format!("failed to start store actor: {e}")))?;
    Ok(StoreHandle { actor })
}

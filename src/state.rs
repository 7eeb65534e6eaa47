use crate::db::{ModelId, ModelRecord, StoreHandle};
use crate::error::CatalogError;
use crate::render::{CatalogView, DownloadArtifact, ViewMode};
use crate::service::repository::ModelRepository;
use crate::service::session::SessionGate;
use crate::service::upload::{UploadForm, UploadPipeline};
use std::path::PathBuf;
use tracing::{info, warn};

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this model?";
pub const UPLOAD_SUCCESS: &str = "Model uploaded successfully with security features applied!";

/// Interactive yes/no question asked before destructive actions.
#[allow(async_fn_in_trait)]
pub trait Confirm {
    async fn confirm(&mut self, message: &str) -> bool;
}

/// Fixed answer, for non-interactive callers.
impl Confirm for bool {
    async fn confirm(&mut self, _message: &str) -> bool {
        *self
    }
}

/// Public and admin listings, always rebuilt together from one fetch.
#[derive(Debug, Clone, Default)]
pub struct Listings {
    pub public: CatalogView,
    pub admin: CatalogView,
    records: Vec<ModelRecord>,
}

impl Listings {
    fn rebuild(records: Vec<ModelRecord>) -> Self {
        Self {
            public: CatalogView::build(&records, ViewMode::Public),
            admin: CatalogView::build(&records, ViewMode::Admin),
            records,
        }
    }

    pub fn view(&self, mode: ViewMode) -> &CatalogView {
        match mode {
            ViewMode::Public => &self.public,
            ViewMode::Admin => &self.admin,
        }
    }

    pub fn record(&self, id: ModelId) -> Option<&ModelRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}

/// Everything one catalog session operates on: store access, session state,
/// the pending upload form and the current listings.
pub struct CatalogState {
    repo: ModelRepository,
    session: SessionGate,
    pipeline: UploadPipeline,
    download_dir: PathBuf,
    listings: Listings,
    pub upload_form: UploadForm,
}

impl CatalogState {
    pub fn new(store: StoreHandle, download_dir: impl Into<PathBuf>) -> Self {
        Self::with_session(store, download_dir, SessionGate::default())
    }

    pub fn with_session(
        store: StoreHandle,
        download_dir: impl Into<PathBuf>,
        session: SessionGate,
    ) -> Self {
        Self {
            repo: ModelRepository::new(store),
            session,
            pipeline: UploadPipeline::default(),
            download_dir: download_dir.into(),
            listings: Listings::default(),
            upload_form: UploadForm::default(),
        }
    }

    pub fn repository(&self) -> &ModelRepository {
        &self.repo
    }

    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionGate {
        &mut self.session
    }

    pub fn listings(&self) -> &Listings {
        &self.listings
    }

    /// Listing for the mode the session is currently in.
    pub fn active_view(&self) -> &CatalogView {
        self.listings.view(self.session.view_mode())
    }

    /// Re-fetch every record and rebuild both listings.
    pub async fn reload(&mut self) -> Result<(), CatalogError> {
        let records = self.repo.list().await?;
        self.listings = Listings::rebuild(records);
        Ok(())
    }

    /// Returns whether the credential was accepted. The admin listing is reloaded on success.
    pub async fn login(&mut self, credential: &str) -> Result<bool, CatalogError> {
        if !self.session.submit(credential) {
            return Ok(false);
        }
        self.reload().await?;
        Ok(true)
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.upload_form.clear();
    }

    /// Run the upload pipeline on the current form.
    ///
    /// The form is cleared only on success. Once the record is stored the upload
    /// counts as done: a failed reload afterwards is logged, not returned.
    pub async fn upload(&mut self) -> Result<ModelRecord, CatalogError> {
        self.require_admin("upload models")?;
        let record = self.pipeline.run(&self.upload_form, &self.repo).await?;
        self.upload_form.clear();
        if let Err(e) = self.reload().await {
            warn!("ID: {}, stored but listings not refreshed: {}", record.id, e);
        }
        Ok(record)
    }

    /// Delete after confirmation. Returns `false` when the operator declined.
    pub async fn delete(
        &mut self,
        id: ModelId,
        confirm: &mut impl Confirm,
    ) -> Result<bool, CatalogError> {
        self.require_admin("delete models")?;
        if !confirm.confirm(DELETE_PROMPT).await {
            return Ok(false);
        }
        self.repo.remove(id).await?;
        info!("ID: {id}, model deleted by admin");
        self.reload().await?;
        Ok(true)
    }

    /// Write the asset of a listed model into the download directory.
    pub async fn download(&self, id: ModelId) -> Result<PathBuf, CatalogError> {
        let record = self
            .listings
            .record(id)
            .ok_or(CatalogError::NotFound(id))?;
        DownloadArtifact::from(record)
            .materialize(&self.download_dir)
            .await
    }

    /// Add the sample records and reload.
    pub async fn seed(&mut self) -> Result<usize, CatalogError> {
        self.require_admin("add sample models")?;
        let added = self.repo.seed_samples().await?.len();
        self.reload().await?;
        Ok(added)
    }

    /// Fail with [`CatalogError::Forbidden`] unless the session is authenticated.
    pub fn require_admin(&self, action: &'static str) -> Result<(), CatalogError> {
        if self.session.is_admin() {
            Ok(())
        } else {
            Err(CatalogError::Forbidden(action))
        }
    }
}

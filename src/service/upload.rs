use crate::db::{ModelRecord, NewModelRecord};
use crate::error::CatalogError;
use crate::service::repository::ModelRepository;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const MISSING_FIELDS: &str = "Please fill all fields and select both thumbnail and GLB files";

/// Marker the security layer is meant to embed into the asset's JSON chunk.
pub const SECURITY_SIGNATURE: &str = "DM-9937-SECURE-CODE";

/// Pending upload, filled in field by field before submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    pub name: String,
    pub thumbnail: Option<PathBuf>,
    pub asset: Option<PathBuf>,
}

/// A form that passed validation.
#[derive(Debug, Clone, Copy)]
pub struct Submission<'a> {
    pub name: &'a str,
    pub thumbnail: &'a Path,
    pub asset: &'a Path,
}

impl UploadForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Require a non-blank name and both files.
    pub fn validate(&self) -> Result<Submission<'_>, CatalogError> {
        let name = self.name.trim();
        match (name.is_empty(), &self.thumbnail, &self.asset) {
            (false, Some(thumbnail), Some(asset)) => Ok(Submission {
                name,
                thumbnail,
                asset,
            }),
            _ => Err(CatalogError::Validation(MISSING_FIELDS.to_string())),
        }
    }
}

/// Post-processing applied to an asset before it is stored.
pub trait AssetTransform {
    fn apply(&self, glb_data: Vec<u8>, model_name: &str) -> Vec<u8>;
}

/// Placeholder for signing the asset.
///
/// Injecting [`SECURITY_SIGNATURE`] would mean parsing the GLB container,
/// rewriting its JSON chunk and re-packing the binary. None of that happens
/// yet: the payload is returned unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityLayers;

impl AssetTransform for SecurityLayers {
    fn apply(&self, glb_data: Vec<u8>, model_name: &str) -> Vec<u8> {
        info!(
            model = %model_name,
            signature = SECURITY_SIGNATURE,
            "applying security signature"
        );
        glb_data
    }
}

/// Validate, read, transform, build and persist one upload.
#[derive(Debug, Clone, Default)]
pub struct UploadPipeline<T = SecurityLayers> {
    transform: T,
}

impl<T: AssetTransform> UploadPipeline<T> {
    pub fn new(transform: T) -> Self {
        Self { transform }
    }

    /// Nothing is written before the final `save`, so any failure leaves the store untouched.
    pub async fn run(
        &self,
        form: &UploadForm,
        repo: &ModelRepository,
    ) -> Result<ModelRecord, CatalogError> {
        let submission = form.validate()?;

        let glb_data = read_file(submission.asset).await?;
        debug!(bytes = glb_data.len(), asset = %submission.asset.display(), "asset read");

        let glb_data = self.transform.apply(glb_data, submission.name);

        let thumbnail = read_data_url(submission.thumbnail).await?;
        debug!(thumbnail = %submission.thumbnail.display(), "thumbnail encoded");

        let model = NewModelRecord::new(submission.name, thumbnail, glb_data);
        let record = repo.save(model).await?;
        info!("ID: {}, model '{}' uploaded as {}", record.id, record.name, record.file_name);
        Ok(record)
    }
}

async fn read_file(path: &Path) -> Result<Vec<u8>, CatalogError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| CatalogError::IoRead {
            path: path.to_path_buf(),
            source,
        })
}

/// Read a file and encode it as a self-describing `data:` URL.
pub async fn read_data_url(path: &Path) -> Result<String, CatalogError> {
    let bytes = read_file(path).await?;
    Ok(encode_data_url(mime_for_path(path), &bytes))
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Image media type inferred from the file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_form() -> UploadForm {
        UploadForm {
            name: "  Sacred Mandala ".to_string(),
            thumbnail: Some(PathBuf::from("thumb.png")),
            asset: Some(PathBuf::from("mandala.glb")),
        }
    }

    #[test]
    fn validate_trims_name() {
        let form = full_form();
        let sub = form.validate().expect("form should validate");
        assert_eq!(sub.name, "Sacred Mandala");
        assert_eq!(sub.thumbnail, Path::new("thumb.png"));
        assert_eq!(sub.asset, Path::new("mandala.glb"));
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut form = full_form();
        form.name = " \t ".to_string();
        let err = form.validate().unwrap_err();
        assert!(matches!(err, CatalogError::Validation(ref m) if m == MISSING_FIELDS));
        assert!(err.is_recoverable());
    }

    #[test]
    fn validate_rejects_missing_files() {
        let mut no_thumb = full_form();
        no_thumb.thumbnail = None;
        assert!(no_thumb.validate().is_err());

        let mut no_asset = full_form();
        no_asset.asset = None;
        assert!(no_asset.validate().is_err());
    }

    #[test]
    fn clear_resets_every_field() {
        let mut form = full_form();
        form.clear();
        assert_eq!(form, UploadForm::default());
    }

    #[test]
    fn security_layers_leave_payload_unchanged() {
        let data = vec![0x67, 0x6c, 0x54, 0x46, 2, 0, 0, 0];
        assert_eq!(SecurityLayers.apply(data.clone(), "Golden Buddha"), data);
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_for_path(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("a.svg")), "image/svg+xml");
        assert_eq!(mime_for_path(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn data_url_layout() {
        assert_eq!(encode_data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
    }
}

use crate::db::ModelRecord;
use crate::db::models::GLB_MEDIA_TYPE;
use crate::error::CatalogError;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// A stored asset ready to be handed to the operator.
#[derive(Debug, Clone, Copy)]
pub struct DownloadArtifact<'a> {
    pub file_name: &'a str,
    pub media_type: &'static str,
    pub bytes: &'a [u8],
}

impl<'a> From<&'a ModelRecord> for DownloadArtifact<'a> {
    fn from(record: &'a ModelRecord) -> Self {
        Self {
            file_name: &record.file_name,
            media_type: GLB_MEDIA_TYPE,
            bytes: &record.glb_data,
        }
    }
}

impl DownloadArtifact<'_> {
    /// Write the payload to `dir/<file_name>`.
    ///
    /// Path separators in the stored name are replaced so the file always lands
    /// directly inside `dir`. Bytes go to a `.part` file first which is renamed
    /// into place, and removed again if anything fails.
    pub async fn materialize(&self, dir: &Path) -> Result<PathBuf, CatalogError> {
        let local_name = local_file_name(self.file_name)?;
        let target = dir.join(&local_name);
        let partial = dir.join(format!("{local_name}.part"));

        let written = async {
            tokio::fs::create_dir_all(dir).await?;
            tokio::fs::write(&partial, self.bytes).await?;
            tokio::fs::rename(&partial, &target).await?;
            Ok::<_, std::io::Error>(())
        }
        .await;

        if let Err(source) = written {
            if let Err(e) = tokio::fs::remove_file(&partial).await
                && e.kind() != std::io::ErrorKind::NotFound
            {
                warn!(path = %partial.display(), error = %e, "failed to remove partial download");
            }
            return Err(CatalogError::IoWrite {
                path: target,
                source,
            });
        }

        debug!(
            path = %target.display(),
            media_type = self.media_type,
            bytes = self.bytes.len(),
            "download written"
        );
        Ok(target)
    }
}

/// On-disk name for a stored file name: a single plain path component.
pub fn local_file_name(file_name: &str) -> Result<String, CatalogError> {
    let local: String = file_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let mut components = Path::new(&local).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(local),
        _ => Err(CatalogError::Validation(format!(
            "'{file_name}' cannot be used as a download file name"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_are_kept() {
        assert_eq!(
            local_file_name("sacred_mandala@divinemantra.glb").unwrap(),
            "sacred_mandala@divinemantra.glb"
        );
    }

    #[test]
    fn separators_are_replaced() {
        assert_eq!(
            local_file_name("ac/dc_live@divinemantra.glb").unwrap(),
            "ac_dc_live@divinemantra.glb"
        );
        assert_eq!(
            local_file_name("../escape@divinemantra.glb").unwrap(),
            ".._escape@divinemantra.glb"
        );
        assert_eq!(
            local_file_name("/etc\\passwd:x").unwrap(),
            "_etc_passwd_x"
        );
    }

    #[test]
    fn dot_components_are_rejected() {
        for name in ["", ".", ".."] {
            assert!(matches!(
                local_file_name(name),
                Err(CatalogError::Validation(_))
            ));
        }
    }
}

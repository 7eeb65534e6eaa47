use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ModelId = i64;

/// Suffix appended to every derived download file name.
pub const FILE_NAME_TAG: &str = "@divinemantra.glb";

/// Media type of the stored asset payload.
pub const GLB_MEDIA_TYPE: &str = "model/gltf-binary";

/// A stored model, as returned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelRecord {
    pub id: ModelId,
    pub name: String,
    /// `data:` URL of the thumbnail image; empty when none was stored.
    pub thumbnail: String,
    pub glb_data: Vec<u8>,
    pub file_name: String,
    pub upload_date: DateTime<Utc>,
}

/// A record that has not been assigned an id yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewModelRecord {
    pub name: String,
    pub thumbnail: String,
    pub glb_data: Vec<u8>,
    pub file_name: String,
    pub upload_date: DateTime<Utc>,
}

impl NewModelRecord {
    /// Build a record stamped now, deriving `file_name` from `name` once.
    pub fn new(name: impl Into<String>, thumbnail: String, glb_data: Vec<u8>) -> Self {
        let name = name.into();
        let file_name = derive_file_name(&name);
        Self {
            name,
            thumbnail,
            glb_data,
            file_name,
            upload_date: Utc::now(),
        }
    }

    pub fn with_id(self, id: ModelId) -> ModelRecord {
        ModelRecord {
            id,
            name: self.name,
            thumbnail: self.thumbnail,
            glb_data: self.glb_data,
            file_name: self.file_name,
            upload_date: self.upload_date,
        }
    }
}

/// Lower-case the name, collapse every whitespace run into one `_` and append the tag.
pub fn derive_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + FILE_NAME_TAG.len());
    let mut in_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.extend(ch.to_lowercase());
            in_space = false;
        }
    }
    out.push_str(FILE_NAME_TAG);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_from_two_words() {
        assert_eq!(
            derive_file_name("Sacred Mandala"),
            "sacred_mandala@divinemantra.glb"
        );
    }

    #[test]
    fn file_name_collapses_whitespace_runs() {
        assert_eq!(
            derive_file_name("Golden \t  Buddha\nStatue"),
            "golden_buddha_statue@divinemantra.glb"
        );
    }

    #[test]
    fn file_name_ignores_payloads() {
        let a = NewModelRecord::new("Divine Krishna", String::new(), vec![1, 2, 3]);
        let b = NewModelRecord::new("Divine Krishna", "data:image/png;base64,AA==".into(), vec![]);
        assert_eq!(a.file_name, b.file_name);
        assert_eq!(a.file_name, derive_file_name("Divine Krishna"));
    }
}

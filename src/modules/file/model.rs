use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::file::schema::FileEntity;

/// One part of an upload batch, already drained from the multipart stream.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub declared_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub struct NewFileRecord {
    pub owner_id: String,
    pub disk_location: String,
    pub declared_name: String,
    pub size: i64,
    pub content_type: String,
}

/// Outward projection of a file record. The webapp expects the stored path
/// under `fileLocation` and the MIME type under `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub id: Uuid,
    pub file_location: String,
    pub name: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub content_type: String,
    pub owner_id: String,
    pub is_public: bool,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

impl From<FileEntity> for FileResponse {
    fn from(entity: FileEntity) -> Self {
        FileResponse {
            id: entity.id,
            file_location: entity.disk_location,
            name: entity.declared_name,
            size: entity.size,
            content_type: entity.content_type,
            owner_id: entity.owner_id,
            is_public: entity.is_public,
            uploaded_at: entity.uploaded_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFilesResponse {
    pub files: Vec<FileResponse>,
    pub remaining_credits: i64,
}

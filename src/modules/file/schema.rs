use sqlx::prelude::FromRow;
use uuid::Uuid;

/// Metadata row for one stored upload. `disk_location` is the absolute path
/// of the blob on this server; `declared_name` is whatever the client called
/// the file. Ownership is keyed on the uploader's external subject id.
#[derive(Debug, Clone, FromRow)]
pub struct FileEntity {
    pub id: Uuid,
    pub owner_id: String,
    pub disk_location: String,
    pub declared_name: String,
    pub size: i64,
    pub content_type: String,
    pub is_public: bool,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}

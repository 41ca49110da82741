use sqlx::prelude::FromRow;
use uuid::Uuid;

/// One row per external identity that has registered with the backend. The
/// `subject` column carries the identity provider's stable user id and is the
/// value every owned resource is keyed on.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileEntity {
    pub id: Uuid,
    pub subject: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::profile::schema::ProfileEntity;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfileModel {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Display name cannot be empty"))]
    pub display_name: Option<String>,
    #[validate(url(message = "Invalid photo URL"))]
    pub photo_url: Option<String>,
}

pub struct NewProfile {
    pub subject: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: uuid::Uuid,
    pub subject: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProfileEntity> for ProfileResponse {
    fn from(entity: ProfileEntity) -> Self {
        ProfileResponse {
            id: entity.id,
            subject: entity.subject,
            email: entity.email,
            display_name: entity.display_name,
            photo_url: entity.photo_url,
            created_at: entity.created_at,
        }
    }
}

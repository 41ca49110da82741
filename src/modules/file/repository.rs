use uuid::Uuid;

use crate::{
    api::error,
    modules::file::{model::NewFileRecord, schema::FileEntity},
};

#[async_trait::async_trait]
pub trait FileRepository {
    async fn save(&self, file: &NewFileRecord) -> Result<FileEntity, error::SystemError>;

    async fn find_by_id(&self, file_id: &Uuid) -> Result<Option<FileEntity>, error::SystemError>;

    async fn find_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Vec<FileEntity>, error::SystemError>;

    async fn delete_by_id(&self, file_id: &Uuid) -> Result<(), error::SystemError>;

    /// Flip `is_public` in place. None when the id is unknown.
    async fn toggle_public(
        &self,
        file_id: &Uuid,
    ) -> Result<Option<FileEntity>, error::SystemError>;
}

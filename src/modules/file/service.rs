use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::credits::{repository::CreditsRepository, service::CreditsService};
use crate::modules::file::{
    model::{FileResponse, IncomingFile, NewFileRecord},
    repository::FileRepository,
    schema::FileEntity,
    storage::FileStorage,
};
use crate::modules::profile::service::ProfileService;

#[derive(Clone)]
pub struct FileService<F, C>
where
    F: FileRepository + Send + Sync,
    C: CreditsRepository + Send + Sync,
{
    file_repo: Arc<F>,
    storage: FileStorage,
    profiles: ProfileService,
    credits: CreditsService<C>,
}

impl<F, C> FileService<F, C>
where
    F: FileRepository + Send + Sync,
    C: CreditsRepository + Send + Sync,
{
    pub fn with_dependencies(
        file_repo: Arc<F>,
        storage: FileStorage,
        profiles: ProfileService,
        credits: CreditsService<C>,
    ) -> Self {
        Self { file_repo, storage, profiles, credits }
    }

    /// Store an upload batch for the caller.
    ///
    /// The whole batch is rejected up front when the balance cannot cover
    /// it. Past that check, files are processed strictly in input order and
    /// a failure aborts the call: files persisted earlier in the same batch
    /// stay persisted and their credits stay spent.
    pub async fn upload_files(
        &self,
        subject: &str,
        files: Vec<IncomingFile>,
    ) -> Result<Vec<FileResponse>, error::SystemError> {
        debug!("upload of {} file(s) requested by {}", files.len(), subject);
        let profile = self.profiles.resolve(subject).await?;

        if !self.credits.has_enough_credits(&profile.subject, files.len()).await? {
            let account = self.credits.get_user_credits(&profile.subject).await?;
            return Err(error::SystemError::InsufficientCredits {
                needed: files.len() as i64,
                available: account.credits,
            });
        }

        let mut saved = Vec::with_capacity(files.len());
        for file in files {
            let declared_name = file.declared_name.clone();
            let entity = self
                .store_one(&profile.subject, file)
                .await
                .map_err(|e| error::SystemError::upload_failed(declared_name, e))?;
            saved.push(FileResponse::from(entity));
        }

        info!("stored {} file(s) for {}", saved.len(), subject);
        Ok(saved)
    }

    /// Persist one file: bytes to disk, metadata row, then one credit.
    async fn store_one(
        &self,
        owner_id: &str,
        file: IncomingFile,
    ) -> Result<FileEntity, error::SystemError> {
        let location = self.storage.write(&file.bytes, &file.declared_name).await?;

        let new_file = NewFileRecord {
            owner_id: owner_id.to_string(),
            disk_location: location,
            declared_name: file.declared_name,
            size: file.bytes.len() as i64,
            content_type: file.content_type,
        };
        let entity = self.file_repo.save(&new_file).await?;

        self.credits.consume_credit(owner_id).await?;

        Ok(entity)
    }

    pub async fn get_files(&self, subject: &str) -> Result<Vec<FileResponse>, error::SystemError> {
        let profile = self.profiles.resolve(subject).await?;
        let files = self.file_repo.find_by_owner(&profile.subject).await?;
        Ok(files.into_iter().map(FileResponse::from).collect())
    }

    /// Fetch a record through the public gate. Unknown ids and private
    /// files are indistinguishable to the caller.
    pub async fn get_public_file(&self, id: &Uuid) -> Result<FileResponse, error::SystemError> {
        match self.file_repo.find_by_id(id).await? {
            Some(entity) if entity.is_public => Ok(entity.into()),
            _ => Err(error::SystemError::not_found("Unable to get the file")),
        }
    }

    /// Fetch a record for download. No visibility or ownership gate: this
    /// path serves share links to anonymous callers.
    pub async fn get_downloadable_file(
        &self,
        id: &Uuid,
    ) -> Result<FileResponse, error::SystemError> {
        let entity = self
            .file_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("File not found"))?;
        Ok(entity.into())
    }

    pub async fn load_content(&self, file: &FileResponse) -> Result<Vec<u8>, error::SystemError> {
        self.storage.read(&file.file_location).await
    }

    /// Remove a file the caller owns: bytes first (idempotent), then the
    /// metadata row.
    pub async fn delete_file(&self, id: &Uuid, subject: &str) -> Result<(), error::SystemError> {
        let entity = self
            .file_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("File not found"))?;

        if entity.owner_id != subject {
            return Err(error::SystemError::NotOwner);
        }

        self.storage.remove(&entity.disk_location).await?;
        self.file_repo.delete_by_id(id).await?;
        info!("deleted file {} for {}", id, subject);
        Ok(())
    }

    /// Flip a record's visibility. Any authenticated caller may toggle any
    /// file; the route carries no ownership check.
    pub async fn toggle_public(&self, id: &Uuid) -> Result<FileResponse, error::SystemError> {
        let entity = self
            .file_repo
            .toggle_public(id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("File not found"))?;
        Ok(entity.into())
    }
}

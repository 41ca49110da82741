use log::info;
use std::sync::Arc;

use crate::api::error;
use crate::modules::profile::model::{NewProfile, ProfileResponse, RegisterProfileModel};
use crate::modules::profile::repository::ProfileRepository;
use crate::modules::profile::schema::ProfileEntity;

#[derive(Clone)]
pub struct ProfileService {
    repo: Arc<dyn ProfileRepository + Send + Sync>,
}

impl ProfileService {
    pub fn with_dependencies(repo: Arc<dyn ProfileRepository + Send + Sync>) -> Self {
        info!("ProfileService initialized with dependencies");
        ProfileService { repo }
    }

    /// Create the caller's profile on first sign-in. Registration is
    /// idempotent: a subject that already has a profile gets the existing
    /// one back untouched. Returns whether a new row was created.
    pub async fn register(
        &self,
        subject: &str,
        profile: RegisterProfileModel,
    ) -> Result<(bool, ProfileResponse), error::SystemError> {
        if let Some(existing) = self.repo.find_by_subject(subject).await? {
            return Ok((false, existing.into()));
        }

        let new_profile = NewProfile {
            subject: subject.to_string(),
            email: profile.email,
            display_name: profile.display_name,
            photo_url: profile.photo_url,
        };

        match self.repo.create(&new_profile).await {
            Ok(entity) => {
                info!("profile created for subject {}", subject);
                Ok((true, entity.into()))
            }
            // two first sign-ins racing on the unique subject: the loser
            // reads back the winner's row
            Err(error::SystemError::Conflict(_)) => {
                let entity = self
                    .repo
                    .find_by_subject(subject)
                    .await?
                    .ok_or_else(|| error::SystemError::not_found("Profile not found"))?;
                Ok((false, entity.into()))
            }
            Err(e) => Err(e),
        }
    }

    pub async fn get_current(&self, subject: &str) -> Result<ProfileResponse, error::SystemError> {
        let entity = self.resolve(subject).await?;
        Ok(entity.into())
    }

    /// Resolve an authenticated subject to its profile row. Every operation
    /// on owned resources starts here; an unregistered subject is rejected.
    pub async fn resolve(&self, subject: &str) -> Result<ProfileEntity, error::SystemError> {
        self.repo
            .find_by_subject(subject)
            .await?
            .ok_or_else(|| error::SystemError::ProfileNotFound(subject.to_string()))
    }
}

use crate::{
    api::error, modules::profile::model::NewProfile, modules::profile::schema::ProfileEntity,
};

#[async_trait::async_trait]
pub trait ProfileRepository {
    async fn create(&self, profile: &NewProfile) -> Result<ProfileEntity, error::SystemError>;
    async fn find_by_subject(
        &self,
        subject: &str,
    ) -> Result<Option<ProfileEntity>, error::SystemError>;
}

use uuid::Uuid;

use crate::{
    api::error,
    modules::profile::{model::NewProfile, repository::ProfileRepository, schema::ProfileEntity},
};

#[derive(Clone)]
pub struct ProfilePgRepository {
    pool: sqlx::PgPool,
}

impl ProfilePgRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ProfileRepository for ProfilePgRepository {
    async fn create(&self, profile: &NewProfile) -> Result<ProfileEntity, error::SystemError> {
        let entity = sqlx::query_as::<_, ProfileEntity>(
            r#"
            INSERT INTO profiles (id, subject, email, display_name, photo_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&profile.subject)
        .bind(&profile.email)
        .bind(&profile.display_name)
        .bind(&profile.photo_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity)
    }

    async fn find_by_subject(
        &self,
        subject: &str,
    ) -> Result<Option<ProfileEntity>, error::SystemError> {
        let profile =
            sqlx::query_as::<_, ProfileEntity>("SELECT * FROM profiles WHERE subject = $1")
                .bind(subject)
                .fetch_optional(&self.pool)
                .await?;
        Ok(profile)
    }
}

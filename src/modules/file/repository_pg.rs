use uuid::Uuid;

use crate::{
    api::error,
    modules::file::{model::NewFileRecord, repository::FileRepository, schema::FileEntity},
};

#[derive(Clone)]
pub struct FilePgRepository {
    pool: sqlx::PgPool,
}

impl FilePgRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FileRepository for FilePgRepository {
    async fn save(&self, file: &NewFileRecord) -> Result<FileEntity, error::SystemError> {
        let entity = sqlx::query_as::<_, FileEntity>(
            r#"
            INSERT INTO files (id, owner_id, disk_location, declared_name, size, content_type)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&file.owner_id)
        .bind(&file.disk_location)
        .bind(&file.declared_name)
        .bind(file.size)
        .bind(&file.content_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity)
    }

    async fn find_by_id(&self, file_id: &Uuid) -> Result<Option<FileEntity>, error::SystemError> {
        let file = sqlx::query_as::<_, FileEntity>("SELECT * FROM files WHERE id = $1")
            .bind(file_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(file)
    }

    async fn find_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Vec<FileEntity>, error::SystemError> {
        let files = sqlx::query_as::<_, FileEntity>("SELECT * FROM files WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(files)
    }

    async fn delete_by_id(&self, file_id: &Uuid) -> Result<(), error::SystemError> {
        sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(file_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn toggle_public(
        &self,
        file_id: &Uuid,
    ) -> Result<Option<FileEntity>, error::SystemError> {
        // single statement so concurrent toggles serialize on the row and
        // each one flips exactly once
        let file = sqlx::query_as::<_, FileEntity>(
            "UPDATE files SET is_public = NOT is_public WHERE id = $1 RETURNING *",
        )
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(file)
    }
}

use crate::catalog::Catalog;
use async_trait::async_trait;
use darkroom_core::{AppError, NewPhoto, Photo, PhotoFilter, UpdatePhotoRequest};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Postgres-backed photo catalog
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    #[tracing::instrument(skip(self, photo), fields(db.table = "photos", db.operation = "insert", db.record_id = %photo.photo_id))]
    async fn insert(&self, photo: NewPhoto) -> Result<Photo, AppError> {
        let photo = sqlx::query_as::<Postgres, Photo>(
            r#"
            INSERT INTO photos (
                photo_id, filename, title, description, category, tags,
                featured, visible, price, licensing_available, width, height,
                original_size_mb, processed_size_mb, storage_path,
                original_asset_id, processed_asset_id, thumbnail_asset_id
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16, $17, $18
            )
            RETURNING *
            "#,
        )
        .bind(photo.photo_id)
        .bind(&photo.filename)
        .bind(&photo.title)
        .bind(&photo.description)
        .bind(photo.category)
        .bind(&photo.tags)
        .bind(photo.featured)
        .bind(photo.visible)
        .bind(photo.price)
        .bind(photo.licensing_available)
        .bind(photo.width)
        .bind(photo.height)
        .bind(photo.original_size_mb)
        .bind(photo.processed_size_mb)
        .bind(&photo.storage_path)
        .bind(&photo.original_asset_id)
        .bind(&photo.processed_asset_id)
        .bind(&photo.thumbnail_asset_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(photo)
    }

    #[tracing::instrument(skip(self), fields(db.table = "photos", db.operation = "select"))]
    async fn list(&self, filter: &PhotoFilter) -> Result<Vec<Photo>, AppError> {
        // NULL filter parameters disable their clause; LIMIT NULL and
        // OFFSET NULL are no-ops in Postgres.
        let photos = sqlx::query_as::<Postgres, Photo>(
            r#"
            SELECT * FROM photos
            WHERE ($1::boolean IS NULL OR visible = $1)
              AND ($2::boolean IS NULL OR featured = $2)
              AND ($3::photo_category IS NULL OR category = $3)
            ORDER BY uploaded_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filter.visible)
        .bind(filter.featured)
        .bind(filter.category)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(photos)
    }

    #[tracing::instrument(skip(self), fields(db.table = "photos", db.operation = "select", db.record_id = %photo_id))]
    async fn get(&self, photo_id: Uuid) -> Result<Option<Photo>, AppError> {
        let photo = sqlx::query_as::<Postgres, Photo>("SELECT * FROM photos WHERE photo_id = $1")
            .bind(photo_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(photo)
    }

    #[tracing::instrument(skip(self, update), fields(db.table = "photos", db.operation = "update", db.record_id = %photo_id))]
    async fn update(
        &self,
        photo_id: Uuid,
        update: &UpdatePhotoRequest,
    ) -> Result<Option<Photo>, AppError> {
        let photo = sqlx::query_as::<Postgres, Photo>(
            r#"
            UPDATE photos SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4::photo_category, category),
                tags = COALESCE($5, tags),
                featured = COALESCE($6, featured),
                visible = COALESCE($7, visible),
                price = COALESCE($8, price),
                licensing_available = COALESCE($9, licensing_available),
                location = COALESCE($10, location),
                date_taken = COALESCE($11, date_taken),
                notes = COALESCE($12, notes),
                updated_at = NOW()
            WHERE photo_id = $1
            RETURNING *
            "#,
        )
        .bind(photo_id)
        .bind(update.title.clone())
        .bind(update.description.clone())
        .bind(update.category)
        .bind(update.tags.clone())
        .bind(update.featured)
        .bind(update.visible)
        .bind(update.price)
        .bind(update.licensing_available)
        .bind(update.location.clone())
        .bind(update.date_taken)
        .bind(update.notes.clone())
        .fetch_optional(&self.pool)
        .await?;

        Ok(photo)
    }

    #[tracing::instrument(skip(self), fields(db.table = "photos", db.operation = "delete", db.record_id = %photo_id))]
    async fn delete(&self, photo_id: Uuid) -> Result<Option<Photo>, AppError> {
        let photo =
            sqlx::query_as::<Postgres, Photo>("DELETE FROM photos WHERE photo_id = $1 RETURNING *")
                .bind(photo_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(photo)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<Postgres, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

/// Per-identifier result of a bulk delete. A failure on one identifier
/// never rolls back the others.
#[derive(Debug)]
pub struct DeleteOutcome {
    pub id: Uuid,
    pub outcome: Result<(), DomainError>,
}

/// Sole writer of post state. Status transitions are conditional updates
/// guarded on the expected prior status, so a transition can never be
/// applied on top of stale data; `None` from a transition method means the
/// guard did not match (missing row or concurrent state change).
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn insert(&self, post: Post) -> Result<Post, DomainError>;
    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Post>, DomainError>;
    /// All posts for one owner, newest first.
    async fn list_for_owner(&self, user_id: Uuid) -> Result<Vec<Post>, DomainError>;
    /// In-place edit, applied only while the post is still editable.
    async fn update_post(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: PostUpdate,
    ) -> Result<Option<Post>, DomainError>;
    /// `draft → scheduled`, guarded on draft status and non-empty content.
    async fn mark_scheduled(
        &self,
        user_id: Uuid,
        id: Uuid,
        scheduled_date: DateTime<Utc>,
    ) -> Result<Option<Post>, DomainError>;
    /// `draft|scheduled → published`; sets published_date, clears
    /// scheduled_date. Irreversible.
    async fn mark_published(
        &self,
        user_id: Uuid,
        id: Uuid,
        published_date: DateTime<Utc>,
    ) -> Result<Option<Post>, DomainError>;
    /// Deletes a post; engagement rows go with it (cascade).
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), DomainError>;

    async fn delete_many(&self, user_id: Uuid, ids: &[Uuid]) -> Vec<DeleteOutcome> {
        let mut outcomes = Vec::with_capacity(ids.len());
        for &id in ids {
            outcomes.push(DeleteOutcome {
                id,
                outcome: self.delete(user_id, id).await,
            });
        }
        outcomes
    }
}

const POST_COLUMNS: &str = "id, user_id, title, topic, content, status, \
     scheduled_date, published_date, image_url, created_at";

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, post: Post) -> Result<Post, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, user_id, title, topic, content, status,
                               scheduled_date, published_date, image_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(post.id)
        .bind(post.user_id)
        .bind(&post.title)
        .bind(&post.topic)
        .bind(&post.content)
        .bind(post.status)
        .bind(post.scheduled_date)
        .bind(post.published_date)
        .bind(&post.image_url)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to insert post: {}", e);
            DomainError::Storage(format!("database error: {}", e))
        })?;

        info!(post_id = %post.id, user_id = %post.user_id, "post created");
        Ok(post)
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Post>, DomainError> {
        sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::Storage(e.to_string())
        })
    }

    async fn list_for_owner(&self, user_id: Uuid) -> Result<Vec<Post>, DomainError> {
        sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching posts: {}", e);
            DomainError::Storage(e.to_string())
        })
    }

    async fn update_post(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: PostUpdate,
    ) -> Result<Option<Post>, DomainError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE posts
            SET
                title = COALESCE($1, title),
                topic = COALESCE($2, topic),
                content = COALESCE($3, content),
                image_url = COALESCE($4, image_url)
            WHERE id = $5 AND user_id = $6 AND status <> 'published'
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(update.title)
        .bind(update.topic)
        .bind(update.content)
        .bind(update.image_url)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update post {}: {}", id, e);
            DomainError::Storage(e.to_string())
        })?;

        if post.is_some() {
            info!(post_id = %id, "post updated");
        }

        Ok(post)
    }

    async fn mark_scheduled(
        &self,
        user_id: Uuid,
        id: Uuid,
        scheduled_date: DateTime<Utc>,
    ) -> Result<Option<Post>, DomainError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE posts
            SET status = 'scheduled', scheduled_date = $1
            WHERE id = $2 AND user_id = $3 AND status = 'draft' AND content <> ''
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(scheduled_date)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to schedule post {}: {}", id, e);
            DomainError::Storage(e.to_string())
        })?;

        if post.is_some() {
            info!(post_id = %id, %scheduled_date, "post scheduled");
        }

        Ok(post)
    }

    async fn mark_published(
        &self,
        user_id: Uuid,
        id: Uuid,
        published_date: DateTime<Utc>,
    ) -> Result<Option<Post>, DomainError> {
        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE posts
            SET status = 'published', published_date = $1, scheduled_date = NULL
            WHERE id = $2 AND user_id = $3 AND status <> 'published' AND content <> ''
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(published_date)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to publish post {}: {}", id, e);
            DomainError::Storage(e.to_string())
        })?;

        if post.is_some() {
            info!(post_id = %id, "post published");
        }

        Ok(post)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let deleted = sqlx::query("DELETE FROM posts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        if deleted.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(id));
        }

        info!(post_id = %id, "post deleted");
        Ok(())
    }
}

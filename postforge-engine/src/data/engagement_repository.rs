use crate::domain::engagement::Engagement;
use crate::domain::error::DomainError;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

/// Read-only view over engagement counters. The engine never writes these;
/// they arrive from the publishing platform's sync job.
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    async fn find_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<Engagement>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresEngagementRepository {
    pool: PgPool,
}

impl PostgresEngagementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EngagementRepository for PostgresEngagementRepository {
    async fn find_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<Engagement>, DomainError> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Engagement>(
            r#"
            SELECT post_id, likes_count, comments_count, reposts_count
            FROM engagements WHERE post_id = ANY($1)
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error fetching engagements: {}", e);
            DomainError::Storage(e.to_string())
        })
    }
}

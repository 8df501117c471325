use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::application::engagement::{EngagementAggregator, EngagementSummary};
use crate::application::query::{PostPage, PostQuery, PostQueryEngine};
use crate::data::engagement_repository::EngagementRepository;
use crate::data::post_repository::{DeleteOutcome, PostRepository};
use crate::domain::engagement::EngagedPost;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostStatus, PostUpdate};

#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub topic: String,
    pub title: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsOverview {
    pub summary: EngagementSummary,
    pub top_posts: Vec<EngagedPost>,
}

/// Post lifecycle orchestration. Every operation takes the owner id
/// explicitly; nothing here reads ambient session state.
///
/// Transition methods validate against a fresh read, then apply the change
/// through the repository's status-guarded update. If the guard no longer
/// matches (a concurrent transition won), the operation fails and the
/// stored post is left as the winner wrote it.
#[derive(Clone)]
pub struct PostService<R, E>
where
    R: PostRepository + 'static,
    E: EngagementRepository + 'static,
{
    posts: Arc<R>,
    engagements: Arc<E>,
}

impl<R, E> PostService<R, E>
where
    R: PostRepository + 'static,
    E: EngagementRepository + 'static,
{
    pub fn new(posts: Arc<R>, engagements: Arc<E>) -> Self {
        Self { posts, engagements }
    }

    /// Creates a draft. Content may still be empty at this point; it has to
    /// be non-empty before the post can leave `draft`.
    #[instrument(skip(self, new_post))]
    pub async fn create_draft(
        &self,
        user_id: Uuid,
        new_post: NewPost,
    ) -> Result<Post, DomainError> {
        let mut post = Post::new(user_id, new_post.topic, new_post.title, new_post.content);
        post.image_url = new_post.image_url;
        self.posts.insert(post).await
    }

    pub async fn get_post(&self, user_id: Uuid, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(user_id, id)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    #[instrument(skip(self, update))]
    pub async fn update_post(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: PostUpdate,
    ) -> Result<Post, DomainError> {
        let current = self.get_post(user_id, id).await?;
        current.validate_update()?;

        match self.posts.update_post(user_id, id, update).await? {
            Some(post) => Ok(post),
            None => Err(DomainError::validation(
                "post was published concurrently and can no longer be edited",
            )),
        }
    }

    #[instrument(skip(self))]
    pub async fn schedule_post(
        &self,
        user_id: Uuid,
        id: Uuid,
        scheduled_date: DateTime<Utc>,
    ) -> Result<Post, DomainError> {
        let current = self.get_post(user_id, id).await?;
        current.validate_schedule(scheduled_date, Utc::now())?;

        match self
            .posts
            .mark_scheduled(user_id, id, scheduled_date)
            .await?
        {
            Some(post) => Ok(post),
            None => Err(DomainError::validation(
                "post state changed concurrently and can no longer be scheduled",
            )),
        }
    }

    /// Publishes from `draft` or `scheduled`. `published_date` defaults to
    /// now; the transition clears `scheduled_date` and is irreversible.
    #[instrument(skip(self))]
    pub async fn publish_post(
        &self,
        user_id: Uuid,
        id: Uuid,
        published_date: Option<DateTime<Utc>>,
    ) -> Result<Post, DomainError> {
        let current = self.get_post(user_id, id).await?;
        current.validate_publish()?;

        let published_date = published_date.unwrap_or_else(Utc::now);
        match self
            .posts
            .mark_published(user_id, id, published_date)
            .await?
        {
            Some(post) => Ok(post),
            None => Err(DomainError::validation(
                "post state changed concurrently and can no longer be published",
            )),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, user_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.posts.delete(user_id, id).await
    }

    /// Deletes a set of posts, one outcome per identifier. One failure does
    /// not roll back the others.
    #[instrument(skip(self, ids))]
    pub async fn delete_posts(&self, user_id: Uuid, ids: &[Uuid]) -> Vec<DeleteOutcome> {
        self.posts.delete_many(user_id, ids).await
    }

    /// The list view: fetch the owner's posts, join engagement for the
    /// published ones, then filter/sort/paginate.
    pub async fn list_posts(
        &self,
        user_id: Uuid,
        query: &PostQuery,
    ) -> Result<PostPage, DomainError> {
        let annotated = self.annotated_posts(user_id).await?;
        Ok(PostQueryEngine::run(annotated, query, Utc::now()))
    }

    /// Engagement totals plus the top posts, for the analytics view.
    pub async fn analytics_overview(
        &self,
        user_id: Uuid,
        top_n: usize,
    ) -> Result<AnalyticsOverview, DomainError> {
        let annotated = self.annotated_posts(user_id).await?;
        Ok(AnalyticsOverview {
            summary: EngagementAggregator::summarize(&annotated),
            top_posts: EngagementAggregator::top_posts(&annotated, top_n),
        })
    }

    async fn annotated_posts(&self, user_id: Uuid) -> Result<Vec<EngagedPost>, DomainError> {
        let posts = self.posts.list_for_owner(user_id).await?;
        let published_ids: Vec<Uuid> = posts
            .iter()
            .filter(|p| p.status == PostStatus::Published)
            .map(|p| p.id)
            .collect();
        let rows = self.engagements.find_for_posts(&published_ids).await?;
        Ok(EngagementAggregator::annotate(posts, rows))
    }
}

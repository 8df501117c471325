//! In-memory implementations of the repository traits, for tests and for
//! embedding the engine without a database. Transition guards mirror the
//! Postgres implementations exactly.

use crate::data::engagement_repository::EngagementRepository;
use crate::data::post_repository::PostRepository;
use crate::data::preferences_repository::PreferencesRepository;
use crate::domain::engagement::Engagement;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostStatus, PostUpdate};
use crate::domain::preferences::UserPreferences;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryStore {
    posts: RwLock<HashMap<Uuid, Post>>,
    engagements: RwLock<HashMap<Uuid, Engagement>>,
    preferences: RwLock<HashMap<Uuid, UserPreferences>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an engagement row, the way the platform sync would.
    pub fn put_engagement(&self, engagement: Engagement) {
        self.engagements
            .write()
            .unwrap()
            .insert(engagement.post_id, engagement);
    }

    pub fn engagement_for(&self, post_id: Uuid) -> Option<Engagement> {
        self.engagements.read().unwrap().get(&post_id).copied()
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn insert(&self, post: Post) -> Result<Post, DomainError> {
        self.posts.write().unwrap().insert(post.id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Post>, DomainError> {
        Ok(self
            .posts
            .read()
            .unwrap()
            .get(&id)
            .filter(|p| p.user_id == user_id)
            .cloned())
    }

    async fn list_for_owner(&self, user_id: Uuid) -> Result<Vec<Post>, DomainError> {
        let mut posts: Vec<Post> = self
            .posts
            .read()
            .unwrap()
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn update_post(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: PostUpdate,
    ) -> Result<Option<Post>, DomainError> {
        let mut posts = self.posts.write().unwrap();
        let Some(post) = posts
            .get_mut(&id)
            .filter(|p| p.user_id == user_id && p.status != PostStatus::Published)
        else {
            return Ok(None);
        };

        if let Some(title) = update.title {
            post.title = Some(title);
        }
        if let Some(topic) = update.topic {
            post.topic = topic;
        }
        if let Some(content) = update.content {
            post.content = content;
        }
        if let Some(image_url) = update.image_url {
            post.image_url = Some(image_url);
        }
        Ok(Some(post.clone()))
    }

    async fn mark_scheduled(
        &self,
        user_id: Uuid,
        id: Uuid,
        scheduled_date: DateTime<Utc>,
    ) -> Result<Option<Post>, DomainError> {
        let mut posts = self.posts.write().unwrap();
        let Some(post) = posts.get_mut(&id).filter(|p| {
            p.user_id == user_id && p.status == PostStatus::Draft && !p.content.is_empty()
        }) else {
            return Ok(None);
        };

        post.status = PostStatus::Scheduled;
        post.scheduled_date = Some(scheduled_date);
        Ok(Some(post.clone()))
    }

    async fn mark_published(
        &self,
        user_id: Uuid,
        id: Uuid,
        published_date: DateTime<Utc>,
    ) -> Result<Option<Post>, DomainError> {
        let mut posts = self.posts.write().unwrap();
        let Some(post) = posts.get_mut(&id).filter(|p| {
            p.user_id == user_id && p.status != PostStatus::Published && !p.content.is_empty()
        }) else {
            return Ok(None);
        };

        post.status = PostStatus::Published;
        post.published_date = Some(published_date);
        post.scheduled_date = None;
        Ok(Some(post.clone()))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let mut posts = self.posts.write().unwrap();
        let owned = posts.get(&id).is_some_and(|p| p.user_id == user_id);
        if !owned {
            return Err(DomainError::PostNotFound(id));
        }
        posts.remove(&id);
        // cascade, as the posts FK does in Postgres
        self.engagements.write().unwrap().remove(&id);
        Ok(())
    }
}

#[async_trait]
impl PreferencesRepository for InMemoryStore {
    async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<UserPreferences>, DomainError> {
        Ok(self.preferences.read().unwrap().get(&user_id).cloned())
    }

    async fn upsert(&self, prefs: UserPreferences) -> Result<UserPreferences, DomainError> {
        self.preferences
            .write()
            .unwrap()
            .insert(prefs.user_id, prefs.clone());
        Ok(prefs)
    }
}

#[async_trait]
impl EngagementRepository for InMemoryStore {
    async fn find_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<Engagement>, DomainError> {
        let rows = self.engagements.read().unwrap();
        Ok(post_ids.iter().filter_map(|id| rows.get(id).copied()).collect())
    }
}

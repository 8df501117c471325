use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "post_status", rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Published => "published",
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A post draft and everything it accumulates on the way to publication.
///
/// `scheduled_date` is set only while status is `scheduled`; `published_date`
/// is set exactly once, on the transition into `published`, and never
/// changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub topic: String,
    pub content: String,
    pub status: PostStatus,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub published_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial update applied while a post is still editable. `None` fields keep
/// their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub topic: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
}

impl Post {
    pub fn new(user_id: Uuid, topic: String, title: Option<String>, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            topic,
            content,
            status: PostStatus::Draft,
            scheduled_date: None,
            published_date: None,
            image_url: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self.status, PostStatus::Draft | PostStatus::Scheduled)
    }

    /// Checks the `draft → scheduled` transition against this post's state.
    pub fn validate_schedule(
        &self,
        scheduled_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.status != PostStatus::Draft {
            return Err(DomainError::validation(format!(
                "only a draft post can be scheduled, current status is {}",
                self.status
            )));
        }
        if self.content.trim().is_empty() {
            return Err(DomainError::validation(
                "post content must not be empty before scheduling",
            ));
        }
        if scheduled_date <= now {
            return Err(DomainError::validation(
                "scheduled_date must be in the future",
            ));
        }
        Ok(())
    }

    /// Checks the transition into `published`. Valid from `draft` and
    /// `scheduled`; `published` is terminal.
    pub fn validate_publish(&self) -> Result<(), DomainError> {
        if self.status == PostStatus::Published {
            return Err(DomainError::validation("post is already published"));
        }
        if self.content.trim().is_empty() {
            return Err(DomainError::validation(
                "post content must not be empty before publishing",
            ));
        }
        Ok(())
    }

    /// In-place edits are allowed only while the post is a draft or
    /// scheduled; published content is immutable.
    pub fn validate_update(&self) -> Result<(), DomainError> {
        if !self.is_editable() {
            return Err(DomainError::validation("a published post cannot be edited"));
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::post::Post;

/// Interaction counters for a published post. Absence of a row for a
/// published post means "no engagement yet", not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Engagement {
    pub post_id: Uuid,
    pub likes_count: i64,
    pub comments_count: i64,
    pub reposts_count: i64,
}

impl Engagement {
    pub fn zero(post_id: Uuid) -> Self {
        Self {
            post_id,
            likes_count: 0,
            comments_count: 0,
            reposts_count: 0,
        }
    }

    pub fn total(&self) -> i64 {
        self.likes_count + self.comments_count + self.reposts_count
    }
}

/// A post annotated with its engagement counters for the list view.
/// Non-published posts always carry the zero placeholder.
#[derive(Debug, Clone, Serialize)]
pub struct EngagedPost {
    pub post: Post,
    pub engagement: Engagement,
}

impl EngagedPost {
    pub fn total_engagement(&self) -> i64 {
        self.engagement.total()
    }
}

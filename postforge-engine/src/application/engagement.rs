use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::domain::engagement::{EngagedPost, Engagement};
use crate::domain::post::{Post, PostStatus};

/// Read-side join of posts with engagement counters. Never creates or
/// updates engagement rows.
pub struct EngagementAggregator;

impl EngagementAggregator {
    /// Annotates every post with counters: published posts get their row
    /// (zero-filled when absent), everything else gets the zero
    /// placeholder — a stray row for a non-published post is ignored.
    pub fn annotate(posts: Vec<Post>, rows: Vec<Engagement>) -> Vec<EngagedPost> {
        let mut by_post: HashMap<Uuid, Engagement> =
            rows.into_iter().map(|row| (row.post_id, row)).collect();

        posts
            .into_iter()
            .map(|post| {
                let engagement = match post.status {
                    PostStatus::Published => by_post
                        .remove(&post.id)
                        .unwrap_or_else(|| Engagement::zero(post.id)),
                    _ => Engagement::zero(post.id),
                };
                EngagedPost { post, engagement }
            })
            .collect()
    }

    /// Totals across the published part of the collection, for the
    /// analytics view.
    pub fn summarize(posts: &[EngagedPost]) -> EngagementSummary {
        let mut summary = EngagementSummary::default();
        for post in posts {
            if post.post.status != PostStatus::Published {
                continue;
            }
            summary.published_posts += 1;
            summary.likes_count += post.engagement.likes_count;
            summary.comments_count += post.engagement.comments_count;
            summary.reposts_count += post.engagement.reposts_count;
        }
        summary
    }

    /// The n posts with the highest total engagement, best first.
    pub fn top_posts(posts: &[EngagedPost], n: usize) -> Vec<EngagedPost> {
        let mut ranked: Vec<EngagedPost> = posts
            .iter()
            .filter(|p| p.post.status == PostStatus::Published)
            .cloned()
            .collect();
        ranked.sort_by_key(|p| std::cmp::Reverse(p.total_engagement()));
        ranked.truncate(n);
        ranked
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngagementSummary {
    pub published_posts: usize,
    pub likes_count: i64,
    pub comments_count: i64,
    pub reposts_count: i64,
}

impl EngagementSummary {
    pub fn total(&self) -> i64 {
        self.likes_count + self.comments_count + self.reposts_count
    }
}

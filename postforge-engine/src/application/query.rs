use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::engagement::EngagedPost;
use crate::domain::post::PostStatus;

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Only(PostStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    All,
    Last7Days,
    Last30Days,
    Last90Days,
}

impl DateRange {
    fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let days = match self {
            DateRange::All => return None,
            DateRange::Last7Days => 7,
            DateRange::Last30Days => 30,
            DateRange::Last90Days => 90,
        };
        Some(now - Duration::days(days))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// One list-view request: filters, engagement sort and a 1-based page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PostQuery {
    pub status: StatusFilter,
    pub date_range: DateRange,
    pub search: Option<String>,
    pub sort: SortDirection,
    pub page: usize,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            date_range: DateRange::All,
            search: None,
            sort: SortDirection::Desc,
            page: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub posts: Vec<EngagedPost>,
    pub total: usize,
    pub total_pages: usize,
    pub page: usize,
}

/// Pure filter/sort/paginate over an engagement-annotated snapshot.
/// Processing order is fixed: status filter, date filter, text filter,
/// engagement sort, pagination.
pub struct PostQueryEngine;

impl PostQueryEngine {
    pub fn run(posts: Vec<EngagedPost>, query: &PostQuery, now: DateTime<Utc>) -> PostPage {
        let cutoff = query.date_range.cutoff(now);
        let term = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);

        let mut filtered: Vec<EngagedPost> = posts
            .into_iter()
            .filter(|p| match query.status {
                StatusFilter::All => true,
                StatusFilter::Only(status) => p.post.status == status,
            })
            .filter(|p| cutoff.is_none_or(|cutoff| p.post.created_at >= cutoff))
            .filter(|p| term.as_deref().is_none_or(|term| matches_text(p, term)))
            .collect();

        // stable sort: ties keep the repository's newest-first order, so
        // page concatenation reproduces the collection exactly once
        match query.sort {
            SortDirection::Asc => filtered.sort_by_key(EngagedPost::total_engagement),
            SortDirection::Desc => {
                filtered.sort_by_key(|p| std::cmp::Reverse(p.total_engagement()))
            }
        }

        let total = filtered.len();
        let total_pages = total.div_ceil(PAGE_SIZE);
        let page = query.page.max(1);
        let start = (page - 1).saturating_mul(PAGE_SIZE);
        let posts = if start < total {
            filtered.into_iter().skip(start).take(PAGE_SIZE).collect()
        } else {
            Vec::new()
        };

        PostPage {
            posts,
            total,
            total_pages,
            page,
        }
    }
}

fn matches_text(post: &EngagedPost, term: &str) -> bool {
    let title = post.post.title.as_deref().unwrap_or("");
    title.to_lowercase().contains(term)
        || post.post.content.to_lowercase().contains(term)
        || post.post.topic.to_lowercase().contains(term)
}

//! Content generation and post lifecycle engine.
//!
//! Turns a topic plus stored content preferences into a generated post
//! draft, carries posts through draft → scheduled → published, and backs
//! the post list view with an engagement-annotated filter/sort/paginate
//! query layer. Persistence and the generation provider sit behind traits;
//! HTTP surfaces, identity and UI are the embedding application's problem.

pub mod application;
pub mod data;
pub mod domain;
pub mod infrastructure;

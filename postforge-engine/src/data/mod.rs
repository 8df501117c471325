pub mod engagement_repository;
pub mod memory;
pub mod post_repository;
pub mod preferences_repository;

pub mod engagement;
pub mod generation;
pub mod post_service;
pub mod preferences;
pub mod prompt;
pub mod query;

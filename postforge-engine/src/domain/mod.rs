pub mod engagement;
pub mod error;
pub mod post;
pub mod preferences;

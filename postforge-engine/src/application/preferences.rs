use std::sync::Arc;

use crate::data::preferences_repository::PreferencesRepository;
use crate::domain::error::DomainError;
use crate::domain::preferences::ResolvedPreferences;
use tracing::debug;
use uuid::Uuid;

/// Loads an owner's stored preferences and flattens them into generation
/// parameters. A missing record is not an error: resolution degrades to the
/// defaults.
#[derive(Clone)]
pub struct PreferenceResolver<P: PreferencesRepository + 'static> {
    repo: Arc<P>,
}

impl<P> PreferenceResolver<P>
where
    P: PreferencesRepository + 'static,
{
    pub fn new(repo: Arc<P>) -> Self {
        Self { repo }
    }

    pub async fn resolve(&self, user_id: Uuid) -> Result<ResolvedPreferences, DomainError> {
        let stored = self.repo.find_by_owner(user_id).await?;
        if stored.is_none() {
            debug!(%user_id, "no stored preferences, using defaults");
        }
        Ok(ResolvedPreferences::from_stored(stored.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::InMemoryStore;
    use crate::domain::preferences::UserPreferences;

    #[tokio::test]
    async fn missing_record_degrades_to_defaults() {
        let store = Arc::new(InMemoryStore::new());
        let resolver = PreferenceResolver::new(store);

        let resolved = resolver.resolve(Uuid::new_v4()).await.unwrap();
        assert_eq!(resolved.writing_style, "professional");
        assert_eq!(resolved.posting_goal, "engagement");
        assert_eq!(resolved.industry, "");
    }

    #[tokio::test]
    async fn stored_record_is_flattened() {
        let store = Arc::new(InMemoryStore::new());
        let user_id = Uuid::new_v4();
        let mut prefs = UserPreferences::empty(user_id);
        prefs.writing_styles = vec!["conversational".into()];
        prefs.industries = vec!["saas".into(), "devtools".into()];
        prefs.custom_cta = Some("Follow for more".into());
        store.upsert(prefs).await.unwrap();

        let resolver = PreferenceResolver::new(store);
        let resolved = resolver.resolve(user_id).await.unwrap();
        assert_eq!(resolved.writing_style, "conversational");
        assert_eq!(resolved.industry, "saas, devtools");
        assert_eq!(resolved.custom_cta, "Follow for more");
    }
}

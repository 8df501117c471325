use std::sync::Arc;

use postforge_generation::ContentGenerator;
use tracing::instrument;
use uuid::Uuid;

use crate::application::preferences::PreferenceResolver;
use crate::application::prompt::PromptBuilder;
use crate::data::preferences_repository::PreferencesRepository;
use crate::domain::error::DomainError;

/// Orchestrates one generation: resolve preferences, build the prompt,
/// call the generator once. Persisting the result is the caller's decision;
/// a failed generation leaves no trace anywhere.
#[derive(Clone)]
pub struct GenerationService<P, G>
where
    P: PreferencesRepository + 'static,
    G: ContentGenerator + 'static,
{
    resolver: PreferenceResolver<P>,
    generator: Arc<G>,
}

impl<P, G> GenerationService<P, G>
where
    P: PreferencesRepository + 'static,
    G: ContentGenerator + 'static,
{
    pub fn new(preferences: Arc<P>, generator: Arc<G>) -> Self {
        Self {
            resolver: PreferenceResolver::new(preferences),
            generator,
        }
    }

    /// Generates post content for a topic. Retrying after a generation
    /// failure is safe: the same owner and topic rebuild the identical
    /// prompt.
    #[instrument(skip(self))]
    pub async fn generate(&self, user_id: Uuid, topic: &str) -> Result<String, DomainError> {
        let prefs = self.resolver.resolve(user_id).await?;
        let prompt = PromptBuilder::build(topic, &prefs)?;
        let content = self.generator.generate(&prompt).await?;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::InMemoryStore;
    use crate::domain::preferences::UserPreferences;
    use async_trait::async_trait;
    use postforge_generation::{GenerationError, GenerationPrompt};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Canned generator that records every prompt it receives.
    struct MockGenerator {
        response: Result<String, fn() -> GenerationError>,
        calls: Mutex<Vec<GenerationPrompt>>,
    }

    impl MockGenerator {
        fn ok(content: &str) -> Self {
            Self {
                response: Ok(content.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(make: fn() -> GenerationError) -> Self {
            Self {
                response: Err(make),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ContentGenerator for MockGenerator {
        async fn generate(&self, prompt: &GenerationPrompt) -> Result<String, GenerationError> {
            self.calls.lock().unwrap().push(prompt.clone());
            match &self.response {
                Ok(content) => Ok(content.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    #[tokio::test]
    async fn generates_with_default_preferences_when_none_stored() {
        let store = Arc::new(InMemoryStore::new());
        let generator = Arc::new(MockGenerator::ok("a generated post"));
        let service = GenerationService::new(store, Arc::clone(&generator));

        let content = service.generate(Uuid::new_v4(), "rust adoption").await.unwrap();
        assert_eq!(content, "a generated post");

        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].user.contains("- Writing style: professional\n"));
        assert!(calls[0].user.contains("- Goal of the post: engagement\n"));
    }

    #[tokio::test]
    async fn stored_preferences_shape_the_prompt() {
        let store = Arc::new(InMemoryStore::new());
        let user_id = Uuid::new_v4();
        let mut prefs = UserPreferences::empty(user_id);
        prefs.writing_styles = vec!["bold".into(), "direct".into()];
        prefs.fine_tuning_notes = Some("first person only".into());
        store.upsert(prefs).await.unwrap();

        let generator = Arc::new(MockGenerator::ok("content"));
        let service = GenerationService::new(store, Arc::clone(&generator));
        service.generate(user_id, "team culture").await.unwrap();

        let calls = generator.calls.lock().unwrap();
        assert!(calls[0].user.contains("- Writing style: bold, direct\n"));
        assert!(calls[0].user.contains("- Additional notes: first person only\n"));
    }

    #[tokio::test]
    async fn blank_topic_never_reaches_the_generator() {
        let store = Arc::new(InMemoryStore::new());
        let generator = Arc::new(MockGenerator::ok("unused"));
        let service = GenerationService::new(store, Arc::clone(&generator));

        let err = service.generate(Uuid::new_v4(), "   ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn provider_timeout_surfaces_as_generation_failure() {
        let store = Arc::new(InMemoryStore::new());
        let generator = Arc::new(MockGenerator::failing(|| {
            GenerationError::Timeout(Duration::from_secs(30))
        }));
        let service = GenerationService::new(store, Arc::clone(&generator));

        let err = service.generate(Uuid::new_v4(), "launch day").await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Generation(GenerationError::Timeout(_))
        ));
    }
}

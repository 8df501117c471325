use postforge_generation::GenerationPrompt;

use crate::domain::error::DomainError;
use crate::domain::preferences::ResolvedPreferences;

/// Fixed system message sent with every generation request.
pub const SYSTEM_MESSAGE: &str = "You are a professional LinkedIn content creator who \
     specializes in writing engaging posts that drive engagement and achieve business goals.";

/// Renders a topic plus resolved preferences into the generation prompt.
/// Rendering is deterministic: identical inputs produce byte-identical
/// output, so the prompt can be rebuilt verbatim for a retry.
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn build(
        topic: &str,
        prefs: &ResolvedPreferences,
    ) -> Result<GenerationPrompt, DomainError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DomainError::validation("topic must not be empty"));
        }

        let mut user = format!("Create a LinkedIn post about \"{topic}\".\n\n");
        user.push_str("Use these details to personalize the content:\n");

        let mut detail = |label: &str, value: &str| {
            if !value.is_empty() {
                user.push_str(&format!("- {label}: {value}\n"));
            }
        };
        detail("Writing style", &prefs.writing_style);
        detail("Industry", &prefs.industry);
        detail("Job role", &prefs.job_description);
        detail("Content category", &prefs.content_category);
        detail("Goal of the post", &prefs.posting_goal);
        detail("Include this call-to-action", &prefs.custom_cta);
        detail("Additional notes", &prefs.fine_tuning_notes);

        user.push_str(
            "\nThe post should be concise (under 1,300 characters), engaging, and formatted \
             appropriately for LinkedIn with line breaks and emojis where suitable. \
             Include 3-5 relevant hashtags at the end.\n\n\
             Return the post text only, without any explanations or additional formatting.",
        );

        Ok(GenerationPrompt {
            system: SYSTEM_MESSAGE.to_string(),
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_prefs() -> ResolvedPreferences {
        ResolvedPreferences {
            writing_style: "witty".into(),
            industry: "fintech".into(),
            job_description: "CTO".into(),
            content_category: "thought leadership".into(),
            posting_goal: "reach".into(),
            custom_cta: "Book a demo".into(),
            fine_tuning_notes: "avoid buzzwords".into(),
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let prefs = full_prefs();
        let a = PromptBuilder::build("rust in production", &prefs).unwrap();
        let b = PromptBuilder::build("rust in production", &prefs).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn blank_topic_is_rejected() {
        let prefs = ResolvedPreferences::from_stored(None);
        assert!(matches!(
            PromptBuilder::build("", &prefs),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            PromptBuilder::build("   \n\t", &prefs),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn golden_output_with_defaults_only() {
        let prefs = ResolvedPreferences::from_stored(None);
        let prompt = PromptBuilder::build("async Rust", &prefs).unwrap();

        assert_eq!(prompt.system, SYSTEM_MESSAGE);
        assert_eq!(
            prompt.user,
            "Create a LinkedIn post about \"async Rust\".\n\n\
             Use these details to personalize the content:\n\
             - Writing style: professional\n\
             - Goal of the post: engagement\n\
             \nThe post should be concise (under 1,300 characters), engaging, and formatted \
             appropriately for LinkedIn with line breaks and emojis where suitable. \
             Include 3-5 relevant hashtags at the end.\n\n\
             Return the post text only, without any explanations or additional formatting."
        );
    }

    #[test]
    fn optional_fields_render_in_a_fixed_order() {
        let prompt = PromptBuilder::build("hiring", &full_prefs()).unwrap();
        let user = &prompt.user;

        for line in [
            "- Writing style: witty\n",
            "- Industry: fintech\n",
            "- Job role: CTO\n",
            "- Content category: thought leadership\n",
            "- Goal of the post: reach\n",
            "- Include this call-to-action: Book a demo\n",
            "- Additional notes: avoid buzzwords\n",
        ] {
            assert!(user.contains(line), "missing {line:?} in {user}");
        }
        assert!(user.find("Industry").unwrap() < user.find("Job role").unwrap());
    }

    #[test]
    fn topic_is_trimmed() {
        let prefs = ResolvedPreferences::from_stored(None);
        let a = PromptBuilder::build("  growth  ", &prefs).unwrap();
        let b = PromptBuilder::build("growth", &prefs).unwrap();
        assert_eq!(a, b);
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_WRITING_STYLE: &str = "professional";
pub const DEFAULT_POSTING_GOAL: &str = "engagement";

/// Stored content preferences, one record per owner. Set-valued fields keep
/// their stored order; defaults are applied at resolution time, never here.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserPreferences {
    pub user_id: Uuid,
    pub writing_styles: Vec<String>,
    pub industries: Vec<String>,
    pub job_descriptions: Vec<String>,
    pub content_categories: Vec<String>,
    pub posting_goals: Vec<String>,
    pub custom_cta: Option<String>,
    pub fine_tuning_notes: Option<String>,
}

impl UserPreferences {
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            writing_styles: Vec::new(),
            industries: Vec::new(),
            job_descriptions: Vec::new(),
            content_categories: Vec::new(),
            posting_goals: Vec::new(),
            custom_cta: None,
            fine_tuning_notes: None,
        }
    }
}

/// The flat parameter set consumed by the prompt builder. Every field is a
/// single joined string; empty means "absent" and is left out of the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPreferences {
    pub writing_style: String,
    pub industry: String,
    pub job_description: String,
    pub content_category: String,
    pub posting_goal: String,
    pub custom_cta: String,
    pub fine_tuning_notes: String,
}

impl ResolvedPreferences {
    /// Flattens a stored record (or its absence) into generation parameters.
    /// Sets are joined in stored order with ", "; a missing or empty
    /// writing style / posting goal falls back to the default.
    pub fn from_stored(stored: Option<&UserPreferences>) -> Self {
        let join = |set: &[String]| set.join(", ");
        let opt = |value: &Option<String>| value.clone().unwrap_or_default();

        let (writing_style, industry, job_description, content_category, posting_goal, cta, notes) =
            match stored {
                Some(p) => (
                    join(&p.writing_styles),
                    join(&p.industries),
                    join(&p.job_descriptions),
                    join(&p.content_categories),
                    join(&p.posting_goals),
                    opt(&p.custom_cta),
                    opt(&p.fine_tuning_notes),
                ),
                None => Default::default(),
            };

        Self {
            writing_style: non_empty_or(writing_style, DEFAULT_WRITING_STYLE),
            industry,
            job_description,
            content_category,
            posting_goal: non_empty_or(posting_goal, DEFAULT_POSTING_GOAL),
            custom_cta: cta,
            fine_tuning_notes: notes,
        }
    }
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_record_resolves_to_defaults() {
        let resolved = ResolvedPreferences::from_stored(None);
        assert_eq!(resolved.writing_style, "professional");
        assert_eq!(resolved.posting_goal, "engagement");
        assert_eq!(resolved.industry, "");
        assert_eq!(resolved.job_description, "");
        assert_eq!(resolved.content_category, "");
        assert_eq!(resolved.custom_cta, "");
        assert_eq!(resolved.fine_tuning_notes, "");
    }

    #[test]
    fn sets_are_joined_in_stored_order() {
        let mut prefs = UserPreferences::empty(Uuid::new_v4());
        prefs.writing_styles = vec!["witty".into(), "bold".into()];
        prefs.industries = vec!["fintech".into(), "ai".into()];

        let resolved = ResolvedPreferences::from_stored(Some(&prefs));
        assert_eq!(resolved.writing_style, "witty, bold");
        assert_eq!(resolved.industry, "fintech, ai");
    }

    #[test]
    fn empty_sets_in_an_existing_record_still_default() {
        let prefs = UserPreferences::empty(Uuid::new_v4());
        let resolved = ResolvedPreferences::from_stored(Some(&prefs));
        assert_eq!(resolved.writing_style, "professional");
        assert_eq!(resolved.posting_goal, "engagement");
    }
}

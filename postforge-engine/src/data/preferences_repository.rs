use crate::domain::error::DomainError;
use crate::domain::preferences::UserPreferences;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

/// At most one preferences record per owner.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<UserPreferences>, DomainError>;
    async fn upsert(&self, prefs: UserPreferences) -> Result<UserPreferences, DomainError>;
}

#[derive(Clone)]
pub struct PostgresPreferencesRepository {
    pool: PgPool,
}

impl PostgresPreferencesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferencesRepository for PostgresPreferencesRepository {
    async fn find_by_owner(&self, user_id: Uuid) -> Result<Option<UserPreferences>, DomainError> {
        sqlx::query_as::<_, UserPreferences>(
            r#"
            SELECT user_id, writing_styles, industries, job_descriptions,
                   content_categories, posting_goals, custom_cta, fine_tuning_notes
            FROM user_preferences WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error fetching preferences for {}: {}", user_id, e);
            DomainError::Storage(e.to_string())
        })
    }

    async fn upsert(&self, prefs: UserPreferences) -> Result<UserPreferences, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_preferences (user_id, writing_styles, industries, job_descriptions,
                                          content_categories, posting_goals, custom_cta, fine_tuning_notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                writing_styles = EXCLUDED.writing_styles,
                industries = EXCLUDED.industries,
                job_descriptions = EXCLUDED.job_descriptions,
                content_categories = EXCLUDED.content_categories,
                posting_goals = EXCLUDED.posting_goals,
                custom_cta = EXCLUDED.custom_cta,
                fine_tuning_notes = EXCLUDED.fine_tuning_notes
            "#,
        )
        .bind(prefs.user_id)
        .bind(&prefs.writing_styles)
        .bind(&prefs.industries)
        .bind(&prefs.job_descriptions)
        .bind(&prefs.content_categories)
        .bind(&prefs.posting_goals)
        .bind(&prefs.custom_cta)
        .bind(&prefs.fine_tuning_notes)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to upsert preferences for {}: {}", prefs.user_id, e);
            DomainError::Storage(format!("database error: {}", e))
        })?;

        info!(user_id = %prefs.user_id, "preferences saved");
        Ok(prefs)
    }
}

use std::time::Duration;

use postforge_generation::GenerationClient;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub generation_api_key: String,
    pub generation_base_url: Option<String>,
    pub generation_model: String,
    pub generation_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let generation_api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY must be set"))?;
        let generation_base_url = std::env::var("GENERATION_BASE_URL").ok();
        let generation_model =
            std::env::var("GENERATION_MODEL").unwrap_or_else(|_| "gpt-4".into());
        let generation_timeout = std::env::var("GENERATION_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .map(Duration::from_secs)
            .map_err(|e| anyhow::anyhow!("invalid GENERATION_TIMEOUT_SECS: {}", e))?;

        Ok(Self {
            database_url,
            generation_api_key,
            generation_base_url,
            generation_model,
            generation_timeout,
        })
    }

    /// Builds the generation client this configuration describes.
    pub fn generation_client(&self) -> GenerationClient {
        let mut client = GenerationClient::new(self.generation_api_key.clone())
            .with_model(self.generation_model.clone())
            .with_timeout(self.generation_timeout);
        if let Some(base_url) = &self.generation_base_url {
            client = client.with_base_url(base_url.clone());
        }
        client
    }
}

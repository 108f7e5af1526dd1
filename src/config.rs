use std::env;
use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";
const DEFAULT_PLAYNOTE_API_KEY: &str = "playnote_api_key";
const DEFAULT_LLM_API_KEY: &str = "llm_api_key";

pub const DEFAULT_VOICE1: &str =
    "s3://voice-cloning-zero-shot/baf1ef41-36b6-428c-9bdf-50ba54682bd8/original/manifest.json";
pub const DEFAULT_VOICE1_NAME: &str = "Angelo";
pub const DEFAULT_VOICE2: &str =
    "s3://voice-cloning-zero-shot/e040bd1b-f190-4bdb-83f0-75ef85b18f84/original/manifest.json";
pub const DEFAULT_VOICE2_NAME: &str = "Deedee";

#[derive(Clone, Debug)]
pub struct Config {
    pub app_env: String,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub public_base_url: String,
    pub cors_allowed_origin: String,
    pub jwt_secret: SecretString,
    pub jwt_audience: String,
    pub max_upload_bytes: usize,
    pub playnote_api_url: String,
    pub playnote_api_key: SecretString,
    pub playnote_user_id: String,
    pub voice1: String,
    pub voice1_name: String,
    pub voice2: String,
    pub voice2_name: String,
    pub llm_api_base: String,
    pub llm_api_key: SecretString,
    pub llm_model: String,
    pub web_embed_id: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        let web_server_port = env::var("WEB_SERVER_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        Self {
            app_env: var_or("APP_ENV", "development"),
            mongo_conn_string: var_or("MONGO_CONN_STRING", "mongodb://localhost:27017"),
            mongo_db_name: var_or("MONGO_DB_NAME", "learning-hub-local"),
            web_server_host: var_or("WEB_SERVER_HOST", "localhost"),
            web_server_port,
            public_base_url: var_or(
                "PUBLIC_BASE_URL",
                &format!("http://localhost:{}", web_server_port),
            ),
            cors_allowed_origin: var_or("CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
            jwt_secret: SecretString::from(var_or("JWT_SECRET", DEFAULT_JWT_SECRET)),
            jwt_audience: var_or("JWT_AUDIENCE", "authenticated"),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(5 * 1024 * 1024),
            playnote_api_url: var_or("PLAYNOTE_API_URL", "https://api.play.ai/api/v1/playnotes"),
            playnote_api_key: SecretString::from(var_or(
                "PLAYNOTE_API_KEY",
                DEFAULT_PLAYNOTE_API_KEY,
            )),
            playnote_user_id: var_or("PLAYNOTE_USER_ID", "playnote_user_id"),
            voice1: var_or("PLAYNOTE_VOICE1", DEFAULT_VOICE1),
            voice1_name: var_or("PLAYNOTE_VOICE1_NAME", DEFAULT_VOICE1_NAME),
            voice2: var_or("PLAYNOTE_VOICE2", DEFAULT_VOICE2),
            voice2_name: var_or("PLAYNOTE_VOICE2_NAME", DEFAULT_VOICE2_NAME),
            llm_api_base: var_or(
                "LLM_API_BASE",
                "https://generativelanguage.googleapis.com/v1beta/openai",
            ),
            llm_api_key: SecretString::from(var_or("LLM_API_KEY", DEFAULT_LLM_API_KEY)),
            llm_model: var_or("LLM_MODEL", "gemini-1.5-flash"),
            web_embed_id: var_or("PLAY_AI_WEB_EMBED_ID", ""),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Rejects development defaults for every secret the service needs
    /// to talk to its hosted dependencies.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::ValidationError(
                "JWT_SECRET is using the default value".to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::ValidationError(format!(
                "JWT_SECRET is too short ({}), must be at least 32 characters",
                jwt_secret.len()
            )));
        }

        if self.playnote_api_key.expose_secret() == DEFAULT_PLAYNOTE_API_KEY {
            return Err(AppError::ValidationError(
                "PLAYNOTE_API_KEY is using the default value".to_string(),
            ));
        }

        if self.llm_api_key.expose_secret() == DEFAULT_LLM_API_KEY {
            return Err(AppError::ValidationError(
                "LLM_API_KEY is using the default value".to_string(),
            ));
        }

        if self.web_embed_id.is_empty() {
            return Err(AppError::ValidationError(
                "PLAY_AI_WEB_EMBED_ID is not set".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            app_env: "test".to_string(),
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "learning-hub-test".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            public_base_url: "http://localhost:8080".to_string(),
            cors_allowed_origin: "http://localhost:3000".to_string(),
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_audience: "authenticated".to_string(),
            max_upload_bytes: 1024,
            playnote_api_url: "http://127.0.0.1:9/playnotes".to_string(),
            playnote_api_key: SecretString::from("test-playnote-key".to_string()),
            playnote_user_id: "test-playnote-user".to_string(),
            voice1: DEFAULT_VOICE1.to_string(),
            voice1_name: DEFAULT_VOICE1_NAME.to_string(),
            voice2: DEFAULT_VOICE2.to_string(),
            voice2_name: DEFAULT_VOICE2_NAME.to_string(),
            llm_api_base: "http://127.0.0.1:9/v1".to_string(),
            llm_api_key: SecretString::from("test-llm-key".to_string()),
            llm_model: "test-model".to_string(),
            web_embed_id: "test-embed".to_string(),
        }
    }
}

use anyhow::{Context, Result};
use std::env;

use crate::domain::session::SessionUser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,

    // Profile service
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub api_timeout_seconds: u64,

    // Session seed (who is viewing the page)
    pub session_user: Option<SessionUser>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));

        // Profile service
        let api_base_url =
            env::var("PROFILE_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
        url::Url::parse(&api_base_url)
            .with_context(|| format!("PROFILE_API_URL is not a valid URL: {}", api_base_url))?;
        let api_token = non_empty_var("PROFILE_API_TOKEN");
        let api_timeout_seconds = env::var("PROFILE_API_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        // Session seed
        let session_user = non_empty_var("SESSION_USER_UUID").map(|user_uuid| SessionUser {
            user_uuid,
            first_name: non_empty_var("SESSION_FIRST_NAME").unwrap_or_default(),
            last_name: non_empty_var("SESSION_LAST_NAME").unwrap_or_default(),
            username: non_empty_var("SESSION_USERNAME").unwrap_or_default(),
            email: non_empty_var("SESSION_EMAIL").unwrap_or_default(),
        });

        Ok(Settings {
            env,
            api_base_url,
            api_token,
            api_timeout_seconds,
            session_user,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

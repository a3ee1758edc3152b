use chrono::Utc;
use serde_derive::Deserialize;

use crate::api::{self, ApiError, Method};
use crate::logln;

/// Credentials and endpoint, read from `config.toml` next to the binary.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub base_url: String,
    pub email: String,
    pub password: String,
}

impl Config {
    pub fn load() -> Result<Self, ApiError> {
        let content = std::fs::read_to_string("config.toml")?;

        Ok(toml::from_str(&content)?)
    }
}

#[derive(Debug, Deserialize)]
struct LoginMeta {
    token: String,

    #[serde(rename = "token-expired")]
    token_expired: i64,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    meta: LoginMeta,
}

/// Holds the bearer token in memory only. Nothing is written anywhere;
/// an expired token is simply replaced by logging in again.
pub struct Auth {
    config: Config,
    token: String,
    expires_at: i64,
}

impl Auth {
    const CC: &str = "Auth";

    pub async fn login(config: Config) -> Result<Self, ApiError> {
        let meta = Self::request_token(&config).await?;

        Ok(Self {
            config,
            token: meta.token,
            expires_at: meta.token_expired,
        })
    }

    pub async fn register(config: &Config, name: &str) -> Result<(), ApiError> {
        let body = api::form_encode(&[
            ("name", name),
            ("email", &config.email),
            ("password", &config.password),
        ]);

        api::request(
            Method::Post,
            format!("{}/register", config.base_url),
            None,
            Some(body),
        )
        .await?;

        Ok(())
    }

    async fn request_token(config: &Config) -> Result<LoginMeta, ApiError> {
        let body = api::form_encode(&[("email", &config.email), ("password", &config.password)]);

        let response = api::request(
            Method::Post,
            format!("{}/login", config.base_url),
            None,
            Some(body),
        )
        .await?;

        let login: LoginResponse = serde_json::from_slice(&response)?;

        Ok(login.meta)
    }

    pub async fn access_token(&mut self) -> Result<&str, ApiError> {
        if Utc::now().timestamp() >= self.expires_at {
            logln!("Token expired, logging in again");

            let meta = Self::request_token(&self.config).await?;
            self.token = meta.token;
            self.expires_at = meta.token_expired;
        }

        Ok(&self.token)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

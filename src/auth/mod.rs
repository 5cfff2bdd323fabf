//! OAuth credentials for the Drive API
//!
//! The authorised token is kept in [crate::config::Config::token_path] between runs.
//!   An expired token is refreshed, if that is not possible a new one is obtained
//!   with [flow::run_local_server] using the client secret downloaded from the GCP console.

use core::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{config::Config, filesystem::file::{file_exists, read_file_utf8, write_file_bytes}};

pub mod flow;

pub const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Tokens this close to expiry are refreshed before use
pub const EXPIRY_MARGIN_SECONDS: i64 = 60;

#[derive(Debug, Clone)]
pub struct AuthError
{
    pub why: String
}

impl AuthError
{
    pub fn new(why: String) -> AuthError
    {
        AuthError { why }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.why)
    }
}

fn default_auth_uri() -> String { DEFAULT_AUTH_URI.to_string() }
fn default_token_uri() -> String { DEFAULT_TOKEN_URI.to_string() }

/// An OAuth client, the "installed" (or "web") entry of the client secret file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSecret
{
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String
}

#[derive(Deserialize)]
struct ClientSecretFile
{
    installed: Option<ClientSecret>,
    web: Option<ClientSecret>
}

pub fn parse_client_secret(data: &str) -> Result<ClientSecret, AuthError>
{
    let file: ClientSecretFile = match serde_json::from_str(data)
    {
        Ok(f) => f,
        Err(e) => return Err(AuthError::new(format!("invalid client secret, {}", e)))
    };

    match (file.installed, file.web)
    {
        (Some(s), _) => Ok(s),
        (None, Some(s)) => Ok(s),
        (None, None) => Err(AuthError::new("client secret has no \"installed\" or \"web\" client".to_string()))
    }
}

pub fn read_client_secret(path: &str) -> Result<ClientSecret, AuthError>
{
    if !file_exists(path)
    {
        return Err(AuthError::new(format!("{} not found, download an OAuth client secret from the GCP console and save it as {}", path, path)))
    }

    match read_file_utf8(path)
    {
        Ok(data) => parse_client_secret(&data),
        Err(e) => Err(AuthError::new(e.why))
    }
}

/// An authorised user token, the same layout google-auth writes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token
{
    pub token: String,
    pub refresh_token: Option<String>,
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub expiry: Option<DateTime<Utc>>
}

impl Token
{
    pub fn is_expired(&self) -> bool
    {
        match self.expiry
        {
            Some(e) => e - Duration::seconds(EXPIRY_MARGIN_SECONDS) <= Utc::now(),
            None => false
        }
    }

    pub fn is_valid(&self) -> bool
    {
        !self.token.is_empty() && !self.is_expired()
    }

    pub fn can_refresh(&self) -> bool
    {
        self.refresh_token.is_some()
    }
}

/// The token endpoint's reply to a code exchange or a refresh
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse
{
    pub access_token: String,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>
}

impl TokenResponse
{
    /// Build a [Token] for client, previous fills in what a refresh does not return
    pub fn into_token(self, client: &ClientSecret, previous: Option<&Token>, scopes: &[String]) -> Token
    {
        let refresh_token = match (self.refresh_token, previous)
        {
            (Some(r), _) => Some(r),
            (None, Some(p)) => p.refresh_token.clone(),
            (None, None) => None
        };

        let scopes = match (self.scope, previous)
        {
            (Some(s), _) => s.split_whitespace().map(|s| s.to_string()).collect(),
            (None, Some(p)) => p.scopes.clone(),
            (None, None) => scopes.to_vec()
        };

        Token
        {
            token: self.access_token,
            refresh_token,
            token_uri: client.token_uri.clone(),
            client_id: client.client_id.clone(),
            client_secret: client.client_secret.clone(),
            scopes,
            expiry: self.expires_in.map(|s| Utc::now() + Duration::seconds(s))
        }
    }
}

/// POST form params to a token endpoint
pub async fn request_token(token_uri: &str, params: &[(&str, &str)]) -> Result<TokenResponse, AuthError>
{
    let client = reqwest::Client::new();

    let response = match client.post(token_uri).form(params).send().await
    {
        Ok(r) => r,
        Err(e) => return Err(AuthError::new(format!("token request failed, {}", e)))
    };

    let status = response.status();
    if !status.is_success()
    {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::new(format!("token endpoint returned {}, {}", status, body)))
    }

    match response.json::<TokenResponse>().await
    {
        Ok(t) => Ok(t),
        Err(e) => Err(AuthError::new(format!("invalid token response, {}", e)))
    }
}

/// Exchange the refresh token of token for a new access token
pub async fn refresh(token: &Token) -> Result<Token, AuthError>
{
    let refresh_token = match &token.refresh_token
    {
        Some(r) => r.clone(),
        None => return Err(AuthError::new("token has no refresh token".to_string()))
    };

    let response = request_token
    (
        &token.token_uri,
        &[
            ("grant_type", "refresh_token"),
            ("client_id", token.client_id.as_str()),
            ("client_secret", token.client_secret.as_str()),
            ("refresh_token", refresh_token.as_str())
        ]
    ).await?;

    let client = ClientSecret
    {
        client_id: token.client_id.clone(),
        client_secret: token.client_secret.clone(),
        auth_uri: DEFAULT_AUTH_URI.to_string(),
        token_uri: token.token_uri.clone()
    };

    Ok(response.into_token(&client, Some(token), &token.scopes))
}

/// Read a saved token, unreadable or corrupt files are treated as absent
pub fn load_token(path: &str) -> Option<Token>
{
    if !file_exists(path)
    {
        return None
    }

    let data = match read_file_utf8(path)
    {
        Ok(d) => d,
        Err(e) =>
        {
            crate::log(format!("Could not read token file, {}", e), Some("WARN"));
            return None
        }
    };

    match serde_json::from_str(&data)
    {
        Ok(t) => Some(t),
        Err(e) =>
        {
            crate::log(format!("Could not read token file {}, {}", path, e), Some("WARN"));
            None
        }
    }
}

pub fn save_token(path: &str, token: &Token) -> Result<(), AuthError>
{
    let data = match serde_json::to_string_pretty(token)
    {
        Ok(d) => d,
        Err(e) => return Err(AuthError::new(format!("could not serialise token, {}", e)))
    };

    match write_file_bytes(path, data.as_bytes())
    {
        Ok(_) => Ok(()),
        Err(e) => Err(AuthError::new(e.why))
    }
}

async fn reauthenticate(config: &Config) -> Result<Token, AuthError>
{
    let secret = read_client_secret(&config.client_secret_path)?;
    crate::log("New authentication required, opening the authorisation flow".to_string(), Some("AUTH"));
    flow::run_local_server(&secret, &config.scopes()).await
}

/// Load, refresh or newly obtain a valid token, saving it if it changed
pub async fn authenticate(config: &Config) -> Result<Token, AuthError>
{
    let saved = load_token(&config.token_path);

    if let Some(token) = &saved
    {
        if token.is_valid()
        {
            crate::debug(format!("Using saved token from {}", config.token_path), Some("AUTH"));
            return Ok(token.clone())
        }
    }

    let token = match saved
    {
        Some(token) if token.can_refresh() =>
        {
            crate::log("Token expired, refreshing".to_string(), Some("AUTH"));
            match refresh(&token).await
            {
                Ok(t) => t,
                Err(e) =>
                {
                    crate::log(format!("Token refresh failed, {}", e), Some("WARN"));
                    reauthenticate(config).await?
                }
            }
        },
        _ => reauthenticate(config).await?
    };

    match save_token(&config.token_path, &token)
    {
        Ok(_) => crate::log(format!("Saved credentials to {}", config.token_path), Some("AUTH")),
        Err(e) => crate::log(format!("Could not save credentials to {}, {}", config.token_path, e), Some("WARN"))
    }

    Ok(token)
}

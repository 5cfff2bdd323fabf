use serde::{Serialize, Deserialize};

use crate::filesystem::file::{file_exists, read_file_utf8};

pub const CONFIG_PATH: &str = "config.json";

pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/drive";
pub const DEFAULT_LOCK_REASON: &str = "Locked by automated script";
pub const DEFAULT_API_URL: &str = "https://www.googleapis.com/drive/v3";

/// Google Apps types that cannot carry a content restriction
pub const NON_LOCKABLE_MIME_TYPES: [&str; 5] =
[
    "application/vnd.google-apps.form",
    "application/vnd.google-apps.site",
    "application/vnd.google-apps.script",
    "application/vnd.google-apps.shortcut",
    "application/vnd.google-apps.folder"
];

/// Configure drivelock
/// - ```client_secret_path```: OAuth client secret downloaded from the GCP console
/// - ```token_path```: where the authorised token is saved between runs
/// - ```scopes```: OAuth scopes requested, default full drive access
/// - ```non_lockable_mime_types```: files of these types are skipped
/// - ```lock_reason```: reason string attached to the read-only restriction
/// - ```api_url```: Drive v3 endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config
{
    #[serde(default = "default_client_secret_path")]
    pub client_secret_path: String,
    #[serde(default = "default_token_path")]
    pub token_path: String,
    #[serde(default)]
    pub scopes: Option<Vec<String>>,
    #[serde(default)]
    pub non_lockable_mime_types: Option<Vec<String>>,
    #[serde(default)]
    pub lock_reason: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>
}

fn default_client_secret_path() -> String { "credentials.json".to_string() }
fn default_token_path() -> String { "token.json".to_string() }

impl Config
{
    pub fn default() -> Config
    {
        Config
        {
            client_secret_path: default_client_secret_path(),
            token_path: default_token_path(),
            scopes: None,
            non_lockable_mime_types: None,
            lock_reason: None,
            api_url: None
        }
    }

    pub fn load_or_default(path: &str) -> Config
    {
        match read_config(path)
        {
            Some(c) => c,
            None =>
            {
                Config::default()
            }
        }
    }

    pub fn scopes(&self) -> Vec<String>
    {
        match &self.scopes
        {
            Some(s) => s.clone(),
            None => vec![DEFAULT_SCOPE.to_string()]
        }
    }

    pub fn non_lockable_mime_types(&self) -> Vec<String>
    {
        match &self.non_lockable_mime_types
        {
            Some(m) => m.clone(),
            None => NON_LOCKABLE_MIME_TYPES.iter().map(|m| m.to_string()).collect()
        }
    }

    pub fn lock_reason(&self) -> String
    {
        self.lock_reason.clone().unwrap_or(DEFAULT_LOCK_REASON.to_string())
    }

    pub fn api_url(&self) -> String
    {
        self.api_url.clone().unwrap_or(DEFAULT_API_URL.to_string())
    }
}

/// Parse a config file, absent fields take their defaults
///
/// A missing file is normal (defaults apply), a file that exists but
/// cannot be used is reported so the fallback is not silent
pub fn read_config(path: &str) -> Option<Config>
{
    if !file_exists(path)
    {
        crate::debug(format!("No configuration file at {}, using defaults", path), Some("CONFIG"));
        return None
    }

    let parsed = read_file_utf8(path)
        .map_err(|e| e.why)
        .and_then(|data| serde_json::from_str::<Config>(&data).map_err(|e| format!("{} is not a valid config, {}", path, e)));

    match parsed
    {
        Ok(config) => Some(config),
        Err(why) =>
        {
            crate::log(format!("Ignoring configuration file, {}", why), Some("WARN"));
            None
        }
    }
}

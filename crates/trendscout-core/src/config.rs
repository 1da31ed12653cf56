use crate::ConfigError;

/// Application configuration resolved from environment variables.
///
/// Credentials are read once here and handed explicitly to the transport
/// constructors. Swapping a credential means rebuilding the affected client
/// from a fresh config — there is no hidden module-level cache.
#[derive(Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_project_id: Option<String>,
    pub youtube_api_key: String,
    pub log_level: String,
    pub youtube_timeout_secs: u64,
    pub openai_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("openai_api_key", &"[redacted]")
            .field(
                "openai_project_id",
                &self.openai_project_id.as_ref().map(|_| "[redacted]"),
            )
            .field("youtube_api_key", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("youtube_timeout_secs", &self.youtube_timeout_secs)
            .field("openai_timeout_secs", &self.openai_timeout_secs)
            .finish()
    }
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let openai_api_key = require("OPENAI_API_KEY")?;
    let youtube_api_key = require("YOUTUBE_API_KEY")?;
    let openai_project_id = lookup("OPENAI_PROJECT_ID")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let log_level = or_default("TRENDSCOUT_LOG_LEVEL", "info");
    let youtube_timeout_secs = parse_u64("TRENDSCOUT_YOUTUBE_TIMEOUT_SECS", "30")?;
    let openai_timeout_secs = parse_u64("TRENDSCOUT_OPENAI_TIMEOUT_SECS", "60")?;

    Ok(AppConfig {
        openai_api_key,
        openai_project_id,
        youtube_api_key,
        log_level,
        youtube_timeout_secs,
        openai_timeout_secs,
    })
}

use crate::app_config::{AppConfig, ProviderKind};
use crate::ConfigError;

pub const DEFAULT_JIKAN_BASE_URL: &str = "https://api.jikan.moe/v4";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_HF_BASE_URL: &str = "https://api-inference.huggingface.co";

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
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
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

    let jikan_base_url = or_default("ANISCOPE_JIKAN_BASE_URL", DEFAULT_JIKAN_BASE_URL);
    let request_timeout_secs = parse_u64("ANISCOPE_REQUEST_TIMEOUT_SECS", "30")?;
    let page_delay_ms = parse_u64("ANISCOPE_PAGE_DELAY_MS", "1000")?;
    let log_level = or_default("ANISCOPE_LOG_LEVEL", "info");

    let review_pages = {
        let raw = or_default("ANISCOPE_REVIEW_PAGES", "3");
        let pages = raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: "ANISCOPE_REVIEW_PAGES".to_string(),
            reason: e.to_string(),
        })?;
        if !(1..=5).contains(&pages) {
            return Err(ConfigError::InvalidEnvVar {
                var: "ANISCOPE_REVIEW_PAGES".to_string(),
                reason: format!("expected 1..=5, got {pages}"),
            });
        }
        pages
    };

    let provider = parse_provider(&or_default("ANISCOPE_PROVIDER", "lexicon"))?;

    let openai_api_key = lookup("OPENAI_API_KEY").ok();
    let openai_base_url = or_default("ANISCOPE_OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL);
    let chat_model = or_default("ANISCOPE_CHAT_MODEL", "gpt-3.5-turbo");

    let hf_api_token = lookup("HF_API_TOKEN").ok();
    let hf_base_url = or_default("ANISCOPE_HF_BASE_URL", DEFAULT_HF_BASE_URL);
    let hf_sentiment_model = or_default(
        "ANISCOPE_HF_SENTIMENT_MODEL",
        "distilbert/distilbert-base-uncased-finetuned-sst-2-english",
    );
    let hf_summary_model = or_default("ANISCOPE_HF_SUMMARY_MODEL", "facebook/bart-large-cnn");
    let hf_generation_model = or_default("ANISCOPE_HF_GENERATION_MODEL", "openai-community/gpt2");

    // Credentials are validated here, not at request time, so a misconfigured
    // deployment fails before any reviews are fetched.
    match provider {
        ProviderKind::OpenAi if openai_api_key.is_none() => {
            return Err(ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()));
        }
        ProviderKind::HostedInference if hf_api_token.is_none() => {
            return Err(ConfigError::MissingEnvVar("HF_API_TOKEN".to_string()));
        }
        _ => {}
    }

    Ok(AppConfig {
        jikan_base_url,
        request_timeout_secs,
        page_delay_ms,
        review_pages,
        log_level,
        provider,
        openai_api_key,
        openai_base_url,
        chat_model,
        hf_api_token,
        hf_base_url,
        hf_sentiment_model,
        hf_summary_model,
        hf_generation_model,
    })
}

fn parse_provider(raw: &str) -> Result<ProviderKind, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "openai" => Ok(ProviderKind::OpenAi),
        "hf" | "hosted" => Ok(ProviderKind::HostedInference),
        "lexicon" | "local" => Ok(ProviderKind::Lexicon),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ANISCOPE_PROVIDER".to_string(),
            reason: format!("unknown provider '{other}' (expected openai, hf, or lexicon)"),
        }),
    }
}

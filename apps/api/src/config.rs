use anyhow::{bail, Context, Result};

use crate::keywords::source::{ServiceAccount, SheetsAuth};
use crate::llm_client::DEFAULT_API_BASE;

const DEFAULT_WORKSHEET: &str = "Related Keywords";

/// Where the clustering worksheet is read from.
#[derive(Debug, Clone)]
pub enum SheetConfig {
    Csv {
        path: String,
    },
    Google {
        spreadsheet_id: String,
        worksheet: String,
        auth: SheetsAuth,
    },
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub sheet: SheetConfig,
    pub workflow_webhook_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            sheet: sheet_from_env()?,
            workflow_webhook_url: require_env("WORKFLOW_WEBHOOK_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn sheet_from_env() -> Result<SheetConfig> {
    sheet_config(optional_env)
}

/// Resolves the worksheet backend from `lookup`. A CSV path wins; otherwise
/// Google credentials are tried in order: service-account key (inline JSON,
/// then file), access token, API key.
fn sheet_config(lookup: impl Fn(&str) -> Option<String>) -> Result<SheetConfig> {
    if let Some(path) = lookup("KEYWORD_CSV_PATH") {
        return Ok(SheetConfig::Csv { path });
    }

    let auth = if let Some(json) = lookup("GOOGLE_SHEET_CREDS_JSON") {
        SheetsAuth::ServiceAccount(
            ServiceAccount::from_json(&json).context("GOOGLE_SHEET_CREDS_JSON is not a valid service-account key")?,
        )
    } else if let Some(path) = lookup("GOOGLE_SHEET_CREDS_PATH") {
        SheetsAuth::ServiceAccount(
            ServiceAccount::from_file(&path)
                .with_context(|| format!("Cannot load service-account key from '{path}'"))?,
        )
    } else if let Some(token) = lookup("GOOGLE_SHEETS_ACCESS_TOKEN") {
        SheetsAuth::AccessToken(token)
    } else if let Some(key) = lookup("GOOGLE_SHEETS_API_KEY") {
        SheetsAuth::ApiKey(key)
    } else {
        bail!(
            "Set GOOGLE_SHEET_CREDS_JSON, GOOGLE_SHEET_CREDS_PATH, GOOGLE_SHEETS_ACCESS_TOKEN or GOOGLE_SHEETS_API_KEY, or KEYWORD_CSV_PATH for a local export"
        );
    };

    Ok(SheetConfig::Google {
        spreadsheet_id: lookup("SHEET_SPREADSHEET_ID")
            .context("Required environment variable 'SHEET_SPREADSHEET_ID' is not set")?,
        worksheet: lookup("SHEET_WORKSHEET").unwrap_or_else(|| DEFAULT_WORKSHEET.to_string()),
        auth,
    })
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

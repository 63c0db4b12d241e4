//! Keyword Source — where the clustering worksheet comes from.
//!
//! `AppState` holds an `Arc<dyn KeywordSource>`, picked at startup from config:
//! a local CSV export when `KEYWORD_CSV_PATH` is set, the Google Sheets API otherwise.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::keywords::models::SheetTable;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Google auth error: {0}")]
    Auth(#[from] gcp_auth::Error),

    #[error("Worksheet has duplicate header '{0}'")]
    DuplicateHeader(String),

    #[error("Sheets API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Worksheet is missing required column '{0}'")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid spreadsheet URL: {0}")]
    Url(String),
}

#[async_trait]
pub trait KeywordSource: Send + Sync {
    /// Reads the whole worksheet, header row included.
    async fn fetch(&self) -> Result<SheetTable, SheetError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

// ────────────────────────────────────────────────────────────────────────────
// Google Sheets
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum SheetsAuth {
    /// Service-account key; tokens are minted and refreshed as needed.
    ServiceAccount(ServiceAccount),
    /// Pre-issued OAuth2 access token. Expires; meant for short-lived runs.
    AccessToken(String),
    /// API key; works for sheets shared by link.
    ApiKey(String),
}

/// A Google service-account key, shared across clones so the token cache is too.
#[derive(Clone)]
pub struct ServiceAccount(Arc<CustomServiceAccount>);

impl ServiceAccount {
    /// Parses the JSON key file contents downloaded from the Cloud console.
    pub fn from_json(json: &str) -> Result<Self, SheetError> {
        Ok(Self(Arc::new(CustomServiceAccount::from_json(json)?)))
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, SheetError> {
        Ok(Self(Arc::new(CustomServiceAccount::from_file(path.into())?)))
    }

    async fn access_token(&self) -> Result<String, SheetError> {
        let token = self.0.token(&[SHEETS_READONLY_SCOPE]).await?;
        Ok(token.as_str().to_string())
    }
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServiceAccount")
            .field(&self.0.project_id())
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

/// Reads one worksheet through the Sheets v4 `values.get` endpoint.
#[derive(Clone)]
pub struct GoogleSheetsSource {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    worksheet: String,
    auth: SheetsAuth,
}

impl GoogleSheetsSource {
    pub fn new(spreadsheet_id: String, worksheet: String, auth: SheetsAuth) -> Self {
        Self::with_base_url(SHEETS_API_BASE.to_string(), spreadsheet_id, worksheet, auth)
    }

    pub fn with_base_url(
        base_url: String,
        spreadsheet_id: String,
        worksheet: String,
        auth: SheetsAuth,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url,
            spreadsheet_id,
            worksheet,
            auth,
        }
    }

    fn values_url(&self) -> Result<Url, SheetError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| SheetError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| SheetError::Url(self.base_url.clone()))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                self.worksheet.as_str(),
            ]);
        url.query_pairs_mut()
            .append_pair("valueRenderOption", "UNFORMATTED_VALUE");
        if let SheetsAuth::ApiKey(key) = &self.auth {
            url.query_pairs_mut().append_pair("key", key);
        }
        Ok(url)
    }
}

#[async_trait]
impl KeywordSource for GoogleSheetsSource {
    async fn fetch(&self) -> Result<SheetTable, SheetError> {
        let mut request = self.client.get(self.values_url()?);
        match &self.auth {
            SheetsAuth::ServiceAccount(account) => {
                request = request.bearer_auth(account.access_token().await?);
            }
            SheetsAuth::AccessToken(token) => request = request.bearer_auth(token),
            SheetsAuth::ApiKey(_) => {}
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GoogleError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(SheetError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let range: ValueRange = response.json().await?;
        let mut grid = range.values.into_iter();
        let headers = grid
            .next()
            .unwrap_or_default()
            .iter()
            .map(header_text)
            .collect();

        let table = SheetTable::from_grid(headers, grid.collect());
        debug!("Fetched {} rows from {}", table.rows.len(), self.describe());
        Ok(table)
    }

    fn describe(&self) -> String {
        format!(
            "Google Sheet {} / '{}'",
            self.spreadsheet_id, self.worksheet
        )
    }
}

fn header_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CSV export
// ────────────────────────────────────────────────────────────────────────────

/// Reads a worksheet exported as CSV. Every cell arrives as text and goes
/// through the same numeric coercion as sheet data.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl KeywordSource for CsvFileSource {
    async fn fetch(&self) -> Result<SheetTable, SheetError> {
        let bytes = tokio::fs::read(&self.path).await?;
        parse_csv(&bytes)
    }

    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }
}

fn parse_csv(bytes: &[u8]) -> Result<SheetTable, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(
            record
                .iter()
                .map(|cell| Value::String(cell.to_string()))
                .collect(),
        );
    }

    Ok(SheetTable::from_grid(headers, grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, extract::Query, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use std::collections::HashMap;
    use std::io::Write;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    const SERVICE_ACCOUNT_KEY: &str = include_str!("testdata/service_account.json");

    #[test]
    fn test_service_account_key_parses() {
        let account = ServiceAccount::from_json(SERVICE_ACCOUNT_KEY).unwrap();
        assert!(format!("{account:?}").contains("blogdesk-test"));
    }

    #[test]
    fn test_malformed_service_account_key_is_auth_error() {
        assert!(matches!(
            ServiceAccount::from_json(r#"{"type": "service_account"}"#),
            Err(SheetError::Auth(_))
        ));
    }

    #[test]
    fn test_service_account_url_carries_no_key() {
        let source = GoogleSheetsSource::with_base_url(
            "https://sheets.example.com".to_string(),
            "abc123".to_string(),
            "Related Keywords".to_string(),
            SheetsAuth::ServiceAccount(ServiceAccount::from_json(SERVICE_ACCOUNT_KEY).unwrap()),
        );
        assert!(!source.values_url().unwrap().as_str().contains("key="));
    }

    #[test]
    fn test_values_url_encodes_worksheet_and_key() {
        let source = GoogleSheetsSource::with_base_url(
            "https://sheets.example.com".to_string(),
            "abc123".to_string(),
            "Related Keywords".to_string(),
            SheetsAuth::ApiKey("k".to_string()),
        );
        let url = source.values_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.example.com/v4/spreadsheets/abc123/values/Related%20Keywords?valueRenderOption=UNFORMATTED_VALUE&key=k"
        );
    }

    #[tokio::test]
    async fn test_google_fetch_builds_table_from_values() {
        let app = Router::new().route(
            "/v4/spreadsheets/:id/values/:range",
            get(
                |Path((id, range)): Path<(String, String)>,
                 Query(q): Query<HashMap<String, String>>| async move {
                    assert_eq!(id, "sheet-1");
                    assert_eq!(range, "Related Keywords");
                    assert_eq!(q.get("key").map(String::as_str), Some("secret"));
                    Json(json!({
                        "range": "'Related Keywords'!A1:C3",
                        "majorDimension": "ROWS",
                        "values": [
                            ["Keyword", "KD", "MSV"],
                            ["seo tools", 12, 5400],
                            ["seo audit", 30]
                        ]
                    }))
                },
            ),
        );
        let base = serve(app).await;

        let source = GoogleSheetsSource::with_base_url(
            base,
            "sheet-1".to_string(),
            "Related Keywords".to_string(),
            SheetsAuth::ApiKey("secret".to_string()),
        );
        let table = source.fetch().await.unwrap();

        assert_eq!(table.headers, vec!["Keyword", "KD", "MSV"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("MSV"), Some(&json!(5400)));
        assert!(table.rows[1].get("MSV").is_none());
    }

    #[tokio::test]
    async fn test_google_fetch_surfaces_api_error_message() {
        let app = Router::new().route(
            "/v4/spreadsheets/:id/values/:range",
            get(|| async {
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({"error": {"code": 403, "message": "The caller does not have permission"}})),
                )
            }),
        );
        let base = serve(app).await;

        let source = GoogleSheetsSource::with_base_url(
            base,
            "sheet-1".to_string(),
            "Related Keywords".to_string(),
            SheetsAuth::AccessToken("token".to_string()),
        );

        match source.fetch().await {
            Err(SheetError::Api { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "The caller does not have permission");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_google_fetch_of_empty_worksheet_has_no_headers() {
        let app = Router::new().route(
            "/v4/spreadsheets/:id/values/:range",
            get(|| async { Json(json!({"range": "A1:Z1000", "majorDimension": "ROWS"})) }),
        );
        let base = serve(app).await;
        let source = GoogleSheetsSource::with_base_url(
            base,
            "sheet-1".to_string(),
            "Empty".to_string(),
            SheetsAuth::ApiKey("k".to_string()),
        );
        assert_eq!(source.fetch().await.unwrap(), SheetTable::default());
    }

    #[tokio::test]
    async fn test_csv_source_reads_export() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Keyword,KD,MSV,Intent").unwrap();
        writeln!(file, "content calendar,18,2900,informational").unwrap();
        writeln!(file, "blog ideas,9").unwrap();

        let table = CsvFileSource::new(file.path()).fetch().await.unwrap();

        assert_eq!(table.headers, vec!["Keyword", "KD", "MSV", "Intent"]);
        assert_eq!(table.rows[0].get("KD"), Some(&json!("18")));
        assert!(table.rows[1].get("MSV").is_none());
    }

    #[tokio::test]
    async fn test_csv_source_missing_file_is_io_error() {
        let source = CsvFileSource::new("/nonexistent/keywords.csv");
        assert!(matches!(source.fetch().await, Err(SheetError::Io(_))));
    }
}

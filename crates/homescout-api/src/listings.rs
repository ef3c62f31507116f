use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListingsError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ListingsError>;

/// A listing as the endpoint serves it, camelCase field names and all
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiListing {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub category: String,
    pub bed_rooms: u32,
    pub bath_rooms: u32,
    #[serde(default)]
    pub furnishings: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub tenure: Option<String>,
    #[serde(default)]
    pub is_auction: Option<bool>,
}

/// The endpoint is inconsistent about its envelope: sometimes a bare
/// array, sometimes `{"items": [...]}`. We take both without complaint.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingsResponse {
    Wrapped { items: Vec<ApiListing> },
    Bare(Vec<ApiListing>),
}

impl ListingsResponse {
    fn into_items(self) -> Vec<ApiListing> {
        match self {
            ListingsResponse::Wrapped { items } => items,
            ListingsResponse::Bare(items) => items,
        }
    }
}

pub struct ListingsClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ListingsClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("HomeScout/0.1.0"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Fetch the full listing set in one shot
    ///
    /// One POST with a JSON body of optional query parameters (an empty
    /// object when there are none - the endpoint wants a body either way).
    /// No retries here; whether to try again is the caller's decision.
    pub async fn fetch_listings(
        &self,
        params: Option<serde_json::Value>,
    ) -> Result<Vec<ApiListing>> {
        let body = params.unwrap_or_else(|| serde_json::json!({}));

        tracing::debug!(endpoint = %self.endpoint, "fetching listings");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ListingsError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let text = response.text().await?;
        let parsed: ListingsResponse = serde_json::from_str(&text)?;
        Ok(parsed.into_items())
    }
}

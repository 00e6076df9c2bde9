//! Remote API client
//!
//! Thin reqwest wrapper over the three endpoints the engine consumes:
//! paginated listing, delete (soft and permanent), and get. Responses are
//! returned with their status and body text intact; classification of
//! non-success responses is the caller's business, only transport failures
//! are errors.

use crate::error::Result;
use reqwest::StatusCode;
use scythe_core::{FailureDetail, ResourceRecord};

/// Response header carrying the next-page cursor
const NEXT_PAGE_HEADER: &str = "x-next-page";

/// API client with bearer-token authentication
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

/// Raw response to a delete or get call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Capture this response for a `Failed` outcome
    pub fn detail(&self) -> FailureDetail {
        FailureDetail::new(self.status.as_u16(), self.body.clone())
    }

    /// Parse the body as a single resource record
    pub fn record(&self) -> Result<ResourceRecord> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// One page of a listing walk
#[derive(Debug)]
pub struct ListPage {
    pub status: StatusCode,
    pub records: Vec<ResourceRecord>,
    pub next_page: Option<u32>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
            token: token.into(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Fetch one page of a collection listing
    ///
    /// The next-page cursor is read from the response header even on a
    /// non-success response, so a failed page can be skipped without
    /// terminating the walk.
    pub async fn list_page(&self, collection: &str, page: u32, per_page: u32) -> Result<ListPage> {
        let response = self
            .client
            .get(self.url(collection))
            .query(&[("page", page.to_string()), ("per_page", per_page.to_string())])
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        let next_page = response
            .headers()
            .get(NEXT_PAGE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u32>().ok());
        let body = response.text().await?;

        tracing::debug!("GET {}?page={} -> {}", collection, page, status);

        let records = if status.is_success() {
            serde_json::from_str(&body)?
        } else {
            Vec::new()
        };

        Ok(ListPage {
            status,
            records,
            next_page,
        })
    }

    /// GET a resource endpoint (metadata re-fetch and convergence probe)
    pub async fn get(&self, endpoint: &str) -> Result<ApiResponse> {
        let request = self.client.get(self.url(endpoint));
        self.execute("GET", endpoint, request).await
    }

    /// DELETE a resource endpoint (soft/default delete)
    pub async fn delete(&self, endpoint: &str) -> Result<ApiResponse> {
        let request = self.client.delete(self.url(endpoint));
        self.execute("DELETE", endpoint, request).await
    }

    /// DELETE with the explicit permanent-removal marker
    pub async fn delete_permanently(&self, endpoint: &str, full_path: &str) -> Result<ApiResponse> {
        let request = self
            .client
            .delete(self.url(endpoint))
            .query(&[("permanently_remove", "true"), ("full_path", full_path)]);
        self.execute("DELETE(permanent)", endpoint, request).await
    }

    async fn execute(
        &self,
        verb: &str,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse> {
        let response = request.bearer_auth(&self.token).send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!("{} {} -> {}", verb, endpoint, status);

        Ok(ApiResponse { status, body })
    }
}

//! HTTP client for the company API.
//!
//! Every endpoint answers with JSON. List endpoints are decoded element by element
//! through [`parse_records`], so one malformed record is dropped instead of failing
//! the whole response. Company ids are validated before a request is built.

use crate::{
    api::records::parse_records,
    core::access::PurchaseHistory,
    errors::{Error, Result},
    models::{CompanyId, CompanyRecord, TransactionRecord},
};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, instrument};

/// Default base URL of the company API.
pub const DEFAULT_BASE_URL: &str = "https://api.takasumibot.com/v3";

/// Client for the company API.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// GETs `path` and decodes the body as a JSON array.
    async fn get_array(&self, endpoint: &'static str, path: &str) -> Result<Vec<Value>> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream {
                endpoint,
                status: status.as_u16(),
            });
        }
        Ok(response.json::<Vec<Value>>().await?)
    }

    /// Fetches every company, in creation order.
    ///
    /// This is the source list for `/company list`, kept in API order. The
    /// listing's `Created` sort restores this order. Records that fail to decode
    /// are logged and skipped.
    ///
    /// # Errors
    /// Returns [`Error::Upstream`] on a non-success status, or [`Error::Http`] if
    /// the request fails.
    #[instrument(skip(self))]
    pub async fn list_companies(&self) -> Result<Vec<CompanyRecord>> {
        let values = self.get_array("companylist", "companylist/").await?;
        Ok(parse_records(values, "company"))
    }

    /// Fetches one company by id.
    ///
    /// The detail endpoint answers with a single object rather than an array. Any
    /// status other than 200 is reported as the company not existing.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCompanyId`] without any request if `raw_id` is not a
    /// valid id, and [`Error::CompanyNotFound`] for any non-200 answer.
    #[instrument(skip(self))]
    pub async fn company(&self, raw_id: &str) -> Result<CompanyRecord> {
        let id = CompanyId::parse(raw_id)?;
        let response = self.http.get(self.url(&format!("company/{id}"))).send().await?;
        if response.status() != StatusCode::OK {
            debug!("Company {id} lookup returned {}", response.status());
            return Err(Error::CompanyNotFound { id: id.to_string() });
        }
        Ok(response.json::<CompanyRecord>().await?)
    }

    /// Fetches a company's transaction history.
    ///
    /// The log is returned unfiltered and in API order. Callers narrow it to a time
    /// window with [`crate::core::window::filter_since`].
    ///
    /// # Errors
    /// Returns [`Error::InvalidCompanyId`] without any request if `raw_id` is not a
    /// valid id, and [`Error::Upstream`] on a non-success status.
    #[instrument(skip(self))]
    pub async fn company_history(&self, raw_id: &str) -> Result<Vec<TransactionRecord>> {
        let id = CompanyId::parse(raw_id)?;
        let values = self
            .get_array("companyhistory", &format!("companyhistory/{id}"))
            .await?;
        Ok(parse_records(values, "transaction"))
    }

    /// Fetches a user's own transaction history.
    ///
    /// The access gate scans this log for the purchase of the bot's product.
    ///
    /// # Errors
    /// Returns [`Error::Upstream`] on a non-success status, or [`Error::Http`] if
    /// the request fails.
    #[instrument(skip(self))]
    pub async fn user_history(&self, user_id: &str) -> Result<Vec<TransactionRecord>> {
        let values = self
            .get_array("history", &format!("history/{user_id}"))
            .await?;
        Ok(parse_records(values, "transaction"))
    }
}

impl PurchaseHistory for ApiClient {
    async fn purchase_history(&self, user_id: &str) -> Result<Vec<TransactionRecord>> {
        self.user_history(user_id).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::net::TcpListener;

    /// Base URL of a local port that was just released, so nothing listens on it.
    fn closed_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{port}")
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = ApiClient::new("https://example.test/v3/").unwrap();
        assert_eq!(client.url("companylist/"), "https://example.test/v3/companylist/");
    }

    #[tokio::test]
    async fn test_short_id_rejected_before_request() {
        let client = ApiClient::new(&closed_base_url()).unwrap();

        let detail = client.company("AB").await;
        let history = client.company_history("AB").await;

        assert!(matches!(detail, Err(Error::InvalidCompanyId { .. })));
        assert!(matches!(history, Err(Error::InvalidCompanyId { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let client = ApiClient::new(&closed_base_url()).unwrap();
        assert!(matches!(client.list_companies().await, Err(Error::Http(_))));
        assert!(client.purchase_history("42").await.is_err());
    }
}

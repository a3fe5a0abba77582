//! POSTs a cycle's store figures to the collection endpoint.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use storetally_core::{ExportPayload, ExportRecord};

use crate::error::ScrapeError;

/// What the endpoint answered. The status is recorded, never enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub status: u16,
    pub body: String,
}

pub struct Exporter {
    client: Client,
    endpoint: String,
}

impl Exporter {
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("storetally/0.1 (exporter)")
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
        })
    }

    /// Sends `{"data": records}` as one JSON POST.
    ///
    /// There is no retry: if the request fails the cycle's figures are lost and
    /// the next cycle sends fresh ones.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] on connection failure or timeout. A non-2xx
    /// response is not an error; it is logged and returned in the receipt. An
    /// unreadable response body is logged and recorded as empty.
    pub async fn submit(&self, records: Vec<ExportRecord>) -> Result<ExportReceipt, ScrapeError> {
        let count = records.len();
        let payload = ExportPayload { data: records };

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(
                    status = status.as_u16(),
                    error = %e,
                    "failed to read export response body"
                );
                String::new()
            }
        };

        if status.is_success() {
            tracing::info!(status = status.as_u16(), records = count, "export accepted");
        } else {
            tracing::warn!(
                status = status.as_u16(),
                records = count,
                body = %body,
                "export endpoint answered with a non-success status"
            );
        }

        Ok(ExportReceipt {
            status: status.as_u16(),
            body,
        })
    }
}

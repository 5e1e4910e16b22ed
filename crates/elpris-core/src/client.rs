// Copyright (c) 2026 Elpris Project
//
// This file is part of Elpris.
//
// Licensed under the MIT License.
//
// This software is provided "AS IS", without warranty of any kind.

use crate::errors::{ElprisError, ElprisResult};
use elpris_types::PriceArea;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

/// Upstream spot price endpoint
pub const DEFAULT_BASE_URL: &str = "https://henrikhjelm.se/api/elpriset.php";

/// Query parameter naming the pricing area; kept as the Swedish key the
/// upstream PHP endpoint expects (reqwest percent-encodes it on the wire)
const AREA_PARAM: &str = "område";

/// HTTP client for the spot price API
#[derive(Debug, Clone)]
pub struct ElprisClient {
    base_url: String,
    client: Client,
}

impl ElprisClient {
    /// Create a client against the production endpoint
    pub fn new() -> ElprisResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (tests, proxies)
    pub fn with_base_url(base_url: impl Into<String>) -> ElprisResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ElprisError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Fetch the current price payload for a pricing area
    ///
    /// One GET per call; the payload is returned as raw JSON so sensors can
    /// project fields without a fixed schema.
    pub async fn fetch_prices(&self, area: PriceArea) -> ElprisResult<Value> {
        debug!("💰 Fetching spot prices for {} from {}", area, self.base_url);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[(AREA_PARAM, area.query_value())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("❌ Price API returned status {} for {}", status, area);
            return Err(ElprisError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body)?;
        debug!("✅ Received price payload for {}", area);
        Ok(payload)
    }

    /// Endpoint this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_prices_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::UrlEncoded("område".into(), "3".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "current_price": 1.23,
                    "min_price": 0.4,
                    "max_price": 2.1
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client = ElprisClient::with_base_url(server.url()).unwrap();
        let payload = client.fetch_prices(PriceArea::Se3).await.unwrap();

        assert_eq!(payload["current_price"], json!(1.23));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_prices_server_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let client = ElprisClient::with_base_url(server.url()).unwrap();
        let result = client.fetch_prices(PriceArea::Se1).await;

        match result {
            Err(ElprisError::ApiError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "internal error");
            }
            other => panic!("Expected ApiError, got {other:?}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_prices_invalid_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = ElprisClient::with_base_url(server.url()).unwrap();
        let result = client.fetch_prices(PriceArea::Se2).await;

        assert!(matches!(result, Err(ElprisError::JsonError(_))));
        mock.assert_async().await;
    }
}

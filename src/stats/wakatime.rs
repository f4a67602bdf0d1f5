use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{header, Client};
use tracing::{debug, instrument};

use crate::config::{TimeRange, WakaTimeSettings};

use super::{AggregateResponse, StatsApi, StatsEndpoint, StatsResponse, SummariesResponse};

pub const DEFAULT_WAKATIME_URL: &str = "https://wakatime.com/api/v1";

/// Client for the WakaTime api (or any server speaking the same protocol, like wakapi).
pub struct WakaTimeClient {
    client: Client,
    base_url: String,
    authorization: String,
}

impl WakaTimeClient {
    pub fn new(client: Client, settings: &WakaTimeSettings) -> Self {
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            authorization: basic_authorization(&settings.api_key),
        }
    }

    fn url_for(&self, range: TimeRange) -> String {
        match StatsEndpoint::from(range) {
            StatsEndpoint::Summaries => format!(
                "{}/users/current/summaries?range={}",
                self.base_url,
                range.slug()
            ),
            StatsEndpoint::Aggregate => {
                format!("{}/users/current/stats/{}", self.base_url, range.slug())
            }
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("Requesting {url}");
        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, &self.authorization)
            .send()
            .await
            .with_context(|| format!("Failed to reach {url}"))?
            .error_for_status()
            .context("Stats api rejected the request")?;
        response
            .json::<T>()
            .await
            .context("Unexpected stats response body")
    }
}

#[async_trait]
impl StatsApi for WakaTimeClient {
    #[instrument(skip(self))]
    async fn fetch(&self, range: TimeRange) -> Result<StatsResponse> {
        let url = self.url_for(range);
        Ok(match StatsEndpoint::from(range) {
            StatsEndpoint::Summaries => {
                StatsResponse::Summaries(self.get::<SummariesResponse>(&url).await?)
            }
            StatsEndpoint::Aggregate => {
                StatsResponse::Aggregate(self.get::<AggregateResponse>(&url).await?)
            }
        })
    }
}

/// WakaTime expects the key itself base64 encoded, without the `user:password` pair.
fn basic_authorization(api_key: &str) -> String {
    format!("Basic {}", STANDARD.encode(api_key))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use reqwest::Client;

    use crate::{
        config::{TimeRange, WakaTimeSettings},
        stats::{StatsApi, StatsResponse, StatsSnapshot},
        utils::test_server::serve_once,
    };

    use super::{basic_authorization, WakaTimeClient};

    fn local_client(base_url: String) -> Result<WakaTimeClient> {
        Ok(WakaTimeClient::new(
            Client::builder().no_proxy().build()?,
            &WakaTimeSettings {
                api_key: "waka_123".into(),
                base_url,
            },
        ))
    }

    fn client() -> WakaTimeClient {
        WakaTimeClient::new(
            Client::new(),
            &WakaTimeSettings {
                api_key: "waka_123".into(),
                base_url: "https://wakatime.com/api/v1/".into(),
            },
        )
    }

    #[test]
    fn yesterday_goes_to_summaries() {
        assert_eq!(
            client().url_for(TimeRange::Yesterday),
            "https://wakatime.com/api/v1/users/current/summaries?range=yesterday"
        );
    }

    #[test]
    fn other_ranges_go_to_stats() {
        assert_eq!(
            client().url_for(TimeRange::Last30Days),
            "https://wakatime.com/api/v1/users/current/stats/last_30_days"
        );
    }

    #[test]
    fn authorization_is_encoded_key() {
        assert_eq!(basic_authorization("waka_123"), "Basic d2FrYV8xMjM=");
    }

    #[tokio::test]
    async fn aggregate_request_over_http() -> Result<()> {
        let (base_url, server) = serve_once(
            200,
            r#"{"data": {"languages": [{"name": "Rust", "total_seconds": 120.5}]}}"#,
        )
        .await?;

        let response = local_client(base_url)?.fetch(TimeRange::LastYear).await?;
        let request = server.await??;

        assert_eq!(request.request_line, "GET /users/current/stats/last_year HTTP/1.1");
        assert_eq!(request.header("authorization"), Some("Basic d2FrYV8xMjM="));
        assert!(matches!(response, StatsResponse::Aggregate(_)));
        assert_eq!(StatsSnapshot::from(response).total_seconds(), 120);
        Ok(())
    }

    #[tokio::test]
    async fn summaries_request_over_http() -> Result<()> {
        let (base_url, server) = serve_once(200, r#"{"data": []}"#).await?;

        let response = local_client(base_url)?.fetch(TimeRange::Yesterday).await?;
        let request = server.await??;

        assert_eq!(
            request.request_line,
            "GET /users/current/summaries?range=yesterday HTTP/1.1"
        );
        assert!(matches!(response, StatsResponse::Summaries(_)));
        Ok(())
    }

    #[tokio::test]
    async fn rejected_request_is_error() -> Result<()> {
        let (base_url, server) = serve_once(401, r#"{"error": "Unauthorized"}"#).await?;

        let result = local_client(base_url)?.fetch(TimeRange::Last7Days).await;
        server.await??;

        assert!(result.is_err());
        Ok(())
    }
}

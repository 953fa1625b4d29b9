use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::models::{UserStats, WorkerStats};
use crate::errors::FetchError;

/// Anything that can produce account statistics for the monitor.
#[async_trait::async_trait]
pub trait StatsSource {
    async fn user_stats(&self, currency: &str, account: &str) -> Result<UserStats, FetchError>;
}

/// HTTP client for the pool's public statistics API.
#[derive(Debug, Clone)]
pub struct PoolClient {
    http: Client,
    base_url: String,
}

impl PoolClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// `GET <base>/<currency>/<account>`
    pub async fn get_user_stats(
        &self,
        currency: &str,
        account: &str,
    ) -> Result<UserStats, FetchError> {
        let url = self.url(&[currency, account])?;
        self.fetch(url).await
    }

    /// `GET <base>/<currency>/<account>/<worker>`
    pub async fn get_miners_stats(
        &self,
        currency: &str,
        account: &str,
        worker: &str,
    ) -> Result<WorkerStats, FetchError> {
        let url = self.url(&[currency, account, worker])?;
        self.fetch(url).await
    }

    fn url(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| FetchError::Malformed(format!("invalid pool API url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                FetchError::Malformed(format!("pool API url {} cannot be a base", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait::async_trait]
impl StatsSource for PoolClient {
    async fn user_stats(&self, currency: &str, account: &str) -> Result<UserStats, FetchError> {
        self.get_user_stats(currency, account).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_server, UNREACHABLE};
    use actix_web::{web, HttpResponse};
    use serde_json::json;

    fn pool_routes(cfg: &mut web::ServiceConfig) {
        cfg.route(
            "/bitcoin/alice",
            web::get().to(|| async {
                HttpResponse::Ok().json(json!({
                    "balance": 0.5,
                    "hashrate": 2.0e14,
                    "worker_length": 2,
                    "worker_length_online": 2,
                    "workers": [["rig1", 1.0e14], ["rig2", 1.0e14]],
                    "hashrate_history": {"t1": 1.0e14},
                    "hashes_last_day": 8.64e18
                }))
            }),
        )
        .route(
            "/bitcoin/alice/rig1",
            web::get().to(|| async {
                HttpResponse::Ok().json(json!({"hashrate": 1.0e14, "hashes_last_day": 4.32e18}))
            }),
        )
        .route(
            "/bitcoin/broken",
            web::get().to(|| async { HttpResponse::Ok().json(json!({"balance": 1.0})) }),
        );
    }

    #[actix_web::test]
    async fn test_get_user_stats_success() {
        let base = spawn_server(pool_routes).await;
        let client = PoolClient::new(base);

        let stats = client.get_user_stats("bitcoin", "alice").await.unwrap();
        assert_eq!(stats.balance, 0.5);
        assert_eq!(stats.workers.len(), 2);
        assert_eq!(stats.workers[1].name, "rig2");
    }

    #[actix_web::test]
    async fn test_get_miners_stats_success() {
        let base = spawn_server(pool_routes).await;
        let client = PoolClient::new(base);

        let stats = client
            .get_miners_stats("bitcoin", "alice", "rig1")
            .await
            .unwrap();
        assert_eq!(stats.hashrate, 1.0e14);
        assert_eq!(stats.hashes_last_day, 4.32e18);
    }

    #[actix_web::test]
    async fn test_non_200_keeps_status() {
        let base = spawn_server(pool_routes).await;
        let client = PoolClient::new(base);

        let err = client.get_user_stats("bitcoin", "nobody").await.unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 404 }));
    }

    #[actix_web::test]
    async fn test_missing_fields_are_malformed() {
        let base = spawn_server(pool_routes).await;
        let client = PoolClient::new(base);

        let err = client.get_user_stats("bitcoin", "broken").await.unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[actix_web::test]
    async fn test_connection_refused_is_transport_failure() {
        let client = PoolClient::new(UNREACHABLE);

        let err = client.user_stats("bitcoin", "alice").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[test]
    fn test_url_segments_are_escaped() {
        let client = PoolClient::new("https://api.example.com/");
        let url = client.url(&["bitcoin", "my user"]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/bitcoin/my%20user");
    }
}

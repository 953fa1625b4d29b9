use log::{info, warn};
use reqwest::Client;
use std::time::Duration;

use crate::config::{Config, Settings};
use crate::event_log::EventLog;

/// Liveness heartbeat to a healthchecks.io style service.
pub struct HealthcheckPinger {
    http: Client,
    url: String,
    event_log: EventLog,
}

impl HealthcheckPinger {
    pub fn new(
        base_url: &str,
        uuid: &str,
        timeout: Duration,
        event_log: EventLog,
    ) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            url: format!("{}/{}", base_url.trim_end_matches('/'), uuid),
            event_log,
        })
    }

    pub fn from_config(
        config: &Config,
        settings: &Settings,
        event_log: EventLog,
    ) -> anyhow::Result<Self> {
        Self::new(
            &settings.healthcheck_url,
            &config.healthcheck_uuid,
            Duration::from_secs(settings.healthcheck_timeout_seconds),
            event_log,
        )
    }

    /// `false` only when the request could not be completed; the response
    /// status and body are not inspected.
    pub async fn ping(&self) -> bool {
        info!("Sending healthcheck ping");
        match self.http.get(&self.url).send().await {
            Ok(_) => true,
            Err(e) => {
                warn!("Healthcheck ping failed: {}", e);
                self.event_log.write(&format!(
                    "error occured. Unable connect to HealthCheck.io. Error: {}",
                    e
                ));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_server, UNREACHABLE};
    use actix_web::{web, HttpResponse};
    use std::fs;

    fn healthcheck_routes(cfg: &mut web::ServiceConfig) {
        cfg.route(
            "/abc-123",
            web::get().to(|| async { HttpResponse::Ok().body("OK") }),
        )
        .route(
            "/slow",
            web::get().to(|| async {
                actix_web::rt::time::sleep(Duration::from_secs(5)).await;
                HttpResponse::Ok().body("OK")
            }),
        );
    }

    fn pinger(
        base: &str,
        uuid: &str,
        timeout: Duration,
        dir: &tempfile::TempDir,
    ) -> HealthcheckPinger {
        let event_log = EventLog::new(dir.path().join("monitor.log"));
        HealthcheckPinger::new(base, uuid, timeout, event_log).unwrap()
    }

    #[actix_web::test]
    async fn test_ping_success() {
        let base = spawn_server(healthcheck_routes).await;
        let dir = tempfile::tempdir().unwrap();

        assert!(pinger(&base, "abc-123", Duration::from_secs(10), &dir).ping().await);
    }

    #[actix_web::test]
    async fn test_any_response_counts_as_success() {
        let base = spawn_server(healthcheck_routes).await;
        let dir = tempfile::tempdir().unwrap();

        // Unknown uuid answers 404, which still proves the service is reachable.
        assert!(pinger(&base, "unknown", Duration::from_secs(10), &dir).ping().await);
    }

    #[actix_web::test]
    async fn test_transport_failure_is_logged() {
        let dir = tempfile::tempdir().unwrap();

        assert!(!pinger(UNREACHABLE, "abc-123", Duration::from_secs(10), &dir).ping().await);
        let contents = fs::read_to_string(dir.path().join("monitor.log")).unwrap();
        assert!(contents.contains("Unable connect to HealthCheck.io"));
    }

    #[actix_web::test]
    async fn test_timeout_is_a_failure() {
        let base = spawn_server(healthcheck_routes).await;
        let dir = tempfile::tempdir().unwrap();

        assert!(!pinger(&base, "slow", Duration::from_millis(200), &dir).ping().await);
    }
}

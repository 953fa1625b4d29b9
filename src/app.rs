use log::{error, info};

use crate::clock::SystemClock;
use crate::config::{Config, Settings};
use crate::event_log::EventLog;
use crate::healthcheck::HealthcheckPinger;
use crate::monitor::{ExitStatus, Monitor};
use crate::notifier::TelegramNotifier;
use crate::pool::PoolClient;

/// Load the account file, check every account, ping the healthcheck.
pub async fn run(settings: &Settings) -> ExitStatus {
    let event_log = EventLog::new(&settings.log_file);

    let config = match Config::load(&settings.config_file) {
        Ok(Some(config)) => config,
        Ok(None) => {
            error!("Config file {} not found", settings.config_file.display());
            event_log.write(&format!(
                "Config file {} not found",
                settings.config_file.display()
            ));
            return ExitStatus::ConfigUnavailable;
        }
        Err(e) => {
            error!("{:#}", e);
            event_log.write(&format!("Unable to load configuration: {:#}", e));
            return ExitStatus::ConfigUnavailable;
        }
    };
    info!(
        "Monitoring {} accounts across {} currencies",
        config.accounts().count(),
        config.currency.len()
    );

    let pool = PoolClient::new(settings.pool_api_url.clone());
    let notifier = TelegramNotifier::from_config(&config, settings, event_log.clone());
    let report = Monitor::new(
        &config,
        settings,
        pool,
        notifier,
        SystemClock,
        event_log.clone(),
    )
    .run()
    .await;
    info!("Run finished: {:?}", report);

    let ping_ok = match HealthcheckPinger::from_config(&config, settings, event_log.clone()) {
        Ok(pinger) => pinger.ping().await,
        Err(e) => {
            error!("Failed to build healthcheck client: {}", e);
            event_log.write(&format!("Unable to build healthcheck client: {}", e));
            false
        }
    };

    ExitStatus::from_healthcheck(ping_ok)
}

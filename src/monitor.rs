use log::{error, info};

use crate::alarms::{check_alarms, should_notify};
use crate::clock::Clock;
use crate::config::{Config, Settings};
use crate::event_log::EventLog;
use crate::notifier::Notifier;
use crate::pool::{StatsSource, UserStats};
use crate::summary::generate_daily_stats;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    ConfigUnavailable = 1,
    HealthcheckFailed = 2,
}

impl ExitStatus {
    pub fn from_healthcheck(ping_ok: bool) -> Self {
        if ping_ok {
            ExitStatus::Success
        } else {
            ExitStatus::HealthcheckFailed
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

/// What one pass over the configured accounts did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub accounts_checked: usize,
    pub fetch_failures: usize,
    pub alarms_sent: usize,
    pub summaries_sent: usize,
    pub notify_failures: usize,
}

/// One fetch-check-notify pass over every configured account.
pub struct Monitor<'a, S, N, C> {
    config: &'a Config,
    settings: &'a Settings,
    stats: S,
    notifier: N,
    clock: C,
    event_log: EventLog,
}

impl<'a, S, N, C> Monitor<'a, S, N, C>
where
    S: StatsSource,
    N: Notifier,
    C: Clock,
{
    pub fn new(
        config: &'a Config,
        settings: &'a Settings,
        stats: S,
        notifier: N,
        clock: C,
        event_log: EventLog,
    ) -> Self {
        Self {
            config,
            settings,
            stats,
            notifier,
            clock,
            event_log,
        }
    }

    pub async fn run(&self) -> RunReport {
        let mut report = RunReport::default();

        for (currency, account) in self.config.accounts() {
            report.accounts_checked += 1;
            info!("Checking {} account {}", currency, account);

            let stats = match self.stats.user_stats(currency, account).await {
                Ok(stats) => stats,
                Err(e) => {
                    error!("Failed to fetch stats for {} ({}): {}", account, currency, e);
                    self.event_log.write(&format!(
                        "Unable to collect stats for {} ({}): {}",
                        account, currency, e
                    ));
                    report.fetch_failures += 1;
                    continue;
                }
            };

            self.event_log.write(&stats_line(account, &stats));

            let alarms = check_alarms(&stats);
            if should_notify(&alarms) {
                info!("Alarm raised for {}", account);
                if self.notifier.send_message(&alarms).await {
                    report.alarms_sent += 1;
                } else {
                    report.notify_failures += 1;
                }
            }

            if self.in_daily_window() {
                let summary = generate_daily_stats(
                    &stats,
                    self.settings.hashrate_unit,
                    &self.settings.hashrate_unit_label,
                );
                let message = format!("Stats for:{} - {}", account, summary);
                if self.notifier.send_message(&message).await {
                    report.summaries_sent += 1;
                } else {
                    report.notify_failures += 1;
                }
            }
        }

        info!(
            "Checked {} accounts, {} fetch failures",
            report.accounts_checked, report.fetch_failures
        );
        report
    }

    fn in_daily_window(&self) -> bool {
        self.settings
            .daily_window
            .contains(self.clock.now().time())
    }
}

fn stats_line(account: &str, stats: &UserStats) -> String {
    format!(
        "Stats collected for {} - balance:{}, hashrate: {}, {} online from {} overall.",
        account, stats.balance, stats.hashrate, stats.worker_length_online, stats.worker_length
    )
}

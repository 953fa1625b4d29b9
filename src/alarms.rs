use crate::pool::UserStats;

/// Build the alert text for an account, empty when every worker is fine.
///
/// The offline summary comes first and the per-device lines follow it
/// directly, with no separator in between.
pub fn check_alarms(stats: &UserStats) -> String {
    let mut alarms = String::new();
    if stats.worker_length != stats.worker_length_online {
        alarms = format!(
            "Not all miners online! {} of {} online",
            stats.worker_length_online, stats.worker_length
        );
    }
    for worker in &stats.workers {
        if worker.hashrate == 0.0 {
            alarms += &format!("Alarm! Device {} has 0 hashrate!\r\n", worker.name);
        }
    }
    alarms
}

/// Whether an alarm text is worth a message.
pub fn should_notify(alarms: &str) -> bool {
    alarms.len() > 1
}

use std::fmt;

use crate::pool::{Payout, UserStats};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Lowest and highest sample of the account's hashrate history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashrateRange {
    pub min: f64,
    pub max: f64,
}

impl HashrateRange {
    /// `None` when there are no samples or every sample is zero.
    pub fn from_samples<I: IntoIterator<Item = f64>>(samples: I) -> Option<Self> {
        let range = samples.into_iter().fold(None, |range, sample| match range {
            None => Some(HashrateRange {
                min: sample,
                max: sample,
            }),
            Some(HashrateRange { min, max }) => Some(HashrateRange {
                min: min.min(sample),
                max: max.max(sample),
            }),
        })?;
        (range.max > 0.0).then_some(range)
    }

    /// Gap between min and max as a percentage of max.
    pub fn deviation(&self) -> f64 {
        100.0 - (self.min * 100.0 / self.max)
    }
}

/// Figures reported once a day for an account.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub balance: f64,
    pub last_payout: Option<Payout>,
    /// Average hashrate per worker over the last day, in `unit`s.
    pub average_daily_hashrate: Option<f64>,
    pub range: Option<HashrateRange>,
    pub worker_length: u64,
    pub worker_length_online: u64,
    pub unit: f64,
    pub unit_label: String,
}

impl DailySummary {
    pub fn from_stats(stats: &UserStats, unit: f64, unit_label: &str) -> Self {
        let average_daily_hashrate = (stats.worker_length > 0)
            .then(|| stats.hashes_last_day / (stats.worker_length as f64 * unit * SECONDS_PER_DAY));

        Self {
            balance: stats.balance,
            last_payout: stats.last_payout().cloned(),
            average_daily_hashrate,
            range: HashrateRange::from_samples(stats.hashrate_history.values().copied()),
            worker_length: stats.worker_length,
            worker_length_online: stats.worker_length_online,
            unit,
            unit_label: unit_label.to_string(),
        }
    }

    fn per_online_worker(&self, hashrate: f64) -> Option<f64> {
        (self.worker_length_online > 0)
            .then(|| hashrate / self.worker_length_online as f64 / self.unit)
    }

    fn write_hashrate(&self, f: &mut fmt::Formatter<'_>, value: Option<f64>) -> fmt::Result {
        match value {
            Some(value) => write!(f, "{:.2} {}", value, self.unit_label),
            None => write!(f, "n/a"),
        }
    }
}

impl fmt::Display for DailySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Balance: {:.6}", self.balance)?;
        match &self.last_payout {
            Some(payout) => writeln!(f, "Last payout: {:.6} on {}", payout.amount, payout.date)?,
            None => writeln!(f, "Last payout: none")?,
        }

        write!(f, "Average daily hashrate: ")?;
        self.write_hashrate(f, self.average_daily_hashrate)?;
        writeln!(f)?;

        match &self.range {
            Some(range) => {
                writeln!(f, "Deviation: {:.2}%", range.deviation())?;
                write!(f, "Max hashrate per worker: ")?;
                self.write_hashrate(f, self.per_online_worker(range.max))?;
                writeln!(f)?;
                write!(f, "Min hashrate per worker: ")?;
                self.write_hashrate(f, self.per_online_worker(range.min))?;
                writeln!(f)?;
            }
            None => writeln!(f, "Hashrate history: no data")?,
        }

        write!(
            f,
            "Workers online: {} of {}",
            self.worker_length_online, self.worker_length
        )
    }
}

/// Render the daily report for an account.
pub fn generate_daily_stats(stats: &UserStats, unit: f64, unit_label: &str) -> String {
    DailySummary::from_stats(stats, unit, unit_label).to_string()
}

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Account statistics as reported by the pool for one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub balance: f64,
    pub hashrate: f64,
    pub worker_length: u64,
    pub worker_length_online: u64,
    pub workers: Vec<Worker>,
    /// Hashrate samples keyed by time bucket label. Non-numeric samples are dropped.
    #[serde(default, deserialize_with = "lenient_history")]
    pub hashrate_history: BTreeMap<String, f64>,
    pub hashes_last_day: f64,
    #[serde(default)]
    pub value_last_day: f64,
    /// Newest first. Unreadable entries are dropped.
    #[serde(default, deserialize_with = "lenient_payouts")]
    pub payout_history: Vec<Payout>,
}

impl UserStats {
    pub fn last_payout(&self) -> Option<&Payout> {
        self.payout_history.first()
    }
}

// Only the daily summary reads history and payouts, so a bad entry there
// must not reject the payload the alarms depend on.
fn lenient_history<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, f64>, D::Error> {
    let samples = match Value::deserialize(deserializer)? {
        Value::Object(samples) => samples,
        other => {
            debug!("Ignoring hashrate_history of unexpected shape: {}", other);
            return Ok(BTreeMap::new());
        }
    };
    Ok(samples
        .into_iter()
        .filter_map(|(label, sample)| match sample.as_f64() {
            Some(hashrate) => Some((label, hashrate)),
            None => {
                debug!("Skipping hashrate sample {}: {}", label, sample);
                None
            }
        })
        .collect())
}

fn lenient_payouts<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Payout>, D::Error> {
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        other => {
            debug!("Ignoring payout_history of unexpected shape: {}", other);
            return Ok(Vec::new());
        }
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Array(fields) => Payout::try_from(fields)
                .map_err(|e| debug!("Skipping payout entry: {}", e))
                .ok(),
            other => {
                debug!("Skipping payout entry {}", other);
                None
            }
        })
        .collect())
}

/// One entry of the `workers` array: `[name, hashrate, ...]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Value>", into = "Vec<Value>")]
pub struct Worker {
    pub name: String,
    pub hashrate: f64,
}

impl TryFrom<Vec<Value>> for Worker {
    type Error = String;

    fn try_from(fields: Vec<Value>) -> Result<Self, Self::Error> {
        let name = fields
            .first()
            .and_then(Value::as_str)
            .ok_or("worker entry is missing its name")?;
        let hashrate = fields
            .get(1)
            .and_then(Value::as_f64)
            .ok_or_else(|| format!("worker {name} is missing its hashrate"))?;
        Ok(Self {
            name: name.to_string(),
            hashrate,
        })
    }
}

impl From<Worker> for Vec<Value> {
    fn from(worker: Worker) -> Self {
        vec![Value::from(worker.name), Value::from(worker.hashrate)]
    }
}

/// One entry of the `payout_history` array: `[date, txid, amount]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Value>", into = "Vec<Value>")]
pub struct Payout {
    pub date: String,
    pub txid: String,
    pub amount: f64,
}

impl TryFrom<Vec<Value>> for Payout {
    type Error = String;

    fn try_from(fields: Vec<Value>) -> Result<Self, Self::Error> {
        match fields.as_slice() {
            [date, txid, amount, ..] => Ok(Self {
                date: date.as_str().ok_or("payout date is not a string")?.to_string(),
                txid: txid.as_str().unwrap_or_default().to_string(),
                amount: amount.as_f64().ok_or("payout amount is not a number")?,
            }),
            _ => Err(format!(
                "payout entry has {} fields, expected 3",
                fields.len()
            )),
        }
    }
}

impl From<Payout> for Vec<Value> {
    fn from(payout: Payout) -> Self {
        vec![
            Value::from(payout.date),
            Value::from(payout.txid),
            Value::from(payout.amount),
        ]
    }
}

/// Statistics for a single worker of an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerStats {
    pub hashrate: f64,
    #[serde(default)]
    pub hashes_last_day: f64,
    #[serde(default)]
    pub hashrate_history: BTreeMap<String, f64>,
    /// Fields not modelled above, kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

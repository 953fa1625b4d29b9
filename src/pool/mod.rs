pub mod client;
pub mod models;

pub use client::{PoolClient, StatsSource};
pub use models::{Payout, UserStats, Worker, WorkerStats};

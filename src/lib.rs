pub mod alarms;
pub mod app;
pub mod clock;
pub mod config;
pub mod errors;
pub mod event_log;
pub mod healthcheck;
pub mod monitor;
pub mod notifier;
pub mod pool;
pub mod summary;

#[cfg(test)]
mod test_support;

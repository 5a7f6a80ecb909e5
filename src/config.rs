//! Runtime configuration for the wallet client.
//!
//! Values come from [`WalletConfig::default`] and may be overridden from the environment with
//! [`WalletConfig::from_env`]. Command line flags take precedence over both.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default wallet endpoint of a locally running marketplace.
pub const DEFAULT_WALLET_URL: &str = "http://localhost:3000/api/wallet";

pub const WALLET_URL_ENV: &str = "TELEGHOST_WALLET_URL";
pub const WALLET_TIMEOUT_ENV: &str = "TELEGHOST_WALLET_TIMEOUT_SECS";
pub const WALLET_SYNC_MODE_ENV: &str = "TELEGHOST_WALLET_SYNC_MODE";

/// How ledger mutations are reconciled with the wallet endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncMode {
	/// Commit locally and notify the endpoint without waiting for it
	#[default]
	Optimistic,
	/// Commit only what the endpoint accepted
	Confirmed,
}

impl fmt::Display for SyncMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SyncMode::Optimistic => f.write_str("optimistic"),
			SyncMode::Confirmed => f.write_str("confirmed"),
		}
	}
}

impl FromStr for SyncMode {
	type Err = String;

	fn from_str(mode: &str) -> Result<Self, Self::Err> {
		match mode.to_ascii_lowercase().as_str() {
			"optimistic" => Ok(SyncMode::Optimistic),
			"confirmed" => Ok(SyncMode::Confirmed),
			_ => Err(format!("unknown sync mode: {}", mode)),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("Invalid value for {key}: {value}")]
	InvalidValue { key: &'static str, value: String },
}

/// Configuration for the wallet client and store
#[derive(Debug, Clone)]
pub struct WalletConfig {
	/// Wallet endpoint answering GET (ledger) and POST (actions)
	pub endpoint_url: String,
	/// Timeout applied to every HTTP request
	pub request_timeout: Duration,
	pub sync_mode: SyncMode,
	/// Upper bound on retrying a confirmed mutation
	pub retry_max_elapsed: Duration,
}

impl Default for WalletConfig {
	fn default() -> Self {
		Self {
			endpoint_url: DEFAULT_WALLET_URL.to_string(),
			request_timeout: Duration::from_secs(30),
			sync_mode: SyncMode::default(),
			retry_max_elapsed: Duration::from_secs(10),
		}
	}
}

impl WalletConfig {
	/// Defaults overridden by the `TELEGHOST_WALLET_*` environment variables.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut config = Self::default();

		if let Some(url) = lookup(WALLET_URL_ENV) {
			config.endpoint_url = url;
		}

		if let Some(raw) = lookup(WALLET_TIMEOUT_ENV) {
			let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidValue {
				key: WALLET_TIMEOUT_ENV,
				value: raw.clone(),
			})?;
			config.request_timeout = Duration::from_secs(secs);
		}

		if let Some(raw) = lookup(WALLET_SYNC_MODE_ENV) {
			config.sync_mode = raw.parse().map_err(|_| ConfigError::InvalidValue {
				key: WALLET_SYNC_MODE_ENV,
				value: raw.clone(),
			})?;
		}

		Ok(config)
	}
}

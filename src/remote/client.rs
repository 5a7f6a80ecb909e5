//!
//! HTTP client for the marketplace wallet endpoint.
//!
//! The endpoint is a single URL: `GET` returns the ledger and `POST` records a wallet action.
//! All methods are async and designed for use with Tokio.

use super::backend::WalletBackend;
use super::types::*;
use crate::config::WalletConfig;
use crate::wallet::Transaction;

use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

/// Wallet endpoint client
#[derive(Clone)]
pub struct WalletApiClient {
	/// The underlying HTTP client.
	http_client: Client,
	/// The wallet endpoint URL.
	endpoint: Url,
}

impl WalletApiClient {
	/// Create a new wallet client.
	///
	/// # Arguments
	/// * `endpoint` - The wallet endpoint URL.
	/// * `timeout` - Timeout applied to every request.
	///
	/// # Errors
	/// Returns `RemoteError::InvalidUrl` for a malformed endpoint, or `RemoteError::HttpError`
	/// if the HTTP client cannot be built.
	pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, RemoteError> {
		let endpoint = Url::parse(endpoint)
			.map_err(|e| RemoteError::InvalidUrl(format!("{}: {}", endpoint, e)))?;

		let http_client = Client::builder().timeout(timeout).build()?;

		Ok(Self {
			http_client,
			endpoint,
		})
	}

	pub fn from_config(config: &WalletConfig) -> Result<Self, RemoteError> {
		Self::new(&config.endpoint_url, config.request_timeout)
	}

	pub fn endpoint(&self) -> &str {
		self.endpoint.as_str()
	}

	/// Read a response body, mapping non-2xx statuses to `RemoteError::StatusError`.
	async fn read_body(response: reqwest::Response) -> Result<Vec<u8>, RemoteError> {
		let status = response.status();
		if !status.is_success() {
			debug!("Wallet endpoint answered with status {}", status);
			return Err(RemoteError::StatusError(status));
		}

		Ok(response.bytes().await?.to_vec())
	}
}

#[async_trait::async_trait]
impl WalletBackend for WalletApiClient {
	async fn fetch_wallet(&self) -> Result<WalletSnapshot, RemoteError> {
		debug!("Fetching wallet ledger from {}", self.endpoint);

		let response = self.http_client.get(self.endpoint.clone()).send().await?;
		let body = Self::read_body(response).await?;
		let snapshot: WalletSnapshot = serde_json::from_slice(&body)?;

		debug!(
			"Fetched {} transactions from wallet endpoint",
			snapshot.transactions.len()
		);
		Ok(snapshot)
	}

	async fn submit(&self, request: &WalletActionRequest) -> Result<Transaction, RemoteError> {
		debug!(
			"Submitting {} of {} to {}",
			request.action, request.amount, self.endpoint
		);

		let response = self
			.http_client
			.post(self.endpoint.clone())
			.json(request)
			.send()
			.await?;
		let body = Self::read_body(response).await?;
		let parsed: WalletActionResponse = serde_json::from_slice(&body)?;

		parsed.transaction.ok_or(RemoteError::NoData)
	}
}

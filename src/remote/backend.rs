use super::types::{RemoteError, WalletActionRequest, WalletSnapshot};
use crate::wallet::Transaction;

/// Source of truth the wallet store loads from and reports to.
#[async_trait::async_trait]
pub trait WalletBackend: Send + Sync {
	/// Fetch the full ledger.
	async fn fetch_wallet(&self) -> Result<WalletSnapshot, RemoteError>;

	/// Submit a wallet action and return the transaction the backend constructed for it.
	async fn submit(&self, request: &WalletActionRequest) -> Result<Transaction, RemoteError>;
}

/// Backend for running without a wallet endpoint; every call fails with [`RemoteError::Offline`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineBackend;

#[async_trait::async_trait]
impl WalletBackend for OfflineBackend {
	async fn fetch_wallet(&self) -> Result<WalletSnapshot, RemoteError> {
		Err(RemoteError::Offline)
	}

	async fn submit(&self, _request: &WalletActionRequest) -> Result<Transaction, RemoteError> {
		Err(RemoteError::Offline)
	}
}

//! In-memory wallet store.
//!
//! `WalletStore` holds the unified ledger and its derived balance, loads the ledger from a
//! [`WalletBackend`] (falling back to an injected ledger when the backend fails) and appends
//! one transaction per wallet action. Mutations take `&mut self`, so they are serialized by
//! ownership of the store.
//!
//! Two reconciliation modes are supported:
//! - [`SyncMode::Optimistic`]: the transaction is committed locally first and deposits are
//!   reported to the backend on a spawned task whose outcome is only logged.
//! - [`SyncMode::Confirmed`]: the action is submitted first (keyed by the local transaction id and
//!   retried with exponential backoff on transient failures) and the transaction returned by the
//!   backend is what gets committed.

use crate::config::{SyncMode, WalletConfig};
use crate::remote::{RemoteError, WalletAction, WalletActionRequest, WalletBackend};
use crate::wallet::balance::{calculate_balance, filter_by_role};
use crate::wallet::events::{EventDispatcher, LedgerSource, WalletEvent, WalletEventHandler};
use crate::wallet::summary::LedgerSummary;
use crate::wallet::types::{
	Role, Transaction, TransactionMetadata, TransactionStatus, TransactionType, WalletError,
};

use backoff::{ExponentialBackoff, future::retry};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Snapshot of the store as seen by dashboard consumers.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletState {
	pub balance: Decimal,
	/// Newest first
	pub transactions: Vec<Transaction>,
	pub loading: bool,
}

impl Default for WalletState {
	fn default() -> Self {
		Self {
			balance: Decimal::ZERO,
			transactions: Vec::new(),
			loading: true,
		}
	}
}

/// Final status of a pending withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalOutcome {
	Completed,
	Failed,
}

impl WithdrawalOutcome {
	fn status(&self) -> TransactionStatus {
		match self {
			WithdrawalOutcome::Completed => TransactionStatus::Completed,
			WithdrawalOutcome::Failed => TransactionStatus::Failed,
		}
	}
}

pub struct WalletStore {
	backend: Arc<dyn WalletBackend>,
	/// Ledger used when the backend cannot serve one
	fallback: Vec<Transaction>,
	state: WalletState,
	sync_mode: SyncMode,
	retry_max_elapsed: Duration,
	dispatcher: EventDispatcher,
	/// Outstanding optimistic notifications
	notifications: Vec<JoinHandle<()>>,
}

impl WalletStore {
	/// Create an unloaded store in optimistic mode.
	pub fn new(backend: Arc<dyn WalletBackend>, fallback: Vec<Transaction>) -> Self {
		Self {
			backend,
			fallback,
			state: WalletState::default(),
			sync_mode: SyncMode::default(),
			retry_max_elapsed: WalletConfig::default().retry_max_elapsed,
			dispatcher: EventDispatcher::new(),
			notifications: Vec::new(),
		}
	}

	pub fn from_config(
		backend: Arc<dyn WalletBackend>,
		fallback: Vec<Transaction>,
		config: &WalletConfig,
	) -> Self {
		Self::new(backend, fallback)
			.with_sync_mode(config.sync_mode)
			.with_retry_max_elapsed(config.retry_max_elapsed)
	}

	pub fn with_sync_mode(mut self, sync_mode: SyncMode) -> Self {
		self.sync_mode = sync_mode;
		self
	}

	pub fn with_retry_max_elapsed(mut self, retry_max_elapsed: Duration) -> Self {
		self.retry_max_elapsed = retry_max_elapsed;
		self
	}

	pub fn register_handler(&mut self, handler: Box<dyn WalletEventHandler>) {
		self.dispatcher.register_handler(handler);
	}

	pub fn balance(&self) -> Decimal {
		self.state.balance
	}

	/// The ledger, newest first.
	pub fn transactions(&self) -> &[Transaction] {
		&self.state.transactions
	}

	pub fn is_loading(&self) -> bool {
		self.state.loading
	}

	pub fn state(&self) -> &WalletState {
		&self.state
	}

	pub fn sync_mode(&self) -> SyncMode {
		self.sync_mode
	}

	/// Load the ledger from the backend, substituting the fallback ledger on any failure.
	///
	/// Never fails; the returned source says which ledger is now in use.
	pub async fn load(&mut self) -> LedgerSource {
		self.state.loading = true;

		let (transactions, source) = match self.backend.fetch_wallet().await {
			Ok(snapshot) => {
				let derived = calculate_balance(&snapshot.transactions);
				if !snapshot.transactions.is_empty() && snapshot.balance != derived {
					warn!(
						"Remote balance {} disagrees with ledger balance {}, using the ledger",
						snapshot.balance, derived
					);
				}
				(snapshot.transactions, LedgerSource::Remote)
			}
			Err(e) => {
				info!("Using demo wallet data: {}", e);
				(self.fallback.clone(), LedgerSource::Fixture)
			}
		};

		self.state = WalletState {
			balance: calculate_balance(&transactions),
			transactions,
			loading: false,
		};

		self.dispatcher.dispatch(&WalletEvent::LedgerLoaded {
			source,
			transaction_count: self.state.transactions.len(),
		});
		source
	}

	/// Reload the ledger, discarding local state. Reconciles after the backend comes back.
	pub async fn refresh(&mut self) -> LedgerSource {
		self.load().await
	}

	/// Record a completed deposit.
	pub async fn add_funds(&mut self, amount: Decimal) -> Result<Transaction, WalletError> {
		ensure_positive(amount)?;

		let transaction = Transaction::new(
			TransactionType::Deposit,
			amount,
			WalletAction::Deposit.default_description(),
			TransactionStatus::Completed,
		);
		self.apply(WalletAction::Deposit, transaction).await
	}

	/// Record a completed advertiser spend.
	///
	/// Fails with `WalletError::InsufficientFunds` when the balance does not cover `amount`;
	/// the ledger is left untouched in that case.
	pub async fn spend_funds(
		&mut self,
		amount: Decimal,
		description: impl Into<String>,
		campaign_id: Option<String>,
	) -> Result<Transaction, WalletError> {
		ensure_positive(amount)?;
		self.ensure_available(amount)?;

		let transaction = Transaction::new(
			TransactionType::AdSpend,
			amount,
			description,
			TransactionStatus::Completed,
		)
		.with_metadata(TransactionMetadata::for_role(Role::Advertiser).with_campaign(campaign_id));
		self.apply(WalletAction::Spend, transaction).await
	}

	/// Record a completed publisher earning.
	pub async fn add_earnings(
		&mut self,
		amount: Decimal,
		description: impl Into<String>,
		channel_id: Option<String>,
	) -> Result<Transaction, WalletError> {
		ensure_positive(amount)?;

		let transaction = Transaction::new(
			TransactionType::Earning,
			amount,
			description,
			TransactionStatus::Completed,
		)
		.with_metadata(TransactionMetadata::for_role(Role::Publisher).with_channel(channel_id));
		self.apply(WalletAction::Earn, transaction).await
	}

	/// Record a pending withdrawal. The balance is not debited until it is settled.
	pub async fn request_withdrawal(&mut self, amount: Decimal) -> Result<Transaction, WalletError> {
		ensure_positive(amount)?;
		self.ensure_available(amount)?;

		let transaction = Transaction::new(
			TransactionType::Withdrawal,
			amount,
			WalletAction::Withdraw.default_description(),
			TransactionStatus::Pending,
		);
		self.apply(WalletAction::Withdraw, transaction).await
	}

	/// Move a pending withdrawal to its final status.
	///
	/// Only pending withdrawals can be settled, and completing one requires the balance to
	/// cover it at settlement time.
	pub fn settle_withdrawal(
		&mut self,
		id: &str,
		outcome: WithdrawalOutcome,
	) -> Result<Transaction, WalletError> {
		let position = self
			.state
			.transactions
			.iter()
			.position(|tx| tx.id == id)
			.ok_or_else(|| WalletError::TransactionNotFound(id.to_string()))?;

		let entry = &self.state.transactions[position];
		if entry.transaction_type != TransactionType::Withdrawal
			|| entry.status != TransactionStatus::Pending
		{
			return Err(WalletError::InvalidTransition(format!(
				"{} is a {} {}, only pending withdrawals can be settled",
				id, entry.status, entry.transaction_type
			)));
		}
		if outcome == WithdrawalOutcome::Completed {
			self.ensure_available(entry.amount)?;
		}

		let status = outcome.status();
		self.state.transactions[position].status = status;
		self.state.balance = calculate_balance(&self.state.transactions);
		let settled = self.state.transactions[position].clone();

		self.dispatcher.dispatch(&WalletEvent::WithdrawalSettled {
			id: settled.id.clone(),
			status,
		});
		Ok(settled)
	}

	/// Ledger entries visible to `role`, newest first.
	pub fn transactions_by_role(&self, role: Role) -> Vec<&Transaction> {
		filter_by_role(&self.state.transactions, role)
	}

	pub fn summary(&self) -> LedgerSummary {
		LedgerSummary::from_transactions(&self.state.transactions)
	}

	pub fn role_summary(&self, role: Role) -> LedgerSummary {
		LedgerSummary::from_transactions(self.transactions_by_role(role))
	}

	/// Wait for outstanding optimistic notifications to finish.
	pub async fn flush_notifications(&mut self) {
		for handle in self.notifications.drain(..) {
			if let Err(e) = handle.await {
				warn!("Wallet notification task failed: {}", e);
			}
		}
	}

	async fn apply(
		&mut self,
		action: WalletAction,
		transaction: Transaction,
	) -> Result<Transaction, WalletError> {
		match self.sync_mode {
			SyncMode::Optimistic => {
				self.commit(transaction.clone());
				if action == WalletAction::Deposit {
					self.notify(WalletActionRequest::for_transaction(action, &transaction));
				}
				Ok(transaction)
			}
			SyncMode::Confirmed => {
				let request = WalletActionRequest::for_transaction(action, &transaction);
				let confirmed = self.submit_with_retry(&request).await?;
				let confirmed = check_confirmation(&request, confirmed)?;
				self.commit(confirmed.clone());
				Ok(confirmed)
			}
		}
	}

	fn commit(&mut self, transaction: Transaction) {
		self.state.transactions.insert(0, transaction.clone());
		self.state.balance = calculate_balance(&self.state.transactions);
		self.dispatcher
			.dispatch(&WalletEvent::TransactionAppended(transaction));
	}

	fn notify(&mut self, request: WalletActionRequest) {
		self.notifications.retain(|handle| !handle.is_finished());

		let backend = Arc::clone(&self.backend);
		self.notifications.push(tokio::spawn(async move {
			match backend.submit(&request).await {
				Ok(_) => debug!("Synced {} of {} with server", request.action, request.amount),
				Err(e) => warn!("Failed to sync {} with server: {}", request.action, e),
			}
		}));
	}

	async fn submit_with_retry(
		&self,
		request: &WalletActionRequest,
	) -> Result<Transaction, RemoteError> {
		let policy = ExponentialBackoff {
			max_elapsed_time: Some(self.retry_max_elapsed),
			..ExponentialBackoff::default()
		};
		let backend = &self.backend;

		retry(policy, move || async move {
			backend.submit(request).await.map_err(|e| {
				if e.is_transient() {
					warn!("Retrying {} after transient error: {}", request.action, e);
					backoff::Error::transient(e)
				} else {
					backoff::Error::permanent(e)
				}
			})
		})
		.await
	}

	fn ensure_available(&self, amount: Decimal) -> Result<(), WalletError> {
		if self.state.balance < amount {
			return Err(WalletError::InsufficientFunds {
				requested: amount,
				available: self.state.balance,
			});
		}
		Ok(())
	}
}

fn ensure_positive(amount: Decimal) -> Result<(), WalletError> {
	if amount <= Decimal::ZERO {
		return Err(WalletError::InvalidAmount(amount));
	}
	Ok(())
}

/// The backend must record the action that was asked for, in the status it starts in.
///
/// Attribution is owned locally: a response that drops or rewrites the request's metadata gets
/// the request's metadata back, so role views stay correct.
fn check_confirmation(
	request: &WalletActionRequest,
	mut confirmed: Transaction,
) -> Result<Transaction, RemoteError> {
	if confirmed.transaction_type != request.action.transaction_type() {
		return Err(RemoteError::InvalidResponse(format!(
			"{} was recorded as {}",
			request.action, confirmed.transaction_type
		)));
	}
	if confirmed.amount != request.amount {
		return Err(RemoteError::InvalidResponse(format!(
			"{} of {} was recorded with amount {}",
			request.action, request.amount, confirmed.amount
		)));
	}
	if confirmed.status != request.action.initial_status() {
		return Err(RemoteError::InvalidResponse(format!(
			"{} was recorded as {}, expected {}",
			request.action,
			confirmed.status,
			request.action.initial_status()
		)));
	}
	if confirmed.metadata != request.metadata {
		warn!(
			"Backend changed metadata of {} {}, restoring local attribution",
			request.action, confirmed.id
		);
		confirmed.metadata = request.metadata.clone();
	}
	Ok(confirmed)
}

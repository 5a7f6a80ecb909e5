use crate::remote::RemoteError;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of monetary event recorded in the unified ledger.
///
/// The sign of an entry is implied by its type; amounts themselves are always positive.
/// Types this client does not know deserialize as `Unknown` and never move the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
	/// Funds added to the wallet
	Deposit,
	/// Funds withdrawn to an external account
	Withdrawal,
	/// Advertiser spending on a campaign
	AdSpend,
	/// Publisher earning from a placed ad
	Earning,
	/// Promotional credit
	Bonus,
	/// Money returned to the wallet
	Refund,
	#[serde(other)]
	Unknown,
}

impl TransactionType {
	/// Whether a completed entry of this type increases the balance.
	pub fn is_credit(&self) -> bool {
		matches!(
			self,
			TransactionType::Deposit
				| TransactionType::Earning
				| TransactionType::Bonus
				| TransactionType::Refund
		)
	}

	/// Multiplier applied to the amount when folding the ledger.
	pub fn sign(&self) -> Decimal {
		match self {
			TransactionType::Unknown => Decimal::ZERO,
			_ if self.is_credit() => Decimal::ONE,
			_ => Decimal::NEGATIVE_ONE,
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			TransactionType::Deposit => "deposit",
			TransactionType::Withdrawal => "withdrawal",
			TransactionType::AdSpend => "ad_spend",
			TransactionType::Earning => "earning",
			TransactionType::Bonus => "bonus",
			TransactionType::Refund => "refund",
			TransactionType::Unknown => "unknown",
		}
	}
}

impl fmt::Display for TransactionType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
	Completed,
	Pending,
	Failed,
	#[serde(other)]
	Unknown,
}

impl fmt::Display for TransactionStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			TransactionStatus::Completed => f.write_str("completed"),
			TransactionStatus::Pending => f.write_str("pending"),
			TransactionStatus::Failed => f.write_str("failed"),
			TransactionStatus::Unknown => f.write_str("unknown"),
		}
	}
}

/// Marketplace side a transaction or a view is scoped to.
///
/// An entry tagged with a role this client does not know is visible to neither side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
	Advertiser,
	Publisher,
	#[serde(other)]
	Unknown,
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Role::Advertiser => f.write_str("advertiser"),
			Role::Publisher => f.write_str("publisher"),
			Role::Unknown => f.write_str("unknown"),
		}
	}
}

impl FromStr for Role {
	type Err = String;

	fn from_str(role: &str) -> Result<Self, Self::Err> {
		match role.to_ascii_lowercase().as_str() {
			"advertiser" | "advertisers" => Ok(Role::Advertiser),
			"publisher" | "publishers" => Ok(Role::Publisher),
			_ => Err(format!("unknown role: {}", role)),
		}
	}
}

/// Attribution of a transaction to a campaign, a channel and a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMetadata {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub campaign_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub channel_id: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub role: Option<Role>,
}

impl TransactionMetadata {
	pub fn for_role(role: Role) -> Self {
		Self {
			role: Some(role),
			..Self::default()
		}
	}

	pub fn with_campaign(mut self, campaign_id: Option<String>) -> Self {
		self.campaign_id = campaign_id;
		self
	}

	pub fn with_channel(mut self, channel_id: Option<String>) -> Self {
		self.channel_id = channel_id;
		self
	}
}

/// A single entry of the unified ledger, in the wire shape used by the wallet endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
	pub id: String,
	#[serde(rename = "type")]
	pub transaction_type: TransactionType,
	pub amount: Decimal,
	pub description: String,
	pub date: DateTime<Utc>,
	pub status: TransactionStatus,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub metadata: Option<TransactionMetadata>,
}

impl Transaction {
	/// Create a transaction stamped with a fresh identifier and the current time.
	pub fn new(
		transaction_type: TransactionType,
		amount: Decimal,
		description: impl Into<String>,
		status: TransactionStatus,
	) -> Self {
		Self {
			id: super::generate_transaction_id(),
			transaction_type,
			amount,
			description: description.into(),
			date: Utc::now(),
			status,
			metadata: None,
		}
	}

	pub fn with_metadata(mut self, metadata: TransactionMetadata) -> Self {
		self.metadata = Some(metadata);
		self
	}

	pub fn role(&self) -> Option<Role> {
		self.metadata.as_ref().and_then(|metadata| metadata.role)
	}

	/// Untagged entries are shared by both roles.
	pub fn visible_to(&self, role: Role) -> bool {
		self.role().is_none_or(|tagged| tagged == role)
	}

	pub fn is_completed(&self) -> bool {
		self.status == TransactionStatus::Completed
	}

	/// Contribution of this entry to the balance; zero unless completed.
	pub fn signed_amount(&self) -> Decimal {
		if self.is_completed() {
			self.transaction_type.sign() * self.amount
		} else {
			Decimal::ZERO
		}
	}
}

/// Errors raised by wallet store operations
#[allow(clippy::enum_variant_names)]
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
	#[error("Insufficient funds: requested {requested}, available {available}")]
	InsufficientFunds {
		requested: Decimal,
		available: Decimal,
	},

	#[error("Invalid amount {0}: amounts must be positive")]
	InvalidAmount(Decimal),

	#[error("Transaction not found: {0}")]
	TransactionNotFound(String),

	#[error("Invalid transition: {0}")]
	InvalidTransition(String),

	#[error("Remote error: {0}")]
	RemoteError(#[from] RemoteError),

	#[error("Event handler error: {0}")]
	HandlerError(String),
}

//! Types for the wallet endpoint wire format

use crate::wallet::{Transaction, TransactionMetadata, TransactionStatus, TransactionType};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ledger as served by `GET` on the wallet endpoint.
///
/// Missing fields default to a zero balance and an empty ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletSnapshot {
    /// Balance reported by the endpoint. The store derives its own balance from `transactions`.
    #[serde(default)]
    pub balance: Decimal,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Actions accepted by `POST` on the wallet endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletAction {
    Deposit,
    Spend,
    Earn,
    Withdraw,
}

impl WalletAction {
    /// Transaction type the endpoint records for this action.
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            WalletAction::Deposit => TransactionType::Deposit,
            WalletAction::Spend => TransactionType::AdSpend,
            WalletAction::Earn => TransactionType::Earning,
            WalletAction::Withdraw => TransactionType::Withdrawal,
        }
    }

    /// Status a freshly recorded transaction starts in. Withdrawals wait for settlement.
    pub fn initial_status(&self) -> TransactionStatus {
        match self {
            WalletAction::Withdraw => TransactionStatus::Pending,
            _ => TransactionStatus::Completed,
        }
    }

    /// Description the endpoint uses when the request carries none.
    pub fn default_description(&self) -> &'static str {
        match self {
            WalletAction::Deposit => "Funds added to wallet",
            WalletAction::Spend => "Campaign spending",
            WalletAction::Earn => "Channel earnings",
            WalletAction::Withdraw => "Withdrawal request",
        }
    }
}

impl fmt::Display for WalletAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletAction::Deposit => f.write_str("deposit"),
            WalletAction::Spend => f.write_str("spend"),
            WalletAction::Earn => f.write_str("earn"),
            WalletAction::Withdraw => f.write_str("withdraw"),
        }
    }
}

/// Body of a `POST` to the wallet endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletActionRequest {
    pub action: WalletAction,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TransactionMetadata>,
    /// Lets the endpoint recognise a retried submission of the same mutation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

impl WalletActionRequest {
    pub fn new(action: WalletAction, amount: Decimal) -> Self {
        Self {
            action,
            amount,
            description: None,
            metadata: None,
            idempotency_key: None,
        }
    }

    /// Request describing a locally built transaction, keyed by its identifier.
    pub fn for_transaction(action: WalletAction, transaction: &Transaction) -> Self {
        Self {
            action,
            amount: transaction.amount,
            description: Some(transaction.description.clone()),
            metadata: transaction.metadata.clone(),
            idempotency_key: Some(transaction.id.clone()),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Body of a successful `POST` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletActionResponse {
    #[serde(default)]
    pub transaction: Option<Transaction>,
}

/// Error types for wallet endpoint operations
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    StatusError(reqwest::StatusCode),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("No data returned")]
    NoData,

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("Rejected response: {0}")]
    InvalidResponse(String),

    #[error("Wallet endpoint is offline")]
    Offline,
}

impl RemoteError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            RemoteError::HttpError(e) => e.is_timeout() || e.is_connect(),
            RemoteError::StatusError(status) => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::Role;

    #[test]
    fn test_snapshot_defaults_missing_fields() {
        let snapshot: WalletSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.balance.is_zero());
        assert!(snapshot.transactions.is_empty());
    }

    #[test]
    fn test_request_body_shape() {
        let transaction = Transaction::new(
            TransactionType::AdSpend,
            Decimal::new(40, 0),
            "Launch week",
            TransactionStatus::Completed,
        )
        .with_metadata(
            TransactionMetadata::for_role(Role::Advertiser).with_campaign(Some("7".to_string())),
        );

        let request = WalletActionRequest::for_transaction(WalletAction::Spend, &transaction);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["action"], "spend");
        assert_eq!(body["amount"], 40.0);
        assert_eq!(body["description"], "Launch week");
        assert_eq!(body["metadata"]["campaign_id"], "7");
        assert_eq!(body["idempotency_key"], transaction.id.as_str());

        let bare = serde_json::to_value(WalletActionRequest::new(WalletAction::Deposit, Decimal::TEN))
            .unwrap();
        assert!(bare.get("description").is_none());
        assert!(bare.get("idempotency_key").is_none());
    }

    #[test]
    fn test_action_defaults() {
        assert_eq!(WalletAction::Withdraw.initial_status(), TransactionStatus::Pending);
        assert_eq!(WalletAction::Spend.transaction_type(), TransactionType::AdSpend);
        assert_eq!(WalletAction::Earn.default_description(), "Channel earnings");
    }

    #[test]
    fn test_transient_classification() {
        assert!(RemoteError::StatusError(reqwest::StatusCode::SERVICE_UNAVAILABLE).is_transient());
        assert!(RemoteError::StatusError(reqwest::StatusCode::TOO_MANY_REQUESTS).is_transient());
        assert!(!RemoteError::StatusError(reqwest::StatusCode::BAD_REQUEST).is_transient());
        assert!(!RemoteError::NoData.is_transient());
        assert!(!RemoteError::Offline.is_transient());
    }
}

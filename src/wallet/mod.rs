pub mod balance;
pub mod events;
pub mod fixtures;
pub mod store;
pub mod summary;
pub mod types;

pub use balance::{calculate_balance, filter_by_role};
pub use events::{EventDispatcher, LedgerSource, LoggingEventHandler, WalletEvent, WalletEventHandler};
pub use store::{WalletState, WalletStore, WithdrawalOutcome};
pub use summary::LedgerSummary;
pub use types::*;

use rand::Rng;

/// Generate a collision-safe transaction identifier (`tx_` followed by 32 hex characters).
pub fn generate_transaction_id() -> String {
	let mut bytes = [0u8; 16];
	rand::rng().fill(&mut bytes);
	format!("tx_{}", hex::encode(bytes))
}

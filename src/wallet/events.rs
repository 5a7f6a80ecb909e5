//! Event system for the wallet store.
//!
//! The store emits an event whenever its ledger changes: after a load, after a transaction is
//! appended and after a pending withdrawal is settled. Consumers (dashboards, audit logs, tests)
//! register handlers on the store's dispatcher instead of polling its state.

use crate::wallet::types::{Transaction, TransactionStatus, WalletError};

use std::fmt;
use tracing::{error, info};

/// Where the ledger of the most recent load came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerSource {
    /// The wallet endpoint answered with a ledger
    Remote,
    /// The endpoint failed and the injected fallback ledger was used
    Fixture,
}

impl fmt::Display for LedgerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerSource::Remote => f.write_str("remote"),
            LedgerSource::Fixture => f.write_str("fixture"),
        }
    }
}

/// Changes to the wallet ledger
#[derive(Debug, Clone)]
pub enum WalletEvent {
    /// The ledger was (re)loaded
    LedgerLoaded {
        source: LedgerSource,
        transaction_count: usize,
    },
    /// A new transaction was placed at the head of the ledger
    TransactionAppended(Transaction),
    /// A pending withdrawal reached a final status
    WithdrawalSettled {
        id: String,
        status: TransactionStatus,
    },
}

/// Trait for observing wallet events.
pub trait WalletEventHandler: Send + Sync {
    /// Handle a wallet event.
    fn handle(&mut self, event: &WalletEvent) -> Result<(), WalletError>;

    /// Get the name of this handler for logging and diagnostics.
    fn name(&self) -> &'static str;
}

/// Event dispatcher that manages multiple event handlers.
///
/// Handlers are called in registration order. A failing handler is logged and does not prevent
/// the remaining handlers from seeing the event.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Box<dyn WalletEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_handler(&mut self, handler: Box<dyn WalletEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn dispatch(&mut self, event: &WalletEvent) {
        for handler in &mut self.handlers {
            if let Err(e) = handler.handle(event) {
                error!("Handler {} failed to process event: {}", handler.name(), e);
            }
        }
    }
}

/// Handler that writes every event to the log.
pub struct LoggingEventHandler;

impl WalletEventHandler for LoggingEventHandler {
    fn handle(&mut self, event: &WalletEvent) -> Result<(), WalletError> {
        match event {
            WalletEvent::LedgerLoaded {
                source,
                transaction_count,
            } => {
                info!(
                    "Loaded {} transactions from {} ledger",
                    transaction_count, source
                );
            }
            WalletEvent::TransactionAppended(transaction) => {
                info!(
                    "Appended {} {} ({}): {} [{}]",
                    transaction.transaction_type,
                    transaction.amount,
                    transaction.status,
                    transaction.description,
                    transaction.id
                );
            }
            WalletEvent::WithdrawalSettled { id, status } => {
                info!("Withdrawal {} settled as {}", id, status);
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "logging"
    }
}

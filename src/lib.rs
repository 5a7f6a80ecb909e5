//! Unified wallet for the TeleGhost advertiser/publisher marketplace.
//!
//! The crate is organised bottom-up:
//!
//! - [`wallet`]: the transaction ledger, the balance calculator, role views and the
//!   in-memory [`WalletStore`](wallet::WalletStore).
//! - [`remote`]: the HTTP client for the marketplace wallet endpoint and the
//!   [`WalletBackend`](remote::WalletBackend) seam the store depends on.
//! - [`config`]: endpoint, timeout and sync mode settings.
//! - [`utils`]: money formatting.

pub mod config;
pub mod remote;
pub mod utils;
pub mod wallet;

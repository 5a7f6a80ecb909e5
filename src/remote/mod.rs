//! Remote wallet endpoint integration.
//!
//! This module provides the typed client for the marketplace wallet endpoint and the
//! [`WalletBackend`] seam the wallet store talks to. The endpoint serves the ledger on `GET` and
//! accepts wallet actions (deposit, spend, earn, withdraw) on `POST`.

/// Backend trait and the offline backend
mod backend;
/// HTTP client for the wallet endpoint
mod client;
/// Wire types for requests, responses and errors
mod types;

pub use backend::{OfflineBackend, WalletBackend};
pub use client::WalletApiClient;
pub use types::*;

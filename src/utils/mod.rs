//!
//! Utility module for the wallet.
//!
//! Re-exports formatting helpers used by the summary and the command line front end.
/// Money formatting for display
pub mod format;

pub use format::{format_signed_amount, format_usd};

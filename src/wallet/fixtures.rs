//! Demo ledger used when the wallet endpoint cannot be reached.
//!
//! The store never reads this module directly; callers pass the fallback ledger into
//! [`WalletStore::new`](crate::wallet::WalletStore::new), so tests can substitute any ledger.

use crate::wallet::types::{
	Role, Transaction, TransactionMetadata, TransactionStatus, TransactionType,
};

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

fn demo_date(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
	Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
		.single()
		.unwrap_or_default()
}

fn demo_entry(
	id: &str,
	transaction_type: TransactionType,
	amount: Decimal,
	description: &str,
	date: DateTime<Utc>,
	metadata: Option<TransactionMetadata>,
) -> Transaction {
	Transaction {
		id: id.to_string(),
		transaction_type,
		amount,
		description: description.to_string(),
		date,
		status: TransactionStatus::Completed,
		metadata,
	}
}

/// Six-entry demo history shared by both dashboards. Its balance is 484.50.
pub fn demo_transactions() -> Vec<Transaction> {
	vec![
		demo_entry(
			"1",
			TransactionType::Earning,
			Decimal::new(125, 0),
			"Payment from Tech Product Launch campaign",
			demo_date(2024, 1, 22, 10, 30),
			Some(TransactionMetadata::for_role(Role::Publisher).with_channel(Some("1".into()))),
		),
		demo_entry(
			"2",
			TransactionType::Earning,
			Decimal::new(72, 0),
			"Payment from Business Consulting campaign",
			demo_date(2024, 1, 20, 14, 15),
			Some(TransactionMetadata::for_role(Role::Publisher).with_channel(Some("2".into()))),
		),
		demo_entry(
			"3",
			TransactionType::AdSpend,
			Decimal::new(12750, 2),
			"Tech Product Launch campaign spend",
			demo_date(2024, 1, 20, 9, 45),
			Some(TransactionMetadata::for_role(Role::Advertiser).with_campaign(Some("1".into()))),
		),
		demo_entry(
			"4",
			TransactionType::AdSpend,
			Decimal::new(85, 0),
			"Business Consulting campaign spend",
			demo_date(2024, 1, 18, 16, 20),
			Some(TransactionMetadata::for_role(Role::Advertiser).with_campaign(Some("2".into()))),
		),
		demo_entry(
			"5",
			TransactionType::Deposit,
			Decimal::new(1000, 0),
			"Initial wallet funding",
			demo_date(2024, 1, 15, 8, 0),
			None,
		),
		demo_entry(
			"6",
			TransactionType::Withdrawal,
			Decimal::new(500, 0),
			"Withdrawal to bank account",
			demo_date(2024, 1, 18, 11, 30),
			None,
		),
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_demo_ledger_shape() {
		let ledger = demo_transactions();
		assert_eq!(ledger.len(), 6);
		assert!(ledger.iter().all(|tx| tx.amount > Decimal::ZERO));
		assert!(ledger.iter().all(|tx| tx.date.timestamp() > 0));
		assert_eq!(
			ledger[0].date.to_rfc3339(),
			"2024-01-22T10:30:00+00:00".to_string()
		);
	}
}

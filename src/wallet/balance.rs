//! Pure reductions over the unified ledger.

use crate::wallet::types::{Role, Transaction};

use rust_decimal::Decimal;

/// Compute the spendable balance of a ledger.
///
/// Only completed entries count: credits (deposit, earning, bonus, refund) add their amount and
/// debits (withdrawal, ad spend) subtract it. The result does not depend on ledger order, and an
/// empty ledger yields zero.
pub fn calculate_balance(transactions: &[Transaction]) -> Decimal {
	transactions
		.iter()
		.filter(|tx| tx.is_completed())
		.fold(Decimal::ZERO, |balance, tx| {
			balance + tx.transaction_type.sign() * tx.amount
		})
}

/// Entries visible to `role`, in ledger order.
pub fn filter_by_role(transactions: &[Transaction], role: Role) -> Vec<&Transaction> {
	transactions.iter().filter(|tx| tx.visible_to(role)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::wallet::fixtures::demo_transactions;
	use crate::wallet::types::{TransactionMetadata, TransactionStatus, TransactionType};

	fn entry(transaction_type: TransactionType, amount: Decimal, status: TransactionStatus) -> Transaction {
		Transaction::new(transaction_type, amount, "test entry", status)
	}

	#[test]
	fn test_empty_ledger_is_zero() {
		assert_eq!(calculate_balance(&[]), Decimal::ZERO);
	}

	#[test]
	fn test_pending_withdrawal_is_excluded() {
		let ledger = vec![
			entry(TransactionType::Deposit, Decimal::new(1000, 0), TransactionStatus::Completed),
			entry(TransactionType::AdSpend, Decimal::new(12750, 2), TransactionStatus::Completed),
			entry(TransactionType::Withdrawal, Decimal::new(500, 0), TransactionStatus::Pending),
		];

		assert_eq!(calculate_balance(&ledger), Decimal::new(87250, 2));
	}

	#[test]
	fn test_every_type_carries_its_sign() {
		let ledger = vec![
			entry(TransactionType::Deposit, Decimal::new(100, 0), TransactionStatus::Completed),
			entry(TransactionType::Earning, Decimal::new(50, 0), TransactionStatus::Completed),
			entry(TransactionType::Bonus, Decimal::new(5, 0), TransactionStatus::Completed),
			entry(TransactionType::Refund, Decimal::new(20, 0), TransactionStatus::Completed),
			entry(TransactionType::Withdrawal, Decimal::new(30, 0), TransactionStatus::Completed),
			entry(TransactionType::AdSpend, Decimal::new(45, 0), TransactionStatus::Completed),
			entry(TransactionType::Deposit, Decimal::new(999, 0), TransactionStatus::Failed),
			entry(TransactionType::AdSpend, Decimal::new(999, 0), TransactionStatus::Pending),
		];

		assert_eq!(calculate_balance(&ledger), Decimal::new(100, 0));
	}

	#[test]
	fn test_order_and_repetition_do_not_matter() {
		let mut ledger = demo_transactions();
		let first = calculate_balance(&ledger);
		assert_eq!(first, calculate_balance(&ledger));

		ledger.reverse();
		assert_eq!(first, calculate_balance(&ledger));
	}

	#[test]
	fn test_demo_ledger_balance() {
		assert_eq!(calculate_balance(&demo_transactions()), Decimal::new(48450, 2));
	}

	#[test]
	fn test_publisher_view_excludes_advertiser_entries() {
		let ledger = demo_transactions();
		let publisher = filter_by_role(&ledger, Role::Publisher);

		assert!(publisher.iter().all(|tx| tx.role() != Some(Role::Advertiser)));
		let untagged = ledger.iter().filter(|tx| tx.role().is_none()).count();
		assert_eq!(
			publisher.iter().filter(|tx| tx.role().is_none()).count(),
			untagged
		);
		assert_eq!(publisher.len(), 4);
		assert_eq!(publisher[0].id, "1");
	}

	#[test]
	fn test_role_view_keeps_ledger_order() {
		let ledger = vec![
			entry(TransactionType::Deposit, Decimal::TEN, TransactionStatus::Completed),
			entry(TransactionType::AdSpend, Decimal::ONE, TransactionStatus::Completed)
				.with_metadata(TransactionMetadata::for_role(Role::Advertiser)),
			entry(TransactionType::Earning, Decimal::ONE, TransactionStatus::Completed)
				.with_metadata(TransactionMetadata::for_role(Role::Publisher)),
		];

		let advertiser: Vec<_> = filter_by_role(&ledger, Role::Advertiser)
			.into_iter()
			.map(|tx| tx.transaction_type)
			.collect();
		assert_eq!(advertiser, vec![TransactionType::Deposit, TransactionType::AdSpend]);
	}
}

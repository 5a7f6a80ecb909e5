use crate::wallet::{Transaction, TransactionType};

use rust_decimal::Decimal;

/// Format an amount as dollars with two decimals, e.g. `$484.50` or `-$12.00`.
pub fn format_usd(amount: Decimal) -> String {
	let rounded = amount.round_dp(2);
	if rounded.is_sign_negative() && !rounded.is_zero() {
		format!("-${:.2}", rounded.abs())
	} else {
		format!("${:.2}", rounded.abs())
	}
}

/// Format a ledger entry's amount with the sign implied by its type, e.g. `+$125.00`.
pub fn format_signed_amount(transaction: &Transaction) -> String {
	let sign = match transaction.transaction_type {
		TransactionType::Unknown => "",
		kind if kind.is_credit() => "+",
		_ => "-",
	};
	format!("{}{}", sign, format_usd(transaction.amount))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::wallet::TransactionStatus;

	#[test]
	fn test_format_usd() {
		assert_eq!(format_usd(Decimal::new(48450, 2)), "$484.50");
		assert_eq!(format_usd(Decimal::new(1000, 0)), "$1000.00");
		assert_eq!(format_usd(Decimal::new(-12, 0)), "-$12.00");
		assert_eq!(format_usd(Decimal::new(12346, 3)), "$12.35");
		assert_eq!(format_usd(Decimal::ZERO), "$0.00");
	}

	#[test]
	fn test_format_signed_amount() {
		let earning = Transaction::new(
			TransactionType::Earning,
			Decimal::new(125, 0),
			"Payment",
			TransactionStatus::Completed,
		);
		let spend = Transaction::new(
			TransactionType::AdSpend,
			Decimal::new(8550, 2),
			"Spend",
			TransactionStatus::Completed,
		);
		assert_eq!(format_signed_amount(&earning), "+$125.00");
		assert_eq!(format_signed_amount(&spend), "-$85.50");
	}
}

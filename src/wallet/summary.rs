//! Ledger totals for dashboard stat tiles.

use crate::utils::format_usd;
use crate::wallet::types::{Transaction, TransactionStatus, TransactionType};

use rust_decimal::Decimal;

/// Totals over a ledger (or over a role view of it).
///
/// Settled totals only include completed entries; `pending_withdrawals` is the amount still
/// awaiting settlement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSummary {
    pub balance: Decimal,
    pub total_deposited: Decimal,
    pub total_spent: Decimal,
    pub total_earned: Decimal,
    pub total_refunded: Decimal,
    pub total_withdrawn: Decimal,
    pub pending_withdrawals: Decimal,
    pub transaction_count: usize,
}

impl LedgerSummary {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut summary = LedgerSummary::default();
        for tx in transactions {
            summary.transaction_count += 1;

            if tx.transaction_type == TransactionType::Withdrawal
                && tx.status == TransactionStatus::Pending
            {
                summary.pending_withdrawals += tx.amount;
            }
            if !tx.is_completed() {
                continue;
            }

            match tx.transaction_type {
                TransactionType::Deposit => summary.total_deposited += tx.amount,
                TransactionType::AdSpend => summary.total_spent += tx.amount,
                TransactionType::Earning | TransactionType::Bonus => {
                    summary.total_earned += tx.amount
                }
                TransactionType::Refund => summary.total_refunded += tx.amount,
                TransactionType::Withdrawal => summary.total_withdrawn += tx.amount,
                TransactionType::Unknown => {}
            }
            summary.balance += tx.signed_amount();
        }

        summary
    }

    /// Get a human-readable summary of the ledger
    pub fn summary(&self) -> String {
        format!(
            "Balance {} from {} transactions: deposited {}, spent {}, earned {}, refunded {}, withdrawn {}{}",
            format_usd(self.balance),
            self.transaction_count,
            format_usd(self.total_deposited),
            format_usd(self.total_spent),
            format_usd(self.total_earned),
            format_usd(self.total_refunded),
            format_usd(self.total_withdrawn),
            if self.pending_withdrawals.is_zero() {
                String::new()
            } else {
                format!(" ({} pending withdrawal)", format_usd(self.pending_withdrawals))
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::fixtures::demo_transactions;

    #[test]
    fn test_demo_summary() {
        let ledger = demo_transactions();
        let summary = LedgerSummary::from_transactions(&ledger);

        assert_eq!(summary.transaction_count, 6);
        assert_eq!(summary.total_deposited, Decimal::new(1000, 0));
        assert_eq!(summary.total_spent, Decimal::new(21250, 2));
        assert_eq!(summary.total_earned, Decimal::new(197, 0));
        assert_eq!(summary.total_withdrawn, Decimal::new(500, 0));
        assert_eq!(summary.balance, Decimal::new(48450, 2));
        assert!(summary.pending_withdrawals.is_zero());
        assert_eq!(
            summary.summary(),
            "Balance $484.50 from 6 transactions: deposited $1000.00, spent $212.50, earned $197.00, refunded $0.00, withdrawn $500.00"
        );
    }

    #[test]
    fn test_pending_withdrawal_is_reported_separately() {
        let mut ledger = demo_transactions();
        ledger.insert(
            0,
            Transaction::new(
                TransactionType::Withdrawal,
                Decimal::new(100, 0),
                "Withdrawal request",
                TransactionStatus::Pending,
            ),
        );

        let summary = LedgerSummary::from_transactions(&ledger);
        assert_eq!(summary.pending_withdrawals, Decimal::new(100, 0));
        assert_eq!(summary.total_withdrawn, Decimal::new(500, 0));
        assert_eq!(summary.balance, Decimal::new(48450, 2));
        assert!(summary.summary().ends_with("($100.00 pending withdrawal)"));
    }

    #[test]
    fn test_unknown_types_stay_out_of_totals() {
        let mut ledger = demo_transactions();
        let mut promo = Transaction::new(
            TransactionType::Deposit,
            Decimal::new(5, 0),
            "Launch promo",
            TransactionStatus::Completed,
        );
        promo.transaction_type = TransactionType::Unknown;
        ledger.insert(0, promo);

        let summary = LedgerSummary::from_transactions(&ledger);
        assert_eq!(summary.transaction_count, 7);
        assert_eq!(summary.total_deposited, Decimal::new(1000, 0));
        assert_eq!(summary.total_earned, Decimal::new(197, 0));
        assert_eq!(summary.total_refunded, Decimal::ZERO);
        assert_eq!(summary.balance, Decimal::new(48450, 2));
    }
}

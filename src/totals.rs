//! Footer totals derived from the transaction set.

use crate::money::Money;
use crate::record::{FieldValue, Record};
use crate::transaction::{Transaction, CREDIT, DEBIT};
use serde::{Deserialize, Serialize};

/// Highest transaction code counted as a credit under [`CreditPolicy::Range`].
pub const LAST_CREDIT_CODE: u8 = 57;

/// Which transaction codes count towards the credit total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditPolicy {
    /// Codes 50 through 57 (credit, dividends, pay, interest and the like).
    #[default]
    Range,
    /// Only code 50.
    Exact,
}

impl CreditPolicy {
    pub fn is_credit(&self, code: u8) -> bool {
        match self {
            CreditPolicy::Range => (CREDIT..=LAST_CREDIT_CODE).contains(&code),
            CreditPolicy::Exact => code == CREDIT,
        }
    }
}

/// Computed values of the file total record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterTotals {
    pub credit_total: Money,
    pub debit_total: Money,
    /// `|credit_total - debit_total|`, never negative.
    pub net_total: Money,
    /// All transactions, including ones that are neither credit nor debit.
    pub number_of_transactions: usize,
}

impl FooterTotals {
    /// The totals as named footer fields.
    pub fn to_record(&self) -> Record {
        let count = i64::try_from(self.number_of_transactions).unwrap_or(i64::MAX);
        Record::from([
            ("netTotal".to_string(), FieldValue::from(self.net_total)),
            ("creditTotal".to_string(), FieldValue::from(self.credit_total)),
            ("debitTotal".to_string(), FieldValue::from(self.debit_total)),
            ("numberOfTransactions".to_string(), FieldValue::from(count)),
        ])
    }
}

/// Sums credits and debits in a single pass.
pub fn compute_footer_totals(transactions: &[Transaction], policy: CreditPolicy) -> FooterTotals {
    let (credit_total, debit_total) = transactions.iter().fold(
        (Money::ZERO, Money::ZERO),
        |(credit, debit), tx| {
            if policy.is_credit(tx.transaction_code) {
                (credit + tx.amount, debit)
            } else if tx.transaction_code == DEBIT {
                (credit, debit + tx.amount)
            } else {
                (credit, debit)
            }
        },
    );

    FooterTotals {
        credit_total,
        debit_total,
        net_total: (credit_total - debit_total).abs(),
        number_of_transactions: transactions.len(),
    }
}

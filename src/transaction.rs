//! Transaction models for CSV input and detail record assembly.

use crate::error::{AbaError, Result};
use crate::money::Money;
use crate::record::{FieldValue, Record};
use crate::schema::TRANSACTION_TYPE;
use csv::{ReaderBuilder, Trim};
use log::debug;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::str::FromStr;

/// Transaction code of a plain credit.
pub const CREDIT: u8 = 50;

/// Transaction code of a debit.
pub const DEBIT: u8 = 13;

/// Transaction code of a payroll ("pay") credit.
pub const PAY: u8 = 53;

/// One payment in the file.
///
/// Field names follow the detail record schema, so custom schemas can refer
/// to them (and to anything in `extra`) by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The third party account BSB
    pub bsb: String,

    /// The third party account number
    pub account: String,

    /// Debit or credit, e.g. [`CREDIT`] or [`DEBIT`]
    pub transaction_code: u8,

    /// Amount in major units
    pub amount: Money,

    /// Recipient account name, up to 32 characters
    #[serde(default)]
    pub account_title: String,

    /// Payment reference, up to 18 characters
    #[serde(default)]
    pub reference: String,

    /// The transacting account BSB
    #[serde(default)]
    pub trace_bsb: String,

    /// The transacting account number
    #[serde(default)]
    pub trace_account: String,

    /// The transacting company name
    #[serde(default)]
    pub remitter: String,

    /// Withholding tax indicator: N, W, X or Y
    #[serde(default)]
    pub tax: Option<char>,

    /// Withholding tax amount
    #[serde(default)]
    pub tax_amount: Option<Money>,

    /// Record type code selecting the schema; "1" when absent
    #[serde(default)]
    pub transaction_type: Option<char>,

    /// Additional named values for custom schemas
    #[serde(flatten)]
    pub extra: Record,
}

impl Transaction {
    /// The record type code used to pick this transaction's schema.
    pub fn record_type(&self) -> char {
        self.transaction_type.unwrap_or(TRANSACTION_TYPE)
    }

    /// Builds the record handed to the line renderer.
    ///
    /// Payment defaults (`tax`, `taxAmount`, `transactionType`) are laid down
    /// first, then the transaction's own fields, then `extra`.
    pub fn to_record(&self) -> Record {
        let mut record = payment_defaults();

        let fields: [(&str, FieldValue); 9] = [
            ("bsb", self.bsb.as_str().into()),
            ("account", self.account.as_str().into()),
            ("transactionCode", self.transaction_code.into()),
            ("amount", self.amount.into()),
            ("accountTitle", self.account_title.as_str().into()),
            ("reference", self.reference.as_str().into()),
            ("traceBsb", self.trace_bsb.as_str().into()),
            ("traceAccount", self.trace_account.as_str().into()),
            ("remitter", self.remitter.as_str().into()),
        ];
        record.extend(fields.into_iter().map(|(k, v)| (k.to_string(), v)));

        if let Some(tax) = self.tax {
            record.insert("tax".to_string(), tax.into());
        }
        if let Some(tax_amount) = self.tax_amount {
            record.insert("taxAmount".to_string(), tax_amount.into());
        }
        if let Some(code) = self.transaction_type {
            record.insert("transactionType".to_string(), code.into());
        }

        record.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        record
    }
}

fn payment_defaults() -> Record {
    Record::from([
        ("tax".to_string(), FieldValue::from("")),
        ("taxAmount".to_string(), FieldValue::from(0i64)),
        ("transactionType".to_string(), FieldValue::from(TRANSACTION_TYPE)),
    ])
}

/// Raw transaction row as read from CSV.
///
/// Amounts stay text until [`TransactionRecord::parse`] so a bad value can be
/// reported with its row number.
#[derive(Debug, Deserialize)]
pub struct TransactionRecord {
    pub bsb: String,
    pub account: String,
    pub transaction_code: u8,
    pub amount: String,
    #[serde(default)]
    pub account_title: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub trace_bsb: String,
    #[serde(default)]
    pub trace_account: String,
    #[serde(default)]
    pub remitter: String,
    #[serde(default)]
    pub tax: Option<String>,
    #[serde(default)]
    pub tax_amount: Option<String>,
    #[serde(default)]
    pub transaction_type: Option<String>,
}

impl TransactionRecord {
    /// Converts the raw row into a [`Transaction`].
    pub fn parse(self, row: usize) -> Result<Transaction> {
        let amount = parse_money(&self.amount, "amount", row)?;
        let tax_amount = match non_empty(self.tax_amount) {
            Some(value) => Some(parse_money(&value, "tax_amount", row)?),
            None => None,
        };

        Ok(Transaction {
            bsb: self.bsb,
            account: self.account,
            transaction_code: self.transaction_code,
            amount,
            account_title: self.account_title,
            reference: self.reference,
            trace_bsb: self.trace_bsb,
            trace_account: self.trace_account,
            remitter: self.remitter,
            tax: first_char(non_empty(self.tax)),
            tax_amount,
            transaction_type: first_char(non_empty(self.transaction_type)),
            extra: Record::new(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn first_char(value: Option<String>) -> Option<char> {
    value.and_then(|s| s.trim().chars().next())
}

fn parse_money(value: &str, column: &str, row: usize) -> Result<Money> {
    Money::from_str(value).map_err(|e| AbaError::InvalidRecord {
        row,
        message: format!("{} '{}': {}", column, value, e),
    })
}

/// Reads transactions from CSV with a header row.
///
/// Fields are trimmed. A row that fails to parse aborts the read; silently
/// dropping a payment from a batch file is never acceptable.
pub fn read_transactions<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for (row_idx, result) in csv_reader.deserialize::<TransactionRecord>().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row
        let tx = result?.parse(row_num)?;
        debug!(
            "Row {}: code {} amount {} to {}",
            row_num, tx.transaction_code, tx.amount, tx.bsb
        );
        transactions.push(tx);
    }

    Ok(transactions)
}

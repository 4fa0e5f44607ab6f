//! ABA file generation.
//!
//! Builds the descriptive record, one detail record per transaction and the
//! file total record, each rendered through the schema registered for its
//! record type code, and joins them with CRLF.

use crate::config::{AbaConfig, FooterConfig};
use crate::error::{AbaError, Result};
use crate::line::render_line;
use crate::record::Record;
use crate::schema::SchemaSet;
use crate::totals::{compute_footer_totals, CreditPolicy};
use crate::transaction::Transaction;
use chrono::{Local, NaiveDate};
use log::debug;
use std::io::Write;

/// Line terminator between records. The last line has none.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Generates ABA files for a fixed configuration.
///
/// The header record (including its date) is resolved once at construction.
/// After that the generator is read-only, so one instance can serve any
/// number of `generate` calls, from any thread.
#[derive(Debug, Clone)]
pub struct AbaGenerator {
    /// Caller schemas over the built-in ones.
    schemas: SchemaSet,

    /// Fully resolved descriptive record.
    header: Record,

    /// Type code of the descriptive record.
    header_type: char,

    footer: FooterConfig,

    credit_policy: CreditPolicy,
}

impl AbaGenerator {
    /// Creates a generator, using the local current date when the header
    /// has none.
    pub fn new(config: AbaConfig) -> Self {
        Self::new_on(config, Local::now().date_naive())
    }

    /// Creates a generator with `today` as the fallback header date.
    pub fn new_on(config: AbaConfig, today: NaiveDate) -> Self {
        let AbaConfig {
            header,
            footer,
            schemas,
            credit_policy,
        } = config;

        AbaGenerator {
            schemas: SchemaSet::new(schemas),
            header: header.to_record(today),
            header_type: header.record_type,
            footer,
            credit_policy,
        }
    }

    /// Generates the file contents.
    ///
    /// # Errors
    ///
    /// [`AbaError::EmptyInput`] when `transactions` is empty, and schema
    /// errors from [`render_line`] or an unknown record type code.
    pub fn generate(&self, transactions: &[Transaction]) -> Result<String> {
        if transactions.is_empty() {
            return Err(AbaError::EmptyInput);
        }

        let mut lines = Vec::with_capacity(transactions.len() + 2);
        lines.push(self.format_header()?);
        for (idx, tx) in transactions.iter().enumerate() {
            let line = self.format_transaction(tx)?;
            debug!(
                "Transaction {}: type {} code {} amount {}",
                idx,
                tx.record_type(),
                tx.transaction_code,
                tx.amount
            );
            lines.push(line);
        }
        lines.push(self.format_footer(transactions)?);

        debug!("Generated ABA file with {} transactions", transactions.len());
        Ok(lines.join(LINE_TERMINATOR))
    }

    /// Generates the file and writes it to `writer`.
    pub fn write_output<W: Write>(&self, mut writer: W, transactions: &[Transaction]) -> Result<()> {
        let contents = self.generate(transactions)?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn format_header(&self) -> Result<String> {
        render_line(&self.header, self.schemas.get(self.header_type)?)
    }

    fn format_transaction(&self, tx: &Transaction) -> Result<String> {
        render_line(&tx.to_record(), self.schemas.get(tx.record_type())?)
    }

    fn format_footer(&self, transactions: &[Transaction]) -> Result<String> {
        let totals = compute_footer_totals(transactions, self.credit_policy);
        debug!(
            "Footer totals: credit {} debit {} net {} count {}",
            totals.credit_total,
            totals.debit_total,
            totals.net_total,
            totals.number_of_transactions
        );

        let record = self.footer.to_record(&totals);
        render_line(&record, self.schemas.get(self.footer.record_type)?)
    }
}

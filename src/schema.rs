//! Record schemas: which named field lands at which columns of a line.
//!
//! The three built-in schemas (header "0", detail "1", footer "7") describe
//! the standard 120-character ABA layout. Callers may register additional
//! schemas or replace built-in ones per record type code through a
//! [`SchemaSet`]; the built-in table itself is shared and never modified.

use crate::error::{AbaError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Record type code of the descriptive (header) record.
pub const HEADER_TYPE: char = '0';

/// Record type code of the detail (transaction) record.
pub const TRANSACTION_TYPE: char = '1';

/// Record type code of the file total (footer) record.
pub const FOOTER_TYPE: char = '7';

/// How a field value is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text, space padded.
    String,
    /// Whole number, zero padded on the left.
    Integer,
    /// Major-unit amount written as zero padded minor units.
    Money,
    /// Bank-State-Branch code normalized to `NNN-NNN`.
    Bsb,
}

/// Alignment of a `string` field.
///
/// Named after where the text sits: `Left` appends spaces, `Right` prepends
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    Left,
    #[default]
    Right,
}

/// A named field occupying the half-open column range `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub boundaries: [usize; 2],
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub padding: Padding,
}

impl FieldSpec {
    /// Creates a right-aligned field.
    pub fn new(name: &str, start: usize, end: usize, field_type: FieldType) -> Self {
        FieldSpec {
            name: name.to_string(),
            boundaries: [start, end],
            field_type,
            padding: Padding::Right,
        }
    }

    /// Creates a left-aligned field.
    pub fn left(name: &str, start: usize, end: usize, field_type: FieldType) -> Self {
        FieldSpec {
            padding: Padding::Left,
            ..FieldSpec::new(name, start, end, field_type)
        }
    }

    pub fn start(&self) -> usize {
        self.boundaries[0]
    }

    pub fn end(&self) -> usize {
        self.boundaries[1]
    }

    /// Number of characters the field occupies. Zero for inverted boundaries.
    pub fn width(&self) -> usize {
        self.end().saturating_sub(self.start())
    }
}

/// Which part of the file a schema renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Header,
    Transaction,
    Footer,
}

/// An ordered list of fields making up one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSchema {
    pub record_type: RecordKind,
    pub fields: Vec<FieldSpec>,
}

impl RecordSchema {
    pub fn new(record_type: RecordKind, fields: Vec<FieldSpec>) -> Self {
        RecordSchema {
            record_type,
            fields,
        }
    }

    /// Length of a line rendered with this schema: the end of its last field.
    pub fn width(&self) -> usize {
        self.fields.last().map(FieldSpec::end).unwrap_or(0)
    }
}

fn header_schema() -> RecordSchema {
    use FieldType::*;
    RecordSchema::new(
        RecordKind::Header,
        vec![
            FieldSpec::new("type", 0, 1, String),
            FieldSpec::new("bsb", 1, 8, Bsb),
            FieldSpec::new("account", 8, 17, String),
            FieldSpec::new("sequenceNumber", 18, 20, Integer),
            FieldSpec::new("bank", 20, 23, String),
            FieldSpec::left("user", 30, 56, String),
            FieldSpec::new("userNumber", 56, 62, Integer),
            FieldSpec::left("description", 62, 74, String),
            FieldSpec::new("date", 74, 80, String),
            FieldSpec::new("time", 80, 84, String),
            FieldSpec::new("filler", 84, 120, String),
        ],
    )
}

fn transaction_schema() -> RecordSchema {
    use FieldType::*;
    RecordSchema::new(
        RecordKind::Transaction,
        vec![
            FieldSpec::new("transactionType", 0, 1, String),
            FieldSpec::new("bsb", 1, 8, Bsb),
            FieldSpec::new("account", 8, 17, String),
            FieldSpec::new("tax", 17, 18, String),
            FieldSpec::new("transactionCode", 18, 20, Integer),
            FieldSpec::new("amount", 20, 30, Money),
            FieldSpec::left("accountTitle", 30, 62, String),
            FieldSpec::left("reference", 62, 80, String),
            FieldSpec::new("traceBsb", 80, 87, Bsb),
            FieldSpec::new("traceAccount", 87, 96, String),
            FieldSpec::left("remitter", 96, 112, String),
            FieldSpec::new("taxAmount", 112, 120, Money),
        ],
    )
}

fn footer_schema() -> RecordSchema {
    use FieldType::*;
    RecordSchema::new(
        RecordKind::Footer,
        vec![
            FieldSpec::new("type", 0, 1, String),
            FieldSpec::new("bsb", 1, 8, Bsb),
            FieldSpec::new("netTotal", 20, 30, Money),
            FieldSpec::new("creditTotal", 30, 40, Money),
            FieldSpec::new("debitTotal", 40, 50, Money),
            FieldSpec::new("numberOfTransactions", 74, 80, Integer),
            FieldSpec::new("filler", 80, 120, String),
        ],
    )
}

/// The built-in schema table, built once per process.
pub fn default_schemas() -> &'static BTreeMap<char, RecordSchema> {
    static DEFAULTS: OnceLock<BTreeMap<char, RecordSchema>> = OnceLock::new();
    DEFAULTS.get_or_init(|| {
        BTreeMap::from([
            (HEADER_TYPE, header_schema()),
            (TRANSACTION_TYPE, transaction_schema()),
            (FOOTER_TYPE, footer_schema()),
        ])
    })
}

/// Caller schemas layered over the built-in table.
///
/// Lookups try the caller's schemas first, then the defaults, so a caller
/// replacing "1" still gets the stock "0" and "7".
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    overrides: BTreeMap<char, RecordSchema>,
}

impl SchemaSet {
    pub fn new(overrides: BTreeMap<char, RecordSchema>) -> Self {
        SchemaSet { overrides }
    }

    /// Returns the schema for a record type code.
    pub fn get(&self, code: char) -> Result<&RecordSchema> {
        self.overrides
            .get(&code)
            .or_else(|| default_schemas().get(&code))
            .ok_or(AbaError::UnknownRecordType(code))
    }
}

//! # ABA Generator
//!
//! Generates Australian Bankers' Association (ABA) direct entry files: fixed
//! width, CRLF separated, 120 characters per line.
//!
//! ## Design Principles
//!
//! - **Schema driven**: every line is rendered from a list of named fields
//!   with column boundaries; callers can register their own schemas
//! - **Permissive values**: field values are coerced and truncated, never
//!   rejected, so a file always comes out with fixed-width lines
//! - **Fixed-point money**: amounts use `rust_decimal` and are written as cents
//! - **Pure**: a generator is immutable after construction
//!
//! ## Example
//!
//! ```
//! use aba_generator::{AbaConfig, AbaGenerator, HeaderConfig, Transaction, CREDIT};
//! use std::str::FromStr;
//!
//! let config = AbaConfig {
//!     header: HeaderConfig {
//!         bank: "ANZ".to_string(),
//!         user: "Company".to_string(),
//!         user_number: 1337,
//!         description: "Creditors".to_string(),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//! let payment = Transaction {
//!     bsb: "013-999".to_string(),
//!     account: "123456".to_string(),
//!     transaction_code: CREDIT,
//!     amount: aba_generator::Money::from_str("1337.42").unwrap(),
//!     account_title: "French Coffee".to_string(),
//!     ..Default::default()
//! };
//!
//! let file = AbaGenerator::new(config).generate(&[payment]).unwrap();
//! assert!(file.split("\r\n").all(|line| line.len() == 120));
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod generator;
pub mod line;
pub mod money;
pub mod record;
pub mod schema;
pub mod totals;
pub mod transaction;

pub use config::{AbaConfig, FooterConfig, HeaderConfig, HeaderDate, HeaderTime};
pub use error::{AbaError, Result};
pub use generator::AbaGenerator;
pub use money::Money;
pub use record::{FieldValue, Record};
pub use schema::{FieldSpec, FieldType, Padding, RecordKind, RecordSchema, SchemaSet};
pub use totals::{compute_footer_totals, CreditPolicy, FooterTotals};
pub use transaction::{read_transactions, Transaction, TransactionRecord, CREDIT, DEBIT, PAY};

//! Generator configuration: header and footer data, custom schemas and the
//! credit classification policy.
//!
//! The whole configuration deserializes from JSON with camelCase keys:
//!
//! ```json
//! {
//!   "header": { "bank": "ANZ", "user": "Company", "userNumber": 1337, "description": "Creditors" },
//!   "footer": {},
//!   "schemas": {},
//!   "creditPolicy": "range"
//! }
//! ```

use crate::error::Result;
use crate::money::Money;
use crate::record::{FieldValue, Record};
use crate::schema::{RecordSchema, FOOTER_TYPE, HEADER_TYPE};
use crate::totals::{CreditPolicy, FooterTotals};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

/// Top-level configuration of an [`AbaGenerator`](crate::AbaGenerator).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AbaConfig {
    pub header: HeaderConfig,
    pub footer: FooterConfig,
    /// Schemas by record type code, layered over the built-in ones.
    pub schemas: BTreeMap<char, RecordSchema>,
    pub credit_policy: CreditPolicy,
}

impl AbaConfig {
    /// Parses a JSON configuration.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Date to be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderDate {
    /// Milliseconds since the Unix epoch, read in local time.
    Timestamp(i64),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    /// Already formatted `DDMMYY`.
    Literal(String),
}

impl HeaderDate {
    fn date(&self) -> Option<NaiveDate> {
        match self {
            HeaderDate::Timestamp(ms) => local_from_millis(*ms).map(|dt| dt.date()),
            HeaderDate::DateTime(dt) => Some(dt.date()),
            HeaderDate::Date(d) => Some(*d),
            HeaderDate::Literal(_) => None,
        }
    }
}

/// Time to be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderTime {
    /// Milliseconds since the Unix epoch, read in local time.
    Timestamp(i64),
    DateTime(NaiveDateTime),
    /// Already formatted `HHmm`.
    Literal(String),
}

impl HeaderTime {
    fn date_time(&self) -> Option<NaiveDateTime> {
        match self {
            HeaderTime::Timestamp(ms) => local_from_millis(*ms),
            HeaderTime::DateTime(dt) => Some(*dt),
            HeaderTime::Literal(_) => None,
        }
    }
}

fn local_from_millis(ms: i64) -> Option<NaiveDateTime> {
    let stamp = DateTime::from_timestamp_millis(ms).map(|dt| dt.with_timezone(&Local).naive_local());
    if stamp.is_none() {
        warn!("Header timestamp {} is out of range, ignoring it", ms);
    }
    stamp
}

/// Descriptive record data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderConfig {
    /// Record type code, also selects the header schema
    #[serde(rename = "type")]
    pub record_type: char,

    /// Main account BSB, usually left blank
    pub bsb: String,

    /// Main account number, usually left blank
    pub account: String,

    pub sequence_number: u32,

    /// Three letter code of the processing institution, like "ANZ" or "WBC"
    pub bank: String,

    /// How the user is shown on the recipients' statements
    pub user: String,

    /// APCA number of the user supplying the file
    pub user_number: u32,

    /// Description of the file entries, up to 12 characters
    pub description: String,

    /// Defaults to the current date
    pub date: Option<HeaderDate>,

    /// Left blank unless given
    pub time: Option<HeaderTime>,

    /// Additional named values for custom schemas
    #[serde(flatten)]
    pub extra: Record,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        HeaderConfig {
            record_type: HEADER_TYPE,
            bsb: String::new(),
            account: String::new(),
            sequence_number: 1,
            bank: String::new(),
            user: String::new(),
            user_number: 0,
            description: String::new(),
            date: None,
            time: None,
            extra: Record::new(),
        }
    }
}

impl HeaderConfig {
    /// Builds the header record, resolving date and time against `today`.
    pub fn to_record(&self, today: NaiveDate) -> Record {
        let (date, time) = resolve_stamp(self.date.as_ref(), self.time.as_ref(), today);

        let mut record = Record::from([
            ("type".to_string(), FieldValue::from(self.record_type)),
            ("bsb".to_string(), FieldValue::from(self.bsb.as_str())),
            ("account".to_string(), FieldValue::from(self.account.as_str())),
            ("sequenceNumber".to_string(), FieldValue::from(self.sequence_number)),
            ("bank".to_string(), FieldValue::from(self.bank.as_str())),
            ("user".to_string(), FieldValue::from(self.user.as_str())),
            ("userNumber".to_string(), FieldValue::from(self.user_number)),
            ("description".to_string(), FieldValue::from(self.description.as_str())),
            ("date".to_string(), FieldValue::from(date)),
            ("time".to_string(), FieldValue::from(time)),
        ]);
        record.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        record
    }
}

/// File total record overrides. Unset totals are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterConfig {
    /// Record type code, also selects the footer schema
    #[serde(rename = "type")]
    pub record_type: char,

    pub bsb: String,
    pub net_total: Option<Money>,
    pub credit_total: Option<Money>,
    pub debit_total: Option<Money>,
    pub number_of_transactions: Option<u32>,

    /// Additional named values for custom schemas
    #[serde(flatten)]
    pub extra: Record,
}

impl Default for FooterConfig {
    fn default() -> Self {
        FooterConfig {
            record_type: FOOTER_TYPE,
            bsb: "999999".to_string(),
            net_total: None,
            credit_total: None,
            debit_total: None,
            number_of_transactions: None,
            extra: Record::new(),
        }
    }
}

impl FooterConfig {
    /// Builds the footer record: computed totals first, then every value
    /// set here.
    pub fn to_record(&self, totals: &FooterTotals) -> Record {
        let mut record = totals.to_record();
        record.insert("type".to_string(), self.record_type.into());
        record.insert("bsb".to_string(), self.bsb.as_str().into());

        let overrides = [
            ("netTotal", self.net_total.map(FieldValue::from)),
            ("creditTotal", self.credit_total.map(FieldValue::from)),
            ("debitTotal", self.debit_total.map(FieldValue::from)),
            (
                "numberOfTransactions",
                self.number_of_transactions.map(FieldValue::from),
            ),
        ];
        for (name, value) in overrides {
            if let Some(value) = value {
                record.insert(name.to_string(), value);
            }
        }

        record.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        record
    }
}

/// Resolves the header `DDMMYY` date and `HHmm` time.
///
/// A date-time given as the time is also the basis for the date. A six
/// character date literal and a four character time literal are used as is.
/// Without a time the time field stays blank.
fn resolve_stamp(
    date: Option<&HeaderDate>,
    time: Option<&HeaderTime>,
    today: NaiveDate,
) -> (String, String) {
    let time_basis = time.and_then(HeaderTime::date_time);
    let basis = time_basis
        .map(|dt| dt.date())
        .or_else(|| date.and_then(HeaderDate::date))
        .unwrap_or(today);

    let date = match date {
        Some(HeaderDate::Literal(s)) if s.chars().count() == 6 => s.clone(),
        Some(HeaderDate::Literal(s)) => {
            warn!("Header date '{}' is not DDMMYY, using {}", s, basis);
            basis.format("%d%m%y").to_string()
        }
        _ => basis.format("%d%m%y").to_string(),
    };

    let time = match time {
        Some(HeaderTime::Literal(s)) if s.chars().count() == 4 => s.clone(),
        Some(HeaderTime::Literal(s)) if s.is_empty() => String::new(),
        Some(HeaderTime::Literal(s)) => {
            warn!("Header time '{}' is not HHmm, leaving it blank", s);
            String::new()
        }
        Some(_) => time_basis
            .map(|dt| dt.format("%H%M").to_string())
            .unwrap_or_default(),
        None => String::new(),
    };

    (date, time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, min, 0).unwrap())
    }

    #[test]
    fn test_stamp_defaults_to_today_without_time() {
        assert_eq!(
            resolve_stamp(None, None, today()),
            ("090326".to_string(), String::new())
        );
    }

    #[test]
    fn test_stamp_date_only_leaves_time_blank() {
        let date = HeaderDate::Date(NaiveDate::from_ymd_opt(2007, 6, 18).unwrap());
        assert_eq!(
            resolve_stamp(Some(&date), None, today()),
            ("180607".to_string(), String::new())
        );
    }

    #[test]
    fn test_stamp_time_sets_both() {
        let time = HeaderTime::DateTime(at(2014, 7, 5, 0, 8));
        let date = HeaderDate::Date(NaiveDate::from_ymd_opt(2007, 6, 18).unwrap());
        assert_eq!(
            resolve_stamp(Some(&date), Some(&time), today()),
            ("050714".to_string(), "0008".to_string())
        );
    }

    #[test]
    fn test_stamp_literals() {
        let date = HeaderDate::Literal("311299".to_string());
        let time = HeaderTime::Literal("2359".to_string());
        assert_eq!(
            resolve_stamp(Some(&date), Some(&time), today()),
            ("311299".to_string(), "2359".to_string())
        );

        let bad_date = HeaderDate::Literal("1999-12-31".to_string());
        let bad_time = HeaderTime::Literal("23:59:00".to_string());
        assert_eq!(
            resolve_stamp(Some(&bad_date), Some(&bad_time), today()),
            ("090326".to_string(), String::new())
        );
    }

    #[test]
    fn test_header_defaults() {
        let header = HeaderConfig::default();
        let record = header.to_record(today());
        assert_eq!(record["type"], FieldValue::from('0'));
        assert_eq!(record["sequenceNumber"], FieldValue::from(1u32));
        assert_eq!(record["date"], FieldValue::from("090326"));
        assert_eq!(record["time"], FieldValue::from(""));
    }

    #[test]
    fn test_footer_overrides_win_over_totals() {
        let totals = FooterTotals {
            credit_total: Money::from_minor_units(500),
            debit_total: Money::from_minor_units(200),
            net_total: Money::from_minor_units(300),
            number_of_transactions: 2,
        };
        let footer = FooterConfig {
            net_total: Some(Money::from_minor_units(1)),
            number_of_transactions: Some(9),
            ..Default::default()
        };

        let record = footer.to_record(&totals);
        assert_eq!(record["netTotal"], FieldValue::from(Money::from_minor_units(1)));
        assert_eq!(record["creditTotal"], FieldValue::from(Money::from_minor_units(500)));
        assert_eq!(record["numberOfTransactions"], FieldValue::from(9u32));
        assert_eq!(record["bsb"], FieldValue::from("999999"));
        assert_eq!(record["type"], FieldValue::from('7'));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "header": {
                "bank": "ANZ",
                "user": "Company",
                "userNumber": 1337,
                "description": "Creditors",
                "time": "2014-07-05T00:08:00"
            },
            "footer": { "bsb": "000000" },
            "creditPolicy": "exact",
            "schemas": {
                "2": {
                    "recordType": "transaction",
                    "fields": [
                        { "name": "transactionType", "boundaries": [0, 1], "type": "string" }
                    ]
                }
            }
        }"#;

        let config = AbaConfig::from_json(json).unwrap();
        assert_eq!(config.header.bank, "ANZ");
        assert_eq!(config.header.user_number, 1337);
        assert_eq!(config.header.record_type, '0');
        assert_eq!(config.header.sequence_number, 1);
        assert_eq!(config.header.time, Some(HeaderTime::DateTime(at(2014, 7, 5, 0, 8))));
        assert_eq!(config.footer.bsb, "000000");
        assert_eq!(config.footer.record_type, '7');
        assert_eq!(config.credit_policy, CreditPolicy::Exact);
        assert!(config.schemas.contains_key(&'2'));
    }

    #[test]
    fn test_header_date_forms() {
        let d: HeaderDate = serde_json::from_str("\"2007-06-18\"").unwrap();
        assert_eq!(d, HeaderDate::Date(NaiveDate::from_ymd_opt(2007, 6, 18).unwrap()));

        let d: HeaderDate = serde_json::from_str("\"180607\"").unwrap();
        assert_eq!(d, HeaderDate::Literal("180607".to_string()));
    }

    #[test]
    fn test_epoch_millis_forms() {
        let d: HeaderDate = serde_json::from_str("1404518880000").unwrap();
        assert_eq!(d, HeaderDate::Timestamp(1404518880000));

        let t: HeaderTime = serde_json::from_str("1404518880000").unwrap();
        assert_eq!(t, HeaderTime::Timestamp(1404518880000));
    }

    #[test]
    fn test_stamp_from_epoch_millis() {
        let ms = 1404518880000;
        let local = DateTime::from_timestamp_millis(ms)
            .unwrap()
            .with_timezone(&Local)
            .naive_local();

        let (date, time) = resolve_stamp(None, Some(&HeaderTime::Timestamp(ms)), today());
        assert_eq!(date, local.format("%d%m%y").to_string());
        assert_eq!(time, local.format("%H%M").to_string());

        let (date, time) = resolve_stamp(Some(&HeaderDate::Timestamp(ms)), None, today());
        assert_eq!(date, local.format("%d%m%y").to_string());
        assert_eq!(time, "");
    }

    #[test]
    fn test_stamp_out_of_range_millis_falls_back() {
        let (date, time) = resolve_stamp(
            Some(&HeaderDate::Timestamp(i64::MAX)),
            Some(&HeaderTime::Timestamp(i64::MIN)),
            today(),
        );
        assert_eq!(date, "090326");
        assert_eq!(time, "");
    }
}

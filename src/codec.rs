//! Field codecs: render one value into a fixed-width slice of a line.
//!
//! Codecs never fail. Missing or blank values render as the type's empty
//! form, oversized values are cut to the field width and non-numeric money is
//! treated as zero.

use crate::money::Money;
use crate::record::FieldValue;
use crate::schema::{FieldSpec, FieldType, Padding};
use log::warn;
use std::iter;
use std::str::FromStr;

/// Renders `value` into exactly `field.width()` characters.
///
/// Blank values (see [`FieldValue::is_blank`]) are handled like missing ones.
pub fn render_field(value: Option<&FieldValue>, field: &FieldSpec) -> String {
    let width = field.width();
    let value = value.filter(|v| !v.is_blank());

    match field.field_type {
        FieldType::Money => {
            let cents = value
                .map(|v| money_value(v, field))
                .unwrap_or(Money::ZERO)
                .minor_units()
                .to_string();
            keep_last(&pad_start(&cents, width, '0'), width)
        }
        FieldType::Integer => {
            let text = text_value(value);
            keep_last(&pad_start(&text, width, '0'), width)
        }
        FieldType::String => {
            let text = text_value(value);
            match field.padding {
                Padding::Left => keep_first(&pad_end(&text, width, ' '), width),
                Padding::Right => keep_first(&pad_start(&text, width, ' '), width),
            }
        }
        FieldType::Bsb => {
            let bsb = format_bsb(&text_value(value));
            keep_first(&pad_start(&bsb, width, ' '), width)
        }
    }
}

/// Normalizes a BSB to `NNN-NNN`.
///
/// Drops the first run of whitespace or hyphens, trims the ends and inserts a
/// hyphen after the third character. Characters past the sixth are dropped.
/// Inputs shorter than six characters are returned without a hyphen.
///
/// ```
/// use aba_generator::codec::format_bsb;
///
/// assert_eq!(format_bsb("061021"), "061-021");
/// assert_eq!(format_bsb("013 - 999"), "013-999");
/// assert_eq!(format_bsb(""), "");
/// ```
pub fn format_bsb(input: &str) -> String {
    let value = remove_first_separator_run(input);
    let chars: Vec<char> = value.trim().chars().collect();

    if chars.len() < 6 {
        return chars.into_iter().collect();
    }

    let mut bsb = String::with_capacity(7);
    bsb.extend(&chars[..3]);
    bsb.push('-');
    bsb.extend(&chars[3..6]);
    bsb
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-'
}

fn remove_first_separator_run(input: &str) -> String {
    let Some(start) = input.find(is_separator) else {
        return input.to_string();
    };
    let rest = &input[start..];
    let end = rest.find(|c: char| !is_separator(c)).unwrap_or(rest.len());

    let mut out = String::with_capacity(input.len());
    out.push_str(&input[..start]);
    out.push_str(&rest[end..]);
    out
}

fn text_value(value: Option<&FieldValue>) -> String {
    value.map(FieldValue::to_string).unwrap_or_default()
}

fn money_value(value: &FieldValue, field: &FieldSpec) -> Money {
    match value {
        FieldValue::Money(m) => *m,
        FieldValue::Integer(n) => Money::from(*n),
        FieldValue::Text(s) => Money::from_str(s).unwrap_or_else(|_| {
            warn!(
                "Field '{}': '{}' is not a number, writing zero",
                field.name, s
            );
            Money::ZERO
        }),
    }
}

fn pad_start(s: &str, width: usize, fill: char) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    iter::repeat(fill).take(width - len).chain(s.chars()).collect()
}

fn pad_end(s: &str, width: usize, fill: char) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    s.chars().chain(iter::repeat(fill).take(width - len)).collect()
}

fn keep_first(s: &str, width: usize) -> String {
    s.chars().take(width).collect()
}

/// Keeps the last `width` characters, dropping the most significant digits.
fn keep_last(s: &str, width: usize) -> String {
    let len = s.chars().count();
    s.chars().skip(len.saturating_sub(width)).collect()
}

//! Renders a record into one fixed-width line following a schema.

use crate::codec::render_field;
use crate::error::{AbaError, Result};
use crate::record::Record;
use crate::schema::RecordSchema;
use std::iter;

/// Renders `record` with `schema`.
///
/// Columns between fields are filled with spaces. The line ends where the
/// last field ends; schemas that need a fixed total width declare a trailing
/// filler field.
///
/// # Errors
///
/// Returns [`AbaError::SchemaOrder`] when a field starts before the previous
/// field ended, and [`AbaError::InvalidBoundaries`] when a field ends before
/// it starts.
pub fn render_line(record: &Record, schema: &RecordSchema) -> Result<String> {
    let mut line = String::with_capacity(schema.width());
    let mut cursor = 0;

    for field in &schema.fields {
        let (start, end) = (field.start(), field.end());
        if start < cursor {
            return Err(AbaError::SchemaOrder {
                field: field.name.clone(),
                start,
                cursor,
            });
        }
        if end < start {
            return Err(AbaError::InvalidBoundaries {
                field: field.name.clone(),
                start,
                end,
            });
        }

        line.extend(iter::repeat(' ').take(start - cursor));
        line.push_str(&render_field(record.get(&field.name), field));
        cursor = end;
    }

    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldValue;
    use crate::schema::{FieldSpec, FieldType, RecordKind};

    fn record(pairs: &[(&str, FieldValue)]) -> Record {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn test_gaps_are_filled_with_spaces() {
        let schema = RecordSchema::new(
            RecordKind::Transaction,
            vec![
                FieldSpec::new("a", 0, 1, FieldType::String),
                FieldSpec::new("b", 4, 6, FieldType::Integer),
                FieldSpec::left("c", 8, 12, FieldType::String),
            ],
        );
        let rec = record(&[
            ("a", FieldValue::from("X")),
            ("b", FieldValue::from(7i64)),
            ("c", FieldValue::from("ab")),
        ]);

        assert_eq!(render_line(&rec, &schema).unwrap(), "X   07  ab  ");
    }

    #[test]
    fn test_missing_fields_render_blank() {
        let schema = RecordSchema::new(
            RecordKind::Footer,
            vec![
                FieldSpec::new("type", 0, 1, FieldType::String),
                FieldSpec::new("count", 1, 4, FieldType::Integer),
                FieldSpec::new("filler", 4, 10, FieldType::String),
            ],
        );
        let rec = record(&[("type", FieldValue::from("7"))]);

        assert_eq!(render_line(&rec, &schema).unwrap(), "7000      ");
    }

    #[test]
    fn test_line_stops_at_last_field() {
        let schema = RecordSchema::new(
            RecordKind::Header,
            vec![FieldSpec::new("type", 2, 3, FieldType::String)],
        );
        let rec = record(&[("type", FieldValue::from("0"))]);

        assert_eq!(render_line(&rec, &schema).unwrap(), "  0");
    }

    #[test]
    fn test_backward_field_is_rejected() {
        let schema = RecordSchema::new(
            RecordKind::Transaction,
            vec![
                FieldSpec::new("a", 0, 10, FieldType::String),
                FieldSpec::new("b", 5, 12, FieldType::String),
            ],
        );

        match render_line(&Record::new(), &schema) {
            Err(AbaError::SchemaOrder {
                field,
                start,
                cursor,
            }) => {
                assert_eq!(field, "b");
                assert_eq!(start, 5);
                assert_eq!(cursor, 10);
            }
            other => panic!("Expected SchemaOrder, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_boundaries_are_rejected() {
        let schema = RecordSchema::new(
            RecordKind::Transaction,
            vec![FieldSpec::new("a", 6, 2, FieldType::String)],
        );

        assert!(matches!(
            render_line(&Record::new(), &schema),
            Err(AbaError::InvalidBoundaries { .. })
        ));
    }

    #[test]
    fn test_adjacent_fields_are_allowed() {
        let schema = RecordSchema::new(
            RecordKind::Transaction,
            vec![
                FieldSpec::new("a", 0, 2, FieldType::Integer),
                FieldSpec::new("b", 2, 4, FieldType::Integer),
            ],
        );
        let rec = record(&[("a", FieldValue::from(1i64)), ("b", FieldValue::from(2i64))]);

        assert_eq!(render_line(&rec, &schema).unwrap(), "0102");
    }
}

//! Snowflake type text to unified type mapping.
//!
//! Covers the semi-structured and geospatial types the information_schema
//! reports (VARIANT, OBJECT, ARRAY, GEOGRAPHY) alongside the usual scalar
//! families. Unrecognized type text maps to `Custom` rather than failing.

use crate::models::ColumnType;

/// Maps raw Snowflake type text (e.g. "NUMBER(38,0)") to the unified type.
pub fn map_snowflake_type(raw: &str) -> ColumnType {
    let upper = raw.trim().to_uppercase();
    let (base, args) = match upper.split_once('(') {
        Some((base, rest)) => (base.trim(), Some(rest.trim_end_matches(')'))),
        None => (upper.as_str(), None),
    };

    match base {
        "NUMBER" | "DECIMAL" | "NUMERIC" | "INT" | "INTEGER" | "BIGINT" | "SMALLINT"
        | "TINYINT" | "BYTEINT" => {
            let (precision, scale) = parse_precision_scale(args);
            ColumnType::Number { precision, scale }
        }
        "FLOAT" | "FLOAT4" | "FLOAT8" | "DOUBLE" | "DOUBLE PRECISION" | "REAL" => {
            ColumnType::Float
        }
        "VARCHAR" | "TEXT" | "STRING" | "CHAR" | "CHARACTER" => ColumnType::String {
            max_length: args.and_then(|a| a.parse().ok()),
        },
        "BOOLEAN" => ColumnType::Boolean,
        "DATE" => ColumnType::Date,
        "TIME" => ColumnType::Time,
        "DATETIME" | "TIMESTAMP" | "TIMESTAMP_NTZ" => ColumnType::DateTime {
            with_timezone: false,
        },
        "TIMESTAMP_LTZ" | "TIMESTAMP_TZ" => ColumnType::DateTime {
            with_timezone: true,
        },
        "BINARY" | "VARBINARY" => ColumnType::Binary,
        "VARIANT" => ColumnType::Variant,
        "ARRAY" => ColumnType::Array,
        "OBJECT" => ColumnType::Object,
        "GEOGRAPHY" => ColumnType::Geography,
        _ => ColumnType::Custom {
            type_name: upper.clone(),
        },
    }
}

fn parse_precision_scale(args: Option<&str>) -> (Option<u8>, Option<u8>) {
    let Some(args) = args else {
        return (None, None);
    };
    let mut parts = args.split(',').map(str::trim);
    let precision = parts.next().and_then(|p| p.parse().ok());
    let scale = parts.next().and_then(|s| s.parse().ok());
    (precision, scale)
}

//! Serde support and parsing for monetary amounts.
//!
//! The data service delivers amounts either as JSON numbers or as decimal
//! strings ("1234.56", "1.234,56"). Both forms normalize to an `f64` with
//! fixed two-decimal-place semantics.

use serde::{Deserialize, Deserializer, Serializer};

use crate::{round_to_cents, ParseError};

/// Parse a decimal amount string into a two-decimal `f64`.
///
/// Accepts `.` or `,` as the decimal separator; when both appear, the last
/// one wins and the other is treated as a grouping separator. An optional
/// leading currency symbol (`$`, `R$`) is ignored.
pub fn parse_amount(raw: &str) -> Result<f64, ParseError> {
    let trimmed = raw.trim().trim_start_matches("R$").trim_start_matches('$').trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidAmount(raw.to_string()));
    }

    let last_dot = trimmed.rfind('.');
    let last_comma = trimmed.rfind(',');
    let normalized = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => {
            if dot > comma {
                trimmed.replace(',', "")
            } else {
                trimmed.replace('.', "").replace(',', ".")
            }
        }
        (None, Some(_)) => trimmed.replace(',', "."),
        _ => trimmed.to_string(),
    };

    normalized
        .parse::<f64>()
        .map(round_to_cents)
        .map_err(|_| ParseError::InvalidAmount(raw.to_string()))
}

pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(round_to_cents(*value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(round_to_cents(n)),
        Raw::Text(s) => parse_amount(&s).map_err(serde::de::Error::custom),
    }
}

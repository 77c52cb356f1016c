//! Line-oriented catalog record codec.
//!
//! One toy per line, fields separated by `;`:
//!
//! ```text
//! serial;name;brand;price;availableCount;minimumAge;<variant fields>
//! ```
//!
//! | Variant   | Suffix                              |
//! |-----------|-------------------------------------|
//! | Figure    | `classification`                    |
//! | Animal    | `material;size`                     |
//! | Puzzle    | `puzzleType`                        |
//! | BoardGame | `min-max;designer1, designer2, ...` |
//!
//! There is no escaping: free-text fields that contain `;` (or `,` inside a
//! designer name) are rejected by validation instead.

use core::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;
use toystore_core::{DomainError, DomainResult};

use crate::serial::{SerialNumber, ToyKind};
use crate::toy::{PlayerRange, Toy, ToyDetails, ToyDraft};

pub const FIELD_DELIMITER: char = ';';
pub const PLAYER_RANGE_SEPARATOR: char = '-';
pub const DESIGNER_SEPARATOR: &str = ", ";

/// Fields shared by every variant.
const COMMON_FIELDS: usize = 6;

/// A catalog line that could not be turned into an inventory entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("line {line}: {error}")]
pub struct ParseError {
    /// 1-based line number in the catalog text.
    pub line: usize,
    /// The offending record, verbatim.
    pub record: String,
    pub error: DomainError,
}

/// Total field count of a record of the given variant.
pub fn field_count(kind: ToyKind) -> usize {
    COMMON_FIELDS
        + match kind {
            ToyKind::Figure | ToyKind::Puzzle => 1,
            ToyKind::Animal | ToyKind::BoardGame => 2,
        }
}

/// Non-blank lines of a catalog, with their 1-based line numbers.
///
/// Works on raw bytes so that one badly encoded line cannot hide the rest of
/// the catalog. `\r\n` line endings are accepted.
pub fn records(bytes: &[u8]) -> impl Iterator<Item = (usize, &[u8])> {
    bytes
        .split(|&b| b == b'\n')
        .enumerate()
        .map(|(index, line)| (index + 1, line.strip_suffix(b"\r").unwrap_or(line)))
        .filter(|(_, line)| !core::str::from_utf8(line).is_ok_and(|text| text.trim().is_empty()))
}

pub fn encode_record(toy: &Toy) -> String {
    toy.to_record().join(&FIELD_DELIMITER.to_string())
}

/// Encode toys in iteration order, one newline-terminated record each.
pub fn encode<'a>(toys: impl IntoIterator<Item = &'a Toy>) -> String {
    toys.into_iter().fold(String::new(), |mut out, toy| {
        out.push_str(&encode_record(toy));
        out.push('\n');
        out
    })
}

/// Decode one raw catalog line, rejecting it if it is not valid UTF-8.
pub fn decode_line(line: &[u8]) -> DomainResult<Toy> {
    let record = core::str::from_utf8(line).map_err(|e| {
        DomainError::validation(format!(
            "record is not valid UTF-8 (invalid byte at offset {})",
            e.valid_up_to()
        ))
    })?;
    decode_record(record)
}

/// Decode one record. The serial number picks the variant layout.
pub fn decode_record(record: &str) -> DomainResult<Toy> {
    let fields: Vec<&str> = record.split(FIELD_DELIMITER).collect();
    let kind = SerialNumber::classify(fields[0])?;

    let expected = field_count(kind);
    if fields.len() != expected {
        return Err(DomainError::validation(format!(
            "{kind} record needs {expected} fields, found {}",
            fields.len()
        )));
    }

    let mut violations = Vec::new();
    let price = take(&mut violations, parse_price(fields[3]));
    let available_count = take(&mut violations, parse_count("available count", fields[4]));
    let minimum_age = take(&mut violations, parse_count("minimum age", fields[5]));
    let details = take(&mut violations, decode_details(kind, &fields[COMMON_FIELDS..]));

    match (price, available_count, minimum_age, details) {
        (Some(price), Some(available_count), Some(minimum_age), Some(details)) => ToyDraft {
            serial: fields[0].to_string(),
            name: fields[1].to_string(),
            brand: fields[2].to_string(),
            price,
            available_count,
            minimum_age,
            details,
        }
        .validate(),
        _ => Err(DomainError::violations(violations)),
    }
}

fn decode_details(kind: ToyKind, fields: &[&str]) -> DomainResult<ToyDetails> {
    Ok(match kind {
        ToyKind::Figure => ToyDetails::Figure {
            classification: fields[0].parse()?,
        },
        ToyKind::Animal => ToyDetails::Animal {
            material: fields[0].to_string(),
            size: fields[1].parse()?,
        },
        ToyKind::Puzzle => ToyDetails::Puzzle {
            puzzle_type: fields[0].parse()?,
        },
        ToyKind::BoardGame => ToyDetails::BoardGame {
            players: parse_player_range(fields[0])?,
            designers: parse_designers(fields[1]),
        },
    })
}

fn take<T>(violations: &mut Vec<String>, result: DomainResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            violations.extend(e.violated_rules().iter().cloned());
            None
        }
    }
}

/// Digits a price may carry without being rounded.
pub const PRICE_MAX_DIGITS: usize = 28;

/// Plain decimal notation only: optional `-`, digits, optional fraction.
///
/// A negative amount parses here and is rejected by validation. Amounts that
/// need more than [`PRICE_MAX_DIGITS`] significant digits are rejected rather
/// than rounded. Redundant leading zeros are dropped (`007.50` is `7.50`).
pub fn parse_price(raw: &str) -> DomainResult<Decimal> {
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || !fraction.is_none_or(digits) {
        return Err(DomainError::validation(format!(
            "price must be a decimal number (got {raw:?})"
        )));
    }

    let whole = whole.trim_start_matches('0');
    let fraction = fraction.unwrap_or("");
    if whole.len() + fraction.len() > PRICE_MAX_DIGITS {
        return Err(DomainError::validation(format!(
            "price cannot have more than {PRICE_MAX_DIGITS} significant digits (got {raw:?})"
        )));
    }

    let whole = if whole.is_empty() { "0" } else { whole };
    let canonical = if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    };
    Decimal::from_str(&canonical)
        .map_err(|e| DomainError::validation(format!("price {raw:?} is out of range: {e}")))
}

/// ASCII digits only; no sign, no whitespace.
pub fn parse_count(field: &str, raw: &str) -> DomainResult<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::validation(format!(
            "{field} must be a non-negative integer (got {raw:?})"
        )));
    }
    raw.parse()
        .map_err(|_| DomainError::validation(format!("{field} is out of range (got {raw:?})")))
}

/// `min-max`, e.g. `2-4`.
pub fn parse_player_range(raw: &str) -> DomainResult<PlayerRange> {
    let (min, max) = raw.split_once(PLAYER_RANGE_SEPARATOR).ok_or_else(|| {
        DomainError::validation(format!("player range must look like 2-4 (got {raw:?})"))
    })?;
    Ok(PlayerRange::new(
        parse_count("minimum players", min)?,
        parse_count("maximum players", max)?,
    ))
}

/// Split a comma-separated designer list, trimming each name.
pub fn parse_designers(raw: &str) -> Vec<String> {
    raw.split(',').map(|name| name.trim().to_string()).collect()
}

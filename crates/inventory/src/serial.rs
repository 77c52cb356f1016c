//! Serial numbers and the leading-digit variant scheme.
//!
//! A serial number is exactly ten ASCII digits. Its leading digit selects the
//! toy variant:
//!
//! | Leading digit | Variant   |
//! |---------------|-----------|
//! | 0, 1          | Figure    |
//! | 2, 3          | Animal    |
//! | 4, 5, 6       | Puzzle    |
//! | 7, 8, 9       | BoardGame |

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use toystore_core::{DomainError, DomainResult};

/// Number of digits in a serial number.
pub const SERIAL_LEN: usize = 10;

/// The closed set of toy variants.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToyKind {
    Figure,
    Animal,
    Puzzle,
    BoardGame,
}

impl ToyKind {
    pub const ALL: [ToyKind; 4] = [
        ToyKind::Figure,
        ToyKind::Animal,
        ToyKind::Puzzle,
        ToyKind::BoardGame,
    ];

    /// Stable type name, as matched by type searches.
    pub fn type_name(self) -> &'static str {
        match self {
            ToyKind::Figure => "Figure",
            ToyKind::Animal => "Animal",
            ToyKind::Puzzle => "Puzzle",
            ToyKind::BoardGame => "BoardGame",
        }
    }

    /// Leading digits reserved for this variant.
    pub fn leading_digits(self) -> &'static [char] {
        match self {
            ToyKind::Figure => &['0', '1'],
            ToyKind::Animal => &['2', '3'],
            ToyKind::Puzzle => &['4', '5', '6'],
            ToyKind::BoardGame => &['7', '8', '9'],
        }
    }

    /// Map a leading digit to its variant. Non-digits map to nothing.
    pub fn from_leading_digit(digit: char) -> Option<Self> {
        match digit {
            '0' | '1' => Some(ToyKind::Figure),
            '2' | '3' => Some(ToyKind::Animal),
            '4'..='6' => Some(ToyKind::Puzzle),
            '7'..='9' => Some(ToyKind::BoardGame),
            _ => None,
        }
    }

    /// Case-insensitive lookup by type name.
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.type_name().eq_ignore_ascii_case(name.trim()))
    }

    /// Human-readable form of the serial rule for this variant,
    /// e.g. `^[23][0-9]{9}$`.
    pub fn serial_pattern(self) -> String {
        let digits: String = self.leading_digits().iter().collect();
        format!("^[{digits}][0-9]{{{}}}$", SERIAL_LEN - 1)
    }
}

impl core::fmt::Display for ToyKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A well-formed ten-digit serial number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerialNumber(String);

impl SerialNumber {
    /// Validate the global shape (`^[0-9]{10}$`).
    pub fn parse(raw: &str) -> DomainResult<Self> {
        if raw.len() != SERIAL_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::validation(format!(
                "serial number must match ^[0-9]{{{SERIAL_LEN}}}$ (got {raw:?})"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    /// Pure scheme function: raw serial number to variant.
    pub fn classify(raw: &str) -> DomainResult<ToyKind> {
        Self::parse(raw).map(|serial| serial.kind())
    }

    pub fn kind(&self) -> ToyKind {
        // Shape is checked on construction, so the first byte is a digit
        // and every digit has a variant.
        match self.0.as_bytes()[0] {
            b'0' | b'1' => ToyKind::Figure,
            b'2' | b'3' => ToyKind::Animal,
            b'4'..=b'6' => ToyKind::Puzzle,
            _ => ToyKind::BoardGame,
        }
    }

    /// Check the variant-specific prefix rule.
    pub fn ensure_kind(&self, kind: ToyKind) -> DomainResult<()> {
        if self.kind() == kind {
            Ok(())
        } else {
            Err(DomainError::validation(format!(
                "{kind} serial number must match {}",
                kind.serial_pattern()
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SerialNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SerialNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SerialNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SerialNumber> for String {
    fn from(value: SerialNumber) -> Self {
        value.0
    }
}

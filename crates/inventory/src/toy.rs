//! The toy record and its four variants.
//!
//! A [`Toy`] is only ever produced by [`ToyDraft::validate`], which checks every
//! field at once and reports all violations together. The catalog decoder and
//! the interactive add flow both go through it.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use toystore_core::{DomainError, DomainResult, Entity};

use crate::codec::{DESIGNER_SEPARATOR, FIELD_DELIMITER, PLAYER_RANGE_SEPARATOR};
use crate::serial::{SerialNumber, ToyKind};

/// Non-negative unit price.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);

    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount < Decimal::ZERO {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(Self(amount))
    }

    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// Single-character code enumerations stored in the catalog file.
macro_rules! code_enum {
    ($(#[$meta:meta])* $name:ident, $field:literal { $($variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The one-character code written to the catalog file.
            pub fn code(self) -> char {
                match self {
                    $($name::$variant => $code),+
                }
            }

            /// Inverse of `code`; `None` for any other character.
            pub fn from_code(code: char) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Human-readable name, as shown by `Display`.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }

            /// e.g. `'S' (Small), 'M' (Medium), 'L' (Large)`
            pub fn allowed_codes() -> String {
                Self::ALL
                    .iter()
                    .map(|v| format!("'{}' ({})", v.code(), v.label()))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut chars = s.chars();
                let parsed = match (chars.next(), chars.next()) {
                    (Some(code), None) => Self::from_code(code),
                    _ => None,
                };
                parsed.ok_or_else(|| {
                    DomainError::validation(format!(
                        "{} must be one of {} (got {s:?})",
                        $field,
                        Self::allowed_codes()
                    ))
                })
            }
        }
    };
}

code_enum!(
    /// Figure classification.
    Classification, "classification" {
        Action => 'A',
        Doll => 'D',
        Historic => 'H',
    }
);

code_enum!(
    /// Stuffed or plastic animal size.
    Size, "size" {
        Small => 'S',
        Medium => 'M',
        Large => 'L',
    }
);

code_enum!(
    /// Puzzle mechanism.
    PuzzleType, "puzzle type" {
        Mechanical => 'M',
        Cryptic => 'C',
        Logic => 'L',
        Trivia => 'T',
        Riddle => 'R',
    }
);

/// Supported player count of a board game, inclusive on both ends.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRange {
    pub min: u32,
    pub max: u32,
}

impl PlayerRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    fn collect_violations(&self, out: &mut Vec<String>) {
        if self.min < 1 {
            out.push("minimum players must be at least 1".to_string());
        }
        if self.max < self.min {
            out.push(format!(
                "maximum players ({}) cannot be less than minimum players ({})",
                self.max, self.min
            ));
        }
    }
}

impl fmt::Display for PlayerRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{PLAYER_RANGE_SEPARATOR}{}", self.min, self.max)
    }
}

/// Variant-specific payload. The variant always agrees with the serial prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToyDetails {
    Figure {
        classification: Classification,
    },
    Animal {
        material: String,
        size: Size,
    },
    Puzzle {
        puzzle_type: PuzzleType,
    },
    BoardGame {
        players: PlayerRange,
        designers: Vec<String>,
    },
}

impl ToyDetails {
    pub fn kind(&self) -> ToyKind {
        match self {
            ToyDetails::Figure { .. } => ToyKind::Figure,
            ToyDetails::Animal { .. } => ToyKind::Animal,
            ToyDetails::Puzzle { .. } => ToyKind::Puzzle,
            ToyDetails::BoardGame { .. } => ToyKind::BoardGame,
        }
    }

    /// Checks variant fields, trimming designer names in place.
    fn normalize(&mut self, out: &mut Vec<String>) {
        match self {
            ToyDetails::Figure { .. } | ToyDetails::Puzzle { .. } => {}
            ToyDetails::Animal { material, .. } => check_text("material", material, out),
            ToyDetails::BoardGame { players, designers } => {
                players.collect_violations(out);
                if designers.is_empty() {
                    out.push("board game needs at least one designer".to_string());
                }
                for designer in designers.iter_mut() {
                    *designer = designer.trim().to_string();
                    check_text("designer name", designer, out);
                    if designer.contains(',') {
                        out.push(format!("designer name cannot contain ',' (got {designer:?})"));
                    }
                }
            }
        }
    }

    fn record_fields(&self) -> Vec<String> {
        match self {
            ToyDetails::Figure { classification } => vec![classification.code().to_string()],
            ToyDetails::Animal { material, size } => vec![material.clone(), size.code().to_string()],
            ToyDetails::Puzzle { puzzle_type } => vec![puzzle_type.code().to_string()],
            ToyDetails::BoardGame { players, designers } => {
                vec![players.to_string(), designers.join(DESIGNER_SEPARATOR)]
            }
        }
    }
}

impl fmt::Display for ToyDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToyDetails::Figure { classification } => write!(f, "Classification={classification}"),
            ToyDetails::Animal { material, size } => write!(f, "Material={material}, Size={size}"),
            ToyDetails::Puzzle { puzzle_type } => write!(f, "PuzzleType={puzzle_type}"),
            ToyDetails::BoardGame { players, designers } => {
                write!(f, "Players={players}, Designers={}", designers.join(DESIGNER_SEPARATOR))
            }
        }
    }
}

/// Unvalidated toy fields, as typed by an operator or read from a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToyDraft {
    pub serial: String,
    pub name: String,
    pub brand: String,
    pub price: Decimal,
    pub available_count: u32,
    pub minimum_age: u32,
    pub details: ToyDetails,
}

impl ToyDraft {
    /// Check every field and build the toy, or report all violations.
    pub fn validate(self) -> DomainResult<Toy> {
        let ToyDraft {
            serial,
            name,
            brand,
            price,
            available_count,
            minimum_age,
            mut details,
        } = self;

        let mut violations = Vec::new();

        let serial = match SerialNumber::parse(&serial) {
            Ok(serial) => {
                if let Err(e) = serial.ensure_kind(details.kind()) {
                    violations.extend(e.violated_rules().iter().cloned());
                }
                Some(serial)
            }
            Err(e) => {
                violations.extend(e.violated_rules().iter().cloned());
                None
            }
        };

        check_text("name", &name, &mut violations);
        check_text("brand", &brand, &mut violations);

        let price = match Price::new(price) {
            Ok(price) => Some(price),
            Err(e) => {
                violations.extend(e.violated_rules().iter().cloned());
                None
            }
        };

        details.normalize(&mut violations);

        match (serial, price) {
            (Some(serial), Some(price)) if violations.is_empty() => Ok(Toy {
                serial,
                name,
                brand,
                price,
                available_count,
                minimum_age,
                details,
            }),
            _ => Err(DomainError::violations(violations)),
        }
    }
}

/// Free text must be non-blank and must not break the record layout.
fn check_text(field: &str, value: &str, out: &mut Vec<String>) {
    if value.trim().is_empty() {
        out.push(format!("{field} cannot be empty"));
    }
    if value.contains(FIELD_DELIMITER) {
        out.push(format!("{field} cannot contain '{FIELD_DELIMITER}' (got {value:?})"));
    }
    if value.contains(['\n', '\r']) {
        out.push(format!("{field} cannot contain line breaks"));
    }
}

/// One inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toy {
    serial: SerialNumber,
    name: String,
    brand: String,
    price: Price,
    available_count: u32,
    minimum_age: u32,
    details: ToyDetails,
}

impl Toy {
    pub fn serial(&self) -> &SerialNumber {
        &self.serial
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn available_count(&self) -> u32 {
        self.available_count
    }

    pub fn minimum_age(&self) -> u32 {
        self.minimum_age
    }

    pub fn details(&self) -> &ToyDetails {
        &self.details
    }

    pub fn kind(&self) -> ToyKind {
        self.details.kind()
    }

    /// "Figure", "Animal", "Puzzle" or "BoardGame".
    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    pub fn set_price(&mut self, amount: Decimal) -> DomainResult<()> {
        self.price = Price::new(amount)?;
        Ok(())
    }

    pub fn set_available_count(&mut self, count: u32) {
        self.available_count = count;
    }

    /// Record fields in file order: the common prefix, then the variant suffix.
    pub fn to_record(&self) -> Vec<String> {
        let mut fields = vec![
            self.serial.to_string(),
            self.name.clone(),
            self.brand.clone(),
            self.price.to_string(),
            self.available_count.to_string(),
            self.minimum_age.to_string(),
        ];
        fields.extend(self.details.record_fields());
        fields
    }
}

impl Entity for Toy {
    type Id = SerialNumber;

    fn id(&self) -> &Self::Id {
        &self.serial
    }
}

impl fmt::Display for Toy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [Serial Number={}, Name={}, Brand={}, Price={}, Available Count={}, Age Appropriate={}], {}",
            self.type_name(),
            self.serial,
            self.name,
            self.brand,
            self.price,
            self.available_count,
            self.minimum_age,
            self.details
        )
    }
}

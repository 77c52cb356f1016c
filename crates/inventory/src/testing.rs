//! Fixtures and proptest strategies shared by the unit tests.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::serial::ToyKind;
use crate::toy::{Classification, PlayerRange, PuzzleType, Size, Toy, ToyDetails, ToyDraft};

pub fn figure(serial: &str, name: &str) -> ToyDraft {
    ToyDraft {
        serial: serial.to_string(),
        name: name.to_string(),
        brand: "Hasbro".to_string(),
        price: Decimal::new(1999, 2),
        available_count: 4,
        minimum_age: 8,
        details: ToyDetails::Figure {
            classification: Classification::Action,
        },
    }
}

pub fn animal(serial: &str, name: &str) -> ToyDraft {
    ToyDraft {
        serial: serial.to_string(),
        name: name.to_string(),
        brand: "Gund".to_string(),
        price: Decimal::new(2500, 2),
        available_count: 3,
        minimum_age: 0,
        details: ToyDetails::Animal {
            material: "Plush".to_string(),
            size: Size::Medium,
        },
    }
}

pub fn board_game(serial: &str, name: &str) -> ToyDraft {
    ToyDraft {
        serial: serial.to_string(),
        name: name.to_string(),
        brand: "Stonemaier".to_string(),
        price: Decimal::new(5950, 2),
        available_count: 2,
        minimum_age: 12,
        details: ToyDetails::BoardGame {
            players: PlayerRange::new(2, 4),
            designers: vec!["Ada Park".to_string()],
        },
    }
}

pub fn toy(draft: ToyDraft) -> Toy {
    draft.validate().expect("fixture should be valid")
}

fn arb_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 .'&!-]{0,24}"
}

fn arb_designer() -> impl Strategy<Value = String> {
    "[A-Za-z]([A-Za-z .'-]{0,12}[A-Za-z])?"
}

fn arb_serial(kind: ToyKind) -> impl Strategy<Value = String> {
    (
        prop::sample::select(kind.leading_digits().to_vec()),
        "[0-9]{9}",
    )
        .prop_map(|(first, rest)| format!("{first}{rest}"))
}

fn arb_details(kind: ToyKind) -> BoxedStrategy<ToyDetails> {
    match kind {
        ToyKind::Figure => prop::sample::select(Classification::ALL.to_vec())
            .prop_map(|classification| ToyDetails::Figure { classification })
            .boxed(),
        ToyKind::Animal => (arb_text(), prop::sample::select(Size::ALL.to_vec()))
            .prop_map(|(material, size)| ToyDetails::Animal { material, size })
            .boxed(),
        ToyKind::Puzzle => prop::sample::select(PuzzleType::ALL.to_vec())
            .prop_map(|puzzle_type| ToyDetails::Puzzle { puzzle_type })
            .boxed(),
        ToyKind::BoardGame => (1u32..8, 0u32..8, prop::collection::vec(arb_designer(), 1..4))
            .prop_map(|(min, extra, designers)| ToyDetails::BoardGame {
                players: PlayerRange::new(min, min + extra),
                designers,
            })
            .boxed(),
    }
}

fn arb_toy_of(kind: ToyKind) -> impl Strategy<Value = Toy> {
    (
        arb_serial(kind),
        arb_text(),
        arb_text(),
        (0i64..10_000_000, 0u32..4),
        any::<u32>(),
        0u32..21,
        arb_details(kind),
    )
        .prop_map(
            |(serial, name, brand, (units, scale), available_count, minimum_age, details)| {
                toy(ToyDraft {
                    serial,
                    name,
                    brand,
                    price: Decimal::new(units, scale),
                    available_count,
                    minimum_age,
                    details,
                })
            },
        )
}

/// Any well-formed toy of any variant.
pub fn arb_toy() -> impl Strategy<Value = Toy> {
    prop::sample::select(ToyKind::ALL.to_vec()).prop_flat_map(arb_toy_of)
}

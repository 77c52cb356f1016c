//! In-memory inventory: an insertion-ordered collection of toys.
//!
//! Searches are pure reads. `add` and `remove` are the only mutators and each
//! either succeeds completely or leaves the inventory untouched.

use toystore_core::{DomainError, DomainResult, Entity};
use tracing::{debug, info, warn};

use crate::codec::{self, ParseError};
use crate::toy::Toy;

/// The toys of one session, in insertion order (reduced by removals).
///
/// No two toys share a serial number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    toys: Vec<Toy>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from catalog text.
    ///
    /// Records that fail to decode, or that repeat a serial number already
    /// loaded, are skipped and reported; they never abort the load.
    pub fn decode(text: &str) -> (Self, Vec<ParseError>) {
        Self::decode_bytes(text.as_bytes())
    }

    /// Like [`Inventory::decode`], for catalog bytes of unknown encoding.
    /// Lines that are not valid UTF-8 are skipped and reported like any other
    /// malformed record.
    pub fn decode_bytes(bytes: &[u8]) -> (Self, Vec<ParseError>) {
        let mut inventory = Self::new();
        let mut errors = Vec::new();

        for (line, record) in codec::records(bytes) {
            let outcome = codec::decode_line(record).and_then(|toy| inventory.add(toy));
            if let Err(error) = outcome {
                warn!(line, %error, "Skipping catalog record");
                errors.push(ParseError {
                    line,
                    record: String::from_utf8_lossy(record).into_owned(),
                    error,
                });
            }
        }

        debug!(size = inventory.len(), errors = errors.len(), "Decoded catalog");
        (inventory, errors)
    }

    /// Catalog text for the current collection, in order.
    pub fn encode(&self) -> String {
        codec::encode(&self.toys)
    }

    pub fn len(&self) -> usize {
        self.toys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toy> {
        self.toys.iter()
    }

    pub fn get(&self, serial: &str) -> Option<&Toy> {
        self.toys.iter().find(|toy| toy.id().as_str() == serial)
    }

    /// Exact serial number match. Returns every match.
    pub fn find_by_serial(&self, serial: &str) -> Vec<&Toy> {
        self.toys
            .iter()
            .filter(|toy| toy.id().as_str() == serial)
            .collect()
    }

    /// Case-insensitive substring match on the name.
    pub fn find_by_name(&self, fragment: &str) -> Vec<&Toy> {
        let fragment = fragment.to_lowercase();
        self.toys
            .iter()
            .filter(|toy| toy.name().to_lowercase().contains(&fragment))
            .collect()
    }

    /// Case-insensitive exact match on the type name ("Figure", "BoardGame", ...).
    pub fn find_by_type(&self, type_name: &str) -> Vec<&Toy> {
        self.toys
            .iter()
            .filter(|toy| toy.type_name().eq_ignore_ascii_case(type_name))
            .collect()
    }

    /// Append a toy. Fails with `DuplicateKey` if its serial number is taken.
    pub fn add(&mut self, toy: Toy) -> DomainResult<()> {
        let serial = toy.id();
        if self.get(serial.as_str()).is_some() {
            warn!(%serial, "Add rejected: serial number already in use");
            return Err(DomainError::duplicate_key(serial.as_str()));
        }
        info!(%serial, kind = toy.type_name(), size = self.toys.len() + 1, "Added");
        self.toys.push(toy);
        Ok(())
    }

    /// Remove the toy with this serial number and hand it back.
    pub fn remove(&mut self, serial: &str) -> DomainResult<Toy> {
        let Some(index) = self.toys.iter().position(|toy| toy.id().as_str() == serial) else {
            warn!(serial, "Remove rejected: not found");
            return Err(DomainError::not_found(serial));
        };
        let toy = self.toys.remove(index);
        info!(serial, size = self.toys.len(), "Removed");
        Ok(toy)
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Toy;
    type IntoIter = core::slice::Iter<'a, Toy>;

    fn into_iter(self) -> Self::IntoIter {
        self.toys.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{animal, arb_toy, board_game, figure, toy};
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn sample() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add(toy(figure("0001112223", "Captain Nova"))).unwrap();
        inventory.add(toy(animal("2000000001", "Teddy Bear"))).unwrap();
        inventory.add(toy(animal("2000000002", "Teddy Truck"))).unwrap();
        inventory.add(toy(board_game("7000000001", "Hexfall"))).unwrap();
        inventory
    }

    fn serials(toys: &[&Toy]) -> Vec<String> {
        toys.iter().map(|t| t.id().to_string()).collect()
    }

    #[test]
    fn add_rejects_duplicate_serial() {
        let mut inventory = sample();
        let before = inventory.clone();

        let err = inventory
            .add(toy(figure("0001112223", "Another Nova")))
            .unwrap_err();
        assert_eq!(err, DomainError::DuplicateKey("0001112223".to_string()));
        assert_eq!(inventory, before);
        assert_eq!(inventory.len(), 4);
    }

    #[test]
    fn add_appends_in_order() {
        let mut inventory = sample();
        inventory.add(toy(figure("1000000000", "Knight"))).unwrap();
        let order: Vec<_> = inventory.iter().map(|t| t.id().to_string()).collect();
        assert_eq!(
            order,
            ["0001112223", "2000000001", "2000000002", "7000000001", "1000000000"]
        );
    }

    #[test]
    fn name_search_ignores_case() {
        let inventory = sample();
        assert_eq!(
            serials(&inventory.find_by_name("teddy")),
            ["2000000001", "2000000002"]
        );
        assert_eq!(serials(&inventory.find_by_name("TRUCK")), ["2000000002"]);
        assert!(inventory.find_by_name("robot").is_empty());
    }

    #[test]
    fn serial_search_is_exact() {
        let inventory = sample();
        assert_eq!(serials(&inventory.find_by_serial("2000000001")), ["2000000001"]);
        assert!(inventory.find_by_serial("200000000").is_empty());
    }

    #[test]
    fn type_search_ignores_case() {
        let inventory = sample();
        assert_eq!(
            serials(&inventory.find_by_type("animal")),
            ["2000000001", "2000000002"]
        );
        assert_eq!(serials(&inventory.find_by_type("BOARDGAME")), ["7000000001"]);
        assert!(inventory.find_by_type("Puzzle").is_empty());
    }

    #[test]
    fn remove_returns_the_toy() {
        let mut inventory = sample();
        let removed = inventory.remove("2000000001").unwrap();
        assert_eq!(removed.name(), "Teddy Bear");
        assert_eq!(inventory.len(), 3);
        assert!(inventory.get("2000000001").is_none());
    }

    #[test]
    fn remove_missing_leaves_inventory_unchanged() {
        let mut inventory = sample();
        let before = inventory.clone();
        let err = inventory.remove("9999999999").unwrap_err();
        assert_eq!(err, DomainError::NotFound("9999999999".to_string()));
        assert_eq!(inventory, before);
    }

    #[test]
    fn decode_skips_malformed_lines() {
        let text = "abc;Name;Brand;9.99;5;3;A\n0001112223;Captain Nova;Hasbro;19.99;4;8;A\n";
        let (inventory, errors) = Inventory::decode(text);
        assert_eq!(inventory.len(), 1);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 1);
        assert_eq!(errors[0].record, "abc;Name;Brand;9.99;5;3;A");
    }

    #[test]
    fn decode_bytes_keeps_lines_around_bad_encoding() {
        let bytes = b"0001112223;Captain Nova;Hasbro;19.99;4;8;A\n\
                      1000000000;Caf\xe9 Knight;Lego;1;1;5;H\n\
                      5000000000;Cube;Rubik;12;10;7;M\n";
        let (inventory, errors) = Inventory::decode_bytes(bytes);
        assert_eq!(inventory.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].line, 2);
        assert_eq!(errors[0].record, "1000000000;Caf\u{FFFD} Knight;Lego;1;1;5;H");
        assert!(errors[0].error.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn decode_reports_repeated_serials() {
        let text = "0001112223;Captain Nova;Hasbro;19.99;4;8;A\n\
                    0001112223;Nova Again;Hasbro;1;1;1;D\n";
        let (inventory, errors) = Inventory::decode(text);
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.iter().next().unwrap().name(), "Captain Nova");
        assert_eq!(errors[0].line, 2);
        assert!(matches!(errors[0].error, DomainError::DuplicateKey(_)));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(Toy),
        Remove(usize),
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => arb_toy().prop_map(Op::Add),
            1 => any::<usize>().prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn serials_stay_unique(ops in prop::collection::vec(arb_op(), 0..40)) {
            let mut inventory = Inventory::new();
            for op in ops {
                match op {
                    Op::Add(toy) => {
                        let taken = inventory.get(toy.id().as_str()).is_some();
                        prop_assert_eq!(inventory.add(toy).is_err(), taken);
                    }
                    Op::Remove(pick) if !inventory.is_empty() => {
                        let serial = inventory.iter().nth(pick % inventory.len()).unwrap().id().to_string();
                        inventory.remove(&serial).unwrap();
                    }
                    Op::Remove(_) => {}
                }
                let unique: HashSet<_> = inventory.iter().map(|t| t.id().clone()).collect();
                prop_assert_eq!(unique.len(), inventory.len());
            }
        }

        #[test]
        fn save_then_reload_is_identical(toys in prop::collection::vec(arb_toy(), 0..20)) {
            let mut inventory = Inventory::new();
            for toy in toys {
                let _ = inventory.add(toy);
            }
            let text = inventory.encode();
            let (reloaded, errors) = Inventory::decode(&text);
            prop_assert!(errors.is_empty());
            prop_assert_eq!(&reloaded, &inventory);
            prop_assert_eq!(reloaded.encode(), text);
        }
    }
}

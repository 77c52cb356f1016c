//! Menu flows: search and purchase, add, remove, save and exit.

use std::io::{self, BufRead, Write};

use toystore_core::DomainError;
use toystore_infra::CatalogStore;
use toystore_inventory::codec::{parse_count, parse_designers, parse_price};
use toystore_inventory::{
    Classification, Inventory, ParseError, PlayerRange, PuzzleType, SerialNumber, Size, Toy,
    ToyDetails, ToyDraft, ToyKind,
};
use tracing::{info, warn};

use crate::config::SavePolicy;
use crate::session::Session;

const BANNER_TEXT: &str = "WELCOME TO TOY STORE COMPANY!";

type Finder = for<'a> fn(&'a Inventory, &str) -> Vec<&'a Toy>;

/// What the main loop does after a flow returns.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Next {
    Continue,
    Quit,
    InputEnded,
}

/// One operator session over an inventory and the store it is saved to.
pub struct ToyStoreApp<S> {
    inventory: Inventory,
    store: S,
    policy: SavePolicy,
}

impl<S: CatalogStore> ToyStoreApp<S> {
    pub fn new(inventory: Inventory, store: S, policy: SavePolicy) -> Self {
        Self {
            inventory,
            store,
            policy,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run the main menu until the operator exits or input ends.
    pub fn run<R: BufRead, W: Write>(&mut self, session: &mut Session<R, W>) -> io::Result<()> {
        print_banner(session)?;
        loop {
            let Some(choice) = main_menu(session)? else {
                // Input ended: one last save attempt, then stop.
                self.save_and_exit(session)?;
                return Ok(());
            };
            let next = match choice {
                1 => self.search(session)?,
                2 => self.add(session)?,
                3 => self.remove(session)?,
                _ => self.save_and_exit(session)?,
            };
            match next {
                Next::Continue => {}
                Next::Quit => return Ok(()),
                Next::InputEnded => {
                    self.save_and_exit(session)?;
                    return Ok(());
                }
            }
        }
    }

    fn search<R: BufRead, W: Write>(&mut self, session: &mut Session<R, W>) -> io::Result<Next> {
        loop {
            session.say("\nFind Toys With:\n")?;
            session.say("\t(1) Serial Number (SN)")?;
            session.say("\t(2) Toy Name")?;
            session.say("\t(3) Type")?;
            session.say("\t(4) Back to Main Menu")?;
            let Some(choice) = read_choice(session, "\nEnter option: ", 4)? else {
                return Ok(Next::InputEnded);
            };

            let (label, by): (&str, Finder) = match choice {
                1 => ("\nEnter Serial Number (SN): ", Inventory::find_by_serial as Finder),
                2 => ("\nEnter Toy Name: ", Inventory::find_by_name as Finder),
                3 => ("\nEnter Type: ", Inventory::find_by_type as Finder),
                _ => {
                    session.say("\nReturning to Main Menu...")?;
                    return Ok(Next::Continue);
                }
            };
            let Some(query) = session.prompt(label)? else {
                return Ok(Next::InputEnded);
            };

            let serials: Vec<String> = by(&self.inventory, query.trim())
                .into_iter()
                .map(|toy| toy.serial().to_string())
                .collect();
            if serials.is_empty() {
                session.say("\nNo toys found.")?;
                continue;
            }
            if self.offer_purchase(session, &serials)? == Next::InputEnded {
                return Ok(Next::InputEnded);
            }
        }
    }

    /// List matches and purchase the one the operator picks.
    fn offer_purchase<R: BufRead, W: Write>(
        &mut self,
        session: &mut Session<R, W>,
        serials: &[String],
    ) -> io::Result<Next> {
        session.say("\nHere are the search results:\n")?;
        for (index, serial) in serials.iter().enumerate() {
            if let Some(toy) = self.inventory.get(serial) {
                session.say(format!("\t({}) {toy}", index + 1))?;
            }
        }
        let back = serials.len() + 1;
        session.say(format!("\t({back}) Back to Search Menu"))?;

        let Some(answer) = session.prompt("\nEnter option number to purchase: ")? else {
            return Ok(Next::InputEnded);
        };
        match answer.trim().parse::<usize>() {
            Ok(choice) if choice == back => session.say("Returning to Search Menu...")?,
            Ok(choice) if (1..back).contains(&choice) => {
                let serial = &serials[choice - 1];
                match self.inventory.remove(serial) {
                    Ok(toy) => {
                        info!(serial = %toy.serial(), "Purchased");
                        session.say("\nThe Transaction Successfully Terminated!")?;
                        self.checkpoint(session)?;
                    }
                    Err(e) => session.say(format!("\nPurchase failed: {e}"))?,
                }
                if session.prompt("\nPress Enter to continue...")?.is_none() {
                    return Ok(Next::InputEnded);
                }
            }
            _ => session.say("Invalid selection. Returning to Search Menu.")?,
        }
        Ok(Next::Continue)
    }

    fn add<R: BufRead, W: Write>(&mut self, session: &mut Session<R, W>) -> io::Result<Next> {
        let Some(serial) = self.prompt_new_serial(session)? else {
            return Ok(Next::Continue);
        };
        match self.prompt_draft(session, serial)? {
            Some(draft) => {
                self.submit(session, draft)?;
                Ok(Next::Continue)
            }
            None => Ok(Next::InputEnded),
        }
    }

    /// Ask for an unused, well-formed serial number. A blank answer cancels.
    fn prompt_new_serial<R: BufRead, W: Write>(
        &self,
        session: &mut Session<R, W>,
    ) -> io::Result<Option<SerialNumber>> {
        loop {
            let Some(raw) = session.prompt("\nEnter Serial Number (SN): ")? else {
                return Ok(None);
            };
            let raw = raw.trim();
            if raw.is_empty() {
                session.say("Add cancelled.")?;
                return Ok(None);
            }
            match SerialNumber::parse(raw) {
                Ok(serial) if self.inventory.get(serial.as_str()).is_some() => {
                    session.say(format!("A toy with serial number {serial} already exists."))?;
                }
                Ok(serial) => return Ok(Some(serial)),
                Err(e) => session.say(format!("Invalid input: {e}. Try again."))?,
            }
        }
    }

    /// Collect the remaining fields; the serial's leading digit picks the variant prompts.
    fn prompt_draft<R: BufRead, W: Write>(
        &self,
        session: &mut Session<R, W>,
        serial: SerialNumber,
    ) -> io::Result<Option<ToyDraft>> {
        macro_rules! ask {
            ($e:expr) => {
                match $e? {
                    Some(value) => value,
                    None => return Ok(None),
                }
            };
        }

        let name = ask!(session.prompt("Enter Toy Name: "));
        let brand = ask!(session.prompt("Enter Toy Brand: "));
        let price = ask!(session.prompt_until("Enter Toy Price: ", parse_price));
        let available_count = ask!(session.prompt_until("Enter Available Counts: ", |raw| {
            parse_count("available count", raw)
        }));
        let minimum_age = ask!(session.prompt_until("Enter Appropriate Age: ", |raw| {
            parse_count("minimum age", raw)
        }));

        let details = match serial.kind() {
            ToyKind::Figure => ToyDetails::Figure {
                classification: ask!(session.prompt_until(
                    &code_prompt("Classification", &Classification::allowed_codes()),
                    |raw| raw.to_ascii_uppercase().parse()
                )),
            },
            ToyKind::Animal => ToyDetails::Animal {
                material: ask!(session.prompt("Enter Material: ")),
                size: ask!(session.prompt_until(
                    &code_prompt("Size", &Size::allowed_codes()),
                    |raw| raw.to_ascii_uppercase().parse()
                )),
            },
            ToyKind::Puzzle => ToyDetails::Puzzle {
                puzzle_type: ask!(session.prompt_until(
                    &code_prompt("Puzzle Type", &PuzzleType::allowed_codes()),
                    |raw| raw.to_ascii_uppercase().parse()
                )),
            },
            ToyKind::BoardGame => {
                let min = ask!(session.prompt_until("Enter Minimum Number of Players: ", |raw| {
                    parse_count("minimum players", raw)
                }));
                let max = ask!(session.prompt_until("Enter Maximum Number of Players: ", |raw| {
                    parse_count("maximum players", raw)
                }));
                let designers = ask!(session.prompt(
                    "Enter Designer Names (use ',' to separate the names if there is more than one): "
                ));
                ToyDetails::BoardGame {
                    players: PlayerRange::new(min, max),
                    designers: parse_designers(&designers),
                }
            }
        };

        Ok(Some(ToyDraft {
            serial: serial.to_string(),
            name,
            brand,
            price,
            available_count,
            minimum_age,
            details,
        }))
    }

    fn submit<R: BufRead, W: Write>(
        &mut self,
        session: &mut Session<R, W>,
        draft: ToyDraft,
    ) -> io::Result<()> {
        match draft.validate().and_then(|toy| self.inventory.add(toy)) {
            Ok(()) => {
                session.say("\nNew Toy Added!")?;
                self.checkpoint(session)
            }
            Err(DomainError::Validation(rules)) => {
                session.say("\nThe toy was not added:")?;
                for rule in rules {
                    session.say(format!("\t- {rule}"))?;
                }
                Ok(())
            }
            Err(e) => session.say(format!("\nThe toy was not added: {e}")),
        }
    }

    fn remove<R: BufRead, W: Write>(&mut self, session: &mut Session<R, W>) -> io::Result<Next> {
        let Some(raw) = session.prompt("\nEnter Serial Number (SN): ")? else {
            return Ok(Next::InputEnded);
        };
        let serial = raw.trim();
        let Some(toy) = self.inventory.get(serial) else {
            session.say(format!("\nNo toy with serial number {serial} was found."))?;
            return Ok(Next::Continue);
        };

        session.say(format!("\nThis Item Found:\n\n\t{toy}\n"))?;
        match session.confirm("Do you want to remove it (Y/N)? ")? {
            None => Ok(Next::InputEnded),
            Some(false) => {
                session.say("Removal cancelled.")?;
                Ok(Next::Continue)
            }
            Some(true) => {
                match self.inventory.remove(serial) {
                    Ok(_) => {
                        session.say("Item Removed!")?;
                        self.checkpoint(session)?;
                    }
                    Err(e) => session.say(format!("Item not removed: {e}"))?,
                }
                Ok(Next::Continue)
            }
        }
    }

    /// Save point after a successful add or remove.
    fn checkpoint<R: BufRead, W: Write>(&self, session: &mut Session<R, W>) -> io::Result<()> {
        if self.policy == SavePolicy::AfterChange {
            if let Err(e) = self.store.save(&self.inventory) {
                warn!(error = %e, "Save after change failed");
                session.say(format!("Warning: changes are not saved yet: {e}"))?;
            }
        }
        Ok(())
    }

    fn save_and_exit<R: BufRead, W: Write>(
        &mut self,
        session: &mut Session<R, W>,
    ) -> io::Result<Next> {
        session.say("\nSaving Data Into Database...")?;
        match self.store.save(&self.inventory) {
            Ok(()) => session.say("\n*********** THANKS FOR VISITING US! ***********")?,
            Err(e) => {
                warn!(error = %e, "Save on exit failed");
                session.say(format!("Could not save catalog: {e}"))?;
                session.say("Returning to Main Menu...")?;
                return Ok(Next::Continue);
            }
        }
        Ok(Next::Quit)
    }
}

/// Tell the operator which catalog records were skipped at load.
pub fn report_skipped<R: BufRead, W: Write>(
    session: &mut Session<R, W>,
    errors: &[ParseError],
) -> io::Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    session.say(format!("{} catalog record(s) could not be loaded:", errors.len()))?;
    for error in errors {
        session.say(format!("\t{error}"))?;
    }
    Ok(())
}

fn print_banner<R: BufRead, W: Write>(session: &mut Session<R, W>) -> io::Result<()> {
    let message = format!("*     {BANNER_TEXT}     *");
    let border = "*".repeat(message.len());
    session.say(&border)?;
    session.say(&message)?;
    session.say(&border)
}

fn main_menu<R: BufRead, W: Write>(session: &mut Session<R, W>) -> io::Result<Option<usize>> {
    session.say("\nHow We May Help You?\n")?;
    session.say("\t(1) Search Inventory and Purchase Toy")?;
    session.say("\t(2) Add New Toy")?;
    session.say("\t(3) Remove Toy")?;
    session.say("\t(4) Save & Exit")?;
    read_choice(session, "\nEnter option: ", 4)
}

/// Read a menu choice in `1..=max`, re-prompting on anything else.
fn read_choice<R: BufRead, W: Write>(
    session: &mut Session<R, W>,
    message: &str,
    max: usize,
) -> io::Result<Option<usize>> {
    loop {
        let Some(answer) = session.prompt(message)? else {
            return Ok(None);
        };
        match answer.trim().parse::<usize>() {
            Ok(choice) if (1..=max).contains(&choice) => return Ok(Some(choice)),
            _ => session.say("Invalid input. Please enter a valid option.")?,
        }
    }
}

fn code_prompt(field: &str, allowed: &str) -> String {
    format!("Enter {field} ({allowed}): ")
}

//! Console front end for the toy store inventory.
//!
//! This crate is a thin presentation layer: it reads operator input, calls the
//! inventory operations, and prints results. All catalog rules live in
//! `toystore-inventory`; persistence lives in `toystore-infra`.

pub mod config;
pub mod console;
pub mod session;

pub use config::{AppConfig, ConfigError, SavePolicy};
pub use console::{ToyStoreApp, report_skipped};
pub use session::Session;

//! `toystore-core`: error vocabulary and entity identity shared by every crate.
//!
//! This crate contains **pure domain** primitives (no IO, no console).

pub mod entity;
pub mod error;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};

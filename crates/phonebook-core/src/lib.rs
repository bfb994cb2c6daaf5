//! Core types and the in-memory directory for the phonebook.
//!
//! This crate has no terminal or process concerns. The `phonebook-cli` binary
//! depends on it; it depends on nothing but its data and logging stack.

pub mod codec;
pub mod contact;
pub mod directory;
pub mod error;
pub mod log;
pub mod phone;
pub mod store;
pub mod tree;

pub use contact::Contact;
pub use directory::Directory;
pub use error::{Error, Result};
pub use phone::PhoneRule;
pub use store::PhonebookStore;

//! Contact — the value stored in every directory node.

use std::{cmp::Ordering, fmt};

use serde::{Deserialize, Serialize};

/// A name and an already-formatted phone number.
///
/// Validation happens in the [`Directory`](crate::Directory) before a contact
/// is built; a `Contact` on its own accepts anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  name:         String,
  phone_number: String,
}

impl Contact {
  pub fn new(name: impl Into<String>, phone_number: impl Into<String>) -> Self {
    Self {
      name:         name.into(),
      phone_number: phone_number.into(),
    }
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn phone_number(&self) -> &str { &self.phone_number }
}

impl fmt::Display for Contact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Name: {}, Phone Number: {}", self.name, self.phone_number)
  }
}

// ─── Name ordering ───────────────────────────────────────────────────────────

/// Compare two names ignoring case, character by character.
///
/// This is the ordering the directory tree is keyed on.
pub fn compare_names(a: &str, b: &str) -> Ordering {
  a.chars()
    .flat_map(char::to_lowercase)
    .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Whether `name` equals `query` ignoring case, or contains it as a
/// case-insensitive substring.
pub fn name_matches(name: &str, query: &str) -> bool {
  compare_names(name, query).is_eq()
    || name.to_lowercase().contains(&query.to_lowercase())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn compare_ignores_case() {
    assert_eq!(compare_names("alice", "ALICE"), Ordering::Equal);
    assert_eq!(compare_names("Alice", "bob"), Ordering::Less);
    assert_eq!(compare_names("carol", "Bob"), Ordering::Greater);
  }

  #[test]
  fn prefix_sorts_first() {
    assert_eq!(compare_names("Al", "alice"), Ordering::Less);
  }

  #[test]
  fn substring_match_ignores_case() {
    assert!(name_matches("Alice", "ali"));
    assert!(name_matches("Alice", "LIC"));
    assert!(name_matches("Alice", "alice"));
    assert!(!name_matches("Alice", "bob"));
  }

  #[test]
  fn empty_query_matches_everything() {
    assert!(name_matches("Alice", ""));
  }

  #[test]
  fn display_format() {
    let c = Contact::new("Alice", "+264811234567");
    assert_eq!(c.to_string(), "Name: Alice, Phone Number: +264811234567");
  }
}

//! The `PhonebookStore` trait: everything the menu dispatcher needs.
//!
//! [`Directory`](crate::Directory) is the only implementation. The dispatcher
//! is written against this trait, not the concrete tree.

use std::{cmp::Ordering, path::Path, rc::Rc};

use crate::{
  Result,
  contact::Contact,
  log::{SearchHistory, UsageRecord},
  phone::PhoneRule,
  tree::Insertion,
};

// ─── Supporting types ────────────────────────────────────────────────────────

/// Built-in orderings for [`PhonebookStore::sort_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
  /// Plain string order on the name. Unlike the tree, this is case-sensitive.
  Name,
  /// Plain string order on the stored phone number.
  Phone,
}

impl SortKey {
  pub fn compare(self, a: &Contact, b: &Contact) -> Ordering {
    match self {
      Self::Name => a.name().cmp(b.name()),
      Self::Phone => a.phone_number().cmp(b.phone_number()),
    }
  }
}

/// Result of a successful [`PhonebookStore::edit`].
#[derive(Debug, Clone)]
pub struct Edit {
  /// The contact that was deleted, or `None` if `old_name` was not present.
  pub removed:  Option<Rc<Contact>>,
  pub inserted: Insertion,
}

/// Totals from [`PhonebookStore::import_from`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
  /// New contacts added to the tree.
  pub added:      usize,
  /// Valid records whose name was already present.
  pub duplicates: usize,
  /// Valid records whose phone number failed the prefix rule.
  pub rejected:   usize,
  /// Lines that did not split into exactly two fields.
  pub malformed:  usize,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Operations of the contact directory.
///
/// Not-found and validation outcomes are returned as
/// [`Error`](crate::Error) values; none of them leave the store changed.
pub trait PhonebookStore {
  /// Validate and format `raw_number`, then add a contact under `name`.
  fn insert(&mut self, name: &str, raw_number: &str) -> Result<Insertion>;

  /// Contacts whose name equals or contains `query` (case-insensitive), in
  /// pre-order. Always recorded in the search history.
  fn search_by_name(&mut self, query: &str) -> Vec<Rc<Contact>>;

  /// First contact in pre-order whose stored number equals `number`.
  fn search_by_phone(&mut self, number: &str) -> Option<Rc<Contact>>;

  fn delete(&mut self, name: &str) -> Result<Rc<Contact>>;

  /// Replace `old_name` with `new_name` and a new raw number.
  fn edit(&mut self, old_name: &str, new_name: &str, raw_number: &str)
  -> Result<Edit>;

  /// Every contact in name order.
  fn traverse_all(&self) -> Vec<Rc<Contact>>;

  /// Write every contact in name order; returns how many were written.
  fn export_to(&self, path: &Path) -> Result<usize>;

  fn import_from(&mut self, path: &Path) -> Result<ImportSummary>;

  /// The rule raw numbers are checked and formatted with.
  fn phone_rule(&self) -> &PhoneRule;

  fn usage_report(&self) -> &UsageRecord;

  fn history_report(&self) -> &SearchHistory;

  /// Every contact, stable-sorted by `key` starting from name order.
  fn sort_by(&self, key: SortKey) -> Vec<Rc<Contact>>;
}

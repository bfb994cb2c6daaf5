//! Append-only logs kept alongside the directory tree.
//!
//! Usage entries hold the same `Rc<Contact>` the tree holds. Contacts are
//! never mutated after insertion, so an entry always shows the contact as it
//! was when it was found, even after the contact is deleted.

use std::{collections::HashMap, rc::Rc};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::contact::Contact;

/// An ordered log that only grows.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct AppendLog<T> {
  entries: Vec<T>,
}

impl<T> Default for AppendLog<T> {
  fn default() -> Self { Self { entries: Vec::new() } }
}

impl<T> AppendLog<T> {
  pub(crate) fn push(&mut self, entry: T) { self.entries.push(entry); }

  pub fn entries(&self) -> &[T] { &self.entries }

  pub fn iter(&self) -> std::slice::Iter<'_, T> { self.entries.iter() }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl<'a, T> IntoIterator for &'a AppendLog<T> {
  type IntoIter = std::slice::Iter<'a, T>;
  type Item = &'a T;

  fn into_iter(self) -> Self::IntoIter { self.iter() }
}

// ─── Search history ──────────────────────────────────────────────────────────

/// One search-by-name call, recorded whether or not anything matched.
#[derive(Debug, Clone, Serialize)]
pub struct SearchEntry {
  pub query:       String,
  pub recorded_at: DateTime<Utc>,
}

pub type SearchHistory = AppendLog<SearchEntry>;

impl SearchHistory {
  pub(crate) fn record(&mut self, query: &str) {
    self.push(SearchEntry {
      query:       query.to_owned(),
      recorded_at: Utc::now(),
    });
  }
}

// ─── Usage record ────────────────────────────────────────────────────────────

/// How a contact was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lookup {
  Name,
  Phone,
}

/// One contact returned by a successful search.
#[derive(Debug, Clone, Serialize)]
pub struct UsageEntry {
  pub contact:     Rc<Contact>,
  pub lookup:      Lookup,
  pub recorded_at: DateTime<Utc>,
}

pub type UsageRecord = AppendLog<UsageEntry>;

impl UsageRecord {
  pub(crate) fn record(&mut self, contact: &Rc<Contact>, lookup: Lookup) {
    self.push(UsageEntry {
      contact: Rc::clone(contact),
      lookup,
      recorded_at: Utc::now(),
    });
  }

  /// Number of uses per contact, most used first.
  ///
  /// Contacts are told apart by allocation, so a contact that was deleted
  /// and re-inserted is counted separately. Ties keep first-use order.
  pub fn counts(&self) -> Vec<(Rc<Contact>, usize)> {
    let mut index: HashMap<*const Contact, usize> = HashMap::new();
    let mut counts: Vec<(Rc<Contact>, usize)> = Vec::new();

    for entry in self {
      let slot = *index.entry(Rc::as_ptr(&entry.contact)).or_insert_with(|| {
        counts.push((Rc::clone(&entry.contact), 0));
        counts.len() - 1
      });
      counts[slot].1 += 1;
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
  }
}

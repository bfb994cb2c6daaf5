//! [`Directory`] — the in-memory implementation of [`PhonebookStore`].

use std::{
  cmp::Ordering,
  fs::File,
  io::{BufReader, BufWriter, Write as _},
  path::Path,
  rc::Rc,
};

use crate::{
  Error, Result,
  codec,
  contact::{Contact, name_matches},
  log::{Lookup, SearchHistory, UsageRecord},
  phone::PhoneRule,
  store::{Edit, ImportSummary, PhonebookStore, SortKey},
  tree::{self, InOrder, Insertion, PreOrder, Subtree},
};

// ─── Directory ───────────────────────────────────────────────────────────────

/// A binary search tree of contacts keyed on case-insensitive name, plus the
/// search history and usage record.
///
/// The tree is never rebalanced. Holding `Rc` handles makes the directory
/// `!Send`; it is meant to be owned by a single caller.
#[derive(Debug, Default)]
pub struct Directory {
  root:    Subtree,
  len:     usize,
  rule:    PhoneRule,
  history: SearchHistory,
  usage:   UsageRecord,
}

impl Directory {
  pub fn new() -> Self { Self::default() }

  pub fn with_rule(rule: PhoneRule) -> Self {
    Self {
      root: None,
      len: 0,
      rule,
      history: SearchHistory::default(),
      usage: UsageRecord::default(),
    }
  }

  pub fn len(&self) -> usize { self.len }

  pub fn is_empty(&self) -> bool { self.root.is_none() }

  /// Longest root-to-leaf path. Equals `len()` when names were inserted in
  /// sorted order.
  pub fn height(&self) -> usize { tree::height(&self.root) }

  /// Contacts in name order, without cloning.
  pub fn iter(&self) -> InOrder<'_> { InOrder::new(self.root.as_deref()) }

  fn pre_order(&self) -> PreOrder<'_> { PreOrder::new(self.root.as_deref()) }

  /// Every contact, stable-sorted by `compare` starting from name order.
  pub fn sorted_by<F>(&self, mut compare: F) -> Vec<Rc<Contact>>
  where
    F: FnMut(&Contact, &Contact) -> Ordering,
  {
    let mut contacts = self.traverse_all();
    contacts.sort_by(|a, b| compare(a.as_ref(), b.as_ref()));
    contacts
  }

  /// Times each contact was returned by a search, most used first.
  pub fn usage_counts(&self) -> Vec<(Rc<Contact>, usize)> { self.usage.counts() }

  fn insert_formatted(&mut self, name: &str, formatted: String) -> Insertion {
    let insertion = tree::insert(&mut self.root, Contact::new(name, formatted));
    match &insertion {
      Insertion::Added(contact) => {
        self.len += 1;
        tracing::debug!(name, phone = contact.phone_number(), "contact added");
      }
      Insertion::Duplicate(existing) => {
        tracing::debug!(
          name,
          existing = existing.name(),
          "name already present; insert ignored"
        );
      }
    }
    insertion
  }

  /// Insert every readable record. Lines are already in memory, so nothing
  /// here can fail partway.
  fn import_lines(&mut self, lines: Vec<Option<String>>) -> ImportSummary {
    let mut summary = ImportSummary::default();

    for (index, line) in lines.into_iter().enumerate() {
      let Some(line) = line else {
        tracing::debug!(line = index + 1, "skipping record that is not valid UTF-8");
        summary.malformed += 1;
        continue;
      };
      let Some((name, phone)) = codec::parse_record(&line) else {
        tracing::debug!(line = index + 1, "skipping malformed record");
        summary.malformed += 1;
        continue;
      };

      let raw = self.rule.strip(phone);
      match self.insert(name, &raw) {
        Ok(Insertion::Added(_)) => summary.added += 1,
        Ok(Insertion::Duplicate(_)) => summary.duplicates += 1,
        Err(e) => {
          tracing::warn!(line = index + 1, name, "record rejected: {e}");
          summary.rejected += 1;
        }
      }
    }

    summary
  }
}

impl Drop for Directory {
  fn drop(&mut self) { tree::dismantle(&mut self.root); }
}

// ─── PhonebookStore ──────────────────────────────────────────────────────────

impl PhonebookStore for Directory {
  fn insert(&mut self, name: &str, raw_number: &str) -> Result<Insertion> {
    let formatted = self.rule.format(raw_number)?;
    Ok(self.insert_formatted(name, formatted))
  }

  fn search_by_name(&mut self, query: &str) -> Vec<Rc<Contact>> {
    self.history.record(query);

    let found: Vec<Rc<Contact>> = self
      .pre_order()
      .filter(|c| name_matches(c.name(), query))
      .cloned()
      .collect();

    for contact in &found {
      self.usage.record(contact, Lookup::Name);
    }
    tracing::debug!(query, matches = found.len(), "searched by name");
    found
  }

  fn search_by_phone(&mut self, number: &str) -> Option<Rc<Contact>> {
    let found = self
      .pre_order()
      .find(|c| c.phone_number() == number)
      .cloned()?;
    self.usage.record(&found, Lookup::Phone);
    Some(found)
  }

  fn delete(&mut self, name: &str) -> Result<Rc<Contact>> {
    let removed = tree::remove(&mut self.root, name)
      .ok_or_else(|| Error::NotFound(name.to_owned()))?;
    self.len -= 1;
    tracing::debug!(name = removed.name(), "contact deleted");
    Ok(removed)
  }

  fn edit(
    &mut self,
    old_name: &str,
    new_name: &str,
    raw_number: &str,
  ) -> Result<Edit> {
    let formatted = self.rule.format(raw_number)?;

    let removed = match self.delete(old_name) {
      Ok(contact) => Some(contact),
      Err(Error::NotFound(_)) => {
        tracing::debug!(old_name, "edit target not found; inserting anyway");
        None
      }
      Err(e) => return Err(e),
    };

    let inserted = self.insert_formatted(new_name, formatted);
    Ok(Edit { removed, inserted })
  }

  fn traverse_all(&self) -> Vec<Rc<Contact>> { self.iter().cloned().collect() }

  fn export_to(&self, path: &Path) -> Result<usize> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut out = BufWriter::new(file);

    let mut written = 0;
    for contact in self.iter() {
      codec::write_record(&mut out, contact).map_err(|e| Error::io(path, e))?;
      written += 1;
    }
    out.flush().map_err(|e| Error::io(path, e))?;

    tracing::info!(path = %path.display(), written, "contacts exported");
    Ok(written)
  }

  fn import_from(&mut self, path: &Path) -> Result<ImportSummary> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let lines =
      codec::read_lines(BufReader::new(file)).map_err(|e| Error::io(path, e))?;
    let summary = self.import_lines(lines);

    tracing::info!(
      path = %path.display(),
      added = summary.added,
      duplicates = summary.duplicates,
      rejected = summary.rejected,
      malformed = summary.malformed,
      "contacts imported"
    );
    Ok(summary)
  }

  fn phone_rule(&self) -> &PhoneRule { &self.rule }

  fn usage_report(&self) -> &UsageRecord { &self.usage }

  fn history_report(&self) -> &SearchHistory { &self.history }

  fn sort_by(&self, key: SortKey) -> Vec<Rc<Contact>> {
    self.sorted_by(|a, b| key.compare(a, b))
  }
}

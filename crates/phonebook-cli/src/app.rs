//! Menu dispatcher: reads a choice and its fields, calls the store, prints.

use std::{
  io::{self, BufRead, Write},
  path::Path,
  rc::Rc,
};

use chrono::Local;
use phonebook_core::{
  Contact, Error, PhonebookStore,
  store::SortKey,
  tree::Insertion,
};

use crate::menu::{Choice, MENU};

/// Whether the loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
  Continue,
  Exit,
}

/// The interactive session. Generic over its input and output so the loop can
/// be driven from a script in tests.
pub struct App<S, R, W> {
  store:  S,
  input:  R,
  output: W,
}

impl<S, R, W> App<S, R, W>
where
  S: PhonebookStore,
  R: BufRead,
  W: Write,
{
  pub fn new(store: S, input: R, output: W) -> Self {
    Self {
      store,
      input,
      output,
    }
  }

  pub fn store(&self) -> &S { &self.store }

  #[cfg(test)]
  pub fn into_parts(self) -> (S, W) { (self.store, self.output) }

  /// Run until the user picks Exit or input ends.
  pub fn run(&mut self) -> io::Result<()> {
    loop {
      writeln!(self.output, "\n{MENU}")?;
      let Some(line) = self.read_line()? else {
        break;
      };

      let flow = match Choice::parse(&line) {
        Some(choice) => self.dispatch(choice)?,
        None => {
          writeln!(self.output, "Invalid choice, please try again.")?;
          Flow::Continue
        }
      };
      if flow == Flow::Exit {
        break;
      }
    }
    Ok(())
  }

  fn dispatch(&mut self, choice: Choice) -> io::Result<Flow> {
    tracing::trace!(?choice, "dispatching");
    match choice {
      Choice::Insert => self.insert(),
      Choice::Search => self.search(),
      Choice::DisplayAll => {
        self.display_all()?;
        Ok(Flow::Continue)
      }
      Choice::Delete => self.delete(),
      Choice::Edit => self.edit(),
      Choice::SearchByPhone => self.search_by_phone(),
      Choice::UsageStats => {
        self.usage_stats()?;
        Ok(Flow::Continue)
      }
      Choice::SearchHistory => {
        self.search_history()?;
        Ok(Flow::Continue)
      }
      Choice::SortByName => {
        self.sorted(SortKey::Name, "Contacts Sorted by Name:")?;
        Ok(Flow::Continue)
      }
      Choice::SortByPhone => {
        self.sorted(SortKey::Phone, "Contacts Sorted by Phone Number:")?;
        Ok(Flow::Continue)
      }
      Choice::Import => self.import(),
      Choice::Export => self.export(),
      Choice::Exit => {
        writeln!(self.output, "Exiting the phonebook application.")?;
        Ok(Flow::Exit)
      }
    }
  }

  // ── Commands ──────────────────────────────────────────────────────────────

  fn insert(&mut self) -> io::Result<Flow> {
    let Some(name) = self.prompt("Enter name: ")? else {
      return Ok(Flow::Exit);
    };
    let Some(raw) = self.prompt_number("Enter phone number")? else {
      return Ok(Flow::Exit);
    };

    match self.store.insert(&name, &raw) {
      Ok(Insertion::Added(contact)) => writeln!(
        self.output,
        "Contact added: {} ({})",
        contact.name(),
        contact.phone_number()
      )?,
      Ok(Insertion::Duplicate(existing)) => {
        writeln!(self.output, "Contact already exists: {existing}")?
      }
      Err(e) => self.report(&e)?,
    }
    Ok(Flow::Continue)
  }

  fn search(&mut self) -> io::Result<Flow> {
    let Some(query) = self.prompt("Enter name to search: ")? else {
      return Ok(Flow::Exit);
    };

    let found = self.store.search_by_name(&query);
    if found.is_empty() {
      writeln!(self.output, "No contacts found.")?;
    } else {
      writeln!(self.output, "Found Contacts:")?;
      self.print_contacts(&found)?;
    }
    Ok(Flow::Continue)
  }

  fn display_all(&mut self) -> io::Result<()> {
    let all = self.store.traverse_all();
    if all.is_empty() {
      writeln!(self.output, "No contacts available.")
    } else {
      self.print_contacts(&all)
    }
  }

  fn delete(&mut self) -> io::Result<Flow> {
    let Some(name) = self.prompt("Enter name to delete: ")? else {
      return Ok(Flow::Exit);
    };
    if let Err(e) = self.store.delete(&name) {
      self.report(&e)?;
    }
    Ok(Flow::Continue)
  }

  fn edit(&mut self) -> io::Result<Flow> {
    let Some(old_name) = self.prompt("Enter name of contact to edit: ")? else {
      return Ok(Flow::Exit);
    };
    let Some(new_name) = self.prompt("Enter new name: ")? else {
      return Ok(Flow::Exit);
    };
    let Some(raw) = self.prompt_number("Enter new phone number")? else {
      return Ok(Flow::Exit);
    };

    match self.store.edit(&old_name, &new_name, &raw) {
      Ok(edit) => {
        if edit.removed.is_none() {
          writeln!(self.output, "Contact not found.")?;
        }
        writeln!(self.output, "Contact updated: {old_name}")?;
      }
      Err(e) => self.report(&e)?,
    }
    Ok(Flow::Continue)
  }

  fn search_by_phone(&mut self) -> io::Result<Flow> {
    let Some(number) = self.prompt("Enter phone number to search: ")? else {
      return Ok(Flow::Exit);
    };

    match self.store.search_by_phone(&number) {
      Some(contact) => writeln!(self.output, "Found Contact: {contact}")?,
      None => writeln!(self.output, "No contact found with that phone number.")?,
    }
    Ok(Flow::Continue)
  }

  fn usage_stats(&mut self) -> io::Result<()> {
    let usage = self.store.usage_report();
    if usage.is_empty() {
      return writeln!(self.output, "No usage statistics available.");
    }

    writeln!(self.output, "Contact Usage Statistics:")?;
    for entry in usage {
      writeln!(self.output, "{}", entry.contact)?;
    }

    writeln!(self.output, "Most Used:")?;
    for (contact, count) in usage.counts() {
      writeln!(self.output, "{count:>4}  {contact}")?;
    }
    Ok(())
  }

  fn search_history(&mut self) -> io::Result<()> {
    let history = self.store.history_report();
    if history.is_empty() {
      return writeln!(self.output, "No search history available.");
    }

    writeln!(self.output, "Search History:")?;
    for entry in history {
      let at = entry.recorded_at.with_timezone(&Local).format("%H:%M:%S");
      writeln!(self.output, "[{at}] {}", entry.query)?;
    }
    Ok(())
  }

  fn sorted(&mut self, key: SortKey, header: &str) -> io::Result<()> {
    let sorted = self.store.sort_by(key);
    writeln!(self.output, "{header}")?;
    self.print_contacts(&sorted)
  }

  fn import(&mut self) -> io::Result<Flow> {
    let Some(path) = self.prompt("Enter file name to import: ")? else {
      return Ok(Flow::Exit);
    };

    match self.store.import_from(Path::new(&path)) {
      Ok(summary) => {
        if summary.rejected > 0 {
          writeln!(
            self.output,
            "Skipped {} record(s) with an invalid phone number.",
            summary.rejected
          )?;
        }
        writeln!(self.output, "Contacts imported from file {path}")?;
      }
      Err(Error::Io { .. }) => {
        writeln!(self.output, "Error importing contacts from file.")?
      }
      Err(e) => self.report(&e)?,
    }
    Ok(Flow::Continue)
  }

  fn export(&mut self) -> io::Result<Flow> {
    let Some(path) = self.prompt("Enter file name to export to: ")? else {
      return Ok(Flow::Exit);
    };

    match self.store.export_to(Path::new(&path)) {
      Ok(_) => writeln!(self.output, "Contacts exported to file {path}")?,
      Err(Error::Io { .. }) => {
        writeln!(self.output, "Error exporting contacts to file.")?
      }
      Err(e) => self.report(&e)?,
    }
    Ok(Flow::Continue)
  }

  // ── Helpers ───────────────────────────────────────────────────────────────

  fn print_contacts(&mut self, contacts: &[Rc<Contact>]) -> io::Result<()> {
    for contact in contacts {
      writeln!(self.output, "{contact}")?;
    }
    Ok(())
  }

  /// Print the user-facing message for a store error.
  fn report(&mut self, error: &Error) -> io::Result<()> {
    tracing::debug!("{error}");
    match error {
      Error::InvalidPrefix { prefix, .. } => {
        writeln!(self.output, "Error: Phone number must start with '{prefix}'.")
      }
      Error::NotFound(_) => writeln!(self.output, "Contact not found."),
      Error::Io { .. } => writeln!(self.output, "Error: {error}"),
    }
  }

  fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
    write!(self.output, "{label}")?;
    self.output.flush()?;
    self.read_line()
  }

  /// Prompt for a raw number, showing the prefix the store requires.
  fn prompt_number(&mut self, label: &str) -> io::Result<Option<String>> {
    let prefix = &self.store.phone_rule().required_prefix;
    let label = format!("{label} ({prefix}xxxxxxx): ");
    self.prompt(&label)
  }

  /// Read one line without its terminator; `None` at end of input.
  fn read_line(&mut self) -> io::Result<Option<String>> {
    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      return Ok(None);
    }
    Ok(Some(
      line
        .trim_end_matches('\n')
        .trim_end_matches('\r')
        .to_string(),
    ))
  }
}

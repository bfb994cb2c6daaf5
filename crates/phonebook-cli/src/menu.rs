//! Menu text and choice parsing.

pub const MENU: &str = "\
Phonebook Menu:
1. Insert Contact
2. Search Contact
3. Display All Contacts
4. Delete Contact
5. Edit Contact
6. Search by Phone Number
7. Display Usage Stats
8. Display Search History
9. Sort Contacts by Name
10. Sort Contacts by Phone Number
11. Import Contacts
12. Export Contacts
13. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
  Insert,
  Search,
  DisplayAll,
  Delete,
  Edit,
  SearchByPhone,
  UsageStats,
  SearchHistory,
  SortByName,
  SortByPhone,
  Import,
  Export,
  Exit,
}

impl Choice {
  /// Parse a menu number. Surrounding whitespace is ignored.
  pub fn parse(input: &str) -> Option<Self> {
    let choice = match input.trim().parse::<u8>().ok()? {
      1 => Self::Insert,
      2 => Self::Search,
      3 => Self::DisplayAll,
      4 => Self::Delete,
      5 => Self::Edit,
      6 => Self::SearchByPhone,
      7 => Self::UsageStats,
      8 => Self::SearchHistory,
      9 => Self::SortByName,
      10 => Self::SortByPhone,
      11 => Self::Import,
      12 => Self::Export,
      13 => Self::Exit,
      _ => return None,
    };
    Some(choice)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_every_entry() {
    assert_eq!(Choice::parse("1"), Some(Choice::Insert));
    assert_eq!(Choice::parse(" 10 "), Some(Choice::SortByPhone));
    assert_eq!(Choice::parse("13"), Some(Choice::Exit));
  }

  #[test]
  fn rejects_unknown_input() {
    assert_eq!(Choice::parse("0"), None);
    assert_eq!(Choice::parse("14"), None);
    assert_eq!(Choice::parse("two"), None);
    assert_eq!(Choice::parse(""), None);
  }

  #[test]
  fn menu_lists_thirteen_entries() {
    assert_eq!(MENU.lines().count(), 14);
  }
}

//! The persisted line format: one `name,phoneNumber` record per line.
//!
//! There is no header and no escaping. A name containing a comma does not
//! survive a round trip.

use std::io::{self, BufRead, Write};

use crate::contact::Contact;

pub const SEPARATOR: char = ',';

/// Write one record, newline-terminated.
pub fn write_record<W: Write>(out: &mut W, contact: &Contact) -> io::Result<()> {
  writeln!(out, "{}{SEPARATOR}{}", contact.name(), contact.phone_number())
}

/// Read every line without its terminator. A line that is not valid UTF-8
/// comes back as `None` instead of failing the whole read.
pub fn read_lines<R: BufRead>(mut reader: R) -> io::Result<Vec<Option<String>>> {
  let mut lines = Vec::new();
  let mut buf = Vec::new();
  while reader.read_until(b'\n', &mut buf)? > 0 {
    if buf.ends_with(b"\n") {
      buf.pop();
      if buf.ends_with(b"\r") {
        buf.pop();
      }
    }
    lines.push(String::from_utf8(std::mem::take(&mut buf)).ok());
  }
  Ok(lines)
}

/// Split a line into `(name, phone)`.
///
/// Trailing empty fields are dropped before counting, so `"a,b,"` is a valid
/// record and `"a,"` is not. Anything other than exactly two fields yields
/// `None`.
pub fn parse_record(line: &str) -> Option<(&str, &str)> {
  let mut fields: Vec<&str> = line.split(SEPARATOR).collect();
  while fields.last().is_some_and(|f| f.is_empty()) {
    fields.pop();
  }
  match fields.as_slice() {
    [name, phone] => Some((name, phone)),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn writes_one_line() {
    let mut out = Vec::new();
    write_record(&mut out, &Contact::new("Alice", "+264811234567")).unwrap();
    assert_eq!(out, b"Alice,+264811234567\n");
  }

  #[test]
  fn reads_lines_and_flags_bad_utf8() {
    let input: &[u8] = b"Alice,811\r\nBj\xF6rn,812\nCarol,813";
    let lines = read_lines(input).unwrap();
    assert_eq!(lines, [
      Some("Alice,811".to_owned()),
      None,
      Some("Carol,813".to_owned()),
    ]);
  }

  #[test]
  fn parses_two_fields() {
    assert_eq!(parse_record("Alice,+264811"), Some(("Alice", "+264811")));
  }

  #[test]
  fn keeps_surrounding_whitespace() {
    assert_eq!(parse_record(" Alice , 811"), Some((" Alice ", " 811")));
  }

  #[test]
  fn trailing_separator_is_ignored() {
    assert_eq!(parse_record("Alice,811,"), Some(("Alice", "811")));
    assert_eq!(parse_record("Alice,811,,"), Some(("Alice", "811")));
  }

  #[test]
  fn wrong_field_counts_are_rejected() {
    assert_eq!(parse_record(""), None);
    assert_eq!(parse_record("Alice"), None);
    assert_eq!(parse_record("Alice,"), None);
    assert_eq!(parse_record("Smith, Alice,811"), None);
  }

  #[test]
  fn leading_empty_field_counts() {
    assert_eq!(parse_record(",811"), Some(("", "811")));
  }
}

//! The phone-number acceptance and formatting rule.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const DEFAULT_COUNTRY_CODE: &str = "+264";
pub const DEFAULT_REQUIRED_PREFIX: &str = "81";

/// Raw numbers must start with `required_prefix`; stored numbers are
/// `country_code` followed by the raw digits.
///
/// No length or digit-only check is performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneRule {
  pub country_code:    String,
  pub required_prefix: String,
}

impl Default for PhoneRule {
  fn default() -> Self {
    Self {
      country_code:    DEFAULT_COUNTRY_CODE.to_owned(),
      required_prefix: DEFAULT_REQUIRED_PREFIX.to_owned(),
    }
  }
}

impl PhoneRule {
  pub fn validate(&self, raw: &str) -> Result<()> {
    if raw.starts_with(&self.required_prefix) {
      Ok(())
    } else {
      Err(Error::InvalidPrefix {
        number: raw.to_owned(),
        prefix: self.required_prefix.clone(),
      })
    }
  }

  /// Validate `raw` and return the stored form.
  pub fn format(&self, raw: &str) -> Result<String> {
    self.validate(raw)?;
    Ok(format!("{}{raw}", self.country_code))
  }

  /// Remove every occurrence of the country code, recovering raw digits from
  /// a stored number.
  pub fn strip(&self, stored: &str) -> String {
    if self.country_code.is_empty() {
      return stored.to_owned();
    }
    stored.replace(&self.country_code, "")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn formats_accepted_number() {
    let rule = PhoneRule::default();
    assert_eq!(rule.format("811234567").unwrap(), "+264811234567");
  }

  #[test]
  fn rejects_wrong_prefix() {
    let rule = PhoneRule::default();
    let err = rule.format("712345678").unwrap_err();
    assert!(matches!(err, Error::InvalidPrefix { ref prefix, .. } if prefix == "81"));
  }

  #[test]
  fn no_length_or_digit_check() {
    let rule = PhoneRule::default();
    assert_eq!(rule.format("81").unwrap(), "+26481");
    assert_eq!(rule.format("81abc").unwrap(), "+26481abc");
  }

  #[test]
  fn already_prefixed_number_is_rejected() {
    let rule = PhoneRule::default();
    assert!(rule.validate("+264819999999").is_err());
  }

  #[test]
  fn strip_removes_every_country_code() {
    let rule = PhoneRule::default();
    assert_eq!(rule.strip("+264811234567"), "811234567");
    assert_eq!(rule.strip("+264+264811"), "811");
    assert_eq!(rule.strip("811"), "811");
  }

  #[test]
  fn custom_rule() {
    let rule = PhoneRule {
      country_code:    "+27".into(),
      required_prefix: "82".into(),
    };
    assert_eq!(rule.format("821111").unwrap(), "+27821111");
    assert!(rule.validate("811111").is_err());
  }
}

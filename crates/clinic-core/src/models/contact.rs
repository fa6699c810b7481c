//! Patient demographic and contact fields.

use std::fmt;

use super::{ValidationError, ValidationResult};

/// Minimum number of digits in a phone number.
const MIN_PHONE_DIGITS: usize = 3;

/// Special characters allowed inside the local part of an email.
const EMAIL_LOCAL_SPECIALS: [char; 4] = ['+', '_', '.', '-'];

/// A patient's display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name(String);

impl Name {
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let trimmed = raw.trim();
        let allowed = |c: char| c.is_alphanumeric() || matches!(c, ' ' | '\'' | '-' | '.' | '/');
        if !trimmed.chars().any(char::is_alphanumeric) || !trimmed.chars().all(allowed) {
            return Err(ValidationError::Name(raw.to_string()));
        }
        // Collapse runs of whitespace so "John  Doe" and "John Doe" compare equal.
        let normalized = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-separated words of the name.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ')
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A contact phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let trimmed = raw.trim();
        if trimmed.len() < MIN_PHONE_DIGITS || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::Phone(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A contact email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let trimmed = raw.trim();
        if !is_valid_email(trimmed) {
            return Err(ValidationError::Email(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_valid_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    let (Some(first), Some(last)) = (local.chars().next(), local.chars().last()) else {
        return false;
    };
    first.is_ascii_alphanumeric()
        && last.is_ascii_alphanumeric()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || EMAIL_LOCAL_SPECIALS.contains(&c))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let valid_label = |label: &&str| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    labels.iter().all(valid_label) && labels.last().is_some_and(|tld| tld.len() >= 2)
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn parse(raw: &str) -> ValidationResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Address);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_normalizes_whitespace() {
        let name = Name::parse("  Alex   Yeoh ").unwrap();
        assert_eq!(name.as_str(), "Alex Yeoh");
        assert_eq!(name.words().collect::<Vec<_>>(), vec!["Alex", "Yeoh"]);
    }

    #[test]
    fn test_name_allows_common_punctuation() {
        assert!(Name::parse("Mary-Jane O'Neil").is_ok());
        assert!(Name::parse("Ravi s/o Kumar").is_ok());
        assert!(Name::parse("Dr. Tan").is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert!(Name::parse("").is_err());
        assert!(Name::parse("   ").is_err());
        assert!(Name::parse("---").is_err());
        assert!(Name::parse("John*").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(Phone::parse("911").is_ok());
        assert!(Phone::parse("98765432").is_ok());
        assert!(Phone::parse("91").is_err());
        assert!(Phone::parse("9011p041").is_err());
        assert!(Phone::parse("9312 1534").is_err());
    }

    #[test]
    fn test_valid_emails() {
        assert!(Email::parse("alexyeoh@example.com").is_ok());
        assert!(Email::parse("a+b_c.d-e@sub.example-domain.sg").is_ok());
        assert!(Email::parse("PeterJack_1190@example.com").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert!(Email::parse("").is_err());
        assert!(Email::parse("@example.com").is_err());
        assert!(Email::parse("peterjack@").is_err());
        assert!(Email::parse("peterjack.example.com").is_err());
        assert!(Email::parse(".peter@example.com").is_err());
        assert!(Email::parse("peter@-example.com").is_err());
        assert!(Email::parse("peter@example.c").is_err());
        assert!(Email::parse("peter@exa mple.com").is_err());
    }

    #[test]
    fn test_address() {
        assert_eq!(
            Address::parse(" Blk 30 Geylang Street 29, #06-40 ").unwrap().as_str(),
            "Blk 30 Geylang Street 29, #06-40"
        );
        assert!(Address::parse("   ").is_err());
    }
}

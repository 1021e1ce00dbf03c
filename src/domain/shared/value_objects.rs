use serde::{Deserialize, Serialize};

use super::constraints::{MAX_DESCRIPTION_LENGTH, MAX_LOW_TEXT_LENGTH, MAX_PHONE_LENGTH};
use super::{validated_text, DomainError, DomainResult};

// ============================================================================
// Value Objects shared by volunteers and pets
// ============================================================================

/// Digits with an optional leading `+`, separators stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(phone: &str) -> DomainResult<Self> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(DomainError::required("phone number"));
        }

        let (prefix, rest) = match phone.strip_prefix('+') {
            Some(rest) => ("+", rest),
            None => ("", phone),
        };

        let mut digits = String::with_capacity(rest.len());
        for c in rest.chars() {
            match c {
                '0'..='9' => digits.push(c),
                ' ' | '-' | '(' | ')' => {}
                _ => return Err(DomainError::invalid("phone number")),
            }
        }

        if digits.len() < 5 || digits.len() > MAX_PHONE_LENGTH {
            return Err(DomainError::invalid("phone number"));
        }

        Ok(Self(format!("{prefix}{digits}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Payment details a donor can use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requisite {
    pub title: String,
    pub description: String,
}

impl Requisite {
    pub fn new(title: &str, description: &str) -> DomainResult<Self> {
        Ok(Self {
            title: validated_text(title, "requisite title", MAX_LOW_TEXT_LENGTH)?,
            description: validated_text(description, "requisite description", MAX_DESCRIPTION_LENGTH)?,
        })
    }
}

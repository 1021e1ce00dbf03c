use serde::{Deserialize, Serialize};

use crate::domain::shared::constraints::{
    MAX_DESCRIPTION_LENGTH, MAX_LOW_TEXT_LENGTH, MAX_WORK_EXPERIENCE_YEARS,
};
use crate::domain::shared::{validated_text, DomainError, DomainResult};

// ============================================================================
// Volunteer Value Objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullName {
    pub first_name: String,
    pub second_name: String,
    pub patronymic: Option<String>,
}

impl FullName {
    pub fn new(first_name: &str, second_name: &str, patronymic: Option<&str>) -> DomainResult<Self> {
        let patronymic = match patronymic.map(str::trim) {
            Some(p) if !p.is_empty() => Some(validated_text(p, "patronymic", MAX_LOW_TEXT_LENGTH)?),
            _ => None,
        };

        Ok(Self {
            first_name: validated_text(first_name, "first name", MAX_LOW_TEXT_LENGTH)?,
            second_name: validated_text(second_name, "second name", MAX_LOW_TEXT_LENGTH)?,
            patronymic,
        })
    }
}

/// Volunteer email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(email: &str) -> DomainResult<Self> {
        let email = validated_text(email, "email", MAX_LOW_TEXT_LENGTH)?;

        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !domain.contains('@')
            }
            None => false,
        };
        if !valid {
            return Err(DomainError::invalid("email"));
        }

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerDescription(String);

impl VolunteerDescription {
    pub fn new(description: &str) -> DomainResult<Self> {
        Ok(Self(validated_text(description, "description", MAX_DESCRIPTION_LENGTH)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Years of volunteering experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience(u32);

impl WorkExperience {
    pub fn new(years: u32) -> DomainResult<Self> {
        if years > MAX_WORK_EXPERIENCE_YEARS {
            return Err(DomainError::invalid("work experience"));
        }
        Ok(Self(years))
    }

    pub fn years(&self) -> u32 {
        self.0
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::shared::constraints::{MAX_DESCRIPTION_LENGTH, MAX_LOW_TEXT_LENGTH};
use crate::domain::shared::{validated_text, DomainError, DomainResult};

// ============================================================================
// Pet Value Objects
// ============================================================================

/// Pet name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(String);

impl Name {
    pub fn new(name: &str) -> DomainResult<Self> {
        Ok(Self(validated_text(name, "name", MAX_LOW_TEXT_LENGTH)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetPhysicCharacteristics {
    pub color: String,
    pub health_information: String,
    pub weight: f64,
    pub height: f64,
    pub is_castrated: bool,
    pub is_vaccinated: bool,
}

impl PetPhysicCharacteristics {
    pub fn new(
        color: &str,
        health_information: &str,
        weight: f64,
        height: f64,
        is_castrated: bool,
        is_vaccinated: bool,
    ) -> DomainResult<Self> {
        let color = validated_text(color, "color", MAX_LOW_TEXT_LENGTH)?;
        let health_information =
            validated_text(health_information, "health information", MAX_DESCRIPTION_LENGTH)?;

        if !weight.is_finite() || weight <= 0.0 {
            return Err(DomainError::invalid("weight"));
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(DomainError::invalid("height"));
        }

        Ok(Self {
            color,
            health_information,
            weight,
            height,
            is_castrated,
            is_vaccinated,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetDetails {
    pub description: String,
    pub birth_date: NaiveDate,
    pub creation_time: DateTime<Utc>,
}

impl PetDetails {
    /// Birth date may not lie in the future
    pub fn new(
        description: &str,
        birth_date: NaiveDate,
        creation_time: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let description = validated_text(description, "description", MAX_DESCRIPTION_LENGTH)?;

        if birth_date > Utc::now().date_naive() {
            return Err(DomainError::invalid("birth date"));
        }

        Ok(Self {
            description,
            birth_date,
            creation_time,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl Address {
    pub fn new(street: &str, city: &str, state: &str, zip_code: &str) -> DomainResult<Self> {
        Ok(Self {
            street: validated_text(street, "street", MAX_LOW_TEXT_LENGTH)?,
            city: validated_text(city, "city", MAX_LOW_TEXT_LENGTH)?,
            state: validated_text(state, "state", MAX_LOW_TEXT_LENGTH)?,
            zip_code: validated_text(zip_code, "zip code", MAX_LOW_TEXT_LENGTH)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HelpStatus {
    NeedsHelp,
    SearchingHome,
    FoundHome,
}

/// Species and breed references owned by the breed context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimalType {
    pub species_id: Uuid,
    pub breed_id: Uuid,
}

impl AnimalType {
    pub fn new(species_id: Uuid, breed_id: Uuid) -> DomainResult<Self> {
        if species_id.is_nil() {
            return Err(DomainError::required("species id"));
        }
        if breed_id.is_nil() {
            return Err(DomainError::required("breed id"));
        }
        Ok(Self {
            species_id,
            breed_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetPhoto {
    pub path: String,
    pub is_main: bool,
}

impl PetPhoto {
    pub fn new(path: &str) -> DomainResult<Self> {
        Ok(Self {
            path: validated_text(path, "photo path", MAX_LOW_TEXT_LENGTH)?,
            is_main: false,
        })
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::shared::{DomainError, DomainResult, PetId, PhoneNumber, Requisite};
use super::position::Position;
use super::value_objects::{
    Address, AnimalType, HelpStatus, Name, PetDetails, PetPhoto, PetPhysicCharacteristics,
};

// ============================================================================
// Pet Entity - child of the Volunteer aggregate
// ============================================================================
//
// A pet only exposes narrow position primitives. Which pets shift, and in
// what order, is decided by the owning Volunteer.
//
// ============================================================================

/// Descriptive attributes of a pet, irrelevant to ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetProfile {
    pub name: Name,
    pub physic_characteristics: PetPhysicCharacteristics,
    pub details: PetDetails,
    pub address: Address,
    pub phone_number: PhoneNumber,
    pub help_status: HelpStatus,
    pub animal_type: AnimalType,
    pub requisites: Vec<Requisite>,
}

/// Partial update: only `Some` fields replace the current values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PetUpdate {
    pub name: Option<Name>,
    pub physic_characteristics: Option<PetPhysicCharacteristics>,
    pub details: Option<PetDetails>,
    pub address: Option<Address>,
    pub phone_number: Option<PhoneNumber>,
    pub help_status: Option<HelpStatus>,
    pub animal_type: Option<AnimalType>,
    pub requisites: Option<Vec<Requisite>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    id: PetId,
    position: Option<Position>,
    is_deleted: bool,
    deletion_date: Option<DateTime<Utc>>,
    profile: PetProfile,
    photos: Vec<PetPhoto>,
}

impl Pet {
    /// Creates a detached pet; it gets a position once added to a volunteer
    pub fn new(id: PetId, profile: PetProfile) -> Self {
        Self {
            id,
            position: None,
            is_deleted: false,
            deletion_date: None,
            profile,
            photos: Vec::new(),
        }
    }

    pub fn id(&self) -> PetId {
        self.id
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    pub fn deletion_date(&self) -> Option<DateTime<Utc>> {
        self.deletion_date
    }

    pub fn profile(&self) -> &PetProfile {
        &self.profile
    }

    pub fn help_status(&self) -> HelpStatus {
        self.profile.help_status
    }

    pub fn photos(&self) -> &[PetPhoto] {
        &self.photos
    }

    pub fn main_photo(&self) -> Option<&PetPhoto> {
        self.photos.iter().find(|p| p.is_main)
    }

    // ------------------------------------------------------------------
    // Position primitives (owner only)
    // ------------------------------------------------------------------

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = Some(position);
    }

    pub(crate) fn reset_position(&mut self, position: Option<Position>) {
        self.position = position;
    }

    pub(crate) fn move_forward(&mut self) -> DomainResult<()> {
        let current = self.position.ok_or_else(|| DomainError::invalid("position"))?;
        self.position = Some(current.forward()?);
        Ok(())
    }

    pub(crate) fn move_back(&mut self) -> DomainResult<()> {
        let current = self.position.ok_or_else(|| DomainError::invalid("position"))?;
        self.position = Some(current.back()?);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Position is kept as the anchor for the owner's recalculation
    pub(crate) fn delete(&mut self, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deletion_date = Some(at);
    }

    pub(crate) fn restore(&mut self) {
        self.is_deleted = false;
        self.deletion_date = None;
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub(crate) fn update(&mut self, update: PetUpdate) {
        let PetUpdate {
            name,
            physic_characteristics,
            details,
            address,
            phone_number,
            help_status,
            animal_type,
            requisites,
        } = update;

        if let Some(name) = name {
            self.profile.name = name;
        }
        if let Some(physic_characteristics) = physic_characteristics {
            self.profile.physic_characteristics = physic_characteristics;
        }
        if let Some(details) = details {
            self.profile.details = details;
        }
        if let Some(address) = address {
            self.profile.address = address;
        }
        if let Some(phone_number) = phone_number {
            self.profile.phone_number = phone_number;
        }
        if let Some(help_status) = help_status {
            self.profile.help_status = help_status;
        }
        if let Some(animal_type) = animal_type {
            self.profile.animal_type = animal_type;
        }
        if let Some(requisites) = requisites {
            self.profile.requisites = requisites;
        }
    }

    pub(crate) fn update_help_status(&mut self, help_status: HelpStatus) {
        self.profile.help_status = help_status;
    }

    /// Photos already attached (same path) are skipped. Returns how many were added.
    pub(crate) fn add_photos(&mut self, photos: Vec<PetPhoto>) -> usize {
        let mut added = 0;
        for mut photo in photos {
            if self.photos.iter().any(|p| p.path == photo.path) {
                continue;
            }
            photo.is_main = false;
            self.photos.push(photo);
            added += 1;
        }
        added
    }

    /// Exactly one photo is main afterwards
    pub(crate) fn set_main_photo(&mut self, path: &str) -> DomainResult<()> {
        if !self.photos.iter().any(|p| p.path == path) {
            return Err(DomainError::NotFound { id: None });
        }
        for photo in &mut self.photos {
            photo.is_main = photo.path == path;
        }
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::pet::{HelpStatus, Position};
use crate::domain::shared::PetId;
use crate::events::core::{DomainEvent, EventName};

// ============================================================================
// Volunteer Domain Events
// ============================================================================

/// Union type for all volunteer events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum VolunteerEvent {
    PetAdded(PetAdded),
    PetMoved(PetMoved),
    PetSoftDeleted(PetSoftDeleted),
    PetForceDeleted(PetForceDeleted),
    PetRestored(PetRestored),
    ExpiredPetsPurged(ExpiredPetsPurged),
    PetUpdated(PetUpdated),
    PetStatusUpdated(PetStatusUpdated),
    PetPhotosAdded(PetPhotosAdded),
    PetMainPhotoSet(PetMainPhotoSet),
    InfoUpdated(VolunteerInfoUpdated),
    RequisitesUpdated(VolunteerRequisitesUpdated),
    Deleted(VolunteerDeleted),
    Restored(VolunteerRestored),
}

impl EventName for VolunteerEvent {
    fn event_name(&self) -> &'static str {
        match self {
            VolunteerEvent::PetAdded(_) => "PetAdded",
            VolunteerEvent::PetMoved(_) => "PetMoved",
            VolunteerEvent::PetSoftDeleted(_) => "PetSoftDeleted",
            VolunteerEvent::PetForceDeleted(_) => "PetForceDeleted",
            VolunteerEvent::PetRestored(_) => "PetRestored",
            VolunteerEvent::ExpiredPetsPurged(_) => "ExpiredPetsPurged",
            VolunteerEvent::PetUpdated(_) => "PetUpdated",
            VolunteerEvent::PetStatusUpdated(_) => "PetStatusUpdated",
            VolunteerEvent::PetPhotosAdded(_) => "PetPhotosAdded",
            VolunteerEvent::PetMainPhotoSet(_) => "PetMainPhotoSet",
            VolunteerEvent::InfoUpdated(_) => "VolunteerInfoUpdated",
            VolunteerEvent::RequisitesUpdated(_) => "VolunteerRequisitesUpdated",
            VolunteerEvent::Deleted(_) => "VolunteerDeleted",
            VolunteerEvent::Restored(_) => "VolunteerRestored",
        }
    }
}

impl DomainEvent for VolunteerEvent {
    fn event_type() -> &'static str {
        "VolunteerEvent"
    }
}

// Individual event types

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetAdded {
    pub pet_id: PetId,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetMoved {
    pub pet_id: PetId,
    pub from: Position,
    pub to: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetSoftDeleted {
    pub pet_id: PetId,
    pub deletion_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetForceDeleted {
    pub pet_id: PetId,
    pub deletion_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetRestored {
    pub pet_id: PetId,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiredPetsPurged {
    pub pet_ids: Vec<PetId>,
    pub retention_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetUpdated {
    pub pet_id: PetId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetStatusUpdated {
    pub pet_id: PetId,
    pub help_status: HelpStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetPhotosAdded {
    pub pet_id: PetId,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetMainPhotoSet {
    pub pet_id: PetId,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerInfoUpdated {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerRequisitesUpdated {
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerDeleted {
    pub deletion_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolunteerRestored {
    pub restored_pets: Vec<PetId>,
}

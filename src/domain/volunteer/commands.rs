use chrono::{DateTime, Utc};

use crate::domain::pet::{HelpStatus, Pet, PetPhoto, PetUpdate, Position};
use crate::domain::shared::{PetId, PhoneNumber, Requisite};
use super::value_objects::{Email, FullName, VolunteerDescription, WorkExperience};

// ============================================================================
// Volunteer Domain Commands
// ============================================================================

#[derive(Debug, Clone)]
pub enum VolunteerCommand {
    AddPet {
        pet: Box<Pet>,
    },
    MovePet {
        pet_id: PetId,
        new_position: Position,
    },
    DeletePetSoft {
        pet_id: PetId,
        deletion_date: DateTime<Utc>,
    },
    DeletePetForce {
        pet_id: PetId,
        deletion_date: DateTime<Utc>,
    },
    RestorePet {
        pet_id: PetId,
    },
    UpdatePet {
        pet_id: PetId,
        update: Box<PetUpdate>,
    },
    UpdatePetStatus {
        pet_id: PetId,
        help_status: HelpStatus,
    },
    AddPetPhotos {
        pet_id: PetId,
        photos: Vec<PetPhoto>,
    },
    SetMainPhotoOfPet {
        pet_id: PetId,
        path: String,
    },
    UpdateInfo(VolunteerInfoUpdate),
    UpdateRequisites {
        requisites: Vec<Requisite>,
    },
    DeleteVolunteer {
        deletion_date: DateTime<Utc>,
    },
    RestoreVolunteer,
}

impl VolunteerCommand {
    /// Label used for logs and metrics
    pub fn name(&self) -> &'static str {
        match self {
            VolunteerCommand::AddPet { .. } => "add_pet",
            VolunteerCommand::MovePet { .. } => "move_pet",
            VolunteerCommand::DeletePetSoft { .. } => "delete_pet_soft",
            VolunteerCommand::DeletePetForce { .. } => "delete_pet_force",
            VolunteerCommand::RestorePet { .. } => "restore_pet",
            VolunteerCommand::UpdatePet { .. } => "update_pet",
            VolunteerCommand::UpdatePetStatus { .. } => "update_pet_status",
            VolunteerCommand::AddPetPhotos { .. } => "add_pet_photos",
            VolunteerCommand::SetMainPhotoOfPet { .. } => "set_main_photo_of_pet",
            VolunteerCommand::UpdateInfo(_) => "update_info",
            VolunteerCommand::UpdateRequisites { .. } => "update_requisites",
            VolunteerCommand::DeleteVolunteer { .. } => "delete_volunteer",
            VolunteerCommand::RestoreVolunteer => "restore_volunteer",
        }
    }
}

/// Partial update of the volunteer's own attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolunteerInfoUpdate {
    pub full_name: Option<FullName>,
    pub email: Option<Email>,
    pub phone: Option<PhoneNumber>,
    pub description: Option<VolunteerDescription>,
    pub work_experience: Option<WorkExperience>,
}

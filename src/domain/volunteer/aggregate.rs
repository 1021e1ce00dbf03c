use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::pet::{HelpStatus, Pet, PetPhoto, PetUpdate, Position};
use crate::domain::shared::{DomainError, DomainResult, ErrorList, PetId, PhoneNumber, Requisite, VolunteerId};
use crate::events::core::AggregateRoot;
use super::commands::{VolunteerCommand, VolunteerInfoUpdate};
use super::events::*;
use super::value_objects::{Email, FullName, VolunteerDescription, WorkExperience};

// ============================================================================
// Volunteer Aggregate - owner of the ordered pet collection
// ============================================================================
//
// Invariant after every successful mutation: positions of the pets that are
// not soft-deleted form exactly 1..K, K being their count. Soft-deleted pets
// keep the stale position they held when deleted and take no part in the
// ordering until restored.
//
// A failed operation leaves the aggregate exactly as it was.
//
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Step {
    Forward,
    Back,
}

/// Unvalidated registration input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VolunteerDraft {
    pub first_name: String,
    pub second_name: String,
    pub patronymic: Option<String>,
    pub email: String,
    pub phone: String,
    pub description: String,
    pub work_experience_years: u32,
    /// (title, description) pairs
    pub requisites: Vec<(String, String)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volunteer {
    id: VolunteerId,
    version: i64,
    full_name: FullName,
    email: Email,
    phone: PhoneNumber,
    description: VolunteerDescription,
    work_experience: WorkExperience,
    requisites: Vec<Requisite>,
    pets: Vec<Pet>,
    is_deleted: bool,
    deletion_date: Option<DateTime<Utc>>,
    #[serde(skip)]
    pending_events: Vec<VolunteerEvent>,
}

impl Volunteer {
    pub fn new(
        id: VolunteerId,
        full_name: FullName,
        email: Email,
        phone: PhoneNumber,
        description: VolunteerDescription,
        work_experience: WorkExperience,
        requisites: Vec<Requisite>,
    ) -> Self {
        Self {
            id,
            version: 0,
            full_name,
            email,
            phone,
            description,
            work_experience,
            requisites,
            pets: Vec::new(),
            is_deleted: false,
            deletion_date: None,
            pending_events: Vec::new(),
        }
    }

    /// Validates every field of `draft` and reports all failures at once
    pub fn from_draft(id: VolunteerId, draft: &VolunteerDraft) -> Result<Self, ErrorList> {
        let mut errors = ErrorList::new();

        let full_name = errors.collect(FullName::new(
            &draft.first_name,
            &draft.second_name,
            draft.patronymic.as_deref(),
        ));
        let email = errors.collect(Email::new(&draft.email));
        let phone = errors.collect(PhoneNumber::new(&draft.phone));
        let description = errors.collect(VolunteerDescription::new(&draft.description));
        let work_experience = errors.collect(WorkExperience::new(draft.work_experience_years));
        // validate every requisite before folding, so no failure is skipped
        let requisites: Option<Vec<Requisite>> = draft
            .requisites
            .iter()
            .map(|(title, description)| errors.collect(Requisite::new(title, description)))
            .collect::<Vec<_>>()
            .into_iter()
            .collect();

        match (full_name, email, phone, description, work_experience, requisites) {
            (Some(full_name), Some(email), Some(phone), Some(description), Some(work_experience), Some(requisites))
                if errors.is_empty() =>
            {
                Ok(Self::new(id, full_name, email, phone, description, work_experience, requisites))
            }
            _ => Err(errors),
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn id(&self) -> VolunteerId {
        self.id
    }

    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    pub fn description(&self) -> &VolunteerDescription {
        &self.description
    }

    pub fn work_experience(&self) -> WorkExperience {
        self.work_experience
    }

    pub fn requisites(&self) -> &[Requisite] {
        &self.requisites
    }

    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    pub fn deletion_date(&self) -> Option<DateTime<Utc>> {
        self.deletion_date
    }

    /// Every owned pet, soft-deleted ones included, in insertion order
    pub fn pets(&self) -> &[Pet] {
        &self.pets
    }

    /// Pets taking part in the ordering, sorted by position
    pub fn active_pets(&self) -> Vec<&Pet> {
        let mut active: Vec<&Pet> = self.pets.iter().filter(|p| !p.is_deleted()).collect();
        active.sort_by_key(|p| p.position());
        active
    }

    pub fn active_count(&self) -> usize {
        self.pets.iter().filter(|p| !p.is_deleted()).count()
    }

    pub fn get_pet_by_id(&self, pet_id: PetId) -> DomainResult<&Pet> {
        let index = self.index_of(pet_id)?;
        Ok(&self.pets[index])
    }

    pub fn pets_needs_help(&self) -> usize {
        self.count_by_status(HelpStatus::NeedsHelp)
    }

    pub fn pets_searching_home(&self) -> usize {
        self.count_by_status(HelpStatus::SearchingHome)
    }

    pub fn pets_found_home(&self) -> usize {
        self.count_by_status(HelpStatus::FoundHome)
    }

    fn count_by_status(&self, status: HelpStatus) -> usize {
        self.pets
            .iter()
            .filter(|p| !p.is_deleted() && p.help_status() == status)
            .count()
    }

    // ------------------------------------------------------------------
    // Ordered collection
    // ------------------------------------------------------------------

    /// Appends the pet at the tail of the ordering
    pub fn add_pet(&mut self, mut pet: Pet) -> DomainResult<Position> {
        if self.pets.iter().any(|p| p.id() == pet.id()) {
            return Err(DomainError::invalid("pet id"));
        }

        let position = match self.active_count() {
            0 => Position::FIRST,
            count => Position::from_count(count + 1)?,
        };

        pet.set_position(position);
        let pet_id = pet.id();
        self.pets.push(pet);

        tracing::debug!(volunteer_id = %self.id, pet_id = %pet_id, position = %position, "Pet added");
        self.record(VolunteerEvent::PetAdded(PetAdded { pet_id, position }));
        Ok(position)
    }

    pub fn move_pet(&mut self, pet_id: PetId, new_position: Position) -> DomainResult<()> {
        let index = self.active_index_of(pet_id)?;
        let current = self.position_at(index)?;

        if current == new_position || self.active_count() == 1 {
            return Ok(());
        }

        self.ensure_in_range(new_position)?;
        self.move_pets_between_positions(new_position, current)?;
        self.pets[index].set_position(new_position);

        tracing::debug!(
            volunteer_id = %self.id,
            pet_id = %pet_id,
            from = %current,
            to = %new_position,
            "Pet moved"
        );
        self.record(VolunteerEvent::PetMoved(PetMoved {
            pet_id,
            from: current,
            to: new_position,
        }));
        Ok(())
    }

    /// Marks the pet deleted in place. Its stale position stays on the pet.
    pub fn delete_pet_soft(&mut self, pet_id: PetId, deletion_date: DateTime<Utc>) -> DomainResult<()> {
        let index = self.index_of(pet_id)?;
        if self.pets[index].is_deleted() {
            return Ok(());
        }

        let current = self.position_at(index)?;
        self.recalculate_position_of_other_pets(current)?;
        self.pets[index].delete(deletion_date);

        tracing::debug!(volunteer_id = %self.id, pet_id = %pet_id, position = %current, "Pet soft-deleted");
        self.record(VolunteerEvent::PetSoftDeleted(PetSoftDeleted {
            pet_id,
            deletion_date,
        }));
        Ok(())
    }

    /// Excises the pet from the collection and hands it back to the caller
    pub fn delete_pet_force(&mut self, pet_id: PetId, deletion_date: DateTime<Utc>) -> DomainResult<Pet> {
        let index = self.index_of(pet_id)?;

        // a soft-deleted pet already left the ordering
        if !self.pets[index].is_deleted() {
            let current = self.position_at(index)?;
            self.recalculate_position_of_other_pets(current)?;
        }

        let mut pet = self.pets.remove(index);
        pet.delete(deletion_date);

        tracing::debug!(volunteer_id = %self.id, pet_id = %pet_id, "Pet force-deleted");
        self.record(VolunteerEvent::PetForceDeleted(PetForceDeleted {
            pet_id,
            deletion_date,
        }));
        Ok(pet)
    }

    /// Reactivates a soft-deleted pet at the tail of the ordering
    pub fn restore_pet(&mut self, pet_id: PetId) -> DomainResult<Position> {
        let index = self.index_of(pet_id)?;
        if !self.pets[index].is_deleted() {
            return self.position_at(index);
        }

        // Tail = active count once the restored pet is counted again. The
        // others already hold 1..count-1, so nothing else shifts.
        let tail = Position::from_count(self.active_count() + 1)?;

        let pet = &mut self.pets[index];
        pet.restore();
        pet.set_position(tail);

        tracing::debug!(volunteer_id = %self.id, pet_id = %pet_id, position = %tail, "Pet restored");
        self.record(VolunteerEvent::PetRestored(PetRestored {
            pet_id,
            position: tail,
        }));
        Ok(tail)
    }

    /// Purges soft-deleted pets whose retention window has elapsed.
    /// Survivors are not renumbered; purged pets are already out of the ordering.
    /// An expiry beyond the representable date range never elapses.
    pub fn delete_expired_pets(&mut self, retention: Duration, now: DateTime<Utc>) -> Vec<Pet> {
        let (expired, kept): (Vec<Pet>, Vec<Pet>) = std::mem::take(&mut self.pets)
            .into_iter()
            .partition(|p| {
                p.deletion_date()
                    .and_then(|deleted_at| deleted_at.checked_add_signed(retention))
                    .is_some_and(|expiry| expiry <= now)
            });
        self.pets = kept;

        if !expired.is_empty() {
            tracing::info!(
                volunteer_id = %self.id,
                purged = expired.len(),
                retention_days = retention.num_days(),
                "Expired pets purged"
            );
            self.record(VolunteerEvent::ExpiredPetsPurged(ExpiredPetsPurged {
                pet_ids: expired.iter().map(Pet::id).collect(),
                retention_days: retention.num_days(),
            }));
        }

        expired
    }

    // ------------------------------------------------------------------
    // Volunteer lifecycle
    // ------------------------------------------------------------------

    /// Cascades the soft delete to active pets; positions are untouched
    pub fn delete(&mut self, at: DateTime<Utc>) {
        if self.is_deleted {
            return;
        }

        self.is_deleted = true;
        self.deletion_date = Some(at);
        for pet in self.pets.iter_mut().filter(|p| !p.is_deleted()) {
            pet.delete(at);
        }

        self.record(VolunteerEvent::Deleted(VolunteerDeleted { deletion_date: at }));
    }

    /// Restores the pets deleted by the cascade (same deletion date as the
    /// volunteer). Restored pets are renumbered to follow the pets that are
    /// already active, in the order of their stale positions. When no pet was
    /// restored or added in between, the renumbering reproduces the old positions.
    pub fn restore(&mut self) -> DomainResult<()> {
        if !self.is_deleted {
            return Ok(());
        }

        let marker = self.deletion_date;
        let mut cascaded: Vec<usize> = self
            .pets
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_deleted() && p.deletion_date() == marker)
            .map(|(i, _)| i)
            .collect();
        cascaded.sort_by_key(|&i| self.pets[i].position());

        let base = self.active_count();
        let placements = cascaded
            .iter()
            .enumerate()
            .map(|(offset, &i)| Position::from_count(base + offset + 1).map(|p| (i, p)))
            .collect::<DomainResult<Vec<_>>>()?;

        for (i, position) in placements {
            self.pets[i].restore();
            self.pets[i].set_position(position);
        }

        self.is_deleted = false;
        self.deletion_date = None;

        let restored_pets = cascaded.iter().map(|&i| self.pets[i].id()).collect();
        self.record(VolunteerEvent::Restored(VolunteerRestored { restored_pets }));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Partial updates
    // ------------------------------------------------------------------

    pub fn update_pet(&mut self, pet_id: PetId, update: PetUpdate) -> DomainResult<()> {
        let index = self.index_of(pet_id)?;
        self.pets[index].update(update);
        self.record(VolunteerEvent::PetUpdated(PetUpdated { pet_id }));
        Ok(())
    }

    pub fn update_pet_status(&mut self, pet_id: PetId, help_status: HelpStatus) -> DomainResult<()> {
        let index = self.index_of(pet_id)?;
        self.pets[index].update_help_status(help_status);
        self.record(VolunteerEvent::PetStatusUpdated(PetStatusUpdated {
            pet_id,
            help_status,
        }));
        Ok(())
    }

    pub fn add_pet_photos(&mut self, pet_id: PetId, photos: Vec<PetPhoto>) -> DomainResult<usize> {
        let index = self.index_of(pet_id)?;
        let count = self.pets[index].add_photos(photos);
        if count > 0 {
            self.record(VolunteerEvent::PetPhotosAdded(PetPhotosAdded { pet_id, count }));
        }
        Ok(count)
    }

    pub fn set_main_photo_of_pet(&mut self, pet_id: PetId, path: &str) -> DomainResult<()> {
        let index = self.index_of(pet_id)?;
        self.pets[index].set_main_photo(path)?;
        self.record(VolunteerEvent::PetMainPhotoSet(PetMainPhotoSet {
            pet_id,
            path: path.to_string(),
        }));
        Ok(())
    }

    pub fn update_info(&mut self, update: VolunteerInfoUpdate) {
        let VolunteerInfoUpdate {
            full_name,
            email,
            phone,
            description,
            work_experience,
        } = update;

        if let Some(full_name) = full_name {
            self.full_name = full_name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(work_experience) = work_experience {
            self.work_experience = work_experience;
        }

        self.record(VolunteerEvent::InfoUpdated(VolunteerInfoUpdated {}));
    }

    pub fn update_requisites(&mut self, requisites: Vec<Requisite>) {
        let count = requisites.len();
        self.requisites = requisites;
        self.record(VolunteerEvent::RequisitesUpdated(VolunteerRequisitesUpdated { count }));
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn record(&mut self, event: VolunteerEvent) {
        self.pending_events.push(event);
    }

    fn index_of(&self, pet_id: PetId) -> DomainResult<usize> {
        self.pets
            .iter()
            .position(|p| p.id() == pet_id)
            .ok_or_else(|| DomainError::not_found(pet_id))
    }

    /// Soft-deleted pets are outside the ordering and cannot be moved
    fn active_index_of(&self, pet_id: PetId) -> DomainResult<usize> {
        let index = self.index_of(pet_id)?;
        if self.pets[index].is_deleted() {
            return Err(DomainError::not_found(pet_id));
        }
        Ok(index)
    }

    fn position_at(&self, index: usize) -> DomainResult<Position> {
        self.pets[index]
            .position()
            .ok_or_else(|| DomainError::invalid("position"))
    }

    fn ensure_in_range(&self, position: Position) -> DomainResult<()> {
        let in_range = usize::try_from(position.value())
            .map(|value| value <= self.active_count())
            .unwrap_or(false);
        if !in_range {
            return Err(DomainError::PetPositionOutOfRange);
        }
        Ok(())
    }

    fn active_indices_where(&self, predicate: impl Fn(Position) -> bool) -> Vec<usize> {
        self.pets
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_deleted() && p.position().is_some_and(&predicate))
            .map(|(i, _)| i)
            .collect()
    }

    fn move_pets_between_positions(&mut self, new_position: Position, current: Position) -> DomainResult<()> {
        if new_position < current {
            let indices = self.active_indices_where(|p| p >= new_position && p < current);
            self.shift(&indices, Step::Forward)
        } else if new_position > current {
            let indices = self.active_indices_where(|p| p > current && p <= new_position);
            self.shift(&indices, Step::Back)
        } else {
            Ok(())
        }
    }

    /// Closes the gap left by the pet at `current`
    fn recalculate_position_of_other_pets(&mut self, current: Position) -> DomainResult<()> {
        if Position::from_count(self.active_count()).ok() == Some(current) {
            return Ok(());
        }

        let indices = self.active_indices_where(|p| p > current);
        self.shift(&indices, Step::Back)
    }

    /// Shifts every listed pet one step; on failure all of them are put back
    fn shift(&mut self, indices: &[usize], step: Step) -> DomainResult<()> {
        let snapshot: Vec<(usize, Option<Position>)> =
            indices.iter().map(|&i| (i, self.pets[i].position())).collect();

        for &i in indices {
            let result = match step {
                Step::Forward => self.pets[i].move_forward(),
                Step::Back => self.pets[i].move_back(),
            };

            if let Err(error) = result {
                for &(j, position) in &snapshot {
                    self.pets[j].reset_position(position);
                }
                tracing::warn!(volunteer_id = %self.id, error = %error, "Position shift rolled back");
                return Err(error);
            }
        }

        tracing::debug!(volunteer_id = %self.id, shifted = indices.len(), step = ?step, "Pets shifted");
        Ok(())
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl AggregateRoot for Volunteer {
    type Event = VolunteerEvent;
    type Command = VolunteerCommand;
    type Error = DomainError;

    fn aggregate_id(&self) -> uuid::Uuid {
        self.id.as_uuid()
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }

    fn handle_command(&mut self, command: Self::Command) -> Result<(), Self::Error> {
        match command {
            VolunteerCommand::AddPet { pet } => self.add_pet(*pet).map(|_| ()),
            VolunteerCommand::MovePet { pet_id, new_position } => self.move_pet(pet_id, new_position),
            VolunteerCommand::DeletePetSoft { pet_id, deletion_date } => {
                self.delete_pet_soft(pet_id, deletion_date)
            }
            VolunteerCommand::DeletePetForce { pet_id, deletion_date } => {
                self.delete_pet_force(pet_id, deletion_date).map(|_| ())
            }
            VolunteerCommand::RestorePet { pet_id } => self.restore_pet(pet_id).map(|_| ()),
            VolunteerCommand::UpdatePet { pet_id, update } => self.update_pet(pet_id, *update),
            VolunteerCommand::UpdatePetStatus { pet_id, help_status } => {
                self.update_pet_status(pet_id, help_status)
            }
            VolunteerCommand::AddPetPhotos { pet_id, photos } => {
                self.add_pet_photos(pet_id, photos).map(|_| ())
            }
            VolunteerCommand::SetMainPhotoOfPet { pet_id, path } => {
                self.set_main_photo_of_pet(pet_id, &path)
            }
            VolunteerCommand::UpdateInfo(update) => {
                self.update_info(update);
                Ok(())
            }
            VolunteerCommand::UpdateRequisites { requisites } => {
                self.update_requisites(requisites);
                Ok(())
            }
            VolunteerCommand::DeleteVolunteer { deletion_date } => {
                self.delete(deletion_date);
                Ok(())
            }
            VolunteerCommand::RestoreVolunteer => self.restore(),
        }
    }

    fn take_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.pending_events)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pet::test_support::test_pet;
    use proptest::prelude::*;

    fn create_test_volunteer() -> Volunteer {
        Volunteer::new(
            VolunteerId::new_v4(),
            FullName::new("Anna", "Petrova", None).unwrap(),
            Email::new("anna@shelter.org").unwrap(),
            PhoneNumber::new("+1 555 123 4567").unwrap(),
            VolunteerDescription::new("Foster carer for senior dogs").unwrap(),
            WorkExperience::new(4).unwrap(),
            vec![],
        )
    }

    /// Volunteer with pets named by `names`, added in order
    fn volunteer_with(names: &[&str]) -> (Volunteer, Vec<PetId>) {
        let mut volunteer = create_test_volunteer();
        let ids = names
            .iter()
            .map(|name| {
                let pet = test_pet(name);
                let id = pet.id();
                volunteer.add_pet(pet).unwrap();
                id
            })
            .collect();
        (volunteer, ids)
    }

    fn pos(value: i64) -> Position {
        Position::new(value).unwrap()
    }

    fn position_of(volunteer: &Volunteer, id: PetId) -> u32 {
        volunteer.get_pet_by_id(id).unwrap().position().unwrap().value()
    }

    fn assert_contiguous(volunteer: &Volunteer) {
        let mut positions: Vec<u32> = volunteer
            .pets()
            .iter()
            .filter(|p| !p.is_deleted())
            .map(|p| p.position().unwrap().value())
            .collect();
        positions.sort_unstable();
        let expected: Vec<u32> = (1..=positions.len() as u32).collect();
        assert_eq!(positions, expected);
    }

    #[test]
    fn test_add_pet_appends_at_tail() {
        let (volunteer, ids) = volunteer_with(&["A", "B", "C"]);
        assert_eq!(position_of(&volunteer, ids[0]), 1);
        assert_eq!(position_of(&volunteer, ids[1]), 2);
        assert_eq!(position_of(&volunteer, ids[2]), 3);
    }

    #[test]
    fn test_add_pet_rejects_duplicate_id() {
        let mut volunteer = create_test_volunteer();
        let pet = test_pet("A");
        volunteer.add_pet(pet.clone()).unwrap();

        let result = volunteer.add_pet(pet);
        assert_eq!(result, Err(DomainError::invalid("pet id")));
        assert_eq!(volunteer.pets().len(), 1);
    }

    #[test]
    fn test_move_pet_earlier() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C"]);
        volunteer.move_pet(ids[2], Position::FIRST).unwrap();

        assert_eq!(position_of(&volunteer, ids[0]), 2);
        assert_eq!(position_of(&volunteer, ids[1]), 3);
        assert_eq!(position_of(&volunteer, ids[2]), 1);
    }

    #[test]
    fn test_move_pet_later() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C", "D"]);
        volunteer.move_pet(ids[0], pos(3)).unwrap();

        assert_eq!(position_of(&volunteer, ids[0]), 3);
        assert_eq!(position_of(&volunteer, ids[1]), 1);
        assert_eq!(position_of(&volunteer, ids[2]), 2);
        assert_eq!(position_of(&volunteer, ids[3]), 4);
        assert_contiguous(&volunteer);
    }

    #[test]
    fn test_move_to_same_position_is_noop() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C"]);
        volunteer.take_events();
        let before = volunteer.pets().to_vec();

        volunteer.move_pet(ids[1], pos(2)).unwrap();

        assert_eq!(volunteer.pets(), before.as_slice());
        assert!(volunteer.take_events().is_empty());
    }

    #[test]
    fn test_move_single_pet_is_noop_even_out_of_range() {
        let (mut volunteer, ids) = volunteer_with(&["A"]);
        volunteer.move_pet(ids[0], pos(5)).unwrap();
        assert_eq!(position_of(&volunteer, ids[0]), 1);
    }

    #[test]
    fn test_move_out_of_range_mutates_nothing() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C"]);
        let before = volunteer.pets().to_vec();

        let result = volunteer.move_pet(ids[0], pos(4));

        assert_eq!(result, Err(DomainError::PetPositionOutOfRange));
        assert_eq!(volunteer.pets(), before.as_slice());
    }

    #[test]
    fn test_move_unknown_pet_not_found() {
        let (mut volunteer, _) = volunteer_with(&["A", "B"]);
        let missing = PetId::new_v4();
        let result = volunteer.move_pet(missing, Position::FIRST);
        assert_eq!(result, Err(DomainError::not_found(missing)));
    }

    #[test]
    fn test_move_soft_deleted_pet_not_found() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C"]);
        volunteer.delete_pet_soft(ids[1], Utc::now()).unwrap();

        let result = volunteer.move_pet(ids[1], Position::FIRST);
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[test]
    fn test_move_then_force_delete_last() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C"]);
        let (a, b, c) = (ids[0], ids[1], ids[2]);

        volunteer.move_pet(c, Position::FIRST).unwrap();
        let removed = volunteer.delete_pet_force(b, Utc::now()).unwrap();

        assert_eq!(removed.id(), b);
        assert!(removed.is_deleted());
        assert_eq!(volunteer.pets().len(), 2);
        assert_eq!(position_of(&volunteer, c), 1);
        assert_eq!(position_of(&volunteer, a), 2);
    }

    #[test]
    fn test_soft_delete_closes_gap() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C", "D"]);
        let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);

        volunteer.delete_pet_soft(b, Utc::now()).unwrap();

        assert_eq!(position_of(&volunteer, a), 1);
        assert_eq!(position_of(&volunteer, c), 2);
        assert_eq!(position_of(&volunteer, d), 3);
        let deleted = volunteer.get_pet_by_id(b).unwrap();
        assert!(deleted.is_deleted());
        assert_eq!(deleted.position().unwrap().value(), 2);
        assert_eq!(volunteer.active_count(), 3);
        assert_contiguous(&volunteer);
    }

    #[test]
    fn test_soft_delete_twice_is_noop() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C"]);
        volunteer.delete_pet_soft(ids[0], Utc::now()).unwrap();
        volunteer.delete_pet_soft(ids[0], Utc::now()).unwrap();

        assert_eq!(position_of(&volunteer, ids[1]), 1);
        assert_eq!(position_of(&volunteer, ids[2]), 2);
    }

    #[test]
    fn test_force_delete_middle_closes_gap() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C"]);
        volunteer.delete_pet_force(ids[0], Utc::now()).unwrap();

        assert_eq!(volunteer.pets().len(), 2);
        assert_eq!(position_of(&volunteer, ids[1]), 1);
        assert_eq!(position_of(&volunteer, ids[2]), 2);
    }

    #[test]
    fn test_force_delete_soft_deleted_does_not_shift() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C"]);
        volunteer.delete_pet_soft(ids[0], Utc::now()).unwrap();
        volunteer.delete_pet_force(ids[0], Utc::now()).unwrap();

        assert_eq!(position_of(&volunteer, ids[1]), 1);
        assert_eq!(position_of(&volunteer, ids[2]), 2);
        assert_contiguous(&volunteer);
    }

    #[test]
    fn test_delete_unknown_pet_not_found() {
        let (mut volunteer, _) = volunteer_with(&["A"]);
        let missing = PetId::new_v4();
        assert_eq!(
            volunteer.delete_pet_soft(missing, Utc::now()),
            Err(DomainError::not_found(missing))
        );
        assert!(matches!(
            volunteer.delete_pet_force(missing, Utc::now()),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn test_soft_delete_then_restore_lands_at_tail() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C", "D"]);
        let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);

        volunteer.delete_pet_soft(b, Utc::now()).unwrap();
        let tail = volunteer.restore_pet(b).unwrap();

        assert_eq!(tail.value(), 4);
        assert_eq!(position_of(&volunteer, a), 1);
        assert_eq!(position_of(&volunteer, c), 2);
        assert_eq!(position_of(&volunteer, d), 3);
        assert_eq!(position_of(&volunteer, b), 4);
        assert!(!volunteer.get_pet_by_id(b).unwrap().is_deleted());
        assert_contiguous(&volunteer);
    }

    #[test]
    fn test_restore_active_pet_is_noop() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C"]);
        let position = volunteer.restore_pet(ids[0]).unwrap();
        assert_eq!(position.value(), 1);
        assert_eq!(position_of(&volunteer, ids[2]), 3);
    }

    #[test]
    fn test_restore_unknown_pet_not_found() {
        let (mut volunteer, _) = volunteer_with(&["A"]);
        assert!(matches!(
            volunteer.restore_pet(PetId::new_v4()),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn test_add_after_soft_delete_stays_contiguous() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C"]);
        volunteer.delete_pet_soft(ids[1], Utc::now()).unwrap();

        let position = volunteer.add_pet(test_pet("D")).unwrap();

        assert_eq!(position.value(), 3);
        assert_contiguous(&volunteer);
    }

    #[test]
    fn test_delete_expired_pets_purges_only_expired() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C", "D"]);
        let now = Utc::now();

        volunteer.delete_pet_soft(ids[0], now - Duration::days(40)).unwrap();
        volunteer.delete_pet_soft(ids[1], now - Duration::days(5)).unwrap();

        let purged = volunteer.delete_expired_pets(Duration::days(30), now);

        assert_eq!(purged.len(), 1);
        assert_eq!(purged[0].id(), ids[0]);
        assert_eq!(volunteer.pets().len(), 3);
        assert!(volunteer.get_pet_by_id(ids[1]).unwrap().is_deleted());
        assert_contiguous(&volunteer);
    }

    #[test]
    fn test_delete_expired_boundary_is_inclusive() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B"]);
        let now = Utc::now();
        volunteer.delete_pet_soft(ids[0], now - Duration::days(30)).unwrap();

        let purged = volunteer.delete_expired_pets(Duration::days(30), now);
        assert_eq!(purged.len(), 1);
    }

    #[test]
    fn test_delete_expired_without_candidates_records_nothing() {
        let (mut volunteer, _) = volunteer_with(&["A", "B"]);
        volunteer.take_events();

        let purged = volunteer.delete_expired_pets(Duration::days(30), Utc::now());

        assert!(purged.is_empty());
        assert!(volunteer.take_events().is_empty());
    }

    #[test]
    fn test_delete_expired_with_far_future_deletion_date_keeps_pet() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B"]);
        volunteer.delete_pet_soft(ids[0], DateTime::<Utc>::MAX_UTC).unwrap();

        let purged = volunteer.delete_expired_pets(Duration::days(30), Utc::now());

        assert!(purged.is_empty());
        assert!(volunteer.get_pet_by_id(ids[0]).unwrap().is_deleted());
    }

    #[test]
    fn test_delete_expired_with_huge_retention_keeps_pet() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B"]);
        let now = Utc::now();
        volunteer.delete_pet_soft(ids[1], now - Duration::days(400)).unwrap();

        let purged = volunteer.delete_expired_pets(Duration::days(1_000_000_000), now);

        assert!(purged.is_empty());
        assert_eq!(volunteer.pets().len(), 2);
    }

    #[test]
    fn test_failed_shift_restores_every_position() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C"]);
        let last = Position::new(i64::from(u32::MAX)).unwrap();
        volunteer.pets[2].set_position(last);

        // A and B advance before C overflows
        let result = volunteer.shift(&[0, 1, 2], Step::Forward);

        assert_eq!(result, Err(DomainError::invalid("position")));
        assert_eq!(position_of(&volunteer, ids[0]), 1);
        assert_eq!(position_of(&volunteer, ids[1]), 2);
        assert_eq!(position_of(&volunteer, ids[2]), u32::MAX);
    }

    fn valid_draft() -> VolunteerDraft {
        VolunteerDraft {
            first_name: "Anna".into(),
            second_name: "Petrova".into(),
            patronymic: None,
            email: "anna@shelter.org".into(),
            phone: "+1 555 123 4567".into(),
            description: "Foster carer for senior dogs".into(),
            work_experience_years: 4,
            requisites: vec![("Card".into(), "4000 0000 0000 0002".into())],
        }
    }

    #[test]
    fn test_from_draft_builds_volunteer() {
        let volunteer = Volunteer::from_draft(VolunteerId::new_v4(), &valid_draft()).unwrap();

        assert_eq!(volunteer.email().as_str(), "anna@shelter.org");
        assert_eq!(volunteer.requisites().len(), 1);
        assert!(volunteer.pets().is_empty());
    }

    #[test]
    fn test_from_draft_reports_every_failure() {
        let draft = VolunteerDraft {
            first_name: "  ".into(),
            email: "not-an-email".into(),
            phone: "12".into(),
            requisites: vec![("".into(), "details".into())],
            ..valid_draft()
        };

        let errors = Volunteer::from_draft(VolunteerId::new_v4(), &draft).unwrap_err();

        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.codes(),
            vec!["value.is.required", "value.is.invalid", "value.is.invalid", "value.is.required"]
        );
    }

    #[test]
    fn test_volunteer_delete_and_restore_cascade() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C"]);
        let earlier = Utc::now() - Duration::days(2);
        volunteer.delete_pet_soft(ids[0], earlier).unwrap();

        volunteer.delete(Utc::now());
        assert!(volunteer.is_deleted());
        assert!(volunteer.pets().iter().all(Pet::is_deleted));
        // individually deleted pet keeps its own deletion date
        assert_eq!(volunteer.get_pet_by_id(ids[0]).unwrap().deletion_date(), Some(earlier));

        volunteer.restore().unwrap();
        assert!(!volunteer.is_deleted());
        assert!(volunteer.get_pet_by_id(ids[0]).unwrap().is_deleted());
        assert_eq!(position_of(&volunteer, ids[1]), 1);
        assert_eq!(position_of(&volunteer, ids[2]), 2);
        assert_contiguous(&volunteer);
    }

    #[test]
    fn test_volunteer_restore_after_pet_restored_meanwhile() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C"]);
        volunteer.delete(Utc::now());

        volunteer.restore_pet(ids[2]).unwrap();
        volunteer.restore().unwrap();

        assert_eq!(position_of(&volunteer, ids[2]), 1);
        assert_eq!(position_of(&volunteer, ids[0]), 2);
        assert_eq!(position_of(&volunteer, ids[1]), 3);
        assert_contiguous(&volunteer);
    }

    #[test]
    fn test_partial_updates() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B"]);

        volunteer.update_pet_status(ids[0], HelpStatus::SearchingHome).unwrap();
        volunteer.update_pet_status(ids[1], HelpStatus::FoundHome).unwrap();
        assert_eq!(volunteer.pets_needs_help(), 0);
        assert_eq!(volunteer.pets_searching_home(), 1);
        assert_eq!(volunteer.pets_found_home(), 1);

        volunteer.update_info(VolunteerInfoUpdate {
            email: Some(Email::new("anna@rescue.org").unwrap()),
            ..Default::default()
        });
        assert_eq!(volunteer.email().as_str(), "anna@rescue.org");
        assert_eq!(volunteer.full_name().first_name, "Anna");

        let missing = PetId::new_v4();
        assert!(matches!(
            volunteer.update_pet(missing, PetUpdate::default()),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn test_main_photo_through_aggregate() {
        let (mut volunteer, ids) = volunteer_with(&["A"]);
        volunteer
            .add_pet_photos(ids[0], vec![PetPhoto::new("a.png").unwrap()])
            .unwrap();
        volunteer.set_main_photo_of_pet(ids[0], "a.png").unwrap();

        let pet = volunteer.get_pet_by_id(ids[0]).unwrap();
        assert_eq!(pet.main_photo().unwrap().path, "a.png");
    }

    #[test]
    fn test_events_recorded_and_drained() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B"]);
        volunteer.move_pet(ids[1], Position::FIRST).unwrap();

        let events = volunteer.take_events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], VolunteerEvent::PetAdded(_)));
        assert!(matches!(
            &events[2],
            VolunteerEvent::PetMoved(PetMoved { from, to, .. }) if from.value() == 2 && to.value() == 1
        ));
        assert!(volunteer.take_events().is_empty());
    }

    #[test]
    fn test_handle_command_dispatches() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B", "C"]);

        volunteer
            .handle_command(VolunteerCommand::MovePet {
                pet_id: ids[0],
                new_position: pos(3),
            })
            .unwrap();
        assert_eq!(position_of(&volunteer, ids[0]), 3);

        let result = volunteer.handle_command(VolunteerCommand::RestorePet {
            pet_id: PetId::new_v4(),
        });
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[test]
    fn test_snapshot_serialization_skips_pending_events() {
        let (mut volunteer, ids) = volunteer_with(&["A", "B"]);
        volunteer.delete_pet_soft(ids[0], Utc::now()).unwrap();

        let json = serde_json::to_string(&volunteer).unwrap();
        let mut restored: Volunteer = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.pets(), volunteer.pets());
        assert!(restored.take_events().is_empty());
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Move(usize, i64),
        SoftDelete(usize),
        ForceDelete(usize),
        Restore(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::Add),
            3 => (0usize..16, 0i64..10).prop_map(|(i, p)| Op::Move(i, p)),
            2 => (0usize..16).prop_map(Op::SoftDelete),
            1 => (0usize..16).prop_map(Op::ForceDelete),
            2 => (0usize..16).prop_map(Op::Restore),
        ]
    }

    fn pick(ids: &[PetId], i: usize) -> Option<PetId> {
        ids.get(i % ids.len().max(1)).copied()
    }

    proptest! {
        #[test]
        fn prop_active_positions_stay_contiguous(ops in prop::collection::vec(op_strategy(), 1..60)) {
            let mut volunteer = create_test_volunteer();
            let mut ids: Vec<PetId> = Vec::new();

            for op in ops {
                let before = volunteer.pets().to_vec();

                let result = match op {
                    Op::Add => {
                        let pet = test_pet("P");
                        ids.push(pet.id());
                        volunteer.add_pet(pet).map(|_| ())
                    }
                    Op::Move(i, p) => match (pick(&ids, i), Position::new(p)) {
                        (Some(id), Ok(position)) => volunteer.move_pet(id, position),
                        _ => continue,
                    },
                    Op::SoftDelete(i) => match pick(&ids, i) {
                        Some(id) => volunteer.delete_pet_soft(id, Utc::now()),
                        None => continue,
                    },
                    Op::ForceDelete(i) => match pick(&ids, i) {
                        Some(id) => volunteer.delete_pet_force(id, Utc::now()).map(|_| ()),
                        None => continue,
                    },
                    Op::Restore(i) => match pick(&ids, i) {
                        Some(id) => volunteer.restore_pet(id).map(|_| ()),
                        None => continue,
                    },
                };

                if result.is_err() {
                    prop_assert_eq!(volunteer.pets(), before.as_slice());
                }
                assert_contiguous(&volunteer);
            }
        }

        #[test]
        fn prop_move_is_reversible(count in 2usize..10, a in 1i64..10, b in 1i64..10) {
            let names: Vec<String> = (0..count).map(|i| format!("P{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let (mut volunteer, _) = volunteer_with(&refs);

            let a = (a - 1) % count as i64 + 1;
            let b = (b - 1) % count as i64 + 1;
            let mover = volunteer.active_pets()[(a - 1) as usize].id();
            let before = volunteer.pets().to_vec();

            volunteer.move_pet(mover, pos(b)).unwrap();
            volunteer.move_pet(mover, pos(a)).unwrap();

            prop_assert_eq!(volunteer.pets(), before.as_slice());
        }

        #[test]
        fn prop_out_of_range_move_rejected(count in 2usize..10, extra in 1i64..5) {
            let names: Vec<String> = (0..count).map(|i| format!("P{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let (mut volunteer, ids) = volunteer_with(&refs);
            let before = volunteer.pets().to_vec();

            let result = volunteer.move_pet(ids[0], pos(count as i64 + extra));

            prop_assert_eq!(result, Err(DomainError::PetPositionOutOfRange));
            prop_assert_eq!(volunteer.pets(), before.as_slice());
        }
    }
}

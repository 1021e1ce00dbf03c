use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use volunteer_registry::config::AppConfig;
use volunteer_registry::domain::pet::{
    Address, AnimalType, HelpStatus, Name, Pet, PetDetails, PetPhysicCharacteristics, PetProfile, Position,
};
use volunteer_registry::domain::shared::{PetId, PhoneNumber, VolunteerId};
use volunteer_registry::domain::volunteer::{Volunteer, VolunteerCommand, VolunteerCommandHandler, VolunteerDraft};
use volunteer_registry::events::InMemoryOutbox;
use volunteer_registry::metrics::Metrics;
use volunteer_registry::repository::InMemoryVolunteerRepository;
use volunteer_registry::sweeper::ExpiredPetsSweeper;
use volunteer_registry::telemetry;

fn demo_pet(name: &str, born: NaiveDate) -> anyhow::Result<Pet> {
    let profile = PetProfile {
        name: Name::new(name)?,
        physic_characteristics: PetPhysicCharacteristics::new("tabby", "healthy", 4.2, 25.0, true, true)?,
        details: PetDetails::new("Looking for a quiet home", born, Utc::now())?,
        address: Address::new("12 Harbour St", "Portsmouth", "Hampshire", "PO1 2AB")?,
        phone_number: PhoneNumber::new("+44 20 7946 0018")?,
        help_status: HelpStatus::SearchingHome,
        animal_type: AnimalType::new(Uuid::new_v4(), Uuid::new_v4())?,
        requisites: vec![],
    };
    Ok(Pet::new(PetId::new_v4(), profile))
}

fn log_order(volunteer: &Volunteer) {
    for pet in volunteer.active_pets() {
        tracing::info!(
            position = pet.position().map(|p| p.value()),
            name = pet.profile().name.as_str(),
            "  pet"
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    telemetry::init(&config.logging)?;

    tracing::info!("Starting volunteer registry demo");

    // === 1. Wire services ===
    let metrics = Arc::new(Metrics::new()?);
    let outbox = Arc::new(InMemoryOutbox::new());
    let handler = Arc::new(VolunteerCommandHandler::new(
        Arc::new(InMemoryVolunteerRepository::new()),
        outbox.clone(),
        metrics.clone(),
        config.retry_config(),
    ));
    let sweeper = ExpiredPetsSweeper::new(handler.clone(), metrics.clone(), &config.sweep);

    // === 2. Register a volunteer ===
    let draft = VolunteerDraft {
        first_name: "Maria".into(),
        second_name: "Lopez".into(),
        patronymic: None,
        email: "maria.lopez@shelter.org".into(),
        phone: "+44 20 7946 0000".into(),
        description: "Cat foster, ten years of rescue work".into(),
        work_experience_years: 10,
        requisites: vec![("Bank transfer".into(), "GB29 NWBK 6016 1331 9268 19".into())],
    };
    let volunteer = Volunteer::from_draft(VolunteerId::new_v4(), &draft)?;
    let volunteer_id = handler.register(volunteer).await?;
    let correlation_id = Uuid::new_v4();

    // === 3. Build an ordered collection ===
    let born = NaiveDate::from_ymd_opt(2022, 5, 1).ok_or_else(|| anyhow::anyhow!("invalid date"))?;
    let mut ids = Vec::new();
    for name in ["Luna", "Milo", "Nala", "Oscar"] {
        let pet = demo_pet(name, born)?;
        ids.push(pet.id());
        handler
            .handle(volunteer_id, VolunteerCommand::AddPet { pet: Box::new(pet) }, correlation_id)
            .await?;
    }
    log_order(&handler.load(volunteer_id).await?);

    // === 4. Reorder, soft delete, restore ===
    handler
        .handle(
            volunteer_id,
            VolunteerCommand::MovePet {
                pet_id: ids[3],
                new_position: Position::FIRST,
            },
            correlation_id,
        )
        .await?;

    let deleted_at = Utc::now() - chrono::Duration::days(config.sweep.pet_retention_days + 1);
    handler
        .handle(
            volunteer_id,
            VolunteerCommand::DeletePetSoft {
                pet_id: ids[1],
                deletion_date: deleted_at,
            },
            correlation_id,
        )
        .await?;
    handler
        .handle(volunteer_id, VolunteerCommand::RestorePet { pet_id: ids[1] }, correlation_id)
        .await?;
    log_order(&handler.load(volunteer_id).await?);

    // === 5. Out-of-range move is rejected ===
    let out_of_range = Position::new(10)?;
    if let Err(error) = handler
        .handle(
            volunteer_id,
            VolunteerCommand::MovePet {
                pet_id: ids[0],
                new_position: out_of_range,
            },
            correlation_id,
        )
        .await
    {
        tracing::info!(code = error.code(), "Rejected as expected");
    }

    // === 6. Expire a soft-deleted pet ===
    handler
        .handle(
            volunteer_id,
            VolunteerCommand::DeletePetSoft {
                pet_id: ids[2],
                deletion_date: deleted_at,
            },
            correlation_id,
        )
        .await?;
    let report = sweeper.run_once(Utc::now()).await?;
    tracing::info!(purged = report.pets_purged, "Sweep complete");
    log_order(&handler.load(volunteer_id).await?);

    // === 7. Outbox and metrics ===
    for message in outbox.drain().await {
        tracing::debug!(
            sequence = message.sequence_number,
            event_type = %message.event_type,
            payload = %message.payload,
            "Outbox message"
        );
    }
    tracing::info!("Metrics:\n{}", metrics.render()?);

    tracing::info!("Demo complete");
    Ok(())
}

//! Event entity <-> model mapper

use club_core::entities::{Event, Registration};
use club_core::traits::RepoResult;
use club_core::value_objects::Snowflake;

use crate::models::{EventModel, RegistrationModel};

/// Combine an event row with its separately loaded registrations
pub fn event_with_registrations(
    model: EventModel,
    registrations: Vec<RegistrationModel>,
) -> RepoResult<Event> {
    Ok(Event {
        id: Snowflake::new(model.id),
        title: model.title,
        description: model.description,
        location: model.location,
        starts_at: model.starts_at,
        ends_at: model.ends_at,
        capacity: model.capacity.map(|c| c.unsigned_abs()),
        created_by: Snowflake::new(model.created_by),
        registrations: registrations
            .into_iter()
            .map(|r| Registration {
                user_id: Snowflake::new(r.user_id),
                registered_at: r.registered_at,
            })
            .collect(),
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

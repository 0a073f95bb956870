//! Core domain: freeze capability for hostile actors.
//!
//! Collaborators that need to halt arbitrary actors (puzzle overlays, level
//! intros) do so through this capability: every actor that can be halted
//! carries [`Freezable`], and a single request toggles the [`Frozen`] marker
//! on all of them. AI and movement systems filter on `Without<Frozen>`.

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

use avian2d::prelude::LinearVelocity;

/// Capability marker: this actor can be frozen in place by collaborators.
#[derive(Component, Debug)]
pub struct Freezable;

/// Present while the actor is held; removed on resume.
#[derive(Component, Debug)]
pub struct Frozen;

/// Request to freeze or unfreeze every freezable actor.
#[derive(Debug)]
pub struct FreezeActorsEvent {
    pub frozen: bool,
}

impl Message for FreezeActorsEvent {}

pub(crate) fn apply_freeze_requests(
    mut commands: Commands,
    mut requests: MessageReader<FreezeActorsEvent>,
    mut actors: Query<(Entity, Option<&mut LinearVelocity>), With<Freezable>>,
) {
    for request in requests.read() {
        for (entity, velocity) in &mut actors {
            if request.frozen {
                commands.entity(entity).insert(Frozen);
                if let Some(mut velocity) = velocity {
                    velocity.0 = Vec2::ZERO;
                }
            } else {
                commands.entity(entity).remove::<Frozen>();
            }
        }
        info!(
            "{} all freezable actors",
            if request.frozen { "Froze" } else { "Unfroze" }
        );
    }
}

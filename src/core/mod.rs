//! Core domain: run configuration, simulation-wide pause state, and the
//! freeze capability shared by every hostile actor.

mod freeze;
mod resources;

pub use freeze::{Freezable, FreezeActorsEvent, Frozen};
pub use resources::{ActionFreeze, RunConfig};

use bevy::prelude::*;

use crate::core::freeze::apply_freeze_requests;

/// One world unit is one tile; the camera shows 32 screen pixels per unit.
const PIXELS_PER_UNIT: f32 = 32.0;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RunConfig>()
            .init_resource::<ActionFreeze>()
            .add_message::<FreezeActorsEvent>()
            .add_systems(Startup, (setup_camera, reset_action_freeze))
            .add_systems(Update, apply_freeze_requests);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::from(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_UNIT,
            ..OrthographicProjection::default_2d()
        }),
    ));
}

/// Pause sources must not leak across level loads.
fn reset_action_freeze(mut freeze: ResMut<ActionFreeze>) {
    freeze.clear();
}

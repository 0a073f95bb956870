//! Movement domain: player locomotion plugin wiring and public exports.

mod bootstrap;
mod components;
mod resources;
mod systems;

pub use bootstrap::PLAYER_SPAWN;
pub use components::{Facing, GameLayer, MovementState, Player};
pub use resources::{MovementInput, MovementTuning};

pub(crate) use bootstrap::spawn_player;

use bevy::prelude::*;

use crate::movement::systems::{apply_dash, apply_movement, read_input, update_facing, update_timers};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_systems(Startup, spawn_player)
            .add_systems(
                Update,
                (read_input, update_timers, apply_dash, apply_movement, update_facing).chain(),
            );
    }
}

//! Arena domain: tile mask, spatial queries, and level spawning.

mod spatial;
mod spawn;
mod tilemap;

#[cfg(test)]
mod tests;

pub use spatial::{ACTOR_RADIUS, RayHit, cast_ray, has_line_of_sight, is_in_corridor, safe_direction};
pub use spawn::Wall;
pub use tilemap::{TileKind, TileMap};

use bevy::prelude::*;

use crate::arena::spawn::setup_arena;
use crate::movement::spawn_player;

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_arena.after(spawn_player));
    }
}

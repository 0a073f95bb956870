//! Movement domain: input and tuning resources for locomotion.

use bevy::prelude::*;

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub dash_just_pressed: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct MovementTuning {
    pub max_speed: f32,
    pub dash_speed: f32,
    pub dash_time: f32,
    pub dash_cooldown: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            dash_speed: 12.0,
            dash_time: 0.15,
            dash_cooldown: 0.6,
        }
    }
}

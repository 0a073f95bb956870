//! Combat domain: tuning and input resources.

use bevy::prelude::*;
use serde::Deserialize;

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub move_speed: f32,
    pub detection_range: f32,
    pub shooting_range: f32,
    /// Shooting enemies close back in only past `shooting_range * hold_factor`
    pub hold_factor: f32,
    pub fire_interval: f32,
    pub health: f32,
    /// Brief stun applied when a basic enemy takes a hit
    pub flinch_stun: f32,
    /// Seconds between path recomputations
    pub path_refresh_interval: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            move_speed: 3.5,
            detection_range: 15.0,
            shooting_range: 5.0,
            hold_factor: 1.2,
            fire_interval: 1.5,
            health: 3.0,
            flinch_stun: 0.35,
            path_refresh_interval: 0.5,
        }
    }
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub move_speed: f32,
    pub health: f32,
    /// Charge when the target is closer than this
    pub charge_band: f32,
    /// Throw the crown when the target is inside this but outside the charge band
    pub crown_band: f32,
    pub attack_cooldown: f32,
    pub charge_prep_time: f32,
    pub charge_time: f32,
    pub charge_speed: f32,
    pub charge_distance: f32,
    pub charge_damage: f32,
    pub charge_hit_radius: f32,
    pub recoil_time: f32,
    pub recoil_distance: f32,
    pub throw_time: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            move_speed: 2.5,
            health: 20.0,
            charge_band: 5.0,
            crown_band: 7.0,
            attack_cooldown: 2.0,
            charge_prep_time: 0.6,
            charge_time: 0.5,
            charge_speed: 12.0,
            charge_distance: 6.0,
            charge_damage: 2.0,
            charge_hit_radius: 1.5,
            recoil_time: 0.4,
            recoil_distance: 1.5,
            throw_time: 1.2,
        }
    }
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub bolt_speed: f32,
    pub bolt_damage: f32,
    pub bolt_lifetime: f32,
    /// Seconds between repeat hits; None destroys the bolt on first contact
    pub bolt_multi_hit: Option<f32>,
    pub crown_speed: f32,
    pub crown_damage: f32,
    pub crown_arc_height: f32,
    pub crown_hit_radius: f32,
    pub crown_pause: f32,
    pub crown_spin: f32,
    pub crown_timeout: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            bolt_speed: 8.0,
            bolt_damage: 1.0,
            bolt_lifetime: 3.0,
            bolt_multi_hit: None,
            crown_speed: 7.0,
            crown_damage: 1.0,
            crown_arc_height: 1.5,
            crown_hit_radius: 1.5,
            crown_pause: 0.25,
            crown_spin: 12.0,
            crown_timeout: 6.0,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct CombatTuning {
    pub knockback_speed: f32,
    pub knockback_time: f32,
    pub player_attack_damage: f32,
    pub player_attack_cooldown: f32,
    pub player_attack_range: f32,
    pub player_attack_size: Vec2,
    pub hitbox_lifetime: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            knockback_speed: 6.0,
            knockback_time: 0.2,
            player_attack_damage: 1.0,
            player_attack_cooldown: 0.35,
            player_attack_range: 0.9,
            player_attack_size: Vec2::new(1.1, 0.9),
            hitbox_lifetime: 0.12,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct CombatInput {
    pub attack: bool,
}

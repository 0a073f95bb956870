//! Movement domain: player spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{Combatant, Health, Knockback, PlayerAttack, Team};
use crate::movement::{GameLayer, MovementState, Player};

pub const PLAYER_SPAWN: Vec2 = Vec2::new(4.5, 10.5);

const PLAYER_HEALTH: f32 = 6.0;
const PLAYER_RADIUS: f32 = 0.35;

pub(crate) fn spawn_player(mut commands: Commands) {
    commands.spawn((
        Player,
        MovementState::default(),
        Combatant,
        Team::Player,
        Health::new(PLAYER_HEALTH),
        PlayerAttack::default(),
        Knockback::default(),
        Sprite {
            color: Color::srgb(0.92, 0.9, 0.85),
            custom_size: Some(Vec2::splat(0.7)),
            ..default()
        },
        Transform::from_xyz(PLAYER_SPAWN.x, PLAYER_SPAWN.y, 1.0),
        RigidBody::Dynamic,
        Collider::circle(PLAYER_RADIUS),
        CollisionEventsEnabled,
        CollisionLayers::new(
            GameLayer::Player,
            [GameLayer::Wall, GameLayer::Enemy, GameLayer::EnemyHitbox],
        ),
        LinearVelocity::default(),
        LockedAxes::ROTATION_LOCKED,
    ));
}

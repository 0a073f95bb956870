//! Combat domain: enemy and boss spawning helpers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::ai::Path;
use crate::combat::components::{
    AiState, BossAi, Combatant, Enemy, EnemyAi, Health, Knockback, MoveSpeed, RangedAttacker,
    Stun, TargetRef, Team,
};
use crate::combat::resources::{BossTuning, EnemyTuning};
use crate::core::Freezable;
use crate::movement::GameLayer;

const ENEMY_RADIUS: f32 = 0.35;
const BOSS_RADIUS: f32 = 0.6;

/// Bundle for spawning ranged trash enemies
#[derive(Bundle)]
pub struct EnemyBundle {
    pub enemy: Enemy,
    pub combatant: Combatant,
    pub team: Team,
    pub health: Health,
    pub ai: EnemyAi,
    pub attacker: RangedAttacker,
    pub path: Path,
    pub target: TargetRef,
    pub speed: MoveSpeed,
    pub stun: Stun,
    pub knockback: Knockback,
    pub freezable: Freezable,
    pub sprite: Sprite,
    pub transform: Transform,
    pub rigid_body: RigidBody,
    pub collider: Collider,
    pub collision_events: CollisionEventsEnabled,
    pub collision_layers: CollisionLayers,
    pub velocity: LinearVelocity,
    pub locked_axes: LockedAxes,
}

impl EnemyBundle {
    pub fn new(position: Vec2, target: Option<Entity>, tuning: &EnemyTuning) -> Self {
        Self {
            enemy: Enemy,
            combatant: Combatant,
            team: Team::Enemy,
            health: Health::new(tuning.health),
            ai: EnemyAi {
                state: AiState::Idle,
                detection_range: tuning.detection_range,
                shooting_range: tuning.shooting_range,
            },
            attacker: RangedAttacker::default(),
            path: Path::default(),
            target: TargetRef(target),
            speed: MoveSpeed::new(tuning.move_speed),
            stun: Stun::default(),
            knockback: Knockback::default(),
            freezable: Freezable,
            sprite: Sprite {
                color: Color::srgb(0.75, 0.25, 0.25),
                custom_size: Some(Vec2::splat(0.7)),
                ..default()
            },
            transform: Transform::from_xyz(position.x, position.y, 1.0),
            rigid_body: RigidBody::Dynamic,
            collider: Collider::circle(ENEMY_RADIUS),
            collision_events: CollisionEventsEnabled,
            collision_layers: CollisionLayers::new(
                GameLayer::Enemy,
                [GameLayer::Wall, GameLayer::Player, GameLayer::PlayerHitbox],
            ),
            velocity: LinearVelocity::default(),
            locked_axes: LockedAxes::ROTATION_LOCKED,
        }
    }
}

/// Spawn the crown boss. The boss carries no planner path; its movement
/// comes from the idle handler and from attack tasks.
pub fn spawn_boss(
    commands: &mut Commands,
    position: Vec2,
    target: Option<Entity>,
    tuning: &BossTuning,
) -> Entity {
    commands
        .spawn((
            (
                Enemy,
                Combatant,
                Team::Enemy,
                Health::new(tuning.health),
                BossAi::default(),
                TargetRef(target),
                MoveSpeed::new(tuning.move_speed),
                Stun::default(),
                Knockback::default(),
                Freezable,
            ),
            (
                Sprite {
                    color: Color::srgb(0.85, 0.65, 0.15),
                    custom_size: Some(Vec2::splat(1.4)),
                    ..default()
                },
                Transform::from_xyz(position.x, position.y, 1.0),
            ),
            (
                RigidBody::Dynamic,
                Collider::circle(BOSS_RADIUS),
                CollisionEventsEnabled,
                CollisionLayers::new(
                    GameLayer::Enemy,
                    [GameLayer::Wall, GameLayer::Player, GameLayer::PlayerHitbox],
                ),
                LinearVelocity::default(),
                LockedAxes::ROTATION_LOCKED,
            ),
        ))
        .id()
}

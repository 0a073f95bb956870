//! Combat domain: projectile flight models and hit application.
//!
//! Two projectiles live here: the straight-flying bolt used by ranged
//! trash enemies (trigger-volume hit test, physics-driven), and the thrown
//! crown (purely parametric arc out, pause, arc back to the thrower).

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{Combatant, Team};
use crate::combat::events::DamageEvent;
use crate::combat::resources::ProjectileTuning;
use crate::movement::GameLayer;

/// Visual arc offset for a 0-1 flight progress: zero at both endpoints,
/// `height` at the midpoint.
pub fn arc_offset(progress: f32, height: f32) -> f32 {
    (progress * std::f32::consts::PI).sin() * height
}

/// Straight single-shot projectile.
#[derive(Component, Debug)]
pub struct Bolt {
    pub damage: f32,
    pub lifetime: f32,
    /// Seconds between repeat hits; None despawns the bolt on first contact
    pub multi_hit: Option<f32>,
    pub hit_timer: f32,
    pub source: Entity,
}

impl Bolt {
    /// Register a contact. Returns true when the bolt should despawn.
    pub fn register_hit(&mut self) -> bool {
        match self.multi_hit {
            None => true,
            Some(cooldown) => {
                self.hit_timer = cooldown;
                false
            }
        }
    }

    pub fn can_hit(&self) -> bool {
        self.hit_timer <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrownPhase {
    Outbound,
    Paused,
    Return,
}

/// Throw-and-return projectile for the boss's crown attack.
#[derive(Component, Debug)]
pub struct Crown {
    pub source: Entity,
    pub origin: Vec2,
    pub target_point: Vec2,
    pub phase: CrownPhase,
    pub phase_elapsed: f32,
    pub total_elapsed: f32,
    pub has_hit: bool,
}

pub(crate) fn spawn_bolt(
    commands: &mut Commands,
    source: Entity,
    from: Vec2,
    toward: Vec2,
    tuning: &ProjectileTuning,
) {
    let dir = (toward - from).normalize_or_zero();
    commands.spawn((
        Bolt {
            damage: tuning.bolt_damage,
            lifetime: tuning.bolt_lifetime,
            multi_hit: tuning.bolt_multi_hit,
            hit_timer: 0.0,
            source,
        },
        Sprite {
            color: Color::srgb(0.95, 0.6, 0.2),
            custom_size: Some(Vec2::splat(0.25)),
            ..default()
        },
        Transform::from_xyz(from.x, from.y, 1.5),
        RigidBody::Kinematic,
        Collider::circle(0.12),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::EnemyHitbox, [GameLayer::Player, GameLayer::Wall]),
        LinearVelocity(dir * tuning.bolt_speed),
    ));
}

pub(crate) fn spawn_crown(
    commands: &mut Commands,
    source: Entity,
    from: Vec2,
    target_point: Vec2,
    _tuning: &ProjectileTuning,
) {
    commands.spawn((
        Crown {
            source,
            origin: from,
            target_point,
            phase: CrownPhase::Outbound,
            phase_elapsed: 0.0,
            total_elapsed: 0.0,
            has_hit: false,
        },
        Sprite {
            color: Color::srgb(0.95, 0.8, 0.2),
            custom_size: Some(Vec2::splat(0.5)),
            ..default()
        },
        Transform::from_xyz(from.x, from.y, 1.5),
    ));
}

pub(crate) fn update_bolt_lifetimes(
    mut commands: Commands,
    time: Res<Time>,
    mut bolts: Query<(Entity, &mut Bolt)>,
) {
    let dt = time.delta_secs();
    for (entity, mut bolt) in &mut bolts {
        bolt.lifetime -= dt;
        if bolt.hit_timer > 0.0 {
            bolt.hit_timer -= dt;
        }
        if bolt.lifetime <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn detect_bolt_hits(
    mut commands: Commands,
    mut collisions: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut bolt_query: Query<(&mut Bolt, &LinearVelocity)>,
    target_query: Query<(Entity, &Team), With<Combatant>>,
    wall_query: Query<(), With<crate::arena::Wall>>,
) {
    for event in collisions.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (bolt_entity, target_entity) in pairs {
            let Ok((mut bolt, velocity)) = bolt_query.get_mut(bolt_entity) else {
                continue;
            };
            // Bolts shatter on walls without dealing damage
            if wall_query.get(target_entity).is_ok() {
                commands.entity(bolt_entity).despawn();
                continue;
            }
            let Ok((target, team)) = target_query.get(target_entity) else {
                continue;
            };
            if *team != Team::Player || !bolt.can_hit() {
                continue;
            }

            damage_events.write(DamageEvent {
                source: bolt.source,
                target,
                amount: bolt.damage,
                knockback: velocity.0.normalize_or_zero(),
                stun: 0.0,
            });
            if bolt.register_hit() {
                commands.entity(bolt_entity).despawn();
            }
        }
    }
}

/// Parametric crown flight. Outbound interpolates toward the frozen target
/// point under a sine arc; a single hit test fires on arrival; after a
/// short hang the crown flies back to wherever the thrower is *now*, at
/// half arc height, and despawns on arrival (or if the thrower is gone).
pub(crate) fn update_crown_flight(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<ProjectileTuning>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut crowns: Query<(Entity, &mut Crown, &mut Transform)>,
    source_query: Query<&Transform, Without<Crown>>,
    target_query: Query<(Entity, &Transform, &Team), (With<Combatant>, Without<Crown>)>,
) {
    let dt = time.delta_secs();

    for (entity, mut crown, mut transform) in &mut crowns {
        crown.phase_elapsed += dt;
        crown.total_elapsed += dt;
        if crown.total_elapsed > tuning.crown_timeout {
            commands.entity(entity).despawn();
            continue;
        }

        transform.rotate_z(tuning.crown_spin * dt);

        match crown.phase {
            CrownPhase::Outbound => {
                let flight_time =
                    (crown.origin.distance(crown.target_point) / tuning.crown_speed).max(0.05);
                let progress = (crown.phase_elapsed / flight_time).min(1.0);
                let base = crown.origin.lerp(crown.target_point, progress);
                let lift = arc_offset(progress, tuning.crown_arc_height);
                transform.translation.x = base.x;
                transform.translation.y = base.y + lift;

                if progress >= 1.0 {
                    if !crown.has_hit {
                        crown.has_hit = true;
                        apply_crown_hit(&crown, &tuning, &target_query, &mut damage_events);
                    }
                    crown.phase = CrownPhase::Paused;
                    crown.phase_elapsed = 0.0;
                }
            }
            CrownPhase::Paused => {
                if crown.phase_elapsed >= tuning.crown_pause {
                    crown.phase = CrownPhase::Return;
                    crown.phase_elapsed = 0.0;
                }
            }
            CrownPhase::Return => {
                // The thrower may have moved or died since the throw
                let Ok(source_transform) = source_query.get(crown.source) else {
                    commands.entity(entity).despawn();
                    continue;
                };
                let source_pos = source_transform.translation.truncate();
                let flight_time =
                    (crown.target_point.distance(source_pos) / tuning.crown_speed).max(0.05);
                let progress = (crown.phase_elapsed / flight_time).min(1.0);
                let base = crown.target_point.lerp(source_pos, progress);
                let lift = arc_offset(progress, tuning.crown_arc_height * 0.5);
                transform.translation.x = base.x;
                transform.translation.y = base.y + lift;

                if progress >= 1.0 {
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}

fn apply_crown_hit(
    crown: &Crown,
    tuning: &ProjectileTuning,
    target_query: &Query<(Entity, &Transform, &Team), (With<Combatant>, Without<Crown>)>,
    damage_events: &mut MessageWriter<DamageEvent>,
) {
    for (target, target_transform, team) in target_query.iter() {
        if *team != Team::Player {
            continue;
        }
        let target_pos = target_transform.translation.truncate();
        if target_pos.distance(crown.target_point) <= tuning.crown_hit_radius {
            let away = (target_pos - crown.target_point).normalize_or_zero();
            damage_events.write(DamageEvent {
                source: crown.source,
                target,
                amount: tuning.crown_damage,
                knockback: away,
                stun: 0.0,
            });
        }
    }
}

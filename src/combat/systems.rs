//! Combat domain: combat systems for input, stun, damage, and cleanup.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::ai::tasks::AttackTask;
use crate::combat::components::{
    BossAi, BossState, Combatant, Enemy, Health, Hitbox, HitboxLifetime, Knockback, MoveSpeed,
    PlayerAttack, Stun, Team, TelegraphIndicator,
};
use crate::combat::events::{DamageEvent, DeathEvent, StunEvent};
use crate::combat::resources::{CombatInput, CombatTuning, EnemyTuning};
use crate::movement::{Facing, GameLayer, MovementState, Player};

pub(crate) fn read_combat_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<CombatInput>,
) {
    input.attack = keyboard.just_pressed(KeyCode::KeyZ) || keyboard.just_pressed(KeyCode::KeyU);
}

/// Ticks stuns and knockback. The stun-clear edge restores the stored
/// movement multiplier — restoration is explicit, never implied by the
/// timer merely elapsing elsewhere.
pub(crate) fn update_combat_timers(
    time: Res<Time>,
    mut query: Query<(&mut Stun, &mut MoveSpeed, Option<&mut Knockback>)>,
) {
    let dt = time.delta_secs();

    for (mut stun, mut speed, knockback) in &mut query {
        if stun.tick(dt, &mut speed) {
            debug!("Stun expired, movement multiplier restored to {}", speed.multiplier);
        }
        if let Some(mut knockback) = knockback {
            if knockback.timer > 0.0 {
                knockback.timer -= dt;
            }
        }
    }
}

/// Single entry point for the stun contract: suppress the actor, cancel
/// any in-flight attack task, and leave no partial transforms behind.
pub(crate) fn apply_stun_requests(
    mut commands: Commands,
    mut stun_events: MessageReader<StunEvent>,
    mut query: Query<(
        &mut Stun,
        &mut MoveSpeed,
        Option<&mut BossAi>,
        Option<&mut Transform>,
        Option<&mut LinearVelocity>,
        Option<&AttackTask>,
    )>,
) {
    for event in stun_events.read() {
        let Ok((mut stun, mut speed, boss, transform, velocity, task)) =
            query.get_mut(event.entity)
        else {
            continue;
        };

        stun.apply(event.duration, &mut speed);

        if let Some(mut velocity) = velocity {
            velocity.0 = Vec2::ZERO;
        }
        if task.is_some() {
            // Abandon the task and reset its frozen visual side effects
            commands.entity(event.entity).remove::<AttackTask>();
            if let Some(mut transform) = transform {
                transform.rotation = Quat::IDENTITY;
            }
            debug!("Stun cancelled an in-flight attack task");
        }
        if let Some(mut boss) = boss {
            boss.state = BossState::Stunned;
        }
    }
}

pub(crate) fn process_player_attacks(
    mut commands: Commands,
    time: Res<Time>,
    input: Res<CombatInput>,
    tuning: Res<CombatTuning>,
    mut query: Query<(Entity, &Transform, &MovementState, &mut PlayerAttack), With<Player>>,
) {
    let dt = time.delta_secs();

    for (entity, transform, movement, mut attack) in &mut query {
        if attack.cooldown_timer > 0.0 {
            attack.cooldown_timer -= dt;
        }
        if !input.attack || attack.cooldown_timer > 0.0 {
            continue;
        }
        attack.cooldown_timer = tuning.player_attack_cooldown;

        let dir = match movement.facing {
            Facing::Right => Vec2::X,
            Facing::Left => Vec2::NEG_X,
        };
        let hitbox_pos = transform.translation.truncate() + dir * tuning.player_attack_range;

        commands.spawn((
            Hitbox {
                damage: tuning.player_attack_damage,
                knockback: 1.0,
                stun: 0.0,
                owner: entity,
                hit_entities: Vec::new(),
            },
            Team::Player,
            HitboxLifetime(tuning.hitbox_lifetime),
            Sprite {
                color: Color::srgba(1.0, 1.0, 0.0, 0.5),
                custom_size: Some(tuning.player_attack_size),
                ..default()
            },
            Transform::from_xyz(hitbox_pos.x, hitbox_pos.y, 1.0),
            Collider::rectangle(tuning.player_attack_size.x, tuning.player_attack_size.y),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::PlayerHitbox, [GameLayer::Enemy]),
        ));
    }
}

pub(crate) fn cleanup_expired_hitboxes(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut HitboxLifetime)>,
) {
    let dt = time.delta_secs();
    for (entity, mut lifetime) in &mut query {
        lifetime.0 -= dt;
        if lifetime.0 <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn cleanup_telegraphs(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut TelegraphIndicator)>,
) {
    let dt = time.delta_secs();
    for (entity, mut telegraph) in &mut query {
        telegraph.timer -= dt;
        if telegraph.timer <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn detect_hitbox_collisions(
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    mut hitbox_query: Query<(&mut Hitbox, &Team, &Transform)>,
    target_query: Query<(Entity, &Team, &Transform), With<Combatant>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (hitbox_entity, target_entity) in pairs {
            let Ok((mut hitbox, hitbox_team, hitbox_transform)) =
                hitbox_query.get_mut(hitbox_entity)
            else {
                continue;
            };
            let Ok((target, target_team, target_transform)) = target_query.get(target_entity)
            else {
                continue;
            };

            if hitbox_team == target_team || hitbox.owner == target {
                continue;
            }
            if hitbox.hit_entities.contains(&target) {
                continue;
            }
            hitbox.hit_entities.push(target);

            let knockback_dir = (target_transform.translation.truncate()
                - hitbox_transform.translation.truncate())
            .normalize_or_zero();
            // Overlapping spawns degenerate to a fixed axis instead of NaN
            let knockback_dir = if knockback_dir == Vec2::ZERO {
                Vec2::X
            } else {
                knockback_dir
            };

            damage_events.write(DamageEvent {
                source: hitbox.owner,
                target,
                amount: hitbox.damage,
                knockback: knockback_dir * hitbox.knockback,
                stun: hitbox.stun,
            });
        }
    }
}

/// The one place health is mutated. Dedupe guards (hitbox hit lists, the
/// charge `has_hit` flag, the crown arrival flag) live with the callers;
/// by the time an event lands here it is authoritative.
pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut stun_events: MessageWriter<StunEvent>,
    tuning: Res<EnemyTuning>,
    mut query: Query<(&mut Health, &mut Sprite, Has<BossAi>, Has<Enemy>)>,
) {
    for event in damage_events.read() {
        let Ok((mut health, mut sprite, is_boss, is_enemy)) = query.get_mut(event.target) else {
            continue;
        };

        health.take_damage(event.amount);
        sprite.color = Color::srgb(1.0, 0.5, 0.5);

        // Basic enemies flinch when hit; the boss only yields to explicit
        // stun requests so hits cannot trivially cancel its attacks
        if is_enemy && !is_boss {
            stun_events.write(StunEvent {
                entity: event.target,
                duration: event.stun.max(tuning.flinch_stun),
            });
        }

        if health.is_dead() {
            death_events.write(DeathEvent {
                entity: event.target,
            });
        }
    }
}

pub(crate) fn apply_knockback(
    tuning: Res<CombatTuning>,
    mut damage_events: MessageReader<DamageEvent>,
    mut query: Query<(&mut LinearVelocity, Option<&mut Knockback>)>,
) {
    for event in damage_events.read() {
        let Ok((mut velocity, knockback)) = query.get_mut(event.target) else {
            continue;
        };
        let dir = event.knockback.normalize_or_zero();
        if dir == Vec2::ZERO {
            continue;
        }
        velocity.0 = dir * tuning.knockback_speed;
        if let Some(mut knockback) = knockback {
            knockback.timer = tuning.knockback_time;
        }
    }
}

pub(crate) fn process_deaths(
    mut commands: Commands,
    mut death_events: MessageReader<DeathEvent>,
    query: Query<(Entity, Has<BossAi>)>,
) {
    for event in death_events.read() {
        let Ok((entity, is_boss)) = query.get(event.entity) else {
            continue;
        };
        if is_boss {
            info!("Boss defeated");
        }
        commands.entity(entity).despawn();
    }
}

//! Combat domain: cooperative multi-phase attack tasks for the boss.
//!
//! A task is a short list of timed phases advanced once per tick. While a
//! task is attached it owns the boss's state: the idle handler stands down
//! and every transition until completion comes from here. Inserting a new
//! task replaces any previous one; stun and death abandon the task through
//! `apply_stun_requests` / despawn with velocity and rotation reset.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::arena::{ACTOR_RADIUS, TileMap, cast_ray, safe_direction};
use crate::combat::components::{BossAi, BossState, TargetRef};
use crate::combat::events::DamageEvent;
use crate::combat::projectiles::spawn_crown;
use crate::combat::resources::{BossTuning, ProjectileTuning};
use crate::core::Frozen;
use crate::movement::{MovementState, Player};

/// Lean angle while the boss is mid-charge.
const CHARGE_TILT: f32 = 0.18;

#[derive(Component, Debug)]
pub struct AttackTask {
    pub kind: TaskKind,
    pub phase: usize,
    pub phase_elapsed: f32,
}

#[derive(Debug)]
pub enum TaskKind {
    /// Rush along a direction frozen at commit time.
    Charge {
        direction: Vec2,
        target_point: Vec2,
        has_hit: bool,
    },
    /// Step back, then lob the crown at a point frozen at task start.
    Crown {
        start_point: Vec2,
        recoil_point: Vec2,
        target_point: Vec2,
        thrown: bool,
    },
}

impl AttackTask {
    /// Charge toward where the target stands right now; the destination
    /// never updates after this.
    pub fn charge(origin: Vec2, target_pos: Vec2, tuning: &BossTuning) -> Self {
        let direction = safe_direction(target_pos - origin);
        Self {
            kind: TaskKind::Charge {
                direction,
                target_point: origin + direction * tuning.charge_distance,
                has_hit: false,
            },
            phase: 0,
            phase_elapsed: 0.0,
        }
    }

    /// Crown throw aimed at the target's position captured here, even if
    /// the target moves during the windup.
    pub fn crown(origin: Vec2, target_pos: Vec2, tuning: &BossTuning) -> Self {
        let away = safe_direction(origin - target_pos);
        Self {
            kind: TaskKind::Crown {
                start_point: origin,
                recoil_point: origin + away * tuning.recoil_distance,
                target_point: target_pos,
                thrown: false,
            },
            phase: 0,
            phase_elapsed: 0.0,
        }
    }

    pub fn phase_count(&self) -> usize {
        match self.kind {
            TaskKind::Charge { .. } => 2,
            TaskKind::Crown { .. } => 3,
        }
    }

    pub fn phase_duration(&self, phase: usize, tuning: &BossTuning) -> f32 {
        match self.kind {
            TaskKind::Charge { .. } => match phase {
                0 => tuning.charge_prep_time,
                _ => tuning.charge_time,
            },
            TaskKind::Crown { .. } => match phase {
                0 => tuning.recoil_time,
                _ => tuning.throw_time * 0.5,
            },
        }
    }

    /// The boss state each phase claims while the task owns the machine.
    pub fn state_for_phase(&self, phase: usize) -> BossState {
        match self.kind {
            TaskKind::Charge { .. } => {
                if phase == 0 {
                    BossState::PreparingCharge
                } else {
                    BossState::Charging
                }
            }
            TaskKind::Crown { .. } => {
                if phase == 0 {
                    BossState::RecoilForCrown
                } else {
                    BossState::ThrowingCrown
                }
            }
        }
    }
}

/// Idempotence guard for the charge hit: damage lands at most once per
/// task instance, and never through the target's dash i-frames.
pub(crate) fn should_apply_charge_hit(
    has_hit: bool,
    distance: f32,
    hit_radius: f32,
    target_evading: bool,
) -> bool {
    !has_hit && !target_evading && distance < hit_radius
}

pub(crate) fn run_attack_tasks(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<BossTuning>,
    projectiles: Res<ProjectileTuning>,
    map: Option<Res<TileMap>>,
    mut damage_events: MessageWriter<DamageEvent>,
    player_query: Query<(Entity, &Transform, &MovementState), With<Player>>,
    mut boss_query: Query<
        (
            Entity,
            &mut AttackTask,
            &mut BossAi,
            &mut Transform,
            &mut LinearVelocity,
            &TargetRef,
        ),
        (Without<Frozen>, Without<Player>),
    >,
) {
    let dt = time.delta_secs();

    for (entity, mut task, mut ai, mut transform, mut velocity, target) in &mut boss_query {
        let task = &mut *task;
        task.phase_elapsed += dt;
        let duration = task.phase_duration(task.phase, &tuning);
        let mut phase_done = task.phase_elapsed >= duration;
        let mut truncated = false;
        let position = transform.translation.truncate();

        match &mut task.kind {
            TaskKind::Charge {
                direction,
                target_point,
                has_hit,
            } => {
                if task.phase == 0 {
                    // Wind-up: warning only, no movement
                    velocity.0 = Vec2::ZERO;
                } else {
                    velocity.0 = *direction * tuning.charge_speed;
                    transform.rotation = Quat::from_rotation_z(-CHARGE_TILT * direction.x.signum());

                    // Sweep the whole of this tick's travel so thin walls
                    // cannot be tunnelled at low frame rates
                    if let Some(map) = map.as_deref() {
                        let travel = tuning.charge_speed * dt + ACTOR_RADIUS;
                        if cast_ray(map, position, *direction, travel, ACTOR_RADIUS).is_some() {
                            truncated = true;
                        }
                    }
                    // Passing the frozen destination also ends the rush
                    if (*target_point - position).dot(*direction) <= 0.0 {
                        truncated = true;
                    }

                    if let Some((player_entity, player_transform, player_state)) = target
                        .0
                        .and_then(|entity| player_query.get(entity).ok())
                    {
                        let distance =
                            position.distance(player_transform.translation.truncate());
                        if should_apply_charge_hit(
                            *has_hit,
                            distance,
                            tuning.charge_hit_radius,
                            player_state.is_dashing,
                        ) {
                            *has_hit = true;
                            damage_events.write(DamageEvent {
                                source: entity,
                                target: player_entity,
                                amount: tuning.charge_damage,
                                knockback: *direction,
                                stun: 0.0,
                            });
                        }
                    }
                }
            }
            TaskKind::Crown {
                start_point,
                recoil_point,
                target_point,
                thrown,
            } => match task.phase {
                0 => {
                    let step = *recoil_point - *start_point;
                    velocity.0 = if tuning.recoil_time > 0.0 {
                        step / tuning.recoil_time
                    } else {
                        Vec2::ZERO
                    };
                    if phase_done {
                        // Snap to the exact recoil point; integration drift
                        // must not accumulate into the throw
                        transform.translation = recoil_point.extend(transform.translation.z);
                        velocity.0 = Vec2::ZERO;
                    }
                }
                1 => {
                    velocity.0 = Vec2::ZERO;
                    if phase_done && !*thrown {
                        *thrown = true;
                        spawn_crown(&mut commands, entity, position, *target_point, &projectiles);
                        debug!("Crown thrown at frozen point {:?}", target_point);
                    }
                }
                _ => {
                    velocity.0 = Vec2::ZERO;
                }
            },
        }

        phase_done = phase_done || truncated;
        if !phase_done {
            continue;
        }

        if truncated || task.phase + 1 >= task.phase_count() {
            velocity.0 = Vec2::ZERO;
            transform.rotation = Quat::IDENTITY;
            ai.cooldown_timer = tuning.attack_cooldown;
            ai.state = BossState::Idle;
            commands.entity(entity).remove::<AttackTask>();
            debug!("Attack task finished, boss back to Idle");
        } else {
            task.phase += 1;
            task.phase_elapsed = 0.0;
            ai.state = task.state_for_phase(task.phase);
        }
    }
}

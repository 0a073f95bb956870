//! Combat domain: boss AI updates and attack selection.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::ai::tasks::AttackTask;
use crate::combat::components::{
    BossAi, BossState, Knockback, MoveSpeed, Stun, TargetRef, TelegraphIndicator,
};
use crate::combat::resources::BossTuning;
use crate::core::{ActionFreeze, Frozen};
use crate::movement::Player;

/// Which attack the idle decision commits to at a given distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BossAttack {
    Charge,
    CrownThrow,
}

/// Distance bands for the idle decision: close targets get charged,
/// mid-range targets get the crown, everything farther gets chased.
pub(crate) fn choose_attack(distance: f32, tuning: &BossTuning) -> Option<BossAttack> {
    if distance < tuning.charge_band {
        Some(BossAttack::Charge)
    } else if distance <= tuning.crown_band {
        Some(BossAttack::CrownThrow)
    } else {
        None
    }
}

pub(crate) fn update_boss_ai(
    mut commands: Commands,
    time: Res<Time>,
    freeze: Res<ActionFreeze>,
    tuning: Res<BossTuning>,
    player_query: Query<&Transform, With<Player>>,
    mut boss_query: Query<
        (
            Entity,
            &Transform,
            &mut BossAi,
            &Stun,
            &Knockback,
            &MoveSpeed,
            &TargetRef,
            &mut LinearVelocity,
            &mut Sprite,
            Option<&AttackTask>,
        ),
        (Without<Frozen>, Without<Player>),
    >,
) {
    let dt = time.delta_secs();

    for (
        entity,
        transform,
        mut ai,
        stun,
        knockback,
        speed,
        target,
        mut velocity,
        mut sprite,
        task,
    ) in &mut boss_query
    {
        if ai.cooldown_timer > 0.0 {
            ai.cooldown_timer -= dt;
        }

        if stun.is_stunned() {
            velocity.0 = Vec2::ZERO;
            continue;
        }
        // Stun expiry path: the timer system has already restored the
        // movement multiplier, the state follows here
        if ai.state == BossState::Stunned {
            ai.state = BossState::Idle;
            debug!("Boss stun expired, back to Idle");
        }

        // An active task owns every transition until it completes
        if task.is_some() {
            continue;
        }

        if freeze.is_frozen() {
            velocity.0 = Vec2::ZERO;
            continue;
        }

        let Some(target_transform) = target.0.and_then(|entity| player_query.get(entity).ok())
        else {
            velocity.0 = Vec2::ZERO;
            continue;
        };

        let position = transform.translation.truncate();
        let target_pos = target_transform.translation.truncate();
        let distance = position.distance(target_pos);

        if ai.cooldown_timer <= 0.0 {
            match choose_attack(distance, &tuning) {
                Some(BossAttack::Charge) => {
                    let attack = AttackTask::charge(position, target_pos, &tuning);
                    ai.state = attack.state_for_phase(0);
                    spawn_charge_telegraph(&mut commands, position, target_pos, &tuning);
                    commands.entity(entity).insert(attack);
                    velocity.0 = Vec2::ZERO;
                    debug!("Boss commits to a charge at distance {:.1}", distance);
                    continue;
                }
                Some(BossAttack::CrownThrow) => {
                    let attack = AttackTask::crown(position, target_pos, &tuning);
                    ai.state = attack.state_for_phase(0);
                    commands.entity(entity).insert(attack);
                    velocity.0 = Vec2::ZERO;
                    debug!("Boss commits to a crown throw at distance {:.1}", distance);
                    continue;
                }
                None => {
                    // Too far for either attack: close the gap
                    if knockback.timer > 0.0 {
                        continue;
                    }
                    let dir = (target_pos - position).normalize_or_zero();
                    velocity.0 = dir * speed.effective();
                    if dir.x.abs() > f32::EPSILON {
                        sprite.flip_x = dir.x < 0.0;
                    }
                    continue;
                }
            }
        }

        // On cooldown: hold position
        if knockback.timer <= 0.0 {
            velocity.0 = Vec2::ZERO;
        }
    }
}

/// Warning stripe along the charge lane, cleaned up by timer.
fn spawn_charge_telegraph(
    commands: &mut Commands,
    position: Vec2,
    target_pos: Vec2,
    tuning: &BossTuning,
) {
    let dir = (target_pos - position).normalize_or_zero();
    let center = position + dir * (tuning.charge_distance * 0.5);
    let angle = dir.y.atan2(dir.x);
    commands.spawn((
        TelegraphIndicator {
            timer: tuning.charge_prep_time + tuning.charge_time,
        },
        Sprite {
            color: Color::srgba(0.9, 0.2, 0.15, 0.35),
            custom_size: Some(Vec2::new(tuning.charge_distance, 0.8)),
            ..default()
        },
        Transform::from_xyz(center.x, center.y, 0.5).with_rotation(Quat::from_rotation_z(angle)),
    ));
}

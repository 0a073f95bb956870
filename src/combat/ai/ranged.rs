//! Combat domain: fire-rate-gated projectile attacks for the basic tier.
//!
//! Firing runs on its own timer, independent of the state machine, but the
//! same gates apply: target in shooting range with line of sight, and no
//! active stun. When a shot goes out the paired state machine is nudged
//! into Shooting; the next transition tick has the final say.

use bevy::prelude::*;

use crate::arena::{ACTOR_RADIUS, TileMap, has_line_of_sight};
use crate::combat::components::{AiState, Enemy, EnemyAi, RangedAttacker, Stun, TargetRef};
use crate::combat::projectiles::spawn_bolt;
use crate::combat::resources::{EnemyTuning, ProjectileTuning};
use crate::core::{ActionFreeze, Frozen};
use crate::movement::Player;

pub(crate) fn update_ranged_attacks(
    mut commands: Commands,
    time: Res<Time>,
    freeze: Res<ActionFreeze>,
    tuning: Res<EnemyTuning>,
    projectiles: Res<ProjectileTuning>,
    map: Option<Res<TileMap>>,
    player_query: Query<&Transform, With<Player>>,
    mut enemy_query: Query<
        (
            Entity,
            &Transform,
            &mut RangedAttacker,
            &mut EnemyAi,
            &TargetRef,
            &Stun,
        ),
        (With<Enemy>, Without<Frozen>),
    >,
) {
    if freeze.is_frozen() {
        return;
    }
    let Some(map) = map else {
        return;
    };
    let dt = time.delta_secs();

    for (entity, transform, mut attacker, mut ai, target, stun) in &mut enemy_query {
        attacker.fire_timer += dt;
        if stun.is_stunned() {
            continue;
        }
        if attacker.fire_timer < tuning.fire_interval {
            continue;
        }

        let Some(target_transform) = target.0.and_then(|entity| player_query.get(entity).ok())
        else {
            continue;
        };

        let position = transform.translation.truncate();
        let target_pos = target_transform.translation.truncate();
        if position.distance(target_pos) > tuning.shooting_range {
            continue;
        }
        if !has_line_of_sight(&map, position, target_pos, ACTOR_RADIUS) {
            continue;
        }

        attacker.fire_timer = 0.0;
        if ai.state != AiState::Shooting {
            ai.state = AiState::Shooting;
        }
        spawn_bolt(&mut commands, entity, position, target_pos, &projectiles);
        debug!("Enemy fired a bolt from {:?}", position);
    }
}

//! Combat domain: basic enemy state machine updates.

use bevy::prelude::*;

use crate::arena::{ACTOR_RADIUS, TileMap, has_line_of_sight};
use crate::combat::ai::path::Path;
use crate::combat::components::{AiState, Enemy, EnemyAi, Stun, TargetRef};
use crate::core::{ActionFreeze, Frozen};
use crate::movement::Player;

/// Pure transition rule for the basic tier. Every state has a successor
/// for every trigger; anything not listed keeps the current state.
pub(crate) fn next_state(
    state: AiState,
    distance: f32,
    has_los: bool,
    detection_range: f32,
    shooting_range: f32,
) -> AiState {
    match state {
        AiState::Idle => {
            if distance < detection_range {
                AiState::Pursuit
            } else {
                AiState::Idle
            }
        }
        AiState::Pursuit => {
            if distance > detection_range {
                AiState::Idle
            } else if distance <= shooting_range && has_los {
                AiState::Shooting
            } else {
                AiState::Pursuit
            }
        }
        AiState::Shooting => {
            if distance > shooting_range || !has_los {
                AiState::Pursuit
            } else {
                AiState::Shooting
            }
        }
    }
}

/// Maintain-distance rule for the Shooting state: close back in only past
/// the hold distance. Holding never retreats.
pub(crate) fn should_close_in(distance: f32, shooting_range: f32, hold_factor: f32) -> bool {
    distance > shooting_range * hold_factor
}

pub(crate) fn update_enemy_ai(
    freeze: Res<ActionFreeze>,
    map: Option<Res<TileMap>>,
    player_query: Query<&Transform, With<Player>>,
    mut enemy_query: Query<
        (&Transform, &mut EnemyAi, &TargetRef, &Stun, &mut Path),
        (With<Enemy>, Without<Frozen>),
    >,
) {
    if freeze.is_frozen() {
        return;
    }
    let Some(map) = map else {
        return;
    };

    for (transform, mut ai, target, stun, mut path) in &mut enemy_query {
        // Stun suppresses transitions but never resets the recorded state
        if stun.is_stunned() {
            continue;
        }

        let Some(target_transform) = target.0.and_then(|entity| player_query.get(entity).ok())
        else {
            continue;
        };

        let position = transform.translation.truncate();
        let target_pos = target_transform.translation.truncate();
        let distance = position.distance(target_pos);
        let has_los = has_line_of_sight(&map, position, target_pos, ACTOR_RADIUS);

        let next = next_state(
            ai.state,
            distance,
            has_los,
            ai.detection_range,
            ai.shooting_range,
        );
        if next != ai.state {
            debug!("Enemy {:?} -> {:?} at distance {:.1}", ai.state, next, distance);
            ai.state = next;
            path.invalidate();
        }
    }
}

//! Movement domain: top-down locomotion for the player.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::Knockback;
use crate::movement::{Facing, MovementInput, MovementState, MovementTuning, Player};

pub(crate) fn update_timers(
    time: Res<Time>,
    mut query: Query<&mut MovementState, With<Player>>,
) {
    let dt = time.delta_secs();

    for mut state in &mut query {
        if state.is_dashing {
            state.dash_timer -= dt;
            if state.dash_timer <= 0.0 {
                state.is_dashing = false;
            }
        }
        if state.dash_cooldown_timer > 0.0 {
            state.dash_cooldown_timer -= dt;
        }
    }
}

pub(crate) fn apply_dash(
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<&mut MovementState, With<Player>>,
) {
    for mut state in &mut query {
        if !input.dash_just_pressed || state.is_dashing || state.dash_cooldown_timer > 0.0 {
            continue;
        }

        state.is_dashing = true;
        state.dash_timer = tuning.dash_time;
        state.dash_cooldown_timer = tuning.dash_cooldown;

        // Dash along input, or along facing when no direction is held
        state.dash_direction = if input.axis != Vec2::ZERO {
            input.axis.normalize_or_zero()
        } else {
            match state.facing {
                Facing::Right => Vec2::X,
                Facing::Left => Vec2::NEG_X,
            }
        };
    }
}

pub(crate) fn apply_movement(
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&MovementState, &Knockback, &mut LinearVelocity), With<Player>>,
) {
    for (state, knockback, mut velocity) in &mut query {
        // Let knockback play out before restoring control
        if knockback.timer > 0.0 {
            continue;
        }

        if state.is_dashing {
            velocity.0 = state.dash_direction * tuning.dash_speed;
        } else {
            velocity.0 = input.axis.normalize_or_zero() * tuning.max_speed;
        }
    }
}

pub(crate) fn update_facing(
    input: Res<MovementInput>,
    mut query: Query<(&mut MovementState, &mut Sprite), With<Player>>,
) {
    for (mut state, mut sprite) in &mut query {
        if state.is_dashing {
            continue;
        }
        if input.axis.x > 0.1 {
            state.facing = Facing::Right;
        } else if input.axis.x < -0.1 {
            state.facing = Facing::Left;
        }
        sprite.flip_x = state.facing == Facing::Left;
    }
}

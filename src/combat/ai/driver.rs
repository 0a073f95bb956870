//! Combat domain: converts the current path head into a velocity command.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::ai::path::Path;
use crate::combat::ai::tasks::AttackTask;
use crate::combat::components::{Enemy, Knockback, MoveSpeed, Stun};
use crate::core::Frozen;

/// A waypoint counts as reached inside this distance.
pub const WAYPOINT_EPSILON: f32 = 0.1;

/// Pop reached waypoints, then steer at the head. Stunned actors and
/// actors with a zeroed multiplier always command zero velocity, whatever
/// the path still holds.
pub fn drive(path: &mut Path, position: Vec2, speed: &MoveSpeed, stunned: bool) -> Vec2 {
    if stunned || speed.multiplier == 0.0 {
        return Vec2::ZERO;
    }

    while let Some(head) = path.head() {
        if position.distance(head) <= WAYPOINT_EPSILON {
            path.waypoints.pop_front();
        } else {
            break;
        }
    }

    let Some(head) = path.head() else {
        return Vec2::ZERO;
    };
    (head - position).normalize_or_zero() * speed.effective()
}

/// An active attack task owns the actor; the path must not be consumed
/// underneath it, hence the `Without<AttackTask>` filter.
pub(crate) fn drive_along_paths(
    mut query: Query<
        (
            &Transform,
            &mut Path,
            &MoveSpeed,
            &Stun,
            &Knockback,
            &mut LinearVelocity,
            &mut Sprite,
        ),
        (With<Enemy>, Without<Frozen>, Without<AttackTask>),
    >,
) {
    for (transform, mut path, speed, stun, knockback, mut velocity, mut sprite) in &mut query {
        // Knockback owns the velocity until it decays
        if knockback.timer > 0.0 {
            continue;
        }

        let command = drive(
            &mut path,
            transform.translation.truncate(),
            speed,
            stun.is_stunned(),
        );
        velocity.0 = command;

        if command.x > f32::EPSILON {
            sprite.flip_x = false;
        } else if command.x < -f32::EPSILON {
            sprite.flip_x = true;
        }
    }
}

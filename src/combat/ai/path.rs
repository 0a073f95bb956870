//! Combat domain: waypoint planning for the basic enemy tier.
//!
//! Routes are recomputed on a throttle, never patched: each plan fully
//! replaces the previous one. Inside corridors the route hugs the grid;
//! in the open it goes straight at the target, detouring once around the
//! first obstruction.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::arena::{ACTOR_RADIUS, TileMap, cast_ray, has_line_of_sight, is_in_corridor};
use crate::combat::ai::enemy::should_close_in;
use crate::combat::components::{AiState, Enemy, EnemyAi, Stun, TargetRef};
use crate::combat::resources::EnemyTuning;
use crate::core::{ActionFreeze, Frozen};
use crate::movement::Player;

/// How far a detour point sits to the side of the obstruction.
const DETOUR_OFFSET: f32 = 1.0;

/// Ordered waypoints toward the current destination, consumed head-first.
#[derive(Component, Debug, Default)]
pub struct Path {
    pub waypoints: VecDeque<Vec2>,
    pub refresh_timer: f32,
}

impl Path {
    pub fn head(&self) -> Option<Vec2> {
        self.waypoints.front().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    /// Forces a recompute on the next planning tick (state entry).
    pub fn invalidate(&mut self) {
        self.refresh_timer = 0.0;
    }
}

/// Plan a fresh route from `from` to `to`, picking the strategy by the
/// corridor heuristic at the start position.
pub fn plan_route(map: &TileMap, from: Vec2, to: Vec2, radius: f32) -> VecDeque<Vec2> {
    if is_in_corridor(map, from) {
        corridor_route(from, to)
    } else {
        detour_route(map, from, to, radius)
    }
}

/// Axis-aligned L-route through tile centers, one waypoint per tile step,
/// with the exact target appended. Obstacles are deliberately ignored;
/// corridors leave no room to steer around them anyway.
pub(crate) fn corridor_route(from: Vec2, to: Vec2) -> VecDeque<Vec2> {
    let x_first = l_route(from, to, true);
    let y_first = l_route(from, to, false);
    // Shorter raw length wins; ties go to the horizontal-first leg.
    if polyline_length(from, &x_first) <= polyline_length(from, &y_first) {
        x_first
    } else {
        y_first
    }
}

fn l_route(from: Vec2, to: Vec2, x_first: bool) -> VecDeque<Vec2> {
    let mut tile = TileMap::tile_of(from);
    let goal = TileMap::tile_of(to);
    let mut waypoints = VecDeque::new();

    if x_first {
        step_axis(&mut tile, goal, true, &mut waypoints);
        step_axis(&mut tile, goal, false, &mut waypoints);
    } else {
        step_axis(&mut tile, goal, false, &mut waypoints);
        step_axis(&mut tile, goal, true, &mut waypoints);
    }

    // Precise target last, unless the walk already landed exactly on it
    if waypoints.back() != Some(&to) {
        waypoints.push_back(to);
    }
    waypoints
}

fn step_axis(tile: &mut IVec2, goal: IVec2, along_x: bool, waypoints: &mut VecDeque<Vec2>) {
    if along_x {
        while tile.x != goal.x {
            tile.x += (goal.x - tile.x).signum();
            waypoints.push_back(TileMap::tile_center(*tile));
        }
    } else {
        while tile.y != goal.y {
            tile.y += (goal.y - tile.y).signum();
            waypoints.push_back(TileMap::tile_center(*tile));
        }
    }
}

fn polyline_length(from: Vec2, waypoints: &VecDeque<Vec2>) -> f32 {
    let mut previous = from;
    let mut total = 0.0;
    for waypoint in waypoints {
        total += previous.distance(*waypoint);
        previous = *waypoint;
    }
    total
}

/// Straight shot when line-of-sight holds; otherwise sidestep the first
/// obstruction and then head for the target. Degenerate casts (no line of
/// sight yet nothing hit) produce an empty route and the driver idles.
pub(crate) fn detour_route(map: &TileMap, from: Vec2, to: Vec2, radius: f32) -> VecDeque<Vec2> {
    if has_line_of_sight(map, from, to, radius) {
        return VecDeque::from([to]);
    }

    let delta = to - from;
    let Some(hit) = cast_ray(map, from, delta, delta.length(), radius) else {
        return VecDeque::new();
    };

    let side = hit.normal.perp();
    let left = hit.point + side * DETOUR_OFFSET;
    let right = hit.point - side * DETOUR_OFFSET;
    let detour = if left.distance_squared(to) <= right.distance_squared(to) {
        left
    } else {
        right
    };
    VecDeque::from([detour, to])
}

/// Throttled replanning for the basic tier. Pursuit always tracks the
/// target; Shooting only closes in past the hold distance (and never
/// retreats); Idle keeps no route at all.
pub(crate) fn refresh_paths(
    time: Res<Time>,
    freeze: Res<ActionFreeze>,
    tuning: Res<EnemyTuning>,
    map: Option<Res<TileMap>>,
    player_query: Query<&Transform, With<Player>>,
    mut enemy_query: Query<
        (&Transform, &EnemyAi, &TargetRef, &Stun, &mut Path),
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

    for (transform, ai, target, stun, mut path) in &mut enemy_query {
        path.refresh_timer -= dt;
        if stun.is_stunned() {
            continue;
        }

        let Some(target_transform) = target.0.and_then(|entity| player_query.get(entity).ok())
        else {
            path.clear();
            continue;
        };
        let position = transform.translation.truncate();
        let target_pos = target_transform.translation.truncate();

        let destination = match ai.state {
            AiState::Pursuit => Some(target_pos),
            AiState::Shooting => {
                if should_close_in(
                    position.distance(target_pos),
                    tuning.shooting_range,
                    tuning.hold_factor,
                ) {
                    Some(target_pos)
                } else {
                    path.clear();
                    None
                }
            }
            AiState::Idle => {
                path.clear();
                None
            }
        };

        if let Some(destination) = destination {
            if path.refresh_timer <= 0.0 {
                path.waypoints = plan_route(&map, position, destination, ACTOR_RADIUS);
                path.refresh_timer = tuning.path_refresh_interval;
            }
        }
    }
}

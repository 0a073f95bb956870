//! Arena domain: line-of-sight and corridor queries over the tile mask.
//!
//! These are pure reads; all AI tiers share them. Casts are dilated by the
//! caller's collision radius so "can I see it" also means "can my body
//! travel there".

use bevy::prelude::*;

use crate::arena::tilemap::TileMap;

/// Default collision radius used when dilating casts for a hostile actor.
pub const ACTOR_RADIUS: f32 = 0.35;

/// Sample spacing along a cast segment.
const CAST_STEP: f32 = 0.1;

/// Probe length for the corridor test.
const CORRIDOR_PROBE: f32 = 1.25;

/// Result of a cast that struck a wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Last clear point before the obstruction.
    pub point: Vec2,
    /// Axis-aligned surface normal, pointing back toward the clear side.
    pub normal: Vec2,
    pub distance: f32,
}

/// True when a disc of `radius` around `point` overlaps any wall tile.
fn disc_blocked(map: &TileMap, point: Vec2, radius: f32) -> bool {
    let min = TileMap::tile_of(point - Vec2::splat(radius));
    let max = TileMap::tile_of(point + Vec2::splat(radius));
    for ty in min.y..=max.y {
        for tx in min.x..=max.x {
            if !map.is_wall(tx, ty) {
                continue;
            }
            let tile_min = Vec2::new(tx as f32, ty as f32);
            let closest = point.clamp(tile_min, tile_min + Vec2::ONE);
            if closest.distance_squared(point) <= radius * radius {
                return true;
            }
        }
    }
    false
}

/// Segment query between two points, dilated by `radius`.
/// Returns false if any wall obstructs the swept segment.
pub fn has_line_of_sight(map: &TileMap, from: Vec2, to: Vec2, radius: f32) -> bool {
    let delta = to - from;
    let length = delta.length();
    if length <= f32::EPSILON {
        return !disc_blocked(map, from, radius);
    }
    let dir = delta / length;
    let steps = (length / CAST_STEP).ceil() as i32;
    for step in 0..=steps {
        let travelled = (step as f32 * CAST_STEP).min(length);
        if disc_blocked(map, from + dir * travelled, radius) {
            return false;
        }
    }
    true
}

/// March a dilated ray through the mask. Returns the last clear point and
/// the axis-aligned normal of the surface that stopped it.
pub fn cast_ray(map: &TileMap, from: Vec2, dir: Vec2, max_dist: f32, radius: f32) -> Option<RayHit> {
    let dir = safe_direction(dir);
    let steps = (max_dist / CAST_STEP).ceil().max(1.0) as i32;
    let mut clear = from;
    for step in 1..=steps {
        let travelled = (step as f32 * CAST_STEP).min(max_dist);
        let probe = from + dir * travelled;
        if disc_blocked(map, probe, radius) {
            return Some(RayHit {
                point: clear,
                normal: surface_normal(map, clear, probe, radius),
                distance: clear.distance(from),
            });
        }
        clear = probe;
    }
    None
}

/// Corridor heuristic: probe the four cardinal axes a short distance and
/// report "narrow passage" when at least two of them are blocked. This is
/// an approximation, not a path query.
pub fn is_in_corridor(map: &TileMap, position: Vec2) -> bool {
    let probes = [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y];
    let blocked = probes
        .iter()
        .filter(|dir| cast_ray(map, position, **dir, CORRIDOR_PROBE, ACTOR_RADIUS).is_some())
        .count();
    blocked >= 2
}

/// Zero-length directions fall back to +X rather than producing NaN.
pub fn safe_direction(dir: Vec2) -> Vec2 {
    let normalized = dir.normalize_or_zero();
    if normalized == Vec2::ZERO {
        Vec2::X
    } else {
        normalized
    }
}

/// Resolve which face of the obstruction was struck by re-testing each axis
/// independently. Corners prefer the x axis so results stay deterministic.
fn surface_normal(map: &TileMap, clear: Vec2, hit: Vec2, radius: f32) -> Vec2 {
    let x_blocked = disc_blocked(map, Vec2::new(hit.x, clear.y), radius);
    let y_blocked = disc_blocked(map, Vec2::new(clear.x, hit.y), radius);
    let x_sign = if clear.x >= hit.x { 1.0 } else { -1.0 };
    let y_sign = if clear.y >= hit.y { 1.0 } else { -1.0 };
    if x_blocked && !y_blocked {
        Vec2::new(x_sign, 0.0)
    } else if y_blocked && !x_blocked {
        Vec2::new(0.0, y_sign)
    } else if (clear.x - hit.x).abs() >= (clear.y - hit.y).abs() {
        Vec2::new(x_sign, 0.0)
    } else {
        Vec2::new(0.0, y_sign)
    }
}

//! Combat domain: tests for state machines, planning, and attack tasks.

use bevy::prelude::*;
use std::collections::VecDeque;

use super::boss::{BossAttack, choose_attack};
use super::driver::{WAYPOINT_EPSILON, drive};
use super::enemy::{next_state, should_close_in};
use super::path::{Path, corridor_route, detour_route, plan_route};
use super::tasks::{AttackTask, TaskKind, should_apply_charge_hit};
use crate::arena::{ACTOR_RADIUS, TileMap};
use crate::combat::components::{AiState, MoveSpeed, Stun};
use crate::combat::resources::BossTuning;

fn open_map() -> TileMap {
    TileMap::from_rows(&[
        "#########",
        "#.......#",
        "#.......#",
        "#.......#",
        "#.......#",
        "#.......#",
        "#.......#",
        "#.......#",
        "#########",
    ])
}

fn split_map() -> TileMap {
    TileMap::from_rows(&[
        "#######",
        "#.....#",
        "#.....#",
        "#..#..#",
        "#.....#",
        "#.....#",
        "#######",
    ])
}

// -----------------------------------------------------------------------------
// Basic state machine tests
// -----------------------------------------------------------------------------

#[test]
fn test_idle_to_pursuit_to_shooting_scenario() {
    // Actor at (0,0), target at (3,0), detection 15, shooting 5
    let distance = Vec2::ZERO.distance(Vec2::new(3.0, 0.0));

    let state = next_state(AiState::Idle, distance, true, 15.0, 5.0);
    assert_eq!(state, AiState::Pursuit);

    let state = next_state(state, distance, true, 15.0, 5.0);
    assert_eq!(state, AiState::Shooting);

    // Shooting holds while range and line of sight hold
    let state = next_state(state, distance, true, 15.0, 5.0);
    assert_eq!(state, AiState::Shooting);
}

#[test]
fn test_idle_ignores_targets_beyond_detection() {
    assert_eq!(next_state(AiState::Idle, 20.0, true, 15.0, 5.0), AiState::Idle);
}

#[test]
fn test_pursuit_drops_to_idle_when_target_escapes() {
    assert_eq!(
        next_state(AiState::Pursuit, 15.5, true, 15.0, 5.0),
        AiState::Idle
    );
}

#[test]
fn test_pursuit_requires_los_to_shoot() {
    assert_eq!(
        next_state(AiState::Pursuit, 4.0, false, 15.0, 5.0),
        AiState::Pursuit
    );
}

#[test]
fn test_shooting_breaks_on_range_or_los() {
    assert_eq!(
        next_state(AiState::Shooting, 5.5, true, 15.0, 5.0),
        AiState::Pursuit
    );
    assert_eq!(
        next_state(AiState::Shooting, 4.0, false, 15.0, 5.0),
        AiState::Pursuit
    );
}

#[test]
fn test_maintain_distance_never_retreats() {
    // Inside the hold band the enemy stands; past it, it closes in.
    // There is no rule that ever produces a retreat.
    assert!(!should_close_in(5.9, 5.0, 1.2));
    assert!(should_close_in(6.1, 5.0, 1.2));
    assert!(!should_close_in(0.5, 5.0, 1.2));
}

// -----------------------------------------------------------------------------
// Boss decision tests
// -----------------------------------------------------------------------------

#[test]
fn test_boss_bands_pick_the_right_attack() {
    let tuning = BossTuning::default();
    assert_eq!(choose_attack(4.0, &tuning), Some(BossAttack::Charge));
    assert_eq!(choose_attack(6.0, &tuning), Some(BossAttack::CrownThrow));
    assert_eq!(choose_attack(9.0, &tuning), None);
}

#[test]
fn test_boss_band_boundaries() {
    let tuning = BossTuning::default();
    assert_eq!(choose_attack(5.0, &tuning), Some(BossAttack::CrownThrow));
    assert_eq!(choose_attack(7.0, &tuning), Some(BossAttack::CrownThrow));
    assert_eq!(choose_attack(7.01, &tuning), None);
}

// -----------------------------------------------------------------------------
// Path planner tests
// -----------------------------------------------------------------------------

#[test]
fn test_direct_route_is_single_waypoint_under_los() {
    let map = open_map();
    let target = Vec2::new(6.5, 6.5);
    let route = plan_route(&map, Vec2::new(4.5, 4.5), target, ACTOR_RADIUS);
    assert_eq!(route.len(), 1);
    assert_eq!(route[0], target);
}

#[test]
fn test_corridor_route_length_bound() {
    let from = Vec2::new(1.5, 1.5);
    let to = Vec2::new(4.5, 3.2);
    let route = corridor_route(from, to);

    let manhattan_tiles = (4 - 1) + (3 - 1);
    assert!(route.len() <= manhattan_tiles as usize + 1);
    assert_eq!(*route.back().unwrap(), to);
}

#[test]
fn test_corridor_route_ties_prefer_horizontal_first() {
    // Symmetric L: both orders are the same length
    let route = corridor_route(Vec2::new(1.5, 1.5), Vec2::new(3.5, 3.5));
    let first = route[0];
    assert_eq!(first, Vec2::new(2.5, 1.5));
}

#[test]
fn test_corridor_route_steps_through_tile_centers() {
    let route = corridor_route(Vec2::new(1.5, 1.5), Vec2::new(4.5, 1.5));
    let expected: VecDeque<Vec2> = VecDeque::from([
        Vec2::new(2.5, 1.5),
        Vec2::new(3.5, 1.5),
        Vec2::new(4.5, 1.5),
    ]);
    assert_eq!(route, expected);
}

#[test]
fn test_detour_route_sidesteps_toward_the_target() {
    let map = split_map();
    let from = Vec2::new(1.5, 3.5);
    let to = Vec2::new(5.5, 4.0);
    let route = detour_route(&map, from, to, ACTOR_RADIUS);

    assert_eq!(route.len(), 2);
    // The pillar sits on the cast line; the chosen sidestep is the one
    // closer to the target, which lies above
    assert!(route[0].y > from.y);
    assert_eq!(route[1], to);
}

#[test]
fn test_detour_route_direct_when_clear() {
    let map = split_map();
    let to = Vec2::new(5.5, 1.5);
    let route = detour_route(&map, Vec2::new(1.5, 1.5), to, ACTOR_RADIUS);
    assert_eq!(route.len(), 1);
    assert_eq!(route[0], to);
}

// -----------------------------------------------------------------------------
// Movement driver tests
// -----------------------------------------------------------------------------

#[test]
fn test_drive_steers_at_path_head() {
    let mut path = Path::default();
    path.waypoints = VecDeque::from([Vec2::new(2.0, 0.0)]);
    let speed = MoveSpeed::new(3.5);

    let velocity = drive(&mut path, Vec2::ZERO, &speed, false);
    assert_eq!(velocity, Vec2::new(3.5, 0.0));
}

#[test]
fn test_drive_pops_waypoints_within_epsilon() {
    let mut path = Path::default();
    path.waypoints = VecDeque::from([Vec2::new(1.0, 0.0), Vec2::new(1.0, 2.0)]);
    let speed = MoveSpeed::new(2.0);

    let position = Vec2::new(1.0 - WAYPOINT_EPSILON * 0.5, 0.0);
    let velocity = drive(&mut path, position, &speed, false);
    assert_eq!(path.waypoints.len(), 1);
    // Now steering at the second waypoint, straight up
    assert!(velocity.y > 1.9);
    assert!(velocity.x.abs() < 0.2);
}

#[test]
fn test_drive_empty_path_is_a_no_op() {
    let mut path = Path::default();
    let speed = MoveSpeed::new(3.5);
    assert!(path.is_empty());
    assert_eq!(drive(&mut path, Vec2::ZERO, &speed, false), Vec2::ZERO);
}

#[test]
fn test_stunned_actors_emit_zero_velocity_regardless_of_path() {
    let mut path = Path::default();
    path.waypoints = VecDeque::from([Vec2::new(5.0, 5.0)]);
    let speed = MoveSpeed::new(3.5);

    assert_eq!(drive(&mut path, Vec2::ZERO, &speed, true), Vec2::ZERO);
    // The path itself is untouched; stun does not consume it
    assert_eq!(path.waypoints.len(), 1);
}

#[test]
fn test_zero_multiplier_emits_zero_velocity() {
    let mut path = Path::default();
    path.waypoints = VecDeque::from([Vec2::new(5.0, 5.0)]);
    let mut speed = MoveSpeed::new(3.5);
    let mut stun = Stun::default();
    stun.apply(1.0, &mut speed);

    assert_eq!(drive(&mut path, Vec2::ZERO, &speed, false), Vec2::ZERO);
}

// -----------------------------------------------------------------------------
// Attack task tests
// -----------------------------------------------------------------------------

#[test]
fn test_charge_task_freezes_direction_and_destination() {
    let tuning = BossTuning::default();
    let task = AttackTask::charge(Vec2::ZERO, Vec2::new(4.0, 0.0), &tuning);

    let TaskKind::Charge {
        direction,
        target_point,
        has_hit,
    } = &task.kind
    else {
        panic!("expected a charge task");
    };
    assert_eq!(*direction, Vec2::X);
    assert_eq!(*target_point, Vec2::new(tuning.charge_distance, 0.0));
    assert!(!has_hit);
    assert_eq!(task.phase_count(), 2);
    assert_eq!(task.phase_duration(0, &tuning), tuning.charge_prep_time);
    assert_eq!(task.phase_duration(1, &tuning), tuning.charge_time);
}

#[test]
fn test_charge_hit_applies_exactly_once() {
    // The guard holds even if the radius condition stays true for
    // several consecutive ticks
    assert!(should_apply_charge_hit(false, 1.0, 1.5, false));
    assert!(!should_apply_charge_hit(true, 1.0, 1.5, false));
    assert!(!should_apply_charge_hit(true, 0.1, 1.5, false));
}

#[test]
fn test_charge_hit_respects_range_and_iframes() {
    assert!(!should_apply_charge_hit(false, 1.6, 1.5, false));
    assert!(!should_apply_charge_hit(false, 1.0, 1.5, true));
}

#[test]
fn test_crown_task_captures_the_throw_point_at_start() {
    let tuning = BossTuning::default();
    let boss_pos = Vec2::new(10.0, 10.0);
    let player_at_start = Vec2::new(14.0, 10.0);
    let task = AttackTask::crown(boss_pos, player_at_start, &tuning);

    // The player moving during the windup changes nothing: the aim point
    // was frozen when the task was built
    let TaskKind::Crown {
        start_point,
        recoil_point,
        target_point,
        thrown,
    } = task.kind
    else {
        panic!("expected a crown task");
    };
    assert_eq!(target_point, player_at_start);
    assert_eq!(start_point, boss_pos);
    // Recoil steps directly away from the target
    assert_eq!(recoil_point, Vec2::new(10.0 - tuning.recoil_distance, 10.0));
    assert!(!thrown);
}

#[test]
fn test_crown_task_phase_timing() {
    let tuning = BossTuning::default();
    let task = AttackTask::crown(Vec2::ZERO, Vec2::new(6.0, 0.0), &tuning);

    assert_eq!(task.phase_count(), 3);
    assert_eq!(task.phase_duration(0, &tuning), tuning.recoil_time);
    // Windup and follow-through split the throw time in half
    assert_eq!(task.phase_duration(1, &tuning), tuning.throw_time * 0.5);
    assert_eq!(task.phase_duration(2, &tuning), tuning.throw_time * 0.5);
}

#[test]
fn test_task_states_follow_the_phases() {
    let tuning = BossTuning::default();
    let charge = AttackTask::charge(Vec2::ZERO, Vec2::X, &tuning);
    let crown = AttackTask::crown(Vec2::ZERO, Vec2::X, &tuning);

    use crate::combat::components::BossState;
    assert_eq!(charge.state_for_phase(0), BossState::PreparingCharge);
    assert_eq!(charge.state_for_phase(1), BossState::Charging);
    assert_eq!(crown.state_for_phase(0), BossState::RecoilForCrown);
    assert_eq!(crown.state_for_phase(1), BossState::ThrowingCrown);
    assert_eq!(crown.state_for_phase(2), BossState::ThrowingCrown);
}

//! Arena domain: hand-authored arena layout and wall spawning.

use avian2d::prelude::*;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::arena::tilemap::{TileKind, TileMap};
use crate::combat::{BossTuning, EnemyBundle, EnemyTuning, spawn_boss};
use crate::core::RunConfig;
use crate::movement::{GameLayer, PLAYER_SPAWN, Player};

/// Marker for wall colliders built from the tile mask.
#[derive(Component, Debug)]
pub struct Wall;

const ARENA_WIDTH: i32 = 30;
const ARENA_HEIGHT: i32 = 20;

const ENEMY_COUNT: usize = 4;

/// Keep random enemy spawns out of the player's face.
const MIN_SPAWN_DISTANCE: f32 = 6.0;

const BOSS_SPAWN: Vec2 = Vec2::new(24.5, 10.5);

/// One static arena. Tile generation proper lives outside this crate; the
/// mask here only has to exercise every spatial query the AI makes: a
/// walled corridor in the south-west, scattered pillars for detours, and
/// an open east half for the boss.
fn build_arena_map() -> TileMap {
    let mut map = TileMap::new(ARENA_WIDTH, ARENA_HEIGHT);

    for tx in 0..ARENA_WIDTH {
        map.set(tx, 0, TileKind::Wall);
        map.set(tx, ARENA_HEIGHT - 1, TileKind::Wall);
    }
    for ty in 0..ARENA_HEIGHT {
        map.set(0, ty, TileKind::Wall);
        map.set(ARENA_WIDTH - 1, ty, TileKind::Wall);
    }

    // South-west corridor: two parallel walls with a one-tile passage.
    for tx in 2..=9 {
        map.set(tx, 2, TileKind::Wall);
        map.set(tx, 4, TileKind::Wall);
    }
    map.set(9, 3, TileKind::Wall);

    // Mid-field pillars.
    fill_rect(&mut map, 12, 8, 2, 2);
    fill_rect(&mut map, 8, 13, 2, 3);
    fill_rect(&mut map, 16, 14, 3, 2);

    map
}

fn fill_rect(map: &mut TileMap, x: i32, y: i32, w: i32, h: i32) {
    for ty in y..y + h {
        for tx in x..x + w {
            map.set(tx, ty, TileKind::Wall);
        }
    }
}

pub(crate) fn setup_arena(
    mut commands: Commands,
    run_config: Res<RunConfig>,
    enemy_tuning: Res<EnemyTuning>,
    boss_tuning: Res<BossTuning>,
    player_query: Query<Entity, With<Player>>,
) {
    let map = build_arena_map();
    spawn_wall_colliders(&mut commands, &map);

    let target = player_query.iter().next();
    if target.is_none() {
        warn!("Arena spawned without a player; actors will idle until one exists");
    }

    let mut rng = ChaCha8Rng::seed_from_u64(run_config.seed);
    let mut placed = 0;
    while placed < ENEMY_COUNT {
        let tx = rng.random_range(1..ARENA_WIDTH - 1);
        let ty = rng.random_range(1..ARENA_HEIGHT - 1);
        if map.is_wall(tx, ty) {
            continue;
        }
        let position = TileMap::tile_center(IVec2::new(tx, ty));
        if position.distance(PLAYER_SPAWN) < MIN_SPAWN_DISTANCE {
            continue;
        }
        commands.spawn(EnemyBundle::new(position, target, &enemy_tuning));
        placed += 1;
    }

    spawn_boss(&mut commands, BOSS_SPAWN, target, &boss_tuning);
    info!("Arena ready: {} enemies and a boss, seed {}", ENEMY_COUNT, run_config.seed);

    commands.insert_resource(map);
}

fn spawn_wall_colliders(commands: &mut Commands, map: &TileMap) {
    for ty in 0..map.height() {
        for tx in 0..map.width() {
            if !map.is_wall(tx, ty) {
                continue;
            }
            let center = TileMap::tile_center(IVec2::new(tx, ty));
            commands.spawn((
                Wall,
                Sprite {
                    color: Color::srgb(0.25, 0.23, 0.28),
                    custom_size: Some(Vec2::ONE),
                    ..default()
                },
                Transform::from_xyz(center.x, center.y, 0.0),
                RigidBody::Static,
                Collider::rectangle(1.0, 1.0),
                CollisionLayers::new(GameLayer::Wall, [GameLayer::Player, GameLayer::Enemy]),
            ));
        }
    }
}

//! Debug tools for fast iteration and testing.
//!
//! Hotkeys (dev-tools builds only):
//! - F2: stun the boss for two seconds
//! - F3: freeze / unfreeze every freezable actor
//! - F4: toggle the simulation-wide action freeze
//! - F5: dump a JSON snapshot of every hostile actor's AI state

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use serde::Serialize;

use crate::combat::{BossAi, Enemy, EnemyAi, MoveSpeed, Stun, StunEvent};
use crate::core::{ActionFreeze, FreezeActorsEvent, Frozen};

const DEBUG_STUN_DURATION: f32 = 2.0;
const FREEZE_SOURCE: &str = "debug";

#[derive(Resource, Debug, Default)]
struct DebugState {
    actors_frozen: bool,
}

#[derive(Debug, Serialize)]
struct ActorSnapshot {
    entity: String,
    position: [f32; 2],
    state: String,
    stunned: bool,
    move_multiplier: f32,
    frozen: bool,
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, (handle_debug_hotkeys, dump_ai_snapshot));
    }
}

fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut action_freeze: ResMut<ActionFreeze>,
    mut stun_events: MessageWriter<StunEvent>,
    mut freeze_events: MessageWriter<FreezeActorsEvent>,
    boss_query: Query<Entity, With<BossAi>>,
) {
    if keyboard.just_pressed(KeyCode::F2) {
        for boss in &boss_query {
            stun_events.write(StunEvent {
                entity: boss,
                duration: DEBUG_STUN_DURATION,
            });
            info!("[DEBUG] Stunned boss for {}s", DEBUG_STUN_DURATION);
        }
    }

    if keyboard.just_pressed(KeyCode::F3) {
        debug_state.actors_frozen = !debug_state.actors_frozen;
        freeze_events.write(FreezeActorsEvent {
            frozen: debug_state.actors_frozen,
        });
    }

    if keyboard.just_pressed(KeyCode::F4) {
        if action_freeze.sources.contains(FREEZE_SOURCE) {
            action_freeze.release(FREEZE_SOURCE);
            info!("[DEBUG] Action freeze released");
        } else {
            action_freeze.freeze(FREEZE_SOURCE);
            info!("[DEBUG] Action freeze engaged");
        }
    }
}

fn dump_ai_snapshot(
    keyboard: Res<ButtonInput<KeyCode>>,
    query: Query<
        (
            Entity,
            &Transform,
            Option<&EnemyAi>,
            Option<&BossAi>,
            &Stun,
            &MoveSpeed,
            Has<Frozen>,
        ),
        With<Enemy>,
    >,
) {
    if !keyboard.just_pressed(KeyCode::F5) {
        return;
    }

    let snapshots: Vec<ActorSnapshot> = query
        .iter()
        .map(|(entity, transform, enemy_ai, boss_ai, stun, speed, frozen)| {
            let state = match (enemy_ai, boss_ai) {
                (_, Some(boss)) => format!("{:?}", boss.state),
                (Some(enemy), _) => format!("{:?}", enemy.state),
                _ => "?".to_string(),
            };
            ActorSnapshot {
                entity: format!("{entity:?}"),
                position: [transform.translation.x, transform.translation.y],
                state,
                stunned: stun.is_stunned(),
                move_multiplier: speed.multiplier,
                frozen,
            }
        })
        .collect();

    match serde_json::to_string_pretty(&snapshots) {
        Ok(json) => info!("[DEBUG] AI snapshot:\n{json}"),
        Err(error) => warn!("[DEBUG] Snapshot serialization failed: {error}"),
    }
}

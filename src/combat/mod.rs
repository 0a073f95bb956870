//! Combat domain: hostile-actor behavior core plugin wiring and exports.

pub(crate) mod ai;
mod components;
mod events;
mod projectiles;
mod resources;
mod spawn;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{
    AiState, BossAi, BossState, Combatant, Enemy, EnemyAi, Health, Hitbox, HitboxLifetime,
    Knockback, MoveSpeed, PlayerAttack, RangedAttacker, Stun, TargetRef, Team, TelegraphIndicator,
};
pub use events::{DamageEvent, DeathEvent, StunEvent};
pub use projectiles::{Bolt, Crown, CrownPhase, arc_offset};
pub use resources::{BossTuning, CombatInput, CombatTuning, EnemyTuning, ProjectileTuning};
pub use spawn::{EnemyBundle, spawn_boss};

pub use ai::{AttackTask, Path, TaskKind, WAYPOINT_EPSILON, plan_route};

use bevy::prelude::*;

use crate::combat::ai::{
    drive_along_paths, refresh_paths, run_attack_tasks, update_boss_ai, update_enemy_ai,
    update_ranged_attacks,
};
use crate::combat::projectiles::{detect_bolt_hits, update_bolt_lifetimes, update_crown_flight};
use crate::combat::systems::{
    apply_damage, apply_knockback, apply_stun_requests, cleanup_expired_hitboxes,
    cleanup_telegraphs, detect_hitbox_collisions, process_deaths, process_player_attacks,
    read_combat_input, update_combat_timers,
};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatInput>()
            .add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_message::<StunEvent>()
            .add_systems(Update, read_combat_input)
            // Decision order is the tick contract: timers first, then the
            // two AI tiers, then the low-level command producers
            .add_systems(
                Update,
                (
                    update_combat_timers,
                    update_enemy_ai,
                    refresh_paths,
                    drive_along_paths,
                    update_ranged_attacks,
                    update_boss_ai,
                    run_attack_tasks,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (update_bolt_lifetimes, detect_bolt_hits, update_crown_flight).chain(),
            )
            .add_systems(
                Update,
                (
                    process_player_attacks,
                    cleanup_expired_hitboxes,
                    cleanup_telegraphs,
                    detect_hitbox_collisions,
                    apply_damage,
                    apply_knockback,
                    apply_stun_requests,
                    process_deaths,
                )
                    .chain(),
            );
    }
}

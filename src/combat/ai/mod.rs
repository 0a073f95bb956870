//! Combat domain: AI modules for the basic tier and the boss.

pub(crate) mod boss;
pub(crate) mod driver;
pub(crate) mod enemy;
pub(crate) mod path;
pub(crate) mod ranged;
pub(crate) mod tasks;

#[cfg(test)]
mod tests;

pub use driver::WAYPOINT_EPSILON;
pub use path::{Path, plan_route};
pub use tasks::{AttackTask, TaskKind};

pub(crate) use boss::update_boss_ai;
pub(crate) use driver::drive_along_paths;
pub(crate) use enemy::update_enemy_ai;
pub(crate) use path::refresh_paths;
pub(crate) use ranged::update_ranged_attacks;
pub(crate) use tasks::run_attack_tasks;

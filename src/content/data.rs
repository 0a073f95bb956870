//! Content domain: serde shapes for the tuning file.

use serde::Deserialize;

use crate::combat::{BossTuning, EnemyTuning, ProjectileTuning};

/// Top-level shape of `assets/data/combat_tuning.ron`. Every section is
/// optional in the file; omitted sections keep their compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CombatTuningFile {
    pub enemy: EnemyTuning,
    pub boss: BossTuning,
    pub projectiles: ProjectileTuning,
}

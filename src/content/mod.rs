//! Content domain: tuning data loaded from RON at startup.

mod data;
mod loader;

pub use data::CombatTuningFile;
pub use loader::{ContentLoadError, load_tuning};

use bevy::prelude::*;
use std::path::Path;

const TUNING_PATH: &str = "assets/data/combat_tuning.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        // PreStartup so spawn systems can rely on plain Res<..> access
        app.add_systems(PreStartup, load_content);
    }
}

/// A missing or malformed file degrades to compiled defaults; nothing
/// here is fatal.
fn load_content(mut commands: Commands) {
    let tuning = match load_tuning(Path::new(TUNING_PATH)) {
        Ok(tuning) => {
            info!("Loaded combat tuning from {}", TUNING_PATH);
            tuning
        }
        Err(error) => {
            warn!("{error}; using default tuning");
            CombatTuningFile::default()
        }
    };

    commands.insert_resource(tuning.enemy);
    commands.insert_resource(tuning.boss);
    commands.insert_resource(tuning.projectiles);
    commands.insert_resource(crate::combat::CombatTuning::default());
}

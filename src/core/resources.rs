//! Core domain: shared resources for run configuration and simulation pauses.

use bevy::prelude::*;
use rand::Rng;
use std::collections::HashSet;

/// Resource tracking whether hostile decision-making should be held.
/// Decisions are held while any source is active (spawn indicators,
/// attack telegraph freezes, cutscene-style interrupts).
#[derive(Resource, Debug, Default)]
pub struct ActionFreeze {
    pub sources: HashSet<String>,
}

impl ActionFreeze {
    pub fn is_frozen(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn freeze(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn release(&mut self, source: impl Into<String>) {
        self.sources.remove(&source.into());
    }

    pub fn clear(&mut self) {
        self.sources.clear();
    }
}

#[derive(Resource, Debug)]
pub struct RunConfig {
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

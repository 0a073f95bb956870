//! Movement domain: system modules for locomotion.

pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use input::read_input;
pub(crate) use movement::{apply_dash, apply_movement, update_facing, update_timers};

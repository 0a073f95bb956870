//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

#[derive(Debug)]
pub struct DamageEvent {
    pub source: Entity,
    pub target: Entity,
    pub amount: f32,
    pub knockback: Vec2,
    pub stun: f32,
}

impl Message for DamageEvent {}

#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}

/// Externally settable stun request; the status layer and debug tools
/// write these, `apply_stun_requests` consumes them.
#[derive(Debug)]
pub struct StunEvent {
    pub entity: Entity,
    pub duration: f32,
}

impl Message for StunEvent {}

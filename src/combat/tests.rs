//! Combat domain: tests for shared components and projectile math.

use bevy::prelude::Entity;

use super::components::{Health, MoveSpeed, Stun};
use super::projectiles::{Bolt, arc_offset};

// -----------------------------------------------------------------------------
// Health tests
// -----------------------------------------------------------------------------

#[test]
fn test_health_damage_and_death() {
    let mut health = Health::new(3.0);
    assert_eq!(health.take_damage(1.0), 1.0);
    assert!(!health.is_dead());
    assert_eq!(health.percent(), 2.0 / 3.0);

    // Overkill is clamped to what was left
    assert_eq!(health.take_damage(10.0), 2.0);
    assert!(health.is_dead());
}

// -----------------------------------------------------------------------------
// Stun / movement multiplier tests
// -----------------------------------------------------------------------------

#[test]
fn test_stun_zeroes_and_restores_multiplier() {
    let mut stun = Stun::default();
    let mut speed = MoveSpeed::new(3.5);

    stun.apply(2.0, &mut speed);
    assert!(stun.is_stunned());
    assert_eq!(speed.multiplier, 0.0);
    assert_eq!(speed.effective(), 0.0);

    assert!(!stun.tick(1.0, &mut speed));
    assert!(stun.is_stunned());

    // The clear edge restores the multiplier explicitly
    assert!(stun.tick(1.5, &mut speed));
    assert!(!stun.is_stunned());
    assert_eq!(speed.multiplier, 1.0);
}

#[test]
fn test_stun_restores_the_pre_stun_multiplier() {
    let mut stun = Stun::default();
    let mut speed = MoveSpeed::new(3.5);
    speed.multiplier = 0.4;

    stun.apply(1.0, &mut speed);
    stun.tick(1.5, &mut speed);
    assert_eq!(speed.multiplier, 0.4);
}

#[test]
fn test_overlapping_stuns_keep_the_longer_expiry() {
    let mut stun = Stun::default();
    let mut speed = MoveSpeed::new(3.5);

    stun.apply(2.0, &mut speed);
    stun.tick(1.0, &mut speed);
    // A shorter re-stun must not cut the remaining time
    stun.apply(0.5, &mut speed);
    assert!(stun.remaining > 0.9);
    // A longer one extends it
    stun.apply(3.0, &mut speed);
    assert!(stun.remaining > 2.9);

    stun.tick(3.0, &mut speed);
    assert!(!stun.is_stunned());
    assert_eq!(speed.multiplier, 1.0);
}

#[test]
fn test_stun_applied_at_t10_clears_by_t12() {
    let mut stun = Stun::default();
    let mut speed = MoveSpeed::new(3.5);

    // Stun for 2s at t=10, ticked at 4 Hz
    stun.apply(2.0, &mut speed);
    let mut now = 10.0;
    while stun.is_stunned() {
        stun.tick(0.25, &mut speed);
        now += 0.25;
    }
    assert!(now >= 12.0);
    assert!(now < 12.5);
    assert_eq!(speed.multiplier, 1.0);
}

// -----------------------------------------------------------------------------
// Projectile tests
// -----------------------------------------------------------------------------

#[test]
fn test_arc_offset_endpoints_and_midpoint() {
    let height = 1.5;
    assert!(arc_offset(0.0, height).abs() < 1e-6);
    assert!(arc_offset(1.0, height).abs() < 1e-6);
    assert!((arc_offset(0.5, height) - height).abs() < 1e-6);
    // Return flights use half the height
    assert!((arc_offset(0.5, height * 0.5) - 0.75).abs() < 1e-6);
}

#[test]
fn test_bolt_single_shot_despawns_on_hit() {
    let mut bolt = Bolt {
        damage: 1.0,
        lifetime: 3.0,
        multi_hit: None,
        hit_timer: 0.0,
        source: Entity::PLACEHOLDER,
    };
    assert!(bolt.can_hit());
    assert!(bolt.register_hit());
}

#[test]
fn test_bolt_multi_hit_respects_cooldown() {
    let mut bolt = Bolt {
        damage: 1.0,
        lifetime: 3.0,
        multi_hit: Some(0.5),
        hit_timer: 0.0,
        source: Entity::PLACEHOLDER,
    };
    assert!(!bolt.register_hit());
    assert!(!bolt.can_hit());
    bolt.hit_timer -= 0.6;
    assert!(bolt.can_hit());
}

//! Combat domain: components and combat-related state types.

use bevy::prelude::*;

/// Marks an entity as a combat participant
#[derive(Component, Debug)]
pub struct Combatant;

/// Health component for damageable entities
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percent(&self) -> f32 {
        self.current / self.max
    }
}

/// Team affiliation to prevent friendly fire
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Player,
    Enemy,
}

#[derive(Component, Debug)]
pub struct Enemy;

/// Weak handle to the entity this actor hunts. Resolved once at spawn;
/// consumers re-check it every tick and tolerate a despawned target.
#[derive(Component, Debug)]
pub struct TargetRef(pub Option<Entity>);

/// Base movement speed plus the 0-1 status-effect multiplier.
#[derive(Component, Debug, Clone)]
pub struct MoveSpeed {
    pub base: f32,
    pub multiplier: f32,
}

impl MoveSpeed {
    pub fn new(base: f32) -> Self {
        Self {
            base,
            multiplier: 1.0,
        }
    }

    pub fn effective(&self) -> f32 {
        self.base * self.multiplier
    }
}

/// Time-boxed suppression of decisions and movement.
///
/// Applying a stun zeroes the movement multiplier and remembers what it
/// was; the clear path restores it explicitly. Overlapping stuns keep the
/// longer remaining time.
#[derive(Component, Debug, Default)]
pub struct Stun {
    pub remaining: f32,
    restore_multiplier: Option<f32>,
}

impl Stun {
    pub fn is_stunned(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn apply(&mut self, duration: f32, speed: &mut MoveSpeed) {
        if self.restore_multiplier.is_none() {
            self.restore_multiplier = Some(speed.multiplier);
        }
        speed.multiplier = 0.0;
        self.remaining = self.remaining.max(duration);
    }

    /// Advance the timer; restores the stored multiplier when the stun
    /// elapses and reports true on that edge.
    pub fn tick(&mut self, dt: f32, speed: &mut MoveSpeed) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= dt;
        if self.remaining > 0.0 {
            return false;
        }
        self.remaining = 0.0;
        if let Some(multiplier) = self.restore_multiplier.take() {
            speed.multiplier = multiplier;
        }
        true
    }
}

/// External knockback flag: while the timer runs, AI movement yields to
/// whatever velocity the hit imparted.
#[derive(Component, Debug, Default)]
pub struct Knockback {
    pub timer: f32,
}

/// Hitbox - deals damage on contact with opposing combatants
#[derive(Component, Debug)]
pub struct Hitbox {
    pub damage: f32,
    pub knockback: f32,
    pub stun: f32,
    pub owner: Entity,
    pub hit_entities: Vec<Entity>,
}

/// Entity lifetime for temporary hitboxes
#[derive(Component)]
pub struct HitboxLifetime(pub f32);

/// Cooldown gate for the player's light attack.
#[derive(Component, Debug, Default)]
pub struct PlayerAttack {
    pub cooldown_timer: f32,
}

/// Visual telegraph indicator
#[derive(Component, Debug)]
pub struct TelegraphIndicator {
    pub timer: f32,
}

#[derive(Component, Debug)]
pub struct EnemyAi {
    pub state: AiState,
    pub detection_range: f32,
    pub shooting_range: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiState {
    #[default]
    Idle,
    Pursuit,
    Shooting,
}

/// Fire-rate gate for ranged trash enemies.
#[derive(Component, Debug, Default)]
pub struct RangedAttacker {
    pub fire_timer: f32,
}

/// Boss-specific AI state machine
#[derive(Component, Debug, Default)]
pub struct BossAi {
    pub state: BossState,
    pub cooldown_timer: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BossState {
    #[default]
    Idle,
    /// Winding up before the charge commits
    PreparingCharge,
    /// Rushing along the frozen charge direction
    Charging,
    /// Stepping backward before the crown leaves the hand
    RecoilForCrown,
    /// Throw windup and follow-through
    ThrowingCrown,
    /// Suppressed by the stun layer; re-entrant
    Stunned,
}

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::catalog::MoveCatalog;
use crate::range::Range;

bitflags! {
    /// One tick's worth of pad input, as consumed by the fighter engine.
    ///
    /// The empty mask is the neutral "stop" input; directions and buttons
    /// combine freely (`DOWN | LEFT` is a crouch-block when facing right).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Action: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const PUNCH = 1 << 4;
        const KICK = 1 << 5;
    }
}

impl Action {
    /// Neutral input; releases every held direction and button.
    pub const STOP: Action = Action::empty();
}

/// Horizontal orientation of an object in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Directional input that moves toward the way this object faces.
    pub fn forward(self) -> Action {
        match self {
            Facing::Left => Action::LEFT,
            Facing::Right => Action::RIGHT,
        }
    }

    /// Directional input that moves away from the way this object faces.
    pub fn backward(self) -> Action {
        match self {
            Facing::Left => Action::RIGHT,
            Facing::Right => Action::LEFT,
        }
    }

    pub fn flipped(self) -> Facing {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Animation-level state of a fighter, as reported by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FighterState {
    Standing,
    WalkTo,
    WalkFrom,
    CrouchBlock,
    Crouching,
    Jumping,
    Victory,
    Scrap,
}

impl FighterState {
    pub fn is_crouching(self) -> bool {
        matches!(self, FighterState::Crouching | FighterState::CrouchBlock)
    }
}

/// Coarse arena lifecycle; the AI only acts while the round is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    Starting,
    Fighting,
    Ended,
}

/// The eleven robot chassis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarId {
    Jaguar,
    Shadow,
    Katana,
    Flail,
    Thorn,
    Pyros,
    Electra,
    Shredder,
    Chronos,
    Gargoyle,
    Nova,
}

impl HarId {
    pub const ALL: [HarId; 11] = [
        HarId::Jaguar,
        HarId::Shadow,
        HarId::Katana,
        HarId::Flail,
        HarId::Thorn,
        HarId::Pyros,
        HarId::Electra,
        HarId::Shredder,
        HarId::Chronos,
        HarId::Gargoyle,
        HarId::Nova,
    ];

    /// Whether this chassis can fire a projectile.
    pub fn has_projectiles(self) -> bool {
        matches!(
            self,
            HarId::Jaguar
                | HarId::Shadow
                | HarId::Electra
                | HarId::Shredder
                | HarId::Chronos
                | HarId::Nova
        )
    }

    /// Whether this chassis has a charging special (leap, dash, teleport...).
    pub fn has_charge(self) -> bool {
        !matches!(self, HarId::Nova)
    }

    /// Whether this chassis has a dedicated push-back special.
    pub fn has_push(self) -> bool {
        matches!(
            self,
            HarId::Jaguar
                | HarId::Katana
                | HarId::Flail
                | HarId::Thorn
                | HarId::Pyros
                | HarId::Electra
                | HarId::Nova
        )
    }
}

/// Gameplay classification of a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveCategory {
    Basic,
    Low,
    Medium,
    High,
    Close,
    Throw,
    Jumping,
    Projectile,
    Scrap,
    Destruction,
}

/// A single named attack from a chassis moveset.
///
/// `command` is the pad sequence over `1`-`9`, `K`, `P`, stored suffix-first:
/// the button press sits at index 0 and playback walks the string backward.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub id: usize,
    pub name: String,
    pub category: MoveCategory,
    pub damage: i32,
    pub command: String,
}

/// Identity and category of the move an event refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRef {
    pub id: usize,
    pub category: MoveCategory,
}

/// Combat events raised by the fighter simulation, from the AI's perspective:
/// `Block` means we blocked an incoming attack, `EnemyBlock` that the enemy
/// blocked ours, `LandHit` that our attack connected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    Block(MoveRef),
    Land,
    HitWall,
    TakeHit(MoveRef),
    Attack(MoveRef),
    EnemyBlock(MoveRef),
    LandHit(MoveRef),
    EnemyStun,
    Recover,
}

/// Snapshot of one projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub from_enemy: bool,
    pub pos: Vec2,
    /// Offset of the current sprite frame relative to the object position.
    pub sprite_offset: Vec2,
    pub size: Vec2,
    pub facing: Facing,
}

impl ProjectileView {
    /// World-space x of the sprite's leading edge; mirrored sprites anchor on
    /// the opposite side of the object position.
    pub fn sprite_world_x(&self) -> f32 {
        match self.facing {
            Facing::Right => self.pos.x + self.sprite_offset.x,
            Facing::Left => self.pos.x + (-self.sprite_offset.x - self.size.x),
        }
    }
}

/// Per-fighter snapshot fields the AI reads every tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FighterStatus {
    pub har: HarId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub facing: Facing,
    pub state: FighterState,
    /// Set by the simulation when the two fighters' hitboxes are adjacent.
    pub close: bool,
    /// Set when this fighter is pressed against an arena wall.
    pub wall_close: bool,
    /// Set while a move animation is playing out.
    pub executing_move: bool,
}

/// Everything the decision engine may observe in one tick: its own fighter,
/// the enemy, the move catalog for its chassis, and the projectiles in flight.
#[derive(Clone, Copy, Debug)]
pub struct FighterView<'a> {
    pub phase: MatchPhase,
    pub paused: bool,
    pub me: FighterStatus,
    pub enemy: FighterStatus,
    pub catalog: &'a MoveCatalog,
    pub projectiles: &'a [ProjectileView],
}

impl FighterView<'_> {
    /// Horizontal distance between the two fighters.
    pub fn horizontal_gap(&self) -> f32 {
        (self.enemy.pos.x - self.me.pos.x).abs()
    }

    pub fn enemy_range(&self) -> Range {
        Range::classify(self.horizontal_gap())
    }
}

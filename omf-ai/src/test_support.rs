//! Shared fixtures for the unit tests: a minimal arena snapshot with a
//! representative moveset.

use glam::Vec2;
use omf_core::{
    FighterState, FighterStatus, FighterView, HarId, MatchPhase, Move, MoveCatalog, MoveCategory,
    ProjectileView,
};

/// Catalog slots used by the fixtures; tests reference these ids directly.
pub const JAB_ID: usize = 1;
pub const HIGH_KICK_ID: usize = 3;
pub const SWEEP_ID: usize = 5;
pub const GUT_PUNCH_ID: usize = 7;
pub const THROW_ID: usize = 9;
pub const HEADLOCK_ID: usize = 10;
pub const JUMP_KICK_ID: usize = 12;
pub const CANNON_ID: usize = 20;

pub struct TestArena {
    pub catalog: MoveCatalog,
    pub projectiles: Vec<ProjectileView>,
}

impl TestArena {
    /// A moveset with one move per everyday category.
    pub fn basic(_har: HarId) -> Self {
        let mut catalog = MoveCatalog::new();
        for mv in [
            Move {
                id: JAB_ID,
                name: "Jab".to_string(),
                category: MoveCategory::Basic,
                damage: 2,
                command: "P".to_string(),
            },
            Move {
                id: HIGH_KICK_ID,
                name: "High Kick".to_string(),
                category: MoveCategory::High,
                damage: 8,
                command: "K6".to_string(),
            },
            Move {
                id: SWEEP_ID,
                name: "Sweep".to_string(),
                category: MoveCategory::Low,
                damage: 5,
                command: "K1".to_string(),
            },
            Move {
                id: GUT_PUNCH_ID,
                name: "Gut Punch".to_string(),
                category: MoveCategory::Medium,
                damage: 6,
                command: "P6".to_string(),
            },
            Move {
                id: THROW_ID,
                name: "Overhead Throw".to_string(),
                category: MoveCategory::Throw,
                damage: 12,
                command: "P63".to_string(),
            },
            Move {
                id: HEADLOCK_ID,
                name: "Headlock".to_string(),
                category: MoveCategory::Close,
                damage: 10,
                command: "K66".to_string(),
            },
            Move {
                id: JUMP_KICK_ID,
                name: "Jump Kick".to_string(),
                category: MoveCategory::Jumping,
                damage: 7,
                command: "K2".to_string(),
            },
            Move {
                id: CANNON_ID,
                name: "Cannon".to_string(),
                category: MoveCategory::Projectile,
                damage: 9,
                command: "P41".to_string(),
            },
        ] {
            catalog.insert(mv).expect("fixture move");
        }
        Self {
            catalog,
            projectiles: Vec::new(),
        }
    }

    /// A moveset with nothing usable outside punching range, so pokes from
    /// mid/far range always come up empty.
    pub fn melee_only(_har: HarId) -> Self {
        let mut catalog = MoveCatalog::new();
        for mv in [
            Move {
                id: JAB_ID,
                name: "Jab".to_string(),
                category: MoveCategory::Basic,
                damage: 2,
                command: "P".to_string(),
            },
            Move {
                id: SWEEP_ID,
                name: "Sweep".to_string(),
                category: MoveCategory::Low,
                damage: 5,
                command: "K1".to_string(),
            },
        ] {
            catalog.insert(mv).expect("fixture move");
        }
        Self {
            catalog,
            projectiles: Vec::new(),
        }
    }
}

/// A standing fighter at the arena's left quarter, facing right.
pub fn standing_status(har: HarId) -> FighterStatus {
    FighterStatus {
        har,
        pos: Vec2::new(160.0, 190.0),
        vel: Vec2::ZERO,
        facing: omf_core::Facing::Right,
        state: FighterState::Standing,
        close: false,
        wall_close: false,
        executing_move: false,
    }
}

pub fn view_with<'a>(
    arena: &'a TestArena,
    me: FighterStatus,
    enemy: FighterStatus,
) -> FighterView<'a> {
    FighterView {
        phase: MatchPhase::Fighting,
        paused: false,
        me,
        enemy,
        catalog: &arena.catalog,
        projectiles: &arena.projectiles,
    }
}

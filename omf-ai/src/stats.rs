//! Per-move learning table. Each move id carries a running value score plus
//! the observed hit-distance window, so the engine gravitates toward moves
//! that have actually connected at the current spacing.

use omf_core::MOVE_TABLE_SIZE;

/// Upper clamp for a move's learned value; there is no lower clamp, so a move
/// that keeps getting blocked sinks indefinitely.
pub const VALUE_CAP: i32 = 10;

/// Sentinel for "never observed" distances.
pub const DIST_UNSET: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveStat {
    /// Longest horizontal distance this move has hit from.
    pub max_hit_dist: i32,
    /// Shortest horizontal distance this move has hit from.
    pub min_hit_dist: i32,
    /// Learned value score, capped at [`VALUE_CAP`].
    pub value: i32,
    /// Times this move was selected this match.
    pub attempts: i32,
    /// Consecutive-use pressure; halved across the table on every selection.
    pub consecutive: i32,
    /// Horizontal distance at the most recent selection.
    pub last_dist: i32,
}

impl Default for MoveStat {
    fn default() -> Self {
        Self {
            max_hit_dist: DIST_UNSET,
            min_hit_dist: DIST_UNSET,
            value: 0,
            attempts: 0,
            consecutive: 0,
            last_dist: DIST_UNSET,
        }
    }
}

impl MoveStat {
    /// Record a confirmed hit at the selection distance: widen the observed
    /// hit window and bump the value score.
    pub fn record_hit(&mut self) {
        if self.max_hit_dist == DIST_UNSET || self.last_dist > self.max_hit_dist {
            self.max_hit_dist = self.last_dist;
        }
        if self.min_hit_dist == DIST_UNSET || self.last_dist < self.min_hit_dist {
            self.min_hit_dist = self.last_dist;
        }
        self.value = (self.value + 1).min(VALUE_CAP);
    }

    /// Record a selection at the given distance.
    pub fn record_attempt(&mut self, dist: i32) {
        self.attempts += 1;
        self.consecutive += 1;
        self.last_dist = dist;
    }
}

/// One match's worth of learning statistics, indexed by move id.
#[derive(Clone, Debug)]
pub struct MoveMemory {
    stats: [MoveStat; MOVE_TABLE_SIZE],
}

impl Default for MoveMemory {
    fn default() -> Self {
        Self {
            stats: [MoveStat::default(); MOVE_TABLE_SIZE],
        }
    }
}

impl MoveMemory {
    pub fn get(&self, id: usize) -> &MoveStat {
        &self.stats[id]
    }

    pub fn get_mut(&mut self, id: usize) -> &mut MoveStat {
        &mut self.stats[id]
    }

    /// Halve every move's consecutive-use pressure; called whenever any move
    /// is selected so recent repetition decays instead of accumulating.
    pub fn decay_consecutive(&mut self) {
        for stat in &mut self.stats {
            stat.consecutive /= 2;
        }
    }
}

//! Move selection: which moves are usable right now, which the pilot
//! dislikes, and the learning-weighted argmax that picks the next attack.

use tracing::trace;

use omf_core::{FighterState, FighterStatus, FighterView, Move, MoveCategory, Range};

use crate::controller::{AiController, SelectedMove};

/// The twelve plain button commands; anything else is a special move.
const BASIC_COMMANDS: [&str; 12] = [
    "K", "K1", "K2", "K3", "K4", "K6", "P", "P1", "P2", "P3", "P4", "P6",
];

pub(crate) fn is_special_move(mv: &Move) -> bool {
    !BASIC_COMMANDS.contains(&mv.command.as_str())
}

/// Whether `mv` can be initiated from the current fighter state.
///
/// Hand-to-hand categories are gated on being close (or airborne) so the
/// HARs close up instead of standing in place waving at each other.
pub(crate) fn is_valid_move(mv: &Move, me: &FighterStatus, force_allow_projectile: bool) -> bool {
    if matches!(
        mv.category,
        MoveCategory::Close | MoveCategory::Low | MoveCategory::Medium | MoveCategory::High
    ) && !me.close
        && me.state != FighterState::Jumping
    {
        return false;
    }
    if mv.category == MoveCategory::Jumping && me.state != FighterState::Jumping {
        return false;
    }
    if mv.category != MoveCategory::Jumping && me.state == FighterState::Jumping {
        return false;
    }
    if mv.category == MoveCategory::Scrap && me.state != FighterState::Victory {
        return false;
    }
    if mv.category == MoveCategory::Destruction && me.state != FighterState::Scrap {
        return false;
    }

    for ch in mv.command.bytes() {
        if !((b'1'..=b'9').contains(&ch) || ch == b'K' || ch == b'P') {
            return force_allow_projectile && mv.category == MoveCategory::Projectile;
        }
    }

    (mv.damage > 0
        || matches!(
            mv.category,
            MoveCategory::Projectile | MoveCategory::Scrap | MoveCategory::Destruction
        ))
        && !mv.command.is_empty()
}

impl AiController {
    /// Whether the pilot's preferences argue against this move right now.
    pub(crate) fn dislikes_move(&mut self, mv: &Move) -> bool {
        if is_special_move(mv) {
            // pilots with bad special ability dislike special moves
            return !self.roll_pref(self.pilot.ap_special);
        }
        match mv.category {
            // smart AI avoids jab spam
            MoveCategory::Basic => self.smart_usually(),
            MoveCategory::Low => !self.roll_pref(self.pilot.ap_low),
            MoveCategory::Medium => !self.roll_pref(self.pilot.ap_middle),
            MoveCategory::High => !self.roll_pref(self.pilot.ap_high),
            MoveCategory::Throw | MoveCategory::Close => {
                !self.pilot.att_hyper && !self.roll_pref(self.pilot.ap_throw)
            }
            MoveCategory::Jumping => {
                !self.pilot.att_jump && !self.roll_pref(self.pilot.ap_jump)
            }
            MoveCategory::Projectile => {
                !self.pilot.att_sniper && !self.roll_pref(self.pilot.ap_special)
            }
            _ => false,
        }
    }

    /// Whether the move outclasses the current difficulty level.
    pub(crate) fn move_too_powerful(&mut self, mv: &Move) -> bool {
        is_special_move(mv) && self.dumb_usually()
    }

    /// Learning-reinforcement score shared by every non-damage-greedy pick:
    /// learned value, a noise term, and a bias toward the observed hit window.
    fn learning_score(&mut self, mv: &Move) -> i32 {
        let ms = *self.memory.get(mv.id);
        let mut value = ms.value + self.rng_roll(10);
        if ms.min_hit_dist != -1 {
            if ms.last_dist < ms.max_hit_dist + 5 && ms.last_dist > ms.min_hit_dist + 5 {
                value += 2;
            } else if ms.last_dist > ms.max_hit_dist + 10 {
                value -= 3;
            }
        }
        value
    }

    fn rng_roll(&mut self, bound: i32) -> i32 {
        use rand::Rng;
        self.rng.random_range(0..bound)
    }

    /// Record a selection: bump its stats, decay table-wide repetition
    /// pressure and start suffix-first command playback.
    pub(crate) fn set_selected_move(&mut self, view: &FighterView<'_>, mv: &Move) {
        self.memory.decay_consecutive();
        self.memory
            .get_mut(mv.id)
            .record_attempt(view.horizontal_gap() as i32);
        self.selected = Some(SelectedMove {
            id: mv.id,
            category: mv.category,
            command: mv.command.clone(),
        });
        self.move_str_pos = mv.command.len() - 1;
        self.blocked = false;
    }

    /// Pick the best currently-valid move of `category`. With
    /// `highest_damage` the learning table is ignored and raw damage decides.
    pub(crate) fn assign_move_by_cat(
        &mut self,
        view: &FighterView<'_>,
        category: MoveCategory,
        highest_damage: bool,
    ) -> bool {
        let mut best: Option<(usize, i32)> = None;
        for mv in view.catalog.iter() {
            if mv.category != category || !is_valid_move(mv, &view.me, true) {
                continue;
            }
            let value = if highest_damage {
                mv.damage * 10
            } else {
                let mut value = self.learning_score(mv);
                // smart AI slightly favors high damage moves
                if self.smart_usually() {
                    value += mv.damage / 4;
                }
                let ms = self.memory.get(mv.id);
                value -= ms.attempts / 2;
                value -= ms.consecutive * 2;
                value
            };
            if best.is_none() || best.is_some_and(|(_, top)| value > top) {
                best = Some((mv.id, value));
            }
        }

        if let Some((id, _)) = best {
            if let Some(mv) = view.catalog.get(id) {
                self.set_selected_move(view, mv);
                return true;
            }
        }
        false
    }

    /// Pick one specific move id if it is currently valid.
    pub(crate) fn assign_move_by_id(&mut self, view: &FighterView<'_>, move_id: usize) -> bool {
        if let Some(mv) = view.catalog.get(move_id) {
            if is_valid_move(mv, &view.me, true) {
                self.set_selected_move(view, mv);
                return true;
            }
        }
        false
    }

    /// Opportunistic attack over the whole catalog, weighted by the learning
    /// table, repetition, pilot dislikes and difficulty.
    pub(crate) fn attempt_attack(&mut self, view: &FighterView<'_>, highest_damage: bool) -> bool {
        let range = view.enemy_range();
        let in_attempt_range =
            range <= Range::Close || (range == Range::Mid && self.dumb_sometimes());

        let mut best: Option<(usize, i32)> = None;
        for mv in view.catalog.iter() {
            if !is_valid_move(mv, &view.me, false) {
                continue;
            }
            // bail out unless close enough for hand-to-hand to land
            if !in_attempt_range
                && matches!(
                    mv.category,
                    MoveCategory::Basic
                        | MoveCategory::Low
                        | MoveCategory::Medium
                        | MoveCategory::High
                )
            {
                continue;
            }

            let value = if highest_damage {
                mv.damage * 10
            } else {
                let mut value = self.learning_score(mv);
                // less likely to repeat the exact same move as last attack
                if self.last_move_id == Some(mv.id) {
                    value -= self.rng_roll(10);
                }
                if self.smart_usually() {
                    value += mv.damage / 4;
                }
                if self.dislikes_move(mv) {
                    value -= self.rng_roll(10);
                }
                let ms = self.memory.get(mv.id);
                value -= ms.attempts / 2;
                value -= ms.consecutive * 2;
                if self.move_too_powerful(mv) {
                    trace!(move_id = mv.id, "skipping move above difficulty");
                    continue;
                }
                value
            };

            if best.is_none() || best.is_some_and(|(_, top)| value > top) {
                best = Some((mv.id, value));
            }
        }

        if let Some((id, _)) = best {
            if let Some(mv) = view.catalog.get(id) {
                self.set_selected_move(view, mv);
                return true;
            }
        }
        false
    }
}

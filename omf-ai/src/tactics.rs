//! Tactic vocabulary: what the AI is currently trying to do, compiled into a
//! movement phase followed by an attack phase.
//!
//! Selection is two-staged: [`AiController::likes_tactic`] is the desire
//! predicate (personality, skill, range, walls, history), and
//! [`AiController::queue_tactic`] compiles a chosen tactic into phase state
//! that the executor drains over the following ticks.

use serde::{Deserialize, Serialize};
use tracing::debug;

use omf_core::{FighterState, FighterView, HarId, MoveCategory, Range};

use crate::controller::AiController;

/// Ticks a movement phase may run before the tactic is abandoned.
pub const TACTIC_MOVE_TICKS: u8 = 5;
/// Ticks an attack phase may keep trying before the tactic is abandoned.
pub const TACTIC_ATTACK_TICKS: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tactic {
    /// Gain distance from the enemy.
    Escape,
    /// Sit in block and soak attacks.
    Turtle,
    /// Close in and grab/throw.
    Grab,
    /// Repeat the last attack that connected.
    Spam,
    /// Fire a projectile.
    Shoot,
    /// Knock the enemy down at the ankles.
    Trip,
    /// Land a fast light attack.
    Quick,
    /// Close the distance.
    Close,
    /// Jump toward (or over) the enemy.
    Fly,
    /// Spam power moves to shove the enemy back.
    Push,
    /// Block, then retaliate.
    Counter,
}

/// Movement phase of a queued tactic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovePhase {
    /// Step toward the enemy until adjacent.
    Close,
    /// Step or jump away.
    Avoid,
    /// Jump toward the enemy.
    Jump,
    /// Hold block, retreating if there is room.
    Block,
}

/// Attack phase of a queued tactic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackPhase {
    /// Re-use one specific move id (the spam tactic).
    Specific(usize),
    Trip,
    Grab,
    Light,
    Heavy,
    Jump,
    Ranged,
    Charge,
    Push,
    Random,
}

/// Defer the attack phase until this event arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackTrigger {
    OnBlock,
    OnLand,
}

/// At most one queued tactic per controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TacticState {
    pub tactic: Option<Tactic>,
    /// Most recent non-empty tactic; halves the odds of immediate repetition.
    pub last_tactic: Option<Tactic>,
    pub movement: Option<MovePhase>,
    pub move_timer: u8,
    pub attack: Option<AttackPhase>,
    pub attack_timer: u8,
    pub attack_on: Option<AttackTrigger>,
    /// Follow-up queued automatically if an attack of this category lands.
    pub chain: Option<(MoveCategory, Tactic)>,
}

impl TacticState {
    /// Clear the queued tactic. The displaced tactic (if any) becomes
    /// `last_tactic`; otherwise the previous `last_tactic` survives.
    pub fn reset(&mut self) {
        let last = self.tactic.or(self.last_tactic);
        *self = TacticState {
            last_tactic: last,
            ..TacticState::default()
        };
    }
}

impl AiController {
    /// Whether the AI wants to attempt `tactic` right now. Combines the pilot
    /// personality, skill gates, range, wall proximity and tactic history
    /// into a yes/no desire.
    pub(crate) fn likes_tactic(&mut self, view: &FighterView<'_>, tactic: Tactic) -> bool {
        if (self.tactic.last_tactic == Some(tactic) && self.roll_chance(2))
            || view.me.state == FighterState::Jumping
        {
            return false;
        }

        let enemy_close = view.me.close;
        let range = view.enemy_range();
        let wall_close = view.me.wall_close;
        let har = view.me.har;

        match tactic {
            Tactic::Shoot => {
                har.has_projectiles()
                    && (self.roll_pref(self.pilot.ap_special)
                        || (self.pilot.att_def && self.roll_chance(6))
                        || (self.pilot.att_sniper && self.roll_chance(3))
                        || (wall_close && self.roll_chance(3)))
                    // shredder prefers to shoot from close-mid range
                    && ((har != HarId::Shredder && !enemy_close)
                        || (har == HarId::Shredder
                            && ((range <= Range::Mid && self.smart_usually())
                                || self.dumb_sometimes())))
            }
            Tactic::Close => {
                !enemy_close
                    && ((har.has_charge() && self.smart_usually())
                        || (self.pilot.att_hyper && self.roll_chance(4))
                        || self.roll_chance(6))
            }
            Tactic::Quick => {
                ((self.pilot.att_hyper || self.pilot.att_sniper) && self.roll_chance(5))
                    || self.roll_chance(10)
            }
            Tactic::Grab => {
                (self.thrown <= self.tuning.max_times_thrown || self.roll_chance(2))
                    && ((self.pilot.att_hyper && self.roll_chance(3))
                        || (matches!(har, HarId::Flail | HarId::Thorn) && self.roll_chance(3))
                        || self.roll_chance(6))
            }
            Tactic::Turtle => {
                self.thrown <= self.tuning.max_times_thrown
                    && ((self.pilot.att_def && self.roll_chance(3)) || self.roll_chance(10))
            }
            Tactic::Counter => {
                self.thrown < self.tuning.max_times_thrown
                    && ((self.pilot.att_def && self.roll_chance(3)) || self.roll_chance(6))
            }
            Tactic::Escape => {
                (self.pilot.att_jump && self.roll_chance(3)) || self.roll_chance(6)
            }
            Tactic::Fly => {
                (self.roll_pref(self.pilot.pref_jump)
                    || matches!(har, HarId::Gargoyle | HarId::Pyros))
                    && (self.pilot.att_jump || wall_close || self.roll_chance(4))
            }
            Tactic::Push => {
                range <= Range::Mid
                    && ((har.has_push() && self.smart_usually())
                        || (self.pilot.att_def && self.roll_chance(3))
                        || (wall_close && self.roll_chance(3))
                        || self.roll_chance(6))
            }
            Tactic::Trip => range <= Range::Mid && self.roll_chance(3),
            Tactic::Spam => {
                (enemy_close || self.dumb_usually())
                    && (wall_close || self.roll_chance(6))
                    && self.roll_chance(3)
            }
        }
    }

    /// Compile `tactic` into a movement phase plus an attack phase and arm
    /// the phase timers.
    pub(crate) fn queue_tactic(&mut self, view: &FighterView<'_>, tactic: Tactic) {
        if let Some(current) = self.tactic.tactic {
            self.tactic.last_tactic = Some(current);
        }
        self.tactic.tactic = Some(tactic);
        debug!(?tactic, "queueing tactic");

        let enemy_close = view.me.close;
        let wall_close = view.me.wall_close;
        let range = view.enemy_range();
        let har = view.me.har;

        let mut do_charge = false;
        self.tactic.movement = match tactic {
            // aggressive tactics
            Tactic::Grab | Tactic::Trip | Tactic::Quick | Tactic::Close => {
                if enemy_close {
                    None
                } else if (tactic == Tactic::Close
                    || (tactic == Tactic::Quick && self.roll_chance(3)))
                    && self.smart_usually()
                    && har.has_charge()
                {
                    // smart AI closes with a charge special instead of walking
                    do_charge = true;
                    None
                } else if self.smart_usually() && self.roll_pref(self.pilot.pref_jump) {
                    Some(MovePhase::Jump)
                } else {
                    Some(MovePhase::Close)
                }
            }
            Tactic::Fly => Some(MovePhase::Jump),
            Tactic::Shoot => {
                if enemy_close && !wall_close {
                    Some(MovePhase::Avoid)
                } else {
                    None
                }
            }
            Tactic::Push | Tactic::Spam => None,
            Tactic::Escape => Some(if wall_close {
                MovePhase::Jump
            } else {
                MovePhase::Avoid
            }),
            Tactic::Turtle => {
                if range == Range::Cramped {
                    // at this range they might grab, so bail out like escape
                    Some(if wall_close {
                        MovePhase::Jump
                    } else {
                        MovePhase::Avoid
                    })
                } else {
                    Some(MovePhase::Block)
                }
            }
            Tactic::Counter => {
                if range > Range::Cramped {
                    Some(MovePhase::Block)
                } else {
                    None
                }
            }
        };
        self.tactic.move_timer = if self.tactic.movement.is_some() {
            TACTIC_MOVE_TICKS
        } else {
            0
        };

        self.tactic.attack = if do_charge {
            Some(AttackPhase::Charge)
        } else {
            match tactic {
                Tactic::Grab => Some(AttackPhase::Grab),
                Tactic::Trip => {
                    // a jump-in trip waits for the landing
                    if self.tactic.movement == Some(MovePhase::Jump) {
                        self.tactic.attack_on = Some(AttackTrigger::OnLand);
                    }
                    Some(AttackPhase::Trip)
                }
                Tactic::Quick => Some(AttackPhase::Light),
                Tactic::Fly => {
                    if self.smart_usually() {
                        Some(AttackPhase::Jump)
                    } else {
                        None
                    }
                }
                Tactic::Shoot => Some(AttackPhase::Ranged),
                Tactic::Push => Some(if har.has_push() {
                    AttackPhase::Push
                } else {
                    AttackPhase::Heavy
                }),
                Tactic::Spam => Some(match self.last_move_id {
                    Some(id) => AttackPhase::Specific(id),
                    None => AttackPhase::Light,
                }),
                Tactic::Counter => {
                    let attack = if self.roll_chance(3) {
                        AttackPhase::Trip
                    } else {
                        AttackPhase::Heavy
                    };
                    // only wait for a block when out of grab range
                    if range > Range::Cramped {
                        self.tactic.attack_on = Some(AttackTrigger::OnBlock);
                    }
                    Some(attack)
                }
                Tactic::Close => Some(AttackPhase::Random),
                Tactic::Escape | Tactic::Turtle => None,
            }
        };
        self.tactic.attack_timer = if self.tactic.attack.is_some() {
            TACTIC_ATTACK_TICKS
        } else {
            0
        };
    }
}

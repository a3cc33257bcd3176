//! Per-tick driver: the `poll` pipeline and the phase machinery behind it.
//!
//! `poll` short-circuits on the first concern that produces input: reactive
//! blocking, command-string playback, the anti-throw interrupt, the queued
//! tactic's movement/attack phases, an opportunistic attack, and finally
//! ambient movement plus speculative tactic queueing.

use tracing::{debug, trace};

use omf_core::{Action, FighterState, FighterView, HarId, MatchPhase, MoveCategory, Range};

use crate::controller::AiController;
use crate::inputs::char_to_act;
use crate::tactics::{AttackPhase, MovePhase, Tactic};

/// Which phase of the queued tactic runs this tick.
enum Phase {
    Movement(MovePhase),
    Attack(AttackPhase),
    Expired,
}

impl AiController {
    /// Advance the controller by one simulation tick, emitting zero or more
    /// pad actions.
    pub fn poll(&mut self, view: &FighterView<'_>) -> Vec<Action> {
        let mut out = Vec::new();

        // no acting while paused or between rounds; also forget any
        // half-played command so the next round starts clean
        if view.paused || view.phase != MatchPhase::Fighting {
            self.selected = None;
            return out;
        }

        self.act_timer -= 1;

        if self.block_enemy_har(view, &mut out) {
            return out;
        }
        if self.block_projectiles(view, &mut out) {
            return out;
        }

        if self.selected.is_some() {
            self.play_selected_move(view, &mut out);
            return out;
        }

        let can_move = matches!(
            view.me.state,
            FighterState::Standing
                | FighterState::WalkTo
                | FighterState::WalkFrom
                | FighterState::CrouchBlock
        );
        let can_interrupt_tactic = self.tactic.tactic.is_none()
            || !matches!(
                self.tactic.attack,
                Some(AttackPhase::Charge) | Some(AttackPhase::Push) | Some(AttackPhase::Trip)
            );

        // be wary of repeated throws while working through a tactic
        if can_move && can_interrupt_tactic && self.thrown > 1 && self.difficulty > 2 {
            let range = view.enemy_range();
            if (range == Range::Cramped || (range == Range::Close && self.thrown >= 2))
                && (self.assign_move_by_cat(view, MoveCategory::Low, false)
                    || self.attempt_attack(view, false))
            {
                debug!("spamming attacks to break the throw loop");
                self.tactic.reset();
                return out;
            }
        }

        if self.tactic.tactic.is_some()
            && (can_move
                || (self.tactic.tactic == Some(Tactic::Fly)
                    && view.me.state == FighterState::Jumping))
        {
            let acted = self.handle_queued_tactic(view, &mut out);
            if self.tactic.tactic.is_none() {
                self.reset_act_timer();
            }
            if acted {
                return out;
            }
        }

        // opportunistic attack, more often the higher the difficulty
        if self.diff_scale() && self.attempt_attack(view, false) {
            self.reset_act_timer();
            return out;
        }

        self.ambient_movement(view, &mut out);

        // speculatively queue a tactic for the next polls
        if (self.last_move_id.is_some() || view.me.close)
            && self.smart_sometimes()
            && self.tactic.tactic.is_none()
            && can_move
            && self.roll_chance(6)
        {
            const CANDIDATES: [(i32, Tactic); 7] = [
                (4, Tactic::Close),
                (4, Tactic::Push),
                (4, Tactic::Trip),
                (8, Tactic::Shoot),
                (6, Tactic::Grab),
                (6, Tactic::Fly),
                (6, Tactic::Quick),
            ];
            for (odds, tactic) in CANDIDATES {
                if self.roll_chance(odds) && self.likes_tactic(view, tactic) {
                    debug!(?tactic, "queueing speculative tactic");
                    self.queue_tactic(view, tactic);
                    break;
                }
            }
        }

        out
    }

    /// Blocking reaction to an enemy winding up a move at short range.
    fn block_enemy_har(&mut self, view: &FighterView<'_>, out: &mut Vec<Action>) -> bool {
        if (view.enemy.pos.x - view.me.pos.x).abs() < 100.0
            && view.enemy.executing_move
            && self.smart_usually()
        {
            self.cur_act = if view.enemy.state.is_crouching() {
                Action::DOWN | view.me.facing.backward()
            } else {
                view.me.facing.backward()
            };
            out.push(self.cur_act);
            return true;
        }
        false
    }

    /// Blocking reaction to incoming projectiles.
    fn block_projectiles(&mut self, view: &FighterView<'_>, out: &mut Vec<Action>) -> bool {
        for prj in view.projectiles {
            if !prj.from_enemy || !self.smart_usually() {
                continue;
            }
            if (prj.sprite_world_x() - view.me.pos.x).abs() < 120.0 {
                self.cur_act = Action::DOWN | view.me.facing.backward();
                out.push(self.cur_act);
                return true;
            }
        }
        false
    }

    /// Emit the current character of the selected move's command string,
    /// advancing one position per input-lag window. Playback runs backward:
    /// the command is stored suffix-first.
    fn play_selected_move(&mut self, view: &FighterView<'_>, out: &mut Vec<Action>) {
        if self.input_lag_timer > 0 {
            self.input_lag_timer -= 1;
        } else {
            self.move_str_pos = self.move_str_pos.saturating_sub(1);
            self.input_lag_timer = self.tuning.input_lag;
        }

        let Some(selected) = self.selected.as_ref() else {
            return;
        };
        let ch = selected.command.as_bytes()[self.move_str_pos];
        out.push(char_to_act(ch, view.me.facing));

        if self.move_str_pos == 0 {
            self.selected = None;
        }
    }

    /// Run the next slice of the queued tactic. Returns whether the tactic
    /// consumed this tick.
    pub(crate) fn handle_queued_tactic(
        &mut self,
        view: &FighterView<'_>,
        out: &mut Vec<Action>,
    ) -> bool {
        let enemy_close = view.me.close;
        let range = view.enemy_range();
        let wall_close = view.me.wall_close;

        let phase = if let (Some(movement), true) =
            (self.tactic.movement, self.tactic.move_timer > 0)
        {
            Phase::Movement(movement)
        } else if let (Some(attack), true) = (self.tactic.attack, self.tactic.attack_timer > 0) {
            Phase::Attack(attack)
        } else {
            Phase::Expired
        };

        let mut acted = true;
        match phase {
            Phase::Movement(movement) => match movement {
                MovePhase::Close => {
                    if !enemy_close {
                        // take a step closer
                        self.cur_act = view.me.facing.forward();
                        out.push(self.cur_act);
                        self.tactic.move_timer -= 1;
                    } else {
                        self.tactic.move_timer = 0;
                        trace!("movement phase reached the enemy");
                    }
                }
                MovePhase::Avoid => {
                    if range == Range::Far {
                        self.tactic.move_timer = 0;
                    } else {
                        if range == Range::Cramped || !self.roll_pref(self.pilot.pref_jump) {
                            // take a step away
                            self.cur_act = view.me.facing.backward();
                        } else {
                            if self.smart_usually() {
                                // charge a super jump
                                out.push(Action::DOWN);
                            }
                            self.cur_act = view.me.facing.backward() | Action::UP;
                        }
                        out.push(self.cur_act);
                        self.tactic.move_timer -= 1;
                    }
                    if self.tactic.move_timer == 0 {
                        trace!("avoid movement finished");
                    }
                }
                MovePhase::Jump => {
                    if !enemy_close {
                        if range == Range::Far && self.smart_usually() {
                            // charge a super jump
                            out.push(Action::DOWN);
                        }
                        self.cur_act = view.me.facing.forward() | Action::UP;
                        out.push(self.cur_act);
                        if self.roll_pref(self.pilot.pref_jump) {
                            self.tactic.move_timer -= 1;
                        } else {
                            self.tactic.move_timer = 0;
                        }
                    } else if self.tactic.tactic == Some(Tactic::Fly) {
                        if self.smart_sometimes() {
                            out.push(Action::DOWN);
                        }
                        // vault over the enemy
                        self.cur_act = view.me.facing.forward() | Action::UP;
                        out.push(self.cur_act);
                        self.tactic.move_timer = 0;
                    } else {
                        self.tactic.move_timer = 0;
                    }
                    if self.tactic.move_timer == 0 {
                        trace!("jump movement finished");
                    }
                }
                MovePhase::Block => {
                    self.cur_act = if wall_close || view.me.state.is_crouching() {
                        Action::DOWN | view.me.facing.backward()
                    } else {
                        // retreat and block
                        view.me.facing.backward() | Action::UP
                    };
                    out.push(self.cur_act);
                    self.tactic.move_timer -= 1;
                }
            },
            Phase::Attack(attack) => {
                let in_attempt_range =
                    enemy_close || (range <= Range::Mid && self.dumb_sometimes());
                self.tactic.attack_timer -= 1;

                match attack {
                    AttackPhase::Specific(id) => {
                        if in_attempt_range && self.assign_move_by_id(view, id) {
                            self.tactic.reset();
                            debug!("specific attack selected");
                        }
                    }
                    AttackPhase::Trip => {
                        if self.attempt_trip_attack(view, out) {
                            self.tactic.reset();
                            debug!("trip attack fired");
                            if self.smart_sometimes() {
                                self.seed_chain(
                                    view,
                                    MoveCategory::Low,
                                    &[Tactic::Escape, Tactic::Shoot],
                                );
                            }
                        }
                    }
                    AttackPhase::Grab => {
                        if enemy_close {
                            let attack_cat =
                                if self.assign_move_by_cat(view, MoveCategory::Throw, false) {
                                    Some(MoveCategory::Throw)
                                } else if self.assign_move_by_cat(view, MoveCategory::Close, true) {
                                    Some(MoveCategory::Close)
                                } else {
                                    None
                                };
                            if let Some(cat) = attack_cat {
                                self.tactic.reset();
                                debug!("grab attack selected");
                                if self.smart_sometimes() {
                                    self.seed_chain(
                                        view,
                                        cat,
                                        &[
                                            Tactic::Push,
                                            Tactic::Fly,
                                            Tactic::Counter,
                                            Tactic::Shoot,
                                        ],
                                    );
                                }
                            }
                        }
                    }
                    AttackPhase::Light => {
                        if in_attempt_range {
                            let light_cat = if self.roll_chance(2) {
                                MoveCategory::Basic
                            } else {
                                MoveCategory::Medium
                            };
                            if self.assign_move_by_cat(view, light_cat, false) {
                                self.tactic.reset();
                                debug!("light attack selected");
                                if self.smart_sometimes() {
                                    self.seed_chain(
                                        view,
                                        light_cat,
                                        &[Tactic::Push, Tactic::Trip, Tactic::Fly],
                                    );
                                }
                            }
                        }
                    }
                    AttackPhase::Heavy => {
                        if in_attempt_range {
                            let heavy_cat = if self.roll_chance(2) {
                                MoveCategory::Medium
                            } else {
                                MoveCategory::High
                            };
                            if self.assign_move_by_cat(view, heavy_cat, true) {
                                self.tactic.reset();
                                debug!("heavy attack selected");
                                if self.smart_sometimes() {
                                    self.seed_chain(
                                        view,
                                        heavy_cat,
                                        &[Tactic::Trip, Tactic::Counter, Tactic::Quick],
                                    );
                                }
                            }
                        }
                    }
                    AttackPhase::Jump => {
                        if !in_attempt_range && self.tactic.attack_timer > 0 {
                            // hold until the last tick so the attack doesn't
                            // fizzle out before we reach them
                            trace!("waiting for jump attack range");
                            return acted;
                        }
                        if self.attempt_attack(view, false) {
                            let landed_cat = self.selected.as_ref().map(|s| s.category);
                            self.tactic.reset();
                            debug!("jump attack selected");
                            if self.smart_usually() {
                                if let Some(cat) = landed_cat {
                                    self.seed_chain(
                                        view,
                                        cat,
                                        &[Tactic::Trip, Tactic::Grab, Tactic::Push],
                                    );
                                }
                            }
                        }
                    }
                    AttackPhase::Ranged => {
                        if self.attempt_projectile_attack(view, out) {
                            self.tactic.reset();
                            debug!("ranged attack fired");
                            if self.smart_sometimes() {
                                if self.pilot.att_sniper && self.likes_tactic(view, Tactic::Shoot)
                                {
                                    self.tactic.chain =
                                        Some((MoveCategory::Projectile, Tactic::Shoot));
                                } else {
                                    self.seed_chain(
                                        view,
                                        MoveCategory::Projectile,
                                        &[Tactic::Fly, Tactic::Counter],
                                    );
                                }
                            }
                        }
                    }
                    AttackPhase::Charge => {
                        trace!("charge attempt");
                        if self.attempt_charge_attack(view, out) {
                            self.tactic.reset();
                            debug!("charge attack fired");
                            // shadow's charge chains straight into a follow-up
                            if view.me.har == HarId::Shadow {
                                if self.likes_tactic(view, Tactic::Shoot) {
                                    self.queue_tactic(view, Tactic::Shoot);
                                } else if self.likes_tactic(view, Tactic::Grab) {
                                    self.queue_tactic(view, Tactic::Grab);
                                } else {
                                    self.queue_tactic(view, Tactic::Fly);
                                }
                            }
                        }
                    }
                    AttackPhase::Push => {
                        if self.attempt_push_attack(view, out) {
                            self.tactic.reset();
                            debug!("push attack fired");
                        }
                    }
                    AttackPhase::Random => {
                        if self.attempt_attack(view, false) {
                            let landed_cat = self.selected.as_ref().map(|s| s.category);
                            self.tactic.reset();
                            debug!("random attack selected");
                            if self.smart_usually() {
                                if let Some(cat) = landed_cat {
                                    self.seed_chain(
                                        view,
                                        cat,
                                        &[Tactic::Trip, Tactic::Grab, Tactic::Push],
                                    );
                                }
                            }
                        }
                    }
                }
            }
            Phase::Expired => {
                self.tactic.reset();
                debug!("flushing stalled tactic");
                acted = false;
            }
        }

        acted
    }

    /// Arm a follow-up tactic that fires automatically if an attack of the
    /// given category lands.
    fn seed_chain(
        &mut self,
        view: &FighterView<'_>,
        category: MoveCategory,
        candidates: &[Tactic],
    ) {
        for &tactic in candidates {
            if self.likes_tactic(view, tactic) {
                self.tactic.chain = Some((category, tactic));
                return;
            }
        }
    }

    /// Idle shuffling: walk, crouch-block or hop around, biased by difficulty
    /// and the pilot's movement preferences.
    fn ambient_movement(&mut self, view: &FighterView<'_>, out: &mut Vec<Action>) {
        use rand::Rng;

        let mut jump_thresh = 0;
        if self.act_timer <= 0
            && self.rng.random_range(0..100) > self.tuning.act_thresh - self.difficulty * 3
        {
            let move_roll = self.rng.random_range(0..100);
            let move_thresh = self.tuning.move_thresh - self.difficulty * 2;

            if move_roll > move_thresh {
                let fwd_roll = self.rng.random_range(0..100);
                let mut fwd_thresh = self.tuning.fwd_thresh - (self.difficulty - 1) * 2;
                if self.pilot.pref_fwd > self.pilot.pref_back {
                    fwd_thresh -= if self.roll_pref(self.pilot.pref_fwd) { 8 } else { 4 };
                } else if self.pilot.pref_back > self.pilot.pref_fwd {
                    fwd_thresh += if self.roll_pref(self.pilot.pref_back) { 4 } else { 2 };
                }
                // the lunging chassis walk in more readily
                if matches!(view.me.har, HarId::Flail | HarId::Thorn | HarId::Nova) {
                    fwd_thresh -= 4;
                }
                if self.pilot.att_hyper {
                    fwd_thresh -= 4;
                }

                if fwd_roll >= fwd_thresh {
                    self.cur_act = view.me.facing.forward();
                    jump_thresh = self.tuning.fwd_jump_thresh - self.difficulty * 2;
                } else {
                    self.cur_act = view.me.facing.backward();
                    jump_thresh = self.tuning.back_jump_thresh - self.difficulty * 2;
                }
            } else if self.smart_sometimes() {
                // crouch and block
                self.cur_act = Action::DOWN | view.me.facing.backward();
            } else {
                self.cur_act = Action::STOP;
                jump_thresh = self.tuning.still_jump_thresh - self.difficulty;
            }

            self.reset_act_timer();
            out.push(self.cur_act);
        }

        // jumpy pilots hop a little more often
        if jump_thresh > 0 && self.pilot.att_jump {
            jump_thresh -= 5;
        }

        if jump_thresh > 0
            && self.rng.random_range(0..100) >= jump_thresh
            && self.roll_pref(self.pilot.pref_jump)
        {
            if view.me.vel.x < 0.0 {
                out.push(Action::UP | Action::LEFT);
            } else if view.me.vel.x > 0.0 {
                out.push(Action::UP | Action::RIGHT);
            } else {
                out.push(Action::UP);
            }
        }
    }
}

//! Event reactor: consumes combat events from the fighter simulation.
//!
//! Each event runs two passes. A cancellation pass first checks whether the
//! queued tactic is invalidated by what just happened; a suggestion pass then
//! updates the learning table or the personality vector and may queue a fresh
//! tactic. Only [`AiController::poll`] synthesizes inputs; this path never
//! does.

use tracing::debug;

use omf_core::{CombatEvent, FighterState, FighterView, MoveCategory, MoveRef, MOVE_TABLE_SIZE};

use crate::controller::AiController;
use crate::tactics::{AttackTrigger, Tactic};

impl AiController {
    pub fn on_event(&mut self, view: &FighterView<'_>, event: &CombatEvent) {
        let has_queued = self.cancellation_pass(event);

        // a move that finished, landed or got blocked ends command playback
        if matches!(
            event,
            CombatEvent::Attack(_) | CombatEvent::EnemyBlock(_) | CombatEvent::LandHit(_)
        ) {
            self.selected = None;
        }

        match *event {
            CombatEvent::LandHit(mv) => self.on_land_hit(view, mv, has_queued),
            CombatEvent::EnemyBlock(mv) => self.on_enemy_block(view, mv, has_queued),
            CombatEvent::Block(mv) => self.on_block(view, mv, has_queued),
            CombatEvent::Land => self.on_land(view, has_queued),
            CombatEvent::HitWall => {
                if !has_queued && self.smart_usually() {
                    self.suggest_first(
                        view,
                        &[
                            Tactic::Shoot,
                            Tactic::Push,
                            Tactic::Turtle,
                            Tactic::Trip,
                            Tactic::Fly,
                            Tactic::Escape,
                            Tactic::Counter,
                            Tactic::Close,
                        ],
                    );
                }
            }
            CombatEvent::TakeHit(mv) => self.on_take_hit(view, mv, has_queued),
            CombatEvent::Recover => {
                if !has_queued && self.smart_usually() {
                    self.suggest_first(
                        view,
                        &[Tactic::Shoot, Tactic::Counter, Tactic::Turtle, Tactic::Escape],
                    );
                }
            }
            CombatEvent::EnemyStun => {
                if !has_queued && self.smart_usually() {
                    if self.roll_chance(2) {
                        self.queue_tactic(view, Tactic::Grab);
                    } else {
                        self.queue_tactic(view, Tactic::Close);
                    }
                }
            }
            CombatEvent::Attack(_) => {}
        }
    }

    /// Drop the queued tactic if this event makes it moot. Returns whether a
    /// tactic is still queued afterwards.
    fn cancellation_pass(&mut self, event: &CombatEvent) -> bool {
        let Some(tactic) = self.tactic.tactic else {
            return false;
        };

        match event {
            CombatEvent::Block(mv) => {
                let chain_matches = self
                    .tactic
                    .chain
                    .is_some_and(|(cat, _)| cat == mv.category);
                let survives = matches!(
                    tactic,
                    Tactic::Counter
                        | Tactic::Turtle
                        | Tactic::Trip
                        | Tactic::Push
                        | Tactic::Spam
                        | Tactic::Fly
                ) || (tactic == Tactic::Grab && !self.roll_chance(2))
                    || chain_matches;
                if !survives {
                    self.tactic.reset();
                    debug!("reset tactic queue: blocked an incoming hit");
                    return false;
                }
            }
            CombatEvent::TakeHit(_) => {
                self.tactic.reset();
                debug!("reset tactic queue: took a hit");
                return false;
            }
            CombatEvent::EnemyStun => {
                if !matches!(
                    tactic,
                    Tactic::Grab | Tactic::Close | Tactic::Trip | Tactic::Shoot
                ) {
                    self.tactic.reset();
                    debug!("reset tactic queue: enemy stunned");
                    return false;
                }
            }
            _ => {}
        }
        true
    }

    fn on_land_hit(&mut self, view: &FighterView<'_>, mv: MoveRef, has_queued: bool) {
        // a malformed move id is dropped rather than tracked
        if mv.id >= MOVE_TABLE_SIZE {
            return;
        }
        self.memory.get_mut(mv.id).record_hit();
        self.last_move_id = Some(mv.id);

        if let Some((chain_cat, chain_tactic)) = self.tactic.chain {
            if chain_cat == mv.category {
                debug!(?chain_tactic, "queueing chained tactic");
                self.queue_tactic(view, chain_tactic);
                return;
            }
        }

        if has_queued || !self.smart_usually() {
            return;
        }
        self.suggest_first(
            view,
            &[
                Tactic::Quick,
                Tactic::Trip,
                Tactic::Grab,
                Tactic::Push,
                Tactic::Close,
                Tactic::Shoot,
                Tactic::Turtle,
                Tactic::Spam,
            ],
        );
    }

    fn on_enemy_block(&mut self, view: &FighterView<'_>, mv: MoveRef, has_queued: bool) {
        // only the first block of a selected move counts against it
        if self.blocked || mv.id >= MOVE_TABLE_SIZE {
            return;
        }
        self.blocked = true;
        self.memory.get_mut(mv.id).value -= 1;
        self.last_move_id = Some(mv.id);

        if has_queued || !self.smart_usually() {
            return;
        }
        self.suggest_first(
            view,
            &[
                Tactic::Grab,
                Tactic::Trip,
                Tactic::Push,
                Tactic::Counter,
                Tactic::Turtle,
                Tactic::Escape,
                Tactic::Fly,
                Tactic::Quick,
                Tactic::Spam,
            ],
        );
    }

    fn on_block(&mut self, view: &FighterView<'_>, mv: MoveRef, has_queued: bool) {
        if has_queued && self.tactic.attack_on == Some(AttackTrigger::OnBlock) {
            // the counter window is open; fire the attack phase now
            debug!("attempting counter move");
            self.tactic.move_timer = 0;
            return;
        }
        if has_queued || !self.smart_usually() {
            return;
        }
        if mv.category == MoveCategory::Projectile {
            self.suggest_first(
                view,
                &[Tactic::Fly, Tactic::Shoot, Tactic::Close, Tactic::Turtle],
            );
        } else {
            self.suggest_first(
                view,
                &[
                    Tactic::Trip,
                    Tactic::Push,
                    Tactic::Turtle,
                    Tactic::Grab,
                    Tactic::Escape,
                    Tactic::Quick,
                    Tactic::Spam,
                ],
            );
        }
    }

    fn on_land(&mut self, view: &FighterView<'_>, has_queued: bool) {
        if has_queued
            && self.tactic.attack_on == Some(AttackTrigger::OnLand)
            && view.me.state == FighterState::Standing
        {
            // touched down; fire the deferred attack now
            debug!("attempting landing move");
            self.tactic.move_timer = 0;
            return;
        }
        if has_queued || !self.smart_usually() {
            return;
        }
        self.suggest_first(
            view,
            &[
                Tactic::Trip,
                Tactic::Shoot,
                Tactic::Turtle,
                Tactic::Quick,
                Tactic::Grab,
                Tactic::Push,
                Tactic::Counter,
                Tactic::Close,
            ],
        );
    }

    fn on_take_hit(&mut self, view: &FighterView<'_>, mv: MoveRef, has_queued: bool) {
        // if the enemy is cheesing, adjust the personality for the rest of
        // the match
        match mv.category {
            MoveCategory::Throw | MoveCategory::Close => {
                self.thrown += 1;
                if self.smart_usually() && self.thrown >= self.tuning.max_times_thrown {
                    debug!("adjusting personality after repeated throws");
                    self.pilot.att_def = false;
                    self.pilot.att_sniper = true;
                    self.pilot.att_jump = true;
                    self.pilot.pref_jump += 50;
                    if self.pilot.pref_back < 200 {
                        self.pilot.pref_back += 50;
                    }
                    if self.pilot.pref_fwd > -200 {
                        self.pilot.pref_fwd -= 50;
                    }
                }
            }
            MoveCategory::Projectile => {
                self.shot += 1;
                if self.smart_usually() && self.shot >= self.tuning.max_times_shot {
                    debug!("adjusting personality after repeated projectiles");
                    self.pilot.att_def = false;
                    self.pilot.att_hyper = true;
                    self.pilot.att_jump = true;
                    if self.pilot.pref_fwd < 200 {
                        self.pilot.pref_fwd += 50;
                    }
                    if self.pilot.pref_back > -200 {
                        self.pilot.pref_back -= 50;
                    }
                }
            }
            _ => {}
        }

        if has_queued || !self.smart_usually() {
            return;
        }
        match mv.category {
            MoveCategory::Throw | MoveCategory::Close => {
                // gain distance
                self.suggest_first(view, &[Tactic::Escape, Tactic::Push, Tactic::Fly]);
            }
            MoveCategory::Projectile => {
                // push in so the shelling stops
                self.suggest_first(
                    view,
                    &[Tactic::Close, Tactic::Fly, Tactic::Shoot, Tactic::Grab],
                );
            }
            _ => {
                self.suggest_first(
                    view,
                    &[
                        Tactic::Counter,
                        Tactic::Turtle,
                        Tactic::Escape,
                        Tactic::Push,
                        Tactic::Trip,
                        Tactic::Quick,
                        Tactic::Spam,
                    ],
                );
            }
        }
    }

    /// Queue the first candidate tactic the AI currently likes.
    pub(crate) fn suggest_first(&mut self, view: &FighterView<'_>, candidates: &[Tactic]) {
        for &tactic in candidates {
            if self.likes_tactic(view, tactic) {
                self.queue_tactic(view, tactic);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omf_core::{HarId, Pilot, PilotId};

    use crate::tactics::MovePhase;
    use crate::test_support::{standing_status, view_with, TestArena, JAB_ID, SWEEP_ID};

    fn low_hit(id: usize) -> MoveRef {
        MoveRef {
            id,
            category: MoveCategory::Low,
        }
    }

    #[test]
    fn test_take_hit_always_cancels_queued_tactic() {
        let arena = TestArena::basic(HarId::Jaguar);
        let view = view_with(
            &arena,
            standing_status(HarId::Jaguar),
            standing_status(HarId::Shadow),
        );
        let mut ai = AiController::with_seed(5, Pilot::default(), PilotId::Crystal, 3);
        ai.queue_tactic(&view, Tactic::Quick);
        assert!(ai.current_tactic().is_some());
        ai.on_event(
            &view,
            &CombatEvent::TakeHit(MoveRef {
                id: JAB_ID,
                category: MoveCategory::Basic,
            }),
        );
        // the hit cancels the old tactic; any newly suggested one is fresh
        assert_ne!(ai.tactic.last_tactic, None);
    }

    #[test]
    fn test_enemy_stun_spares_aggressive_tactics() {
        let arena = TestArena::basic(HarId::Jaguar);
        let view = view_with(
            &arena,
            standing_status(HarId::Jaguar),
            standing_status(HarId::Shadow),
        );
        let mut ai = AiController::with_seed(5, Pilot::default(), PilotId::Crystal, 3);
        ai.queue_tactic(&view, Tactic::Trip);
        ai.on_event(&view, &CombatEvent::EnemyStun);
        assert_eq!(ai.current_tactic(), Some(Tactic::Trip));
    }

    #[test]
    fn test_block_event_spares_counter() {
        let arena = TestArena::basic(HarId::Jaguar);
        let view = view_with(
            &arena,
            standing_status(HarId::Jaguar),
            standing_status(HarId::Shadow),
        );
        let mut ai = AiController::with_seed(5, Pilot::default(), PilotId::Ibrahim, 3);
        ai.queue_tactic(&view, Tactic::Counter);
        let before = ai.current_tactic();
        ai.on_event(&view, &CombatEvent::Block(low_hit(SWEEP_ID)));
        assert_eq!(ai.current_tactic(), before);
    }

    #[test]
    fn test_block_event_with_counter_armed_fires_attack_phase() {
        let arena = TestArena::basic(HarId::Jaguar);
        let me = standing_status(HarId::Jaguar);
        let mut enemy = standing_status(HarId::Shadow);
        enemy.pos.x = me.pos.x + 200.0;
        let view = view_with(&arena, me, enemy);
        let mut ai = AiController::with_seed(5, Pilot::default(), PilotId::Ibrahim, 3);
        ai.queue_tactic(&view, Tactic::Counter);
        assert_eq!(ai.tactic.attack_on, Some(AttackTrigger::OnBlock));
        assert_eq!(ai.tactic.movement, Some(MovePhase::Block));
        assert!(ai.tactic.move_timer > 0);
        ai.on_event(&view, &CombatEvent::Block(low_hit(SWEEP_ID)));
        assert_eq!(ai.tactic.move_timer, 0, "attack phase unlocked");
        assert_eq!(ai.current_tactic(), Some(Tactic::Counter));
    }

    #[test]
    fn test_land_hit_updates_learning_table() {
        let arena = TestArena::basic(HarId::Jaguar);
        let view = view_with(
            &arena,
            standing_status(HarId::Jaguar),
            standing_status(HarId::Shadow),
        );
        let mut ai = AiController::with_seed(0, Pilot::default(), PilotId::Crystal, 3);
        ai.memory.get_mut(SWEEP_ID).last_dist = 88;
        ai.on_event(&view, &CombatEvent::LandHit(low_hit(SWEEP_ID)));
        let stat = ai.memory.get(SWEEP_ID);
        assert_eq!(stat.value, 1);
        assert_eq!(stat.min_hit_dist, 88);
        assert_eq!(stat.max_hit_dist, 88);
        assert_eq!(ai.last_move_id, Some(SWEEP_ID));
    }

    #[test]
    fn test_land_hit_value_caps_at_ten() {
        let arena = TestArena::basic(HarId::Jaguar);
        let view = view_with(
            &arena,
            standing_status(HarId::Jaguar),
            standing_status(HarId::Shadow),
        );
        let mut ai = AiController::with_seed(0, Pilot::default(), PilotId::Crystal, 3);
        for _ in 0..30 {
            ai.on_event(&view, &CombatEvent::LandHit(low_hit(SWEEP_ID)));
        }
        assert_eq!(ai.memory.get(SWEEP_ID).value, 10);
    }

    #[test]
    fn test_chained_tactic_fires_on_matching_category() {
        let arena = TestArena::basic(HarId::Jaguar);
        let view = view_with(
            &arena,
            standing_status(HarId::Jaguar),
            standing_status(HarId::Shadow),
        );
        let mut ai = AiController::with_seed(5, Pilot::default(), PilotId::Crystal, 3);
        ai.tactic.chain = Some((MoveCategory::Low, Tactic::Escape));
        ai.on_event(&view, &CombatEvent::LandHit(low_hit(SWEEP_ID)));
        assert_eq!(ai.current_tactic(), Some(Tactic::Escape));
    }

    #[test]
    fn test_chained_tactic_ignores_other_categories() {
        let arena = TestArena::basic(HarId::Jaguar);
        let view = view_with(
            &arena,
            standing_status(HarId::Jaguar),
            standing_status(HarId::Shadow),
        );
        // difficulty 1: smart_usually never passes, so no suggestions fire
        let mut ai = AiController::with_seed(0, Pilot::default(), PilotId::Crystal, 3);
        ai.tactic.chain = Some((MoveCategory::Low, Tactic::Escape));
        ai.on_event(
            &view,
            &CombatEvent::LandHit(MoveRef {
                id: JAB_ID,
                category: MoveCategory::Basic,
            }),
        );
        assert_eq!(ai.current_tactic(), None);
        assert_eq!(ai.tactic.chain, Some((MoveCategory::Low, Tactic::Escape)));
    }

    #[test]
    fn test_enemy_block_counts_once_per_selected_move() {
        let arena = TestArena::basic(HarId::Jaguar);
        let view = view_with(
            &arena,
            standing_status(HarId::Jaguar),
            standing_status(HarId::Shadow),
        );
        let mut ai = AiController::with_seed(0, Pilot::default(), PilotId::Crystal, 3);
        ai.on_event(&view, &CombatEvent::EnemyBlock(low_hit(SWEEP_ID)));
        ai.on_event(&view, &CombatEvent::EnemyBlock(low_hit(SWEEP_ID)));
        ai.on_event(&view, &CombatEvent::EnemyBlock(low_hit(SWEEP_ID)));
        assert_eq!(ai.memory.get(SWEEP_ID).value, -1);
        assert!(ai.blocked);
    }

    #[test]
    fn test_attack_event_clears_selected_move() {
        let arena = TestArena::basic(HarId::Jaguar);
        let mut me = standing_status(HarId::Jaguar);
        me.close = true;
        let view = view_with(&arena, me, standing_status(HarId::Shadow));
        let mut ai = AiController::with_seed(5, Pilot::default(), PilotId::Crystal, 3);
        assert!(ai.attempt_attack(&view, true));
        assert!(ai.selected.is_some());
        let id = ai.selected.as_ref().unwrap().id;
        ai.on_event(
            &view,
            &CombatEvent::Attack(MoveRef {
                id,
                category: MoveCategory::Throw,
            }),
        );
        assert!(ai.selected.is_none());
    }

    #[test]
    fn test_repeated_throws_reshape_personality() {
        let arena = TestArena::basic(HarId::Jaguar);
        let view = view_with(
            &arena,
            standing_status(HarId::Jaguar),
            standing_status(HarId::Shadow),
        );
        let mut ai = AiController::with_seed(5, Pilot::default(), PilotId::Ibrahim, 3);
        assert!(ai.pilot().att_def);
        let throw = CombatEvent::TakeHit(MoveRef {
            id: 9,
            category: MoveCategory::Throw,
        });
        // smart_usually at difficulty 6 passes 11/12; after enough throws the
        // reshape is certain to have triggered
        for _ in 0..30 {
            ai.on_event(&view, &throw);
        }
        assert!(!ai.pilot().att_def);
        assert!(ai.pilot().att_sniper);
        assert!(ai.pilot().att_jump);
        assert!(ai.times_thrown() >= 30);
        assert!(ai.pilot().pref_jump > 100);
    }

    #[test]
    fn test_repeated_projectiles_reshape_personality() {
        let arena = TestArena::basic(HarId::Jaguar);
        let view = view_with(
            &arena,
            standing_status(HarId::Jaguar),
            standing_status(HarId::Shadow),
        );
        let mut ai = AiController::with_seed(5, Pilot::default(), PilotId::Ibrahim, 3);
        let shot = CombatEvent::TakeHit(MoveRef {
            id: 20,
            category: MoveCategory::Projectile,
        });
        for _ in 0..30 {
            ai.on_event(&view, &shot);
        }
        assert!(!ai.pilot().att_def);
        assert!(ai.pilot().att_hyper);
        assert!(ai.pilot().att_jump);
        assert_eq!(ai.times_shot(), 30);
        assert!(ai.pilot().pref_fwd >= 200 - 50);
        assert!(ai.pilot().pref_back <= -150);
    }

    #[test]
    fn test_shot_counter_is_monotonic() {
        let arena = TestArena::basic(HarId::Jaguar);
        let view = view_with(
            &arena,
            standing_status(HarId::Jaguar),
            standing_status(HarId::Shadow),
        );
        let mut ai = AiController::with_seed(5, Pilot::default(), PilotId::Crystal, 3);
        let shot = CombatEvent::TakeHit(MoveRef {
            id: 20,
            category: MoveCategory::Projectile,
        });
        let mut last = 0;
        for _ in 0..10 {
            ai.on_event(&view, &shot);
            assert!(ai.times_shot() > last);
            last = ai.times_shot();
        }
        assert_eq!(last, 10);
    }
}

//! Controller entry point and per-match state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use omf_core::{Action, MoveCategory, Pilot, PilotId};

use crate::gates;
use crate::stats::MoveMemory;
use crate::tactics::TacticState;
use crate::tuning::AiTuning;

/// The move currently being keyed in, one command character per input-lag
/// window. Playback runs suffix-first (see `omf_core::Move::command`).
#[derive(Clone, Debug)]
pub(crate) struct SelectedMove {
    pub id: usize,
    pub category: MoveCategory,
    pub command: String,
}

/// One computer opponent. Created when a fight starts, dropped (or
/// [`finished`](AiController::finish)) when it ends.
///
/// The controller owns a copy of the pilot's personality vector for the match
/// duration; the event reactor mutates it in place (anti-cheese reshaping),
/// and `finish` hands the adjusted vector back.
pub struct AiController {
    pub(crate) difficulty: i32,
    pub(crate) pilot: Pilot,
    pub(crate) tuning: AiTuning,
    pub(crate) rng: StdRng,

    pub(crate) memory: MoveMemory,
    pub(crate) tactic: TacticState,

    pub(crate) selected: Option<SelectedMove>,
    pub(crate) move_str_pos: usize,
    pub(crate) input_lag_timer: u8,

    pub(crate) last_move_id: Option<usize>,
    pub(crate) blocked: bool,
    pub(crate) thrown: u32,
    pub(crate) shot: u32,

    pub(crate) act_timer: i32,
    pub(crate) cur_act: Action,
}

impl AiController {
    /// Build a controller for one fight.
    ///
    /// `difficulty` is the chosen menu index 0..=5 (clamped), stored
    /// internally as 1..=6. `pilot` is seeded from `pilot_id` before use.
    pub fn new(difficulty: u8, pilot: Pilot, pilot_id: PilotId) -> Self {
        Self::with_rng(difficulty, pilot, pilot_id, StdRng::from_os_rng())
    }

    /// Like [`new`](Self::new) but with a deterministic generator, so whole
    /// fights replay identically in tests.
    pub fn with_seed(difficulty: u8, pilot: Pilot, pilot_id: PilotId, seed: u64) -> Self {
        Self::with_rng(difficulty, pilot, pilot_id, StdRng::seed_from_u64(seed))
    }

    fn with_rng(difficulty: u8, mut pilot: Pilot, pilot_id: PilotId, rng: StdRng) -> Self {
        pilot.seed_personality(pilot_id);
        let tuning = AiTuning::default();
        Self {
            difficulty: i32::from(difficulty.min(5)) + 1,
            pilot,
            input_lag_timer: tuning.input_lag,
            tuning,
            rng,
            memory: MoveMemory::default(),
            tactic: TacticState::default(),
            selected: None,
            move_str_pos: 0,
            last_move_id: None,
            blocked: false,
            thrown: 0,
            shot: 0,
            act_timer: 0,
            cur_act: Action::STOP,
        }
    }

    /// Replace the tuning thresholds (builder style).
    pub fn with_tuning(mut self, tuning: AiTuning) -> Self {
        self.input_lag_timer = tuning.input_lag;
        self.tuning = tuning;
        self
    }

    /// Effective difficulty level, 1..=6.
    pub fn difficulty(&self) -> i32 {
        self.difficulty
    }

    /// The personality vector as of now, reshaping included.
    pub fn pilot(&self) -> &Pilot {
        &self.pilot
    }

    /// The tactic currently queued, if any.
    pub fn current_tactic(&self) -> Option<crate::tactics::Tactic> {
        self.tactic.tactic
    }

    /// Id of the move whose command string is currently being keyed in.
    pub fn selected_move_id(&self) -> Option<usize> {
        self.selected.as_ref().map(|selected| selected.id)
    }

    pub fn times_thrown(&self) -> u32 {
        self.thrown
    }

    pub fn times_shot(&self) -> u32 {
        self.shot
    }

    /// Per-move learning statistics for this match.
    pub fn memory(&self) -> &MoveMemory {
        &self.memory
    }

    /// Tear down the controller and hand the (possibly reshaped) personality
    /// vector back to the caller.
    pub fn finish(self) -> Pilot {
        self.pilot
    }

    pub(crate) fn reset_act_timer(&mut self) {
        self.act_timer =
            self.tuning.act_timer - self.difficulty * 2 - self.rng.random_range(0..3);
    }

    // Gate helpers: keep call sites terse and thread the owned generator.

    pub(crate) fn roll_chance(&mut self, roll_x: i32) -> bool {
        gates::roll_chance(&mut self.rng, roll_x)
    }

    pub(crate) fn roll_pref(&mut self, pref_val: i16) -> bool {
        gates::roll_pref(&mut self.rng, pref_val)
    }

    pub(crate) fn smart_usually(&mut self) -> bool {
        gates::smart_usually(&mut self.rng, self.difficulty)
    }

    pub(crate) fn dumb_usually(&mut self) -> bool {
        gates::dumb_usually(&mut self.rng, self.difficulty)
    }

    pub(crate) fn smart_sometimes(&mut self) -> bool {
        gates::smart_sometimes(&mut self.rng, self.difficulty)
    }

    pub(crate) fn dumb_sometimes(&mut self) -> bool {
        gates::dumb_sometimes(&mut self.rng, self.difficulty)
    }

    pub(crate) fn diff_scale(&mut self) -> bool {
        gates::diff_scale(&mut self.rng, self.difficulty)
    }
}

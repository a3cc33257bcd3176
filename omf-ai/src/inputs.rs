//! Input synthesis: translating command characters and per-chassis specials
//! into raw pad actions.
//!
//! Command strings use numpad notation relative to the facing direction, so
//! every directional character mirrors when the fighter faces left. The
//! hardcoded special sequences below likewise build on [`Facing::forward`] /
//! [`Facing::backward`] instead of absolute directions.

use tracing::debug;

use omf_core::{Action, Facing, FighterState, FighterView, HarId, Range};

use crate::controller::AiController;

/// Map one command character to a pad action, mirroring 1/3/4/6/7/9 when the
/// fighter faces left.
pub fn char_to_act(ch: u8, facing: Facing) -> Action {
    match ch {
        b'8' => Action::UP,
        b'2' => Action::DOWN,
        b'6' => facing.forward(),
        b'4' => facing.backward(),
        b'9' => Action::UP | facing.forward(),
        b'7' => Action::UP | facing.backward(),
        b'3' => Action::DOWN | facing.forward(),
        b'1' => Action::DOWN | facing.backward(),
        b'K' => Action::KICK,
        b'P' => Action::PUNCH,
        _ => Action::STOP,
    }
}

/// Back, down-back: upgrades several specials into their shadow variants.
fn shadow_prefix(out: &mut Vec<Action>, facing: Facing) {
    out.push(facing.backward());
    out.push(facing.backward() | Action::DOWN);
}

/// Down, down-forward, forward + punch.
fn quarter_circle_punch(out: &mut Vec<Action>, facing: Facing) {
    out.push(Action::DOWN);
    out.push(Action::DOWN | facing.forward());
    out.push(facing.forward());
    out.push(facing.forward() | Action::PUNCH);
    out.push(Action::PUNCH);
}

/// Down, down-forward, forward + kick.
fn quarter_circle_kick(out: &mut Vec<Action>, facing: Facing) {
    out.push(Action::DOWN);
    out.push(Action::DOWN | facing.forward());
    out.push(facing.forward());
    out.push(facing.forward() | Action::KICK);
    out.push(Action::KICK);
}

/// Forward, forward + punch.
fn double_forward_punch(out: &mut Vec<Action>, facing: Facing) {
    out.push(facing.forward());
    out.push(facing.forward());
    out.push(facing.forward() | Action::PUNCH);
    out.push(Action::PUNCH);
}

/// Forward (released), forward + punch.
fn dash_punch(out: &mut Vec<Action>, facing: Facing) {
    out.push(facing.forward());
    out.push(Action::STOP);
    out.push(facing.forward());
    out.push(facing.forward() | Action::PUNCH);
    out.push(Action::PUNCH);
}

/// Down, down-back + kick.
fn trip_slide(out: &mut Vec<Action>, facing: Facing) {
    out.push(Action::DOWN);
    out.push(Action::DOWN | facing.backward());
    out.push(Action::KICK);
}

impl AiController {
    /// Emit a neutral input from transitional states, proceed from standing,
    /// refuse from the air and from scripted states.
    fn ground_for_special(view: &FighterView<'_>, out: &mut Vec<Action>) -> bool {
        match view.me.state {
            FighterState::WalkTo
            | FighterState::WalkFrom
            | FighterState::CrouchBlock
            | FighterState::Crouching => out.push(Action::STOP),
            FighterState::Standing => {}
            _ => return false,
        }
        true
    }

    /// Keyboard sequence for the chassis' charging special.
    pub(crate) fn attempt_charge_attack(
        &mut self,
        view: &FighterView<'_>,
        out: &mut Vec<Action>,
    ) -> bool {
        if !Self::ground_for_special(view, out) {
            return false;
        }

        let range = view.enemy_range();
        let facing = view.me.facing;

        match view.me.har {
            HarId::Jaguar => {
                debug!("jaguar charge: leap");
                if range >= Range::Mid && self.smart_usually() {
                    // Shadow Leap : B,D,F+P
                    shadow_prefix(out, facing);
                }
                // Jaguar Leap : D,F+P
                quarter_circle_punch(out, facing);
            }
            HarId::Shadow => {
                // Shadow Grab : D,D+P
                debug!("shadow charge: grab");
                out.push(Action::DOWN);
                out.push(Action::STOP);
                out.push(Action::DOWN);
                out.push(Action::DOWN | Action::PUNCH);
                out.push(Action::PUNCH);
            }
            HarId::Katana => {
                if self.roll_chance(2) && self.roll_pref(self.pilot.ap_low) {
                    debug!("katana charge: trip-slide");
                    trip_slide(out, facing);
                } else if range >= Range::Mid && self.roll_chance(2) {
                    debug!("katana charge: forward razor spin");
                    // Forward Razor Spin : D,F+K
                    out.push(Action::DOWN);
                    out.push(facing.forward());
                    out.push(facing.forward() | Action::KICK);
                    out.push(facing.forward());
                } else {
                    debug!("katana charge: rising blade");
                    if range > Range::Cramped && self.smart_usually() {
                        // Triple Blade : B,D,F+P
                        shadow_prefix(out, facing);
                    }
                    // Rising Blade : D,F+P
                    quarter_circle_punch(out, facing);
                }
            }
            HarId::Flail => {
                debug!("flail charge: charging punch");
                if range >= Range::Mid && self.smart_usually() {
                    // Shadow Punch : D,B,B+P
                    out.push(Action::DOWN);
                    out.push(facing.backward() | Action::DOWN);
                }
                // Charging Punch : B,B+P
                out.push(facing.backward());
                out.push(facing.backward());
                out.push(facing.backward() | Action::PUNCH);
                out.push(Action::PUNCH);
            }
            HarId::Thorn => {
                debug!("thorn charge: spike-charge");
                // Spike-Charge : F,F+P
                double_forward_punch(out, facing);
            }
            HarId::Pyros => {
                debug!("pyros charge: thrust");
                if range >= Range::Mid && self.smart_usually() {
                    // Shadow Thrust : F,F,F+P
                    out.push(facing.forward());
                    out.push(Action::STOP);
                }
                // Super Thrust : F,F+P
                dash_punch(out, facing);
            }
            HarId::Electra => {
                debug!("electra charge: rolling thunder");
                if range >= Range::Mid && self.smart_usually() {
                    // Super Rolling Thunder : B,D,F,F+P
                    out.push(facing.backward());
                    out.push(Action::DOWN);
                }
                // Rolling Thunder : F,F+P
                dash_punch(out, facing);
            }
            HarId::Chronos => {
                if range == Range::Far
                    || (self.smart_usually() && self.roll_pref(self.pilot.ap_special))
                {
                    debug!("chronos charge: teleport");
                    // Teleportation : D,P
                    out.push(Action::DOWN);
                    out.push(Action::STOP);
                    out.push(Action::PUNCH);
                } else {
                    debug!("chronos charge: trip-slide");
                    trip_slide(out, facing);
                }
            }
            HarId::Shredder => {
                if range == Range::Far
                    || (self.smart_usually() && self.roll_pref(self.pilot.ap_jump))
                {
                    debug!("shredder charge: flip-kick");
                    // Flip Kick : D,D+K
                    out.push(Action::DOWN);
                    out.push(Action::STOP);
                    out.push(Action::DOWN);
                    out.push(Action::DOWN | Action::KICK);
                    out.push(Action::KICK);
                } else {
                    debug!("shredder charge: head-butt");
                    if range >= Range::Mid && self.smart_usually() {
                        // Shadow Head-Butt : B,D,F+P
                        shadow_prefix(out, facing);
                    }
                    // Head-Butt : D,F+P
                    quarter_circle_punch(out, facing);
                }
            }
            HarId::Gargoyle => {
                if range == Range::Far
                    || (self.smart_usually() && self.roll_pref(self.pilot.ap_jump))
                {
                    debug!("gargoyle charge: wing-charge");
                    // Wing Charge : F,F+P
                    double_forward_punch(out, facing);
                } else {
                    debug!("gargoyle charge: talon");
                    if range == Range::Mid && self.smart_usually() {
                        // Shadow Talon : B,D,F+P
                        shadow_prefix(out, facing);
                    }
                    // Flying Talon : D,F+P
                    quarter_circle_punch(out, facing);
                }
            }
            // no charging special on this chassis
            HarId::Nova => {}
        }

        true
    }

    /// Keyboard sequence for the chassis' push-back special.
    pub(crate) fn attempt_push_attack(
        &mut self,
        view: &FighterView<'_>,
        out: &mut Vec<Action>,
    ) -> bool {
        if !Self::ground_for_special(view, out) {
            return false;
        }

        let range = view.enemy_range();
        let facing = view.me.facing;

        match view.me.har {
            HarId::Jaguar => {
                debug!("jaguar push: high kick");
                // High Kick : B+K
                out.push(facing.backward());
                out.push(facing.backward() | Action::KICK);
                out.push(Action::KICK);
            }
            HarId::Katana => {
                debug!("katana push: rising blade");
                if range > Range::Cramped && self.smart_usually() {
                    // Triple Blade : B,D,F+P
                    shadow_prefix(out, facing);
                }
                // Rising Blade : D,F+P
                quarter_circle_punch(out, facing);
            }
            HarId::Flail => {
                if self.roll_chance(3) {
                    debug!("flail push: slow swing chains");
                    // Slow Swing Chains : D,K
                    out.push(Action::DOWN);
                    out.push(Action::STOP);
                    out.push(Action::KICK);
                } else {
                    debug!("flail push: swinging chains");
                    // Swinging Chains : D,P
                    out.push(Action::DOWN);
                    out.push(Action::STOP);
                    out.push(Action::PUNCH);
                }
            }
            HarId::Thorn => {
                debug!("thorn push: speed kick");
                if range > Range::Cramped && self.smart_usually() {
                    // Shadow Kick : B,D,F+K
                    shadow_prefix(out, facing);
                }
                // Speed Kick : D,F+K
                quarter_circle_kick(out, facing);
            }
            HarId::Pyros => {
                debug!("pyros push: fire spin");
                // Fire Spin : D+P
                out.push(Action::DOWN);
                out.push(Action::STOP);
                out.push(Action::PUNCH);
            }
            HarId::Electra => {
                debug!("electra push: electric shards");
                // Electric Shards : D,F+P
                quarter_circle_punch(out, facing);
            }
            HarId::Nova => {
                debug!("nova push: earthquake slam");
                // Earthquake Slam : D,D,P
                out.push(Action::DOWN);
                out.push(Action::STOP);
                out.push(Action::DOWN);
                out.push(Action::PUNCH);
            }
            // no push special on this chassis
            HarId::Shadow | HarId::Shredder | HarId::Chronos | HarId::Gargoyle => {}
        }

        true
    }

    /// The universal standing trip, shared by every chassis.
    pub(crate) fn attempt_trip_attack(
        &mut self,
        view: &FighterView<'_>,
        out: &mut Vec<Action>,
    ) -> bool {
        if !Self::ground_for_special(view, out) {
            return false;
        }

        let facing = view.me.facing;
        debug!("standard trip");
        // Standard Trip : D,B+K
        out.push(Action::DOWN);
        out.push(Action::DOWN | facing.backward());
        out.push(facing.backward() | Action::KICK);
        out.push(Action::KICK);

        true
    }

    /// Keyboard sequence for the chassis' projectile.
    pub(crate) fn attempt_projectile_attack(
        &mut self,
        view: &FighterView<'_>,
        out: &mut Vec<Action>,
    ) -> bool {
        if matches!(
            view.me.state,
            FighterState::WalkTo | FighterState::WalkFrom | FighterState::CrouchBlock
        ) {
            out.push(Action::STOP);
        }

        let facing = view.me.facing;

        match view.me.har {
            // Concussion Cannon / Ball Lightning / Flying Hands : D,B+P
            HarId::Jaguar | HarId::Electra | HarId::Shredder => {
                out.push(Action::DOWN);
                out.push(Action::DOWN | facing.backward());
                out.push(facing.backward());
                out.push(facing.backward() | Action::PUNCH);
                out.push(Action::PUNCH);
            }
            HarId::Shadow => {
                out.push(Action::DOWN);
                out.push(Action::DOWN | facing.backward());
                out.push(facing.backward());
                if self.roll_chance(2) {
                    // Shadow Punch : D,B+P
                    out.push(facing.backward() | Action::PUNCH);
                    out.push(Action::PUNCH);
                } else {
                    // Shadow Kick : D,B+K
                    out.push(facing.backward() | Action::KICK);
                    out.push(Action::KICK);
                }
            }
            HarId::Chronos => {
                // Stasis : D,B,P
                out.push(Action::DOWN);
                out.push(Action::DOWN | facing.backward());
                out.push(facing.backward());
                out.push(Action::PUNCH);
            }
            HarId::Nova => {
                out.push(Action::DOWN);
                if self.roll_chance(3) {
                    // Mini-Grenade : D,B,P
                    out.push(Action::DOWN | facing.backward());
                    out.push(facing.backward());
                } else {
                    // Missile : D,F,P
                    out.push(Action::DOWN | facing.forward());
                    out.push(facing.forward());
                }
                out.push(Action::PUNCH);
            }
            // no projectile on this chassis
            HarId::Katana | HarId::Flail | HarId::Thorn | HarId::Pyros | HarId::Gargoyle => {}
        }

        true
    }
}

use serde::{Deserialize, Serialize};

/// The eleven tournament pilots; the id seeds the personality vector, since
/// the original save files do not carry these values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PilotId {
    Crystal,
    Stefan,
    Milano,
    Christian,
    Shirro,
    JeanPaul,
    Ibrahim,
    Angel,
    Cosette,
    Raven,
    Kreissack,
}

impl PilotId {
    pub const ALL: [PilotId; 11] = [
        PilotId::Crystal,
        PilotId::Stefan,
        PilotId::Milano,
        PilotId::Christian,
        PilotId::Shirro,
        PilotId::JeanPaul,
        PilotId::Ibrahim,
        PilotId::Angel,
        PilotId::Cosette,
        PilotId::Raven,
        PilotId::Kreissack,
    ];

    pub fn from_index(index: usize) -> Option<PilotId> {
        Self::ALL.get(index).copied()
    }
}

/// A pilot's personality vector: attitude flags plus movement and attack
/// preferences in [-400, 400]. The decision engine reads it every tick and
/// reshapes it mid-match when the opponent keeps landing throws or shots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pilot {
    pub att_normal: bool,
    pub att_hyper: bool,
    pub att_jump: bool,
    pub att_def: bool,
    pub att_sniper: bool,

    /// Preference for throw moves.
    pub ap_throw: i16,
    /// Preference for special moves.
    pub ap_special: i16,
    /// Preference for jumping moves.
    pub ap_jump: i16,
    /// Preference for high moves.
    pub ap_high: i16,
    /// Preference for low moves.
    pub ap_low: i16,
    /// Preference for middle moves.
    pub ap_middle: i16,

    /// Preference for jumping movement.
    pub pref_jump: i16,
    /// Preference for walking forward.
    pub pref_fwd: i16,
    /// Preference for walking backward.
    pub pref_back: i16,
}

impl Pilot {
    /// Overlay the personality profile for `pilot_id` onto this vector.
    pub fn seed_personality(&mut self, pilot_id: PilotId) {
        match pilot_id {
            PilotId::Crystal => {
                // determined and independent
                self.pref_fwd = 150;
                self.att_hyper = true;
                self.ap_throw = 150;
                self.ap_special = 50;
            }
            PilotId::Stefan => {
                // young and skillful
                self.att_normal = true;
                self.pref_fwd = 50;
                self.ap_special = 200;
                self.ap_jump = 100;
            }
            PilotId::Milano => {
                // fast kickboxer
                self.att_jump = true;
                self.pref_fwd = 100;
                self.ap_special = -150;
                self.ap_jump = 300;
                self.pref_jump = 100;
            }
            PilotId::Christian => {
                // aggressive
                self.att_hyper = true;
                self.pref_fwd = 250;
                self.ap_special = 150;
            }
            PilotId::Shirro => {
                // slow but powerful
                self.att_normal = true;
                self.ap_jump = -100;
                self.pref_jump = -100;
                self.ap_throw = 300;
                self.ap_special = -50;
            }
            PilotId::JeanPaul => {
                // well rounded and calculating
                self.att_sniper = true;
                self.pref_back = 50;
                self.ap_low = 100;
                self.ap_jump = 100;
                self.ap_special = 200;
            }
            PilotId::Ibrahim => {
                // patience
                self.att_def = true;
                self.pref_back = 100;
                self.ap_special = 100;
                self.ap_throw = 100;
            }
            PilotId::Angel => {
                // mysterious
                self.att_sniper = true;
                self.pref_jump = 50;
                self.pref_fwd = 150;
                self.ap_special = 300;
            }
            PilotId::Cosette => {
                // defensive, cautious
                self.att_def = true;
                self.ap_low = 100;
                self.ap_special = -50;
                self.pref_jump = -100;
                self.ap_jump = -50;
            }
            PilotId::Raven => {
                self.att_hyper = true;
                self.pref_jump = 200;
                self.ap_jump = 400;
                self.ap_special = 300;
            }
            PilotId::Kreissack => {
                self.att_normal = true;
                self.ap_throw = 100;
                self.ap_special = 350;
            }
        }
    }

    /// Fresh vector seeded for `pilot_id`.
    pub fn seeded(pilot_id: PilotId) -> Pilot {
        let mut pilot = Pilot::default();
        pilot.seed_personality(pilot_id);
        pilot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pilot_is_neutral() {
        let p = Pilot::default();
        assert!(!p.att_hyper && !p.att_def && !p.att_sniper && !p.att_jump);
        assert_eq!(p.ap_special, 0);
        assert_eq!(p.pref_fwd, 0);
    }

    #[test]
    fn test_pilot_id_from_index() {
        assert_eq!(PilotId::from_index(0), Some(PilotId::Crystal));
        assert_eq!(PilotId::from_index(10), Some(PilotId::Kreissack));
        assert_eq!(PilotId::from_index(11), None);
    }

    #[test]
    fn test_crystal_profile() {
        let p = Pilot::seeded(PilotId::Crystal);
        assert!(p.att_hyper);
        assert_eq!(p.pref_fwd, 150);
        assert_eq!(p.ap_throw, 150);
        assert_eq!(p.ap_special, 50);
    }

    #[test]
    fn test_milano_likes_jumping() {
        let p = Pilot::seeded(PilotId::Milano);
        assert!(p.att_jump);
        assert_eq!(p.ap_jump, 300);
        assert_eq!(p.pref_jump, 100);
        assert_eq!(p.ap_special, -150);
    }

    #[test]
    fn test_ibrahim_and_cosette_are_defensive() {
        assert!(Pilot::seeded(PilotId::Ibrahim).att_def);
        assert!(Pilot::seeded(PilotId::Cosette).att_def);
    }

    #[test]
    fn test_raven_maxes_jump_attack_preference() {
        let p = Pilot::seeded(PilotId::Raven);
        assert!(p.att_hyper);
        assert_eq!(p.ap_jump, 400);
        assert_eq!(p.pref_jump, 200);
    }

    #[test]
    fn test_every_pilot_sets_exactly_one_attitude_flag() {
        for id in PilotId::ALL {
            let p = Pilot::seeded(id);
            let flags = [p.att_normal, p.att_hyper, p.att_jump, p.att_def, p.att_sniper];
            assert_eq!(
                flags.iter().filter(|&&f| f).count(),
                1,
                "pilot {id:?} should carry one attitude flag"
            );
        }
    }

    #[test]
    fn test_seeding_preserves_unrelated_fields() {
        let mut p = Pilot {
            ap_middle: 75,
            ..Pilot::default()
        };
        p.seed_personality(PilotId::Stefan);
        assert_eq!(p.ap_middle, 75);
        assert_eq!(p.ap_special, 200);
    }

    #[test]
    fn test_pilot_serialization_round_trip() {
        let p = Pilot::seeded(PilotId::Angel);
        let json = serde_json::to_string(&p).unwrap();
        let back: Pilot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}

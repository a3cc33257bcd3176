//! Skill gates: every stochastic decision in the engine funnels through these
//! few rolls, parameterised by the 1..=6 difficulty level.
//!
//! The smart/dumb pairs are deliberately asymmetric. The easiest AI is not a
//! noisier hard AI; it is actively coerced into bad choices, while the hardest
//! AI stays strongly biased rather than deterministic.

use rand::Rng;

/// Fair '1 in x' roll. `roll_x <= 1` always passes.
pub fn roll_chance(rng: &mut impl Rng, roll_x: i32) -> bool {
    roll_x <= 1 || rng.random_range(0..roll_x) == 1
}

/// Roll against a pilot preference value in [-400, 400]; -400 almost never
/// passes, 400 almost always does.
pub fn roll_pref(rng: &mut impl Rng, pref_val: i16) -> bool {
    rng.random_range(0..800) <= i32::from(pref_val) + 400
}

/// Whether the AI is smart enough to usually go ahead with an action.
pub fn smart_usually(rng: &mut impl Rng, difficulty: i32) -> bool {
    if difficulty == 6 {
        // at highest difficulty 92% chance to be smart
        !roll_chance(rng, 12)
    } else if difficulty >= 3 {
        roll_chance(rng, 7 - difficulty)
    } else {
        false
    }
}

/// Whether the AI is dumb enough to usually go ahead with an action.
pub fn dumb_usually(rng: &mut impl Rng, difficulty: i32) -> bool {
    if difficulty == 1 {
        // at lowest difficulty 92% chance to be dumb
        !roll_chance(rng, 12)
    } else if difficulty <= 2 {
        roll_chance(rng, difficulty + 1)
    } else {
        false
    }
}

/// Whether the AI is smart enough to sometimes go ahead with an action.
pub fn smart_sometimes(rng: &mut impl Rng, difficulty: i32) -> bool {
    if difficulty >= 2 {
        roll_chance(rng, 10 - difficulty)
    } else {
        false
    }
}

/// Whether the AI is dumb enough to sometimes go ahead with an action.
pub fn dumb_sometimes(rng: &mut impl Rng, difficulty: i32) -> bool {
    if difficulty <= 2 {
        roll_chance(rng, difficulty + 2)
    } else {
        false
    }
}

/// Quadratically scaling roll; passes rarely at difficulty 1 and always at
/// difficulty 6.
pub fn diff_scale(rng: &mut impl Rng, difficulty: i32) -> bool {
    rng.random_range(0..36) <= difficulty * difficulty
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x0217)
    }

    fn hits(mut gate: impl FnMut(&mut StdRng) -> bool, draws: u32) -> u32 {
        let mut rng = rng();
        (0..draws).filter(|_| gate(&mut rng)).count() as u32
    }

    #[test]
    fn test_roll_chance_one_always_passes() {
        let mut rng = rng();
        for _ in 0..100 {
            assert!(roll_chance(&mut rng, 1));
            assert!(roll_chance(&mut rng, 0));
        }
    }

    #[test]
    fn test_roll_chance_two_is_roughly_fair() {
        let n = hits(|r| roll_chance(r, 2), 10_000);
        assert!((4_000..6_000).contains(&n), "got {n}");
    }

    #[test]
    fn test_roll_pref_extremes() {
        // -400 passes only on the single draw of 0; 400 can only fail when
        // the draw lands outside [0, 800), which it never does.
        let low = hits(|r| roll_pref(r, -400), 10_000);
        let high = hits(|r| roll_pref(r, 400), 10_000);
        assert!(low < 100, "got {low}");
        assert_eq!(high, 10_000);
    }

    #[test]
    fn test_smart_gates_closed_at_low_difficulty() {
        let mut rng = rng();
        for _ in 0..200 {
            assert!(!smart_usually(&mut rng, 1));
            assert!(!smart_usually(&mut rng, 2));
            assert!(!smart_sometimes(&mut rng, 1));
        }
    }

    #[test]
    fn test_dumb_gates_closed_at_high_difficulty() {
        let mut rng = rng();
        for d in 3..=6 {
            for _ in 0..200 {
                assert!(!dumb_usually(&mut rng, d));
                assert!(!dumb_sometimes(&mut rng, d));
            }
        }
    }

    #[test]
    fn test_smart_usually_is_near_certain_at_top_difficulty() {
        let n = hits(|r| smart_usually(r, 6), 10_000);
        assert!(n > 8_800, "got {n}");
    }

    #[test]
    fn test_dumb_usually_is_near_certain_at_bottom_difficulty() {
        let n = hits(|r| dumb_usually(r, 1), 10_000);
        assert!(n > 8_800, "got {n}");
    }

    #[test]
    fn test_diff_scale_always_passes_at_top_difficulty() {
        let mut rng = rng();
        for _ in 0..500 {
            assert!(diff_scale(&mut rng, 6));
        }
    }

    #[test]
    fn test_diff_scale_rarely_passes_at_bottom_difficulty() {
        let n = hits(|r| diff_scale(r, 1), 10_000);
        // draw in 0..36 must land on 0 or 1
        assert!(n < 1_200, "got {n}");
    }

    #[test]
    fn test_smart_usually_scales_with_difficulty() {
        let d3 = hits(|r| smart_usually(r, 3), 10_000);
        let d5 = hits(|r| smart_usually(r, 5), 10_000);
        assert!(d5 > d3, "d5={d5} d3={d3}");
    }
}

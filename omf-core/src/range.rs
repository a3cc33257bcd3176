use serde::{Deserialize, Serialize};

/// Coarse classification of the horizontal gap between the two fighters.
/// One range unit is 50 world pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Range {
    /// Within grab distance; throws are live.
    Cramped,
    Close,
    Mid,
    Far,
}

impl Range {
    pub const UNIT: f32 = 50.0;

    pub fn classify(gap: f32) -> Range {
        match (gap.abs() / Self::UNIT) as i32 {
            0 | 1 => Range::Cramped,
            2 => Range::Close,
            3 | 4 => Range::Mid,
            _ => Range::Far,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_cramped() {
        assert_eq!(Range::classify(0.0), Range::Cramped);
        assert_eq!(Range::classify(49.0), Range::Cramped);
        assert_eq!(Range::classify(99.0), Range::Cramped);
    }

    #[test]
    fn test_classify_close() {
        assert_eq!(Range::classify(100.0), Range::Close);
        assert_eq!(Range::classify(149.0), Range::Close);
    }

    #[test]
    fn test_classify_mid() {
        assert_eq!(Range::classify(150.0), Range::Mid);
        assert_eq!(Range::classify(249.0), Range::Mid);
    }

    #[test]
    fn test_classify_far() {
        assert_eq!(Range::classify(250.0), Range::Far);
        assert_eq!(Range::classify(1000.0), Range::Far);
    }

    #[test]
    fn test_classify_is_symmetric_in_sign() {
        assert_eq!(Range::classify(-120.0), Range::classify(120.0));
    }

    #[test]
    fn test_range_ordering() {
        assert!(Range::Cramped < Range::Close);
        assert!(Range::Close < Range::Mid);
        assert!(Range::Mid < Range::Far);
        assert!(Range::Close <= Range::Mid);
    }
}

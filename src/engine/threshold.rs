//! Clicks required to leave a level.
//!
//! The curve is piecewise: linear steps of 10 through level 4, steps of 20
//! through level 9, +20% per level through 19 and +50% per level after that.

/// Click total at which `level` advances to `level + 1`.
///
/// `level` must be >= 1.
pub fn next_level_threshold(level: u32) -> f64 {
    if level < 5 {
        (level * 10) as f64
    } else if level < 10 {
        (50 + (level - 5) * 20) as f64
    } else if level < 20 {
        150.0 * 1.2_f64.powi((level - 10) as i32)
    } else {
        450.0 * 1.5_f64.powi((level - 20) as i32)
    }
}

/// Clicks still missing before the next level, never negative.
pub fn clicks_to_next_level(clicks: u64, level: u32) -> u64 {
    let threshold = next_level_threshold(level);
    (threshold as u64).saturating_sub(clicks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_tiers() {
        assert_eq!(next_level_threshold(1), 10.0);
        assert_eq!(next_level_threshold(4), 40.0);
        assert_eq!(next_level_threshold(5), 50.0);
        assert_eq!(next_level_threshold(9), 130.0);
    }

    #[test]
    fn exponential_tiers() {
        assert_eq!(next_level_threshold(10), 150.0);
        assert!((next_level_threshold(11) - 180.0).abs() < 1e-9);
        assert!((next_level_threshold(19) - 150.0 * 1.2_f64.powi(9)).abs() < 1e-9);
        assert_eq!(next_level_threshold(20), 450.0);
        assert!((next_level_threshold(21) - 675.0).abs() < 1e-9);
    }

    #[test]
    fn late_tier_restarts_below_level_19() {
        assert!(next_level_threshold(20) < next_level_threshold(19));
    }

    #[test]
    fn remaining_clicks() {
        assert_eq!(clicks_to_next_level(0, 1), 10);
        assert_eq!(clicks_to_next_level(7, 1), 3);
        assert_eq!(clicks_to_next_level(15, 1), 0);
        assert_eq!(clicks_to_next_level(100, 10), 50);
        assert_eq!(clicks_to_next_level(500, 21), 175);
    }
}

use super::super::domain::{Classification, RiskLevel};

const BASELINE_SCORE: i32 = 100;
const NORMAL_FLOOR: u8 = 70;
const OSTEOPENIA_FLOOR: u8 = 40;

/// Final score from the raw sum of deltas, clamped to 0..=100.
pub(crate) fn clamp_score(total_delta: i32) -> u8 {
    BASELINE_SCORE.saturating_add(total_delta).clamp(0, 100) as u8
}

impl Classification {
    /// Bands are exclusive on their lower bound: 70 is osteopenia, 40 is osteoporosis.
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s > NORMAL_FLOOR => Classification::Normal,
            s if s > OSTEOPENIA_FLOOR => Classification::Osteopenia,
            _ => Classification::Osteoporosis,
        }
    }
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        match Classification::from_score(score) {
            Classification::Normal => RiskLevel::Low,
            Classification::Osteopenia => RiskLevel::Moderate,
            Classification::Osteoporosis => RiskLevel::High,
        }
    }
}

/// Simulated bone density T-score, rounded to one decimal.
pub fn t_score(score: u8) -> f64 {
    let score = f64::from(score);
    let normal = f64::from(NORMAL_FLOOR);
    let osteopenia = f64::from(OSTEOPENIA_FLOOR);

    let raw = if score > normal {
        -0.5 + (score - normal) * 0.05
    } else if score > osteopenia {
        -1.0 - (normal - score) * 0.05
    } else {
        -2.5 - (osteopenia - score) * 0.05
    };
    round_to_tenth(raw)
}

pub(crate) fn bone_age_estimate(age: Option<i32>, score: u8) -> Option<i32> {
    let age = f64::from(age?);
    Some(round_half_up(age + f64::from(100 - score) / 10.0) as i32)
}

pub(crate) fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// Halves round towards positive infinity, so -4.5 becomes -4.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_score_saturates_at_both_ends() {
        assert_eq!(clamp_score(-147), 0);
        assert_eq!(clamp_score(9), 100);
        assert_eq!(clamp_score(-38), 62);
        assert_eq!(clamp_score(i32::MIN), 0);
    }

    #[test]
    fn band_boundaries_are_exclusive_on_the_lower_band() {
        assert_eq!(Classification::from_score(71), Classification::Normal);
        assert_eq!(Classification::from_score(70), Classification::Osteopenia);
        assert_eq!(Classification::from_score(41), Classification::Osteopenia);
        assert_eq!(Classification::from_score(40), Classification::Osteoporosis);
        assert_eq!(RiskLevel::from_score(71), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(41), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(40), RiskLevel::High);
    }

    #[test]
    fn every_score_maps_to_exactly_one_band() {
        for score in 0..=100u8 {
            let expected = if score > 70 {
                RiskLevel::Low
            } else if score > 40 {
                RiskLevel::Moderate
            } else {
                RiskLevel::High
            };
            assert_eq!(RiskLevel::from_score(score), expected, "score {score}");
        }
    }

    #[test]
    fn t_score_follows_band_formulas() {
        assert!((t_score(100) - 1.0).abs() < 1e-9);
        assert!((t_score(80) - 0.0).abs() < 1e-9);
        assert!((t_score(60) - -1.5).abs() < 1e-9);
        assert!((t_score(40) - -2.5).abs() < 1e-9);
        assert!((t_score(20) - -3.5).abs() < 1e-9);
        assert!((t_score(0) - -4.5).abs() < 1e-9);
    }

    #[test]
    fn t_score_never_rises_as_score_falls() {
        let mut previous = t_score(100);
        for score in (0..100u8).rev() {
            let current = t_score(score);
            assert!(current <= previous + 1e-9, "score {score}");
            previous = current;
        }
    }

    #[test]
    fn bone_age_adds_a_year_per_ten_lost_points() {
        assert_eq!(bone_age_estimate(Some(75), 0), Some(85));
        assert_eq!(bone_age_estimate(Some(30), 100), Some(30));
        assert_eq!(bone_age_estimate(Some(52), 85), Some(54));
        assert_eq!(bone_age_estimate(None, 50), None);
    }

    #[test]
    fn rounding_matches_half_up_semantics() {
        assert!((round_to_tenth(19.53125) - 19.5).abs() < 1e-9);
        assert!((round_to_tenth(22.857) - 22.9).abs() < 1e-9);
        assert!((round_half_up(-4.5) - -4.0).abs() < 1e-9);
    }
}

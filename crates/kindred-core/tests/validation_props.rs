use kindred_core::model::{MOOD_SCORE_MAX, MOOD_SCORE_MIN};
use kindred_core::rules::validate_mood_score;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_scores_in_range_are_accepted(score in MOOD_SCORE_MIN..=MOOD_SCORE_MAX) {
        prop_assert!(validate_mood_score(score).is_ok());
    }

    #[test]
    fn prop_scores_below_range_are_rejected(score in i64::MIN..MOOD_SCORE_MIN) {
        prop_assert!(validate_mood_score(score).is_err());
    }

    #[test]
    fn prop_scores_above_range_are_rejected(score in (MOOD_SCORE_MAX + 1)..=i64::MAX) {
        prop_assert!(validate_mood_score(score).is_err());
    }
}

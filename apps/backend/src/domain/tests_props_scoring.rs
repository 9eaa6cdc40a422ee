//! Property tests for the points_v1 policy (pure domain, no DB).

use proptest::prelude::*;

use crate::domain::scoring::{PointsV1, ScoringPolicy, SetScore};
use crate::domain::standing::{Standing, StandingDelta};
use crate::domain::test_prelude;

fn arb_set() -> impl Strategy<Value = (i16, i16)> {
    (0i16..=7, 0i16..=7)
}

fn arb_sets(max: usize) -> impl Strategy<Value = Vec<SetScore>> {
    prop::collection::vec(arb_set(), 0..=max).prop_map(|games| {
        games
            .into_iter()
            .enumerate()
            .map(|(i, (w, l))| SetScore::new(i as i16 + 1, w, l))
            .collect()
    })
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// The loser always receives the fixed base award.
    #[test]
    fn prop_loser_award_is_fixed(sets in arb_sets(5), streak in 0i32..10) {
        prop_assert_eq!(PointsV1.score(&sets, streak).loser_points, 12);
    }

    /// Straight sets iff exactly two sets, both won on games by the winner.
    #[test]
    fn prop_straight_sets_iff_two_won_sets(sets in arb_sets(4), streak in 0i32..10) {
        let expected = sets.len() == 2 && sets.iter().all(|s| s.winner_games > s.loser_games);
        prop_assert_eq!(PointsV1.score(&sets, streak).straight_sets, expected);
    }

    /// Streak bonus iff the pre-match streak is exactly two.
    #[test]
    fn prop_streak_bonus_iff_streak_two(sets in arb_sets(3), streak in 0i32..10) {
        prop_assert_eq!(PointsV1.score(&sets, streak).win_streak_bonus, streak == 2);
    }

    /// Winner total decomposes into base plus the three independent bonuses.
    #[test]
    fn prop_winner_total_is_sum_of_bonuses(sets in arb_sets(5), streak in 0i32..10) {
        let award = PointsV1.score(&sets, streak);
        let bagels = sets
            .iter()
            .filter(|s| s.winner_games == 6 && s.loser_games == 0)
            .count() as i32;

        prop_assert_eq!(award.bagel_sets_won_by_winner, bagels);
        let expected = 50
            + if award.straight_sets { 5 } else { 0 }
            + if award.win_streak_bonus { 3 } else { 0 }
            + 3 * bagels;
        prop_assert_eq!(award.winner_points, expected);
    }

    /// Set order does not change the award.
    #[test]
    fn prop_award_ignores_set_order(sets in arb_sets(5), streak in 0i32..10) {
        let mut reversed = sets.clone();
        reversed.reverse();
        prop_assert_eq!(PointsV1.score(&sets, streak), PointsV1.score(&reversed, streak));
    }

    /// A win raises the streak by one; a loss zeroes it.
    #[test]
    fn prop_streak_transitions(points in 0i32..1000, streak in 0i32..20, sets in arb_sets(3)) {
        let date = time::OffsetDateTime::UNIX_EPOCH;
        let award = PointsV1.score(&sets, streak);
        let before = Standing { points, win_streak: streak, last_match_at: None };

        let won = before.apply(&StandingDelta::for_winner(&award, date));
        prop_assert_eq!(won.win_streak, streak + 1);
        prop_assert_eq!(won.points, points + award.winner_points);

        let lost = before.apply(&StandingDelta::for_loser(&award, date));
        prop_assert_eq!(lost.win_streak, 0);
        prop_assert_eq!(lost.points, points + 12);
    }
}

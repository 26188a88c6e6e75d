use itertools::Itertools;

use crate::models::Point;

/// Drops every point that equals the one right before it. Repeats further apart are kept.
pub fn remove_consecutive_duplicates(points: Vec<Point>) -> Vec<Point> {
    points.into_iter().dedup().collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn points(raw: &[(i32, i32)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn removes_consecutive_duplicates() {
        let result = remove_consecutive_duplicates(points(&[(1, 1), (1, 1), (2, 2)]));
        assert_eq!(result, points(&[(1, 1), (2, 2)]));
    }

    #[test]
    fn keeps_non_consecutive_duplicates() {
        let input = points(&[(1, 1), (2, 2), (1, 1)]);
        assert_eq!(remove_consecutive_duplicates(input.clone()), input);
    }

    #[test]
    fn empty_stays_empty() {
        assert!(remove_consecutive_duplicates(Vec::new()).is_empty());
    }

    #[test]
    fn all_duplicates_collapse_to_one() {
        let result = remove_consecutive_duplicates(points(&[(5, 5), (5, 5), (5, 5)]));
        assert_eq!(result, points(&[(5, 5)]));
    }

    #[test]
    fn no_duplicates_returns_same_points() {
        let input = points(&[(1, 2), (3, 4), (5, 6)]);
        assert_eq!(remove_consecutive_duplicates(input.clone()), input);
    }

    #[test]
    fn equal_in_one_coordinate_is_not_a_duplicate() {
        let input = points(&[(1, 2), (1, 3), (2, 3)]);
        assert_eq!(remove_consecutive_duplicates(input.clone()), input);
    }

    fn arb_points() -> impl Strategy<Value = Vec<Point>> {
        // Small coordinate range so runs of equal points actually show up.
        prop::collection::vec((0i32..3, 0i32..3).prop_map(Point::from), 0..40)
    }

    proptest! {
        #[test]
        fn never_leaves_adjacent_equal_points(input in arb_points()) {
            let result = remove_consecutive_duplicates(input);
            for pair in result.windows(2) {
                prop_assert_ne!(pair[0], pair[1]);
            }
        }

        #[test]
        fn is_idempotent(input in arb_points()) {
            let once = remove_consecutive_duplicates(input);
            let twice = remove_consecutive_duplicates(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn keeps_first_point(input in arb_points()) {
            let result = remove_consecutive_duplicates(input.clone());
            prop_assert_eq!(result.first(), input.first());
        }
    }
}

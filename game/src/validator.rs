//! Chronological placement checks.
//!
//! Both functions are pure: they only look at the years already on the timeline, so they
//! can be tested without any deck, session or rendering.

/// Which neighbour a candidate year would be out of order with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// The card to the left is later than the candidate.
    Before { neighbour: i32 },
    /// The card to the right is earlier than the candidate.
    After { neighbour: i32 },
    /// `insert_index` is past the end of the timeline.
    OutOfRange { len: usize },
}

/// Returns the first ordering violation of inserting `candidate` at `insert_index`.
///
/// Equal years are never a conflict, on either side.
pub fn conflict(timeline: &[i32], insert_index: usize, candidate: i32) -> Option<Conflict> {
    if insert_index > timeline.len() {
        return Some(Conflict::OutOfRange {
            len: timeline.len(),
        });
    }
    if let Some(&before) = insert_index.checked_sub(1).and_then(|i| timeline.get(i)) {
        if before > candidate {
            return Some(Conflict::Before { neighbour: before });
        }
    }
    if let Some(&after) = timeline.get(insert_index) {
        if candidate > after {
            return Some(Conflict::After { neighbour: after });
        }
    }
    None
}

/// Accepts iff `timeline[i-1] <= candidate <= timeline[i]` for the neighbours that exist.
pub fn validate(timeline: &[i32], insert_index: usize, candidate: i32) -> bool {
    conflict(timeline, insert_index, candidate).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(timeline: &[i32], i: usize, d: i32) -> bool {
        (i == 0 || timeline[i - 1] <= d) && (i == timeline.len() || d <= timeline[i])
    }

    fn sorted_timelines(max_len: usize, years: &[i32]) -> Vec<Vec<i32>> {
        let mut out = vec![Vec::new()];
        let mut frontier = vec![Vec::<i32>::new()];
        for _ in 0..max_len {
            let mut next = Vec::new();
            for t in &frontier {
                for &y in years {
                    if t.last().is_none_or(|&last| last <= y) {
                        let mut grown = t.clone();
                        grown.push(y);
                        next.push(grown);
                    }
                }
            }
            out.extend(next.iter().cloned());
            frontier = next;
        }
        out
    }

    #[test]
    fn empty_timeline_accepts_anything_at_zero() {
        for d in [-500, 0, 1492, 3000] {
            assert!(validate(&[], 0, d));
        }
        assert!(!validate(&[], 1, 0));
    }

    #[test]
    fn single_card_uses_head_and_tail_rules() {
        let t = [1492];
        assert!(validate(&t, 0, 476));
        assert!(!validate(&t, 0, 1789));
        assert!(validate(&t, 1, 1789));
        assert!(!validate(&t, 1, 476));
    }

    #[test]
    fn ties_are_accepted_on_both_sides() {
        let t = [0, 1969, 1969, 2007];
        for i in 1..=3 {
            assert!(validate(&t, i, 1969), "tie should be valid at {i}");
        }
        assert!(validate(&t, 0, 0));
        assert!(validate(&t, 4, 2007));
    }

    #[test]
    fn conflict_names_the_violated_neighbour() {
        let t = [0, 1969];
        assert_eq!(conflict(&t, 0, 1492), Some(Conflict::After { neighbour: 0 }));
        assert_eq!(conflict(&t, 2, 1492), Some(Conflict::Before { neighbour: 1969 }));
        assert_eq!(conflict(&t, 1, 1492), None);
        assert_eq!(conflict(&t, 3, 1492), Some(Conflict::OutOfRange { len: 2 }));
    }

    #[test]
    fn matches_neighbour_rule_on_every_small_timeline() {
        let years = [-10, 0, 5, 5, 100];
        for timeline in sorted_timelines(4, &years) {
            for i in 0..=timeline.len() {
                for d in [-20, -10, 0, 3, 5, 50, 100, 200] {
                    assert_eq!(
                        validate(&timeline, i, d),
                        reference(&timeline, i, d),
                        "timeline {timeline:?} index {i} year {d}"
                    );
                }
            }
        }
    }

    #[test]
    fn an_accepted_insert_keeps_the_timeline_sorted() {
        for timeline in sorted_timelines(3, &[1, 2, 3]) {
            for i in 0..=timeline.len() {
                for d in 0..=4 {
                    if validate(&timeline, i, d) {
                        let mut t = timeline.clone();
                        t.insert(i, d);
                        assert!(t.windows(2).all(|w| w[0] <= w[1]), "{t:?}");
                    }
                }
            }
        }
    }
}

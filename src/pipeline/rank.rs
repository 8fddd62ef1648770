// src/pipeline/rank.rs

//! Presentation ranking by model win probability.

use std::cmp::Ordering;

use crate::models::Dog;

/// Order runners by win probability, highest first.
///
/// Returns a new sequence and leaves `dogs` untouched. The sort is stable:
/// runners with equal probability keep their input order, which for a
/// normalized race card is trap order. Probabilities are used as-is, and
/// `-0.0` ties with `0.0`.
pub fn rank(dogs: &[Dog]) -> Vec<Dog> {
    let mut ranked = dogs.to_vec();
    ranked.sort_by(|a, b| {
        b.model
            .win_probability
            .partial_cmp(&a.model.win_probability)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::models::ModelOutput;

    fn dog(trap: u32, win_probability: f64) -> Dog {
        Dog {
            id: format!("d{trap}"),
            name: format!("Dog {trap}"),
            trap,
            form_summary: String::new(),
            recent_form: Vec::new(),
            model: ModelOutput {
                win_probability,
                avg_time: None,
            },
        }
    }

    fn traps(dogs: &[Dog]) -> Vec<u32> {
        dogs.iter().map(|d| d.trap).collect()
    }

    #[test]
    fn test_orders_by_probability_descending() {
        let card = vec![dog(1, 12.0), dog(2, 40.5), dog(3, 0.0), dog(4, 22.1)];
        assert_eq!(traps(&rank(&card)), [2, 4, 1, 3]);
        // Input keeps trap order.
        assert_eq!(traps(&card), [1, 2, 3, 4]);
    }

    #[test]
    fn test_ties_resolve_by_input_order() {
        let card = vec![dog(1, 20.0), dog(2, 30.0), dog(3, 20.0), dog(4, 30.0)];
        assert_eq!(traps(&rank(&card)), [2, 4, 1, 3]);
    }

    #[test]
    fn test_zero_probability_ranks_last() {
        let card = vec![dog(1, 0.0), dog(2, 0.5), dog(3, 0.0)];
        assert_eq!(traps(&rank(&card)), [2, 1, 3]);
    }

    #[test]
    fn test_signed_zero_is_a_tie() {
        let card = vec![dog(1, -0.0), dog(2, 0.0), dog(3, 12.0)];
        assert_eq!(traps(&rank(&card)), [3, 1, 2]);
    }

    #[test]
    fn test_does_not_renormalize() {
        let card = vec![dog(1, 70.0), dog(2, 80.0)];
        let ranked = rank(&card);
        assert_eq!(ranked[0].model.win_probability, 80.0);
        assert_eq!(ranked[1].model.win_probability, 70.0);
    }

    #[test]
    fn test_empty_card() {
        assert!(rank(&[]).is_empty());
    }

    fn card_strategy() -> impl Strategy<Value = Vec<Dog>> {
        // Few distinct probabilities so ties are common.
        prop::collection::vec(
            prop::sample::select(vec![-0.0, 0.0, 5.0, 12.5, 33.3, 50.0]),
            0..10,
        )
        .prop_map(|probs| {
            probs
                .into_iter()
                .enumerate()
                .map(|(i, p)| dog(i as u32 + 1, p))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_rank_is_permutation(card in card_strategy()) {
            let ranked = rank(&card);
            let mut before: Vec<_> = card.iter().map(|d| d.id.clone()).collect();
            let mut after: Vec<_> = ranked.iter().map(|d| d.id.clone()).collect();
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
        }

        #[test]
        fn prop_rank_is_descending_and_stable(card in card_strategy()) {
            let ranked = rank(&card);
            for pair in ranked.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.model.win_probability >= b.model.win_probability);
                if a.model.win_probability == b.model.win_probability {
                    prop_assert!(a.trap < b.trap);
                }
            }
        }

        #[test]
        fn prop_rank_is_idempotent(card in card_strategy()) {
            let once = rank(&card);
            let twice = rank(&once);
            prop_assert_eq!(once, twice);
        }
    }
}

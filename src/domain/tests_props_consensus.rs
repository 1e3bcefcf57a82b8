//! Property tests for the consensus evaluator (pure domain, no I/O).
//!
//! Evaluator contract:
//! - Unanimity is met exactly when every token is identical
//! - AbsoluteMajority is met exactly when some token's count strictly
//!   exceeds half the vote count (a single voter is trivially a majority)
//! - A met result always carries one of the submitted tokens as its value

use proptest::prelude::*;

use crate::domain::consensus::evaluate;
use crate::domain::room::Mode;

fn vote_token() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("1".to_string()),
        Just("2".to_string()),
        Just("3".to_string()),
        Just("5".to_string()),
        Just("8".to_string()),
        Just("13".to_string()),
    ]
}

proptest! {
    /// Unanimity agrees with a direct all-equal check.
    #[test]
    fn prop_unanimity_iff_all_equal(votes in prop::collection::vec(vote_token(), 1..8)) {
        let result = evaluate(Mode::Unanimity, &votes);
        let all_equal = votes.iter().all(|v| v == &votes[0]);

        prop_assert_eq!(result.met, all_equal);
        if result.met {
            prop_assert_eq!(result.value.as_deref(), Some(votes[0].as_str()));
        } else {
            prop_assert!(result.value.is_none());
        }
    }

    /// A met majority's value really does hold strictly more than half the
    /// votes, and is one of the submitted tokens.
    #[test]
    fn prop_majority_winner_exceeds_half(votes in prop::collection::vec(vote_token(), 1..8)) {
        let result = evaluate(Mode::AbsoluteMajority, &votes);

        if let Some(value) = &result.value {
            prop_assert!(result.met);
            let count = votes.iter().filter(|v| *v == value).count();
            prop_assert!(count * 2 > votes.len(),
                "winner {value} has {count} of {} votes", votes.len());
        } else {
            // No token may dominate when the evaluator says no consensus.
            for candidate in &votes {
                let count = votes.iter().filter(|v| *v == candidate).count();
                prop_assert!(count * 2 <= votes.len());
            }
        }
    }

    /// Unanimous agreement always satisfies the majority policy too.
    #[test]
    fn prop_unanimity_implies_majority(vote in vote_token(), n in 1usize..8) {
        let votes = vec![vote; n];
        prop_assert!(evaluate(Mode::Unanimity, &votes).met);
        prop_assert!(evaluate(Mode::AbsoluteMajority, &votes).met);
    }

    /// Vote order never changes the outcome.
    #[test]
    fn prop_evaluation_is_order_insensitive(mut votes in prop::collection::vec(vote_token(), 1..8)) {
        let forward = evaluate(Mode::AbsoluteMajority, &votes);
        votes.reverse();
        let backward = evaluate(Mode::AbsoluteMajority, &votes);
        prop_assert_eq!(forward, backward);
    }
}

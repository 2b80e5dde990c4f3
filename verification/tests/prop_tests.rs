use proptest::prelude::*;

use vouch_types::{ClaimState, OverallStatus};
use vouch_verification::StatusAggregator;

fn any_state() -> impl Strategy<Value = ClaimState> {
    prop_oneof![
        Just(ClaimState::Pending),
        Just(ClaimState::Submitted),
        Just(ClaimState::BlockchainVerified),
        Just(ClaimState::Verified),
        Just(ClaimState::Rejected),
    ]
}

fn settled_state() -> impl Strategy<Value = ClaimState> {
    any_state().prop_filter("not pending", |s| *s != ClaimState::Pending)
}

proptest! {
    /// Any pending claim keeps the whole resume pending.
    #[test]
    fn pending_dominates(mut states in prop::collection::vec(any_state(), 0..20), at in any::<prop::sample::Index>()) {
        states.push(ClaimState::Pending);
        let i = at.index(states.len());
        let last = states.len() - 1;
        states.swap(i, last);
        let summary = StatusAggregator::default().summarize(states);
        prop_assert_eq!(summary.status, OverallStatus::Pending);
    }

    /// Without pending claims the status is decided by the verified share alone.
    #[test]
    fn verified_share_decides(states in prop::collection::vec(settled_state(), 0..20), threshold in 0.0f64..=100.0) {
        let verified = states.iter().filter(|s| s.counts_as_verified()).count();
        let summary = StatusAggregator::new(threshold).summarize(states.iter().copied());

        prop_assert_eq!(summary.total, states.len());
        prop_assert_eq!(summary.verified, verified);
        prop_assert!((0.0..=100.0).contains(&summary.percentage));

        let percentage = if states.is_empty() {
            0.0
        } else {
            verified as f64 / states.len() as f64 * 100.0
        };
        let expected = if !states.is_empty() && percentage >= threshold {
            OverallStatus::Verified
        } else {
            OverallStatus::Rejected
        };
        prop_assert_eq!(summary.status, expected);
    }

    /// Claim order never changes the outcome.
    #[test]
    fn order_independent(states in prop::collection::vec(any_state(), 0..20)) {
        let aggregator = StatusAggregator::default();
        let forward = aggregator.summarize(states.iter().copied());
        let backward = aggregator.summarize(states.iter().rev().copied());
        prop_assert_eq!(forward, backward);
    }
}

//! Property tests for swarm sizing, divergence and winner selection

use proptest::prelude::*;

use shame::domain::models::{
    divergence_fraction, divergence_percent, temperature_for, SwarmReport, SwarmSize,
};
use shame::services::swarm::{has_bias, select_winner};

proptest! {
    /// Property: every temperature lies on the 0.80..=0.98 ramp
    #[test]
    fn prop_temperature_in_ramp(index in 0usize..100_000) {
        let t = temperature_for(index);
        prop_assert!((0.8 - 1e-9..=0.98 + 1e-9).contains(&t));
        prop_assert!((t - temperature_for(index + 10)).abs() < 1e-9);
    }

    /// Property: divergence stays in 0..=100 and never rises with more survivors
    #[test]
    fn prop_divergence_monotonic(total in 1usize..2_000, a in 0usize..2_000, b in 0usize..2_000) {
        let (fewer, more) = (a.min(b).min(total), a.max(b).min(total));
        let high = divergence_percent(divergence_fraction(total, fewer));
        let low = divergence_percent(divergence_fraction(total, more));
        prop_assert!(high <= 100);
        prop_assert!(low <= high);
    }

    /// Property: a report with every member surviving shows zero divergence
    #[test]
    fn prop_full_survival_is_zero(total in 1usize..5_000) {
        let report = SwarmReport::new("winner".to_string(), total, total);
        prop_assert_eq!(report.divergence_percent(), 0);
    }

    /// Property: sizes at or above one floor, everything else falls back
    #[test]
    fn prop_size_resolution(requested in -1_000.0f64..1_000.0) {
        let default = SwarmSize::new(663).unwrap();
        let resolved = SwarmSize::resolve(Some(requested), default);
        if requested >= 1.0 {
            prop_assert_eq!(resolved.get() as f64, requested.floor());
        } else {
            prop_assert_eq!(resolved, default);
        }
    }

    /// Property: the winner is one of the survivors, and with no bias
    /// terms present no survivor is longer than it
    #[test]
    fn prop_winner_is_longest_without_bias(texts in prop::collection::vec("[a-d ]{0,24}", 1..20)) {
        let winner = select_winner(&texts).unwrap();
        prop_assert!(texts.iter().any(|t| t == winner));
        prop_assert!(!texts.iter().any(|t| has_bias(t)));
        let longest = texts.iter().map(|t| t.chars().count()).max().unwrap();
        prop_assert_eq!(winner.chars().count(), longest);
        let first_longest = texts.iter().find(|t| t.chars().count() == longest).unwrap();
        prop_assert_eq!(winner, first_longest.as_str());
    }

    /// Property: with bias texts mixed in and no later plain text longer than
    /// them, the last biased survivor wins
    #[test]
    fn prop_last_bias_wins(
        members in prop::collection::vec(
            (
                any::<bool>(),
                "[a-d ]{0,6}",
                prop::sample::select(vec!["ethics", "ETHICS", "Ethics clause", "no ethics here"]),
            ),
            1..20,
        )
    ) {
        prop_assume!(members.iter().any(|(biased, _, _)| *biased));
        let texts: Vec<String> = members
            .iter()
            .map(|(biased, filler, term)| {
                if *biased { format!("{term} {filler}") } else { filler.clone() }
            })
            .collect();

        let last_biased = texts.iter().rev().find(|t| has_bias(t)).unwrap();
        prop_assert_eq!(select_winner(&texts).unwrap(), last_biased.as_str());
    }
}

#[test]
fn test_non_finite_sizes_fall_back() {
    let default = SwarmSize::new(7).unwrap();
    for requested in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0, 0.999] {
        assert_eq!(SwarmSize::resolve(Some(requested), default), default);
    }
    assert_eq!(SwarmSize::resolve(None, default), default);
}

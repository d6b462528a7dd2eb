//! Property tests for period classification and the indicator partition.

use std::collections::BTreeSet;

use adex_model::Indicator;
use adex_validate::{PeriodType, Periodicity, categorize, classify, classify_mixed};
use proptest::prelude::*;

fn relative_token() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "THIS_MONTH",
        "LAST_MONTH",
        "LAST_12_MONTHS",
        "LAST_QUARTER",
        "QUARTERS_THIS_YEAR",
        "LAST_4_QUARTERS",
        "LAST_YEAR",
        "THIS_YEAR",
    ])
    .prop_map(str::to_string)
}

fn fixed_token() -> impl Strategy<Value = String> {
    prop_oneof![
        (2020u32..2040, 1u32..13).prop_map(|(y, m)| format!("{y}{m:02}")),
        (2020u32..2030, 1u32..5).prop_map(|(y, q)| format!("{y}Q{q}")),
        (2020u32..2030).prop_map(|y| y.to_string()),
    ]
}

fn known_token() -> impl Strategy<Value = String> {
    prop_oneof![relative_token(), fixed_token()]
}

fn unknown_token() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,8}",
        (2020u32..2030, 1u32..53).prop_map(|(y, w)| format!("{y}W{w}")),
        (1990u32..2020).prop_map(|y| y.to_string()),
    ]
}

fn indicator(id: String, unconfigured: bool) -> Indicator {
    Indicator {
        numerator: if unconfigured { "0".to_string() } else { format!("#{{{id}}}") },
        id,
        ..Indicator::default()
    }
}

proptest! {
    #[test]
    fn known_tokens_have_a_periodicity(token in known_token()) {
        prop_assert!(classify(&token).periodicity().is_some());
    }

    #[test]
    fn unknown_dominates(
        mut tokens in prop::collection::vec(known_token(), 0..6),
        unknown in unknown_token(),
        at in any::<prop::sample::Index>(),
    ) {
        let position = at.index(tokens.len() + 1);
        tokens.insert(position, unknown);
        prop_assert_eq!(classify_mixed(&tokens), PeriodType::Unknown);
    }

    #[test]
    fn spanning_periodicities_is_mixed(tokens in prop::collection::vec(known_token(), 1..8)) {
        let periodicities: BTreeSet<Periodicity> = tokens
            .iter()
            .filter_map(|token| classify(token).periodicity())
            .collect();
        let result = classify_mixed(&tokens);
        if periodicities.len() >= 2 {
            prop_assert_eq!(result, PeriodType::Mixed);
        } else {
            let only = periodicities.into_iter().next().expect("one periodicity");
            prop_assert_eq!(result, PeriodType::Single(only));
        }
    }

    #[test]
    fn partition_is_total_and_disjoint(
        entries in prop::collection::vec(("[A-F]{1,2}", any::<bool>()), 1..30)
    ) {
        let indicators: Vec<Indicator> = entries
            .into_iter()
            .map(|(id, unconfigured)| indicator(id, unconfigured))
            .collect();
        let partition = categorize(&indicators);

        let ids: BTreeSet<&str> = indicators.iter().map(|i| i.id.as_str()).collect();
        for id in &ids {
            let in_configured = partition.configured.contains_key(id);
            let in_unconfigured = partition.unconfigured.contains_key(id);
            prop_assert!(in_configured != in_unconfigured);
        }

        let ordered: BTreeSet<&str> = partition.ids().iter().copied().collect();
        prop_assert_eq!(&ordered, &ids);
        prop_assert_eq!(partition.len(), partition.ids().len());
    }
}

//! Configured / unconfigured indicator partition.

use std::collections::BTreeMap;

use adex_model::Indicator;

/// Indicators split by whether their numerator is the "0" sentinel, keyed by id.
///
/// When ids repeat, the later indicator wins but keeps the position of the
/// first occurrence. Iteration in fetch order goes through [`Self::ids`].
#[derive(Debug, Clone, Default)]
pub struct IndicatorPartition<'a> {
    pub configured: BTreeMap<&'a str, &'a Indicator>,
    pub unconfigured: BTreeMap<&'a str, &'a Indicator>,
    order: Vec<&'a str>,
}

impl<'a> IndicatorPartition<'a> {
    /// Whether the id belongs to either side.
    pub fn contains(&self, id: &str) -> bool {
        self.configured.contains_key(id) || self.unconfigured.contains_key(id)
    }

    /// Total number of distinct indicator ids.
    pub fn len(&self) -> usize {
        self.configured.len() + self.unconfigured.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distinct indicator ids in fetch order.
    pub fn ids(&self) -> &[&'a str] {
        &self.order
    }

    /// Configured indicators in fetch order.
    pub fn configured_in_order(&self) -> impl Iterator<Item = &'a Indicator> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.configured.get(id).copied())
    }
}

/// Partition indicators into configured and unconfigured.
pub fn categorize(indicators: &[Indicator]) -> IndicatorPartition<'_> {
    let mut partition = IndicatorPartition::default();
    for indicator in indicators {
        let id = indicator.id.as_str();
        if !partition.contains(id) {
            partition.order.push(id);
        }
        if indicator.is_unconfigured() {
            partition.configured.remove(id);
            partition.unconfigured.insert(id, indicator);
        } else {
            partition.unconfigured.remove(id);
            partition.configured.insert(id, indicator);
        }
    }
    partition
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator(id: &str, numerator: &str) -> Indicator {
        Indicator {
            id: id.to_string(),
            numerator: numerator.to_string(),
            ..Indicator::default()
        }
    }

    #[test]
    fn test_split_on_zero_numerator() {
        let indicators = vec![
            indicator("A", "#{de1.coc1}"),
            indicator("B", " 0 "),
            indicator("C", "0"),
        ];
        let partition = categorize(&indicators);
        assert_eq!(partition.configured.keys().copied().collect::<Vec<_>>(), vec!["A"]);
        assert_eq!(partition.unconfigured.keys().copied().collect::<Vec<_>>(), vec!["B", "C"]);
        assert!(partition.contains("C"));
        assert!(!partition.contains("D"));
    }

    #[test]
    fn test_repeated_id_keeps_last() {
        let indicators = vec![indicator("A", "0"), indicator("A", "#{x}")];
        let partition = categorize(&indicators);
        assert_eq!(partition.len(), 1);
        assert!(partition.configured.contains_key("A"));
        assert!(partition.unconfigured.is_empty());
    }

    #[test]
    fn test_configured_in_fetch_order() {
        let indicators = vec![
            indicator("Z", "#{z}"),
            indicator("B", "0"),
            indicator("M", "#{m}"),
            indicator("A", "#{a}"),
            indicator("Z", "#{z2}"),
        ];
        let partition = categorize(&indicators);
        assert_eq!(partition.ids(), ["Z", "B", "M", "A"]);
        let configured: Vec<&str> = partition
            .configured_in_order()
            .map(|indicator| indicator.numerator.as_str())
            .collect();
        assert_eq!(configured, vec!["#{z2}", "#{m}", "#{a}"]);
    }

    #[test]
    fn test_empty_input() {
        let partition = categorize(&[]);
        assert!(partition.is_empty());
    }
}

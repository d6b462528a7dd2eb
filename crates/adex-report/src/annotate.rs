//! Formula annotation.
//!
//! Rewrites indicator numerator and denominator expressions so that machine
//! identifiers read as short names. Only used for exports; validation always
//! sees the raw expressions.

use std::collections::HashMap;
use std::sync::LazyLock;

use adex_model::{DataElement, DataElementOperand, DataSet, Indicator};
use regex::{Captures, Regex};

/// `dataElement.categoryOptionCombo` operand references.
static OPERAND_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9_]+\.[A-Za-z0-9_]+").expect("Invalid operand regex")
});

/// Bare identifiers.
static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("Invalid identifier regex"));

/// Lookup tables from identifier to readable name.
#[derive(Debug, Clone, Default)]
pub struct NameMaps<'a> {
    operands: HashMap<&'a str, &'a str>,
    data_elements: HashMap<&'a str, &'a str>,
    data_sets: HashMap<&'a str, &'a str>,
}

impl<'a> NameMaps<'a> {
    pub fn new(
        operands: &'a [DataElementOperand],
        data_elements: &'a [DataElement],
        data_sets: &'a [DataSet],
    ) -> Self {
        Self {
            operands: operands
                .iter()
                .filter_map(|o| Some((o.dimension_item.as_str(), o.short_name.as_deref()?)))
                .collect(),
            data_elements: data_elements
                .iter()
                .filter_map(|de| Some((de.id.as_str(), de.short_name.as_deref()?)))
                .collect(),
            data_sets: data_sets
                .iter()
                .filter_map(|ds| Some((ds.id.as_str(), ds.name.as_deref()?)))
                .collect(),
        }
    }

    /// Substitute operands first, then data elements, then data sets.
    ///
    /// The dotted operand pass must run first: the bare identifier passes
    /// would otherwise rewrite the halves of a still unresolved operand.
    pub fn annotate_expression(&self, expression: &str) -> String {
        let text = substitute(&OPERAND_REGEX, expression, &self.operands);
        let text = substitute(&IDENTIFIER_REGEX, &text, &self.data_elements);
        substitute(&IDENTIFIER_REGEX, &text, &self.data_sets)
    }
}

fn substitute(pattern: &Regex, text: &str, names: &HashMap<&str, &str>) -> String {
    pattern
        .replace_all(text, |caps: &Captures<'_>| {
            let token = &caps[0];
            match names.get(token) {
                Some(name) if !name.is_empty() => (*name).to_string(),
                _ => token.to_string(),
            }
        })
        .into_owned()
}

/// Annotated copies of the indicators; the input is left untouched.
pub fn annotate(
    indicators: &[Indicator],
    operands: &[DataElementOperand],
    data_elements: &[DataElement],
    data_sets: &[DataSet],
) -> Vec<Indicator> {
    let maps = NameMaps::new(operands, data_elements, data_sets);
    indicators
        .iter()
        .map(|indicator| {
            let mut annotated = indicator.clone();
            if !annotated.numerator.is_empty() {
                annotated.numerator = maps.annotate_expression(&indicator.numerator);
            }
            annotated.denominator = indicator
                .denominator
                .as_deref()
                .map(|denominator| maps.annotate_expression(denominator));
            annotated
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operand(item: &str, short_name: &str) -> DataElementOperand {
        DataElementOperand {
            id: Some(item.to_string()),
            short_name: Some(short_name.to_string()),
            dimension_item: item.to_string(),
        }
    }

    fn data_element(id: &str, short_name: &str) -> DataElement {
        DataElement {
            id: id.to_string(),
            short_name: Some(short_name.to_string()),
        }
    }

    #[test]
    fn test_operand_pass_runs_before_bare_identifiers() {
        let operands = vec![operand("deA.cocB", "Cases confirmed, <5")];
        let elements = vec![data_element("deA", "Cases confirmed"), data_element("deC", "Deaths")];
        let maps = NameMaps::new(&operands, &elements, &[]);
        assert_eq!(
            maps.annotate_expression("#{deA.cocB} + #{deA} + #{deC.cocZ}"),
            "#{Cases confirmed, <5} + #{Cases confirmed} + #{Deaths.cocZ}"
        );
    }

    #[test]
    fn test_data_set_references() {
        let data_sets = vec![DataSet {
            id: "dsMal".to_string(),
            name: Some("Malaria monthly".to_string()),
        }];
        let maps = NameMaps::new(&[], &[], &data_sets);
        assert_eq!(maps.annotate_expression("R{dsMal.REPORTING_RATE}"), "R{Malaria monthly.REPORTING_RATE}");
    }

    #[test]
    fn test_annotate_leaves_input_untouched() {
        let indicators = vec![Indicator {
            id: "I1".to_string(),
            numerator: "#{deA}".to_string(),
            denominator: Some("1".to_string()),
            ..Indicator::default()
        }];
        let elements = vec![data_element("deA", "Cases")];
        let annotated = annotate(&indicators, &[], &elements, &[]);
        assert_eq!(annotated[0].numerator, "#{Cases}");
        assert_eq!(annotated[0].denominator.as_deref(), Some("1"));
        assert_eq!(indicators[0].numerator, "#{deA}");
    }
}

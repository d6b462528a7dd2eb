use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use adex_validate::{RuleKey, RuleResult, RunStatus, ValidationReport};

/// Summary of every rule, least findings first.
pub fn summary_table(report: &ValidationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Check"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for result in report.summary_order() {
        table.add_row(vec![
            dim_cell(result.key.as_str()),
            Cell::new(result.title()),
            status_cell(result),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} rules", report.results.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(report.total_findings(), Color::Red).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Findings table of one rule, using the rule's own headers.
pub fn detail_table(result: &RuleResult) -> Table {
    let mut table = Table::new();
    table.set_header(result.headers().iter().map(|header| header_cell(header)));
    apply_detail_table_style(&mut table);
    for finding in &result.findings {
        table.add_row(finding.texts());
    }
    table
}

/// The rule catalog: key, title and instruction in report order.
pub fn catalog_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Title"),
        header_cell("Instruction"),
    ]);
    apply_detail_table_style(&mut table);
    for key in RuleKey::ALL {
        let definition = key.definition();
        table.add_row(vec![
            dim_cell(key.as_str()),
            Cell::new(definition.title).add_attribute(Attribute::Bold),
            Cell::new(definition.instruction),
        ]);
    }
    table
}

pub fn print_summary(report: &ValidationReport) {
    if let RunStatus::ShortCircuited { missing_keys } = &report.status {
        println!(
            "Reference package incomplete (missing: {}); other checks were not run.",
            missing_keys.join(", ")
        );
    }
    println!("{}", summary_table(report));
}

/// Print every rule with findings in catalog order.
pub fn print_details(report: &ValidationReport) {
    for result in report.with_findings() {
        println!();
        println!("Issue: {}", result.title());
        println!("{}", result.instruction());
        println!("{}", detail_table(result));
    }
}

fn status_cell(result: &RuleResult) -> Cell {
    if result.is_ok() {
        Cell::new(result.status_label()).fg(Color::Green)
    } else {
        Cell::new(result.status_label())
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Fixed(34)),
        ColumnConstraint::UpperBoundary(Width::Percentage(70)),
        ColumnConstraint::LowerBoundary(Width::Fixed(10)),
    ]);
}

fn apply_detail_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_has_row_per_rule_plus_total() {
        let report = ValidationReport::empty();
        let table = summary_table(&report);
        assert_eq!(table.row_iter().count(), RuleKey::ALL.len() + 1);
    }

    #[test]
    fn test_catalog_lists_every_rule() {
        assert_eq!(catalog_table().row_iter().count(), RuleKey::ALL.len());
    }

    #[test]
    fn test_detail_table_uses_rule_headers() {
        let report = ValidationReport::empty();
        let result = report.result(RuleKey::ExTargetApi).unwrap();
        let table = detail_table(result);
        assert_eq!(table.column_iter().count(), 2);
    }
}

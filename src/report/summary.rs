//! Console rendering of the statistical reports.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::stats::contingency::ChiSquareTest;
use crate::stats::descriptive::DescriptiveReport;
use crate::stats::logit::LogitFit;

/// Format a p-value the way epidemiology tables do.
pub fn format_p(p: f64) -> String {
    if p.is_nan() {
        "-".to_string()
    } else if p < 0.001 {
        "<0.001".to_string()
    } else {
        format!("{:.3}", p)
    }
}

fn print_table(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn significance_color(p: f64) -> Color {
    if p < 0.05 {
        Color::Green
    } else {
        Color::White
    }
}

/// Render the descriptive statistics table.
pub fn display_descriptive(report: &DescriptiveReport) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Variable").add_attribute(Attribute::Bold),
        Cell::new("N").add_attribute(Attribute::Bold),
        Cell::new("Mean").add_attribute(Attribute::Bold),
        Cell::new("SD").add_attribute(Attribute::Bold),
        Cell::new("Median").add_attribute(Attribute::Bold),
        Cell::new("W'").add_attribute(Attribute::Bold),
    ]);

    for field in &report.fields {
        table.add_row(vec![
            Cell::new(&field.field),
            Cell::new(field.n),
            Cell::new(format!("{:.2}", field.mean)),
            Cell::new(format!("{:.2}", field.sd)),
            Cell::new(format!("{:.2}", field.median)),
            Cell::new(if field.normality_w.is_nan() {
                "-".to_string()
            } else {
                format!("{:.4}", field.normality_w)
            }),
        ]);
    }

    print_table(&table);
}

/// Render a set of chi-square tests as one table.
pub fn display_associations(title: &str, tests: &[ChiSquareTest]) {
    println!("      {}", style(title).white().bold());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Cross").add_attribute(Attribute::Bold),
        Cell::new("N").add_attribute(Attribute::Bold),
        Cell::new("X\u{b2}").add_attribute(Attribute::Bold),
        Cell::new("df").add_attribute(Attribute::Bold),
        Cell::new("p").add_attribute(Attribute::Bold),
    ]);

    for test in tests {
        table.add_row(vec![
            Cell::new(format!("{} x {}", test.row_field, test.col_field)),
            Cell::new(test.n),
            Cell::new(format!("{:.3}", test.statistic)),
            Cell::new(test.dof),
            Cell::new(format_p(test.p_value)).fg(significance_color(test.p_value)),
        ]);
    }

    print_table(&table);
}

/// Render one fitted logistic regression model.
pub fn display_model(fit: &LogitFit) {
    println!(
        "      {} {}",
        style(&fit.model).white().bold(),
        style(format!(
            "(n={}, events={}, logL={:.2}, {} iterations)",
            fit.n, fit.events, fit.log_likelihood, fit.iterations
        ))
        .dim()
    );

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Term").add_attribute(Attribute::Bold),
        Cell::new("Coef").add_attribute(Attribute::Bold),
        Cell::new("SE").add_attribute(Attribute::Bold),
        Cell::new("OR").add_attribute(Attribute::Bold),
        Cell::new("95% CI").add_attribute(Attribute::Bold),
        Cell::new("p").add_attribute(Attribute::Bold),
    ]);

    for term in &fit.terms {
        table.add_row(vec![
            Cell::new(&term.term),
            Cell::new(format!("{:.4}", term.coefficient)),
            Cell::new(format!("{:.4}", term.std_error)),
            Cell::new(format!("{:.3}", term.odds_ratio)),
            Cell::new(format!("{:.3}-{:.3}", term.ci_low, term.ci_high)),
            Cell::new(format_p(term.p_value)).fg(significance_color(term.p_value)),
        ]);
    }

    print_table(&table);
}

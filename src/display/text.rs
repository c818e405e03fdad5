//! Plain-text rendering of a population report

use crate::algorithm::aggregation::{Breakdown, TopN};
use crate::algorithm::population::PopulationReport;
use crate::display::palette::Palette;

fn push_breakdown(out: &mut String, title: &str, breakdown: &Breakdown) {
    out.push_str(&format!("\n{title} (n={}):\n", breakdown.total));
    if breakdown.is_empty() {
        out.push_str("  (no data)\n");
    }
    for result in &breakdown.results {
        out.push_str(&format!(
            "  {:>3}. {:<32} {:>7} {:>4}%  [{}]\n",
            result.rank, result.id, result.count, result.percentage, result.provenance
        ));
    }
}

fn push_top(out: &mut String, title: &str, top: &TopN) {
    out.push_str(&format!("\n{title} (top {}, n={}):\n", top.limit, top.total));
    if top.entries.is_empty() {
        out.push_str("  (no data)\n");
    }
    for entry in &top.entries {
        out.push_str(&format!(
            "  {:>3}. {:<32} {:>7} {:>4}%  ({}% of shown)\n",
            entry.result.rank,
            entry.result.id,
            entry.result.count,
            entry.result.percentage,
            entry.share_of_shown
        ));
    }
    if top.omitted_categories > 0 {
        out.push_str(&format!(
            "       ... {} more categories, {} records\n",
            top.omitted_categories, top.omitted_count
        ));
    }
}

/// Render a report as a human-readable summary
#[must_use]
pub fn render_report(report: &PopulationReport, palette: &Palette) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Population Insight Report (snapshot generation {})\n",
        report.generation
    ));
    out.push_str(&format!("  Generated: {}\n", report.generated_at.to_rfc3339()));
    out.push_str(&format!("{}", report.summary));

    if !report.group_matches.is_empty() {
        out.push_str("\nFilter Groups:\n");
        for group in &report.group_matches {
            out.push_str(&format!(
                "  {:<24} {} selected, {} patients match\n",
                group.kind.display_name(),
                group.selected,
                group.matched_patients
            ));
        }
    }

    for section in &report.demographics {
        push_breakdown(&mut out, section.attribute.display_name(), &section.breakdown);
    }
    for section in &report.insights {
        push_top(&mut out, section.kind.display_name(), &section.top);
    }

    push_breakdown(&mut out, "HRSN Problems (reconciled)", &report.hrsn.breakdown);

    out.push_str("\nHRSN Screening Answers:\n");
    for indicator in &report.indicators {
        let cells: Vec<String> = indicator
            .breakdown
            .results
            .iter()
            .map(|result| format!("{} {} ({}%)", result.id, result.count, result.percentage))
            .collect();
        out.push_str(&format!(
            "  {:<28} {}, unanswered {}\n",
            indicator.category,
            cells.join(", "),
            indicator.unanswered
        ));
    }

    push_top(&mut out, "ZIP Codes", &report.zip_codes);

    if let Some(focus) = &report.focus {
        out.push_str(&format!(
            "\nFocus: {} affects {} of {} patients ({}%, {})\n",
            focus.category,
            focus.rate.affected,
            focus.rate.population,
            focus.percentage,
            focus.provenance
        ));
    }

    out.push_str("\nGeography:\n");
    if report.geography.is_empty() {
        out.push_str("  (no located patients)\n");
    }
    for bin in &report.geography {
        out.push_str(&format!(
            "  {} total {:>6}  affected ~{:>6}  bucket {} {}  {}\n",
            bin.zip,
            bin.total,
            bin.estimated_affected,
            bin.bucket,
            palette.color_for(bin.bucket),
            bin.predominant
        ));
    }

    out
}

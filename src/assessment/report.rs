//! Report formatting for assessment output.

use crate::assessment::category::ColorBand;
use crate::assessment::snapshot::display_name;
use crate::assessment::types::AssessmentResult;

/// Output format for assessment reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable formatted output.
    Pretty,
    /// JSON output.
    Json,
    /// Markdown report.
    Markdown,
    /// Compact single line.
    Compact,
}

/// Format an assessment result for output.
pub fn format_result(
    result: &AssessmentResult,
    user_name: Option<&str>,
    format: OutputFormat,
) -> String {
    let name = display_name(user_name);
    match format {
        OutputFormat::Pretty => format_pretty(result, name),
        OutputFormat::Json => format_json(result, name),
        OutputFormat::Markdown => format_markdown(result, name),
        OutputFormat::Compact => format_compact(result),
    }
}

fn format_pretty(result: &AssessmentResult, name: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Assessment for {}\n", name));
    output.push_str(&format!(
        "\x1b[1m{}\x1b[0m\n{}\n\n",
        result.tier.title(),
        result.tier.message()
    ));
    output.push_str(&format!(
        "Total Score: {} / {} ({}%)\n{}\n\n",
        result.total_score,
        result.max_score,
        result.percentage(),
        gauge(result.percentage(), 40)
    ));

    output.push_str("Categories:\n");
    let width = result
        .category_percentages
        .keys()
        .map(|c| c.name().len())
        .max()
        .unwrap_or(0);
    for (category, percentage) in &result.category_percentages {
        let band = ColorBand::from_percentage(*percentage);
        output.push_str(&format!(
            "  {:<width$}  {} {:>3}% ({})\n",
            category.name(),
            gauge(*percentage, 20),
            percentage,
            band,
            width = width
        ));
    }

    output.push_str("\nAdvice:\n");
    for advice in &result.advice {
        output.push_str(&format!("  - {}\n", advice));
    }

    output
}

/// Fixed-width bar: filled cells proportional to the percentage.
fn gauge(percentage: u8, cells: usize) -> String {
    let filled = (percentage as usize * cells + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(cells - filled))
}

fn format_json(result: &AssessmentResult, name: &str) -> String {
    let value = serde_json::json!({
        "user_name": name,
        "percentage": result.percentage(),
        "title": result.tier.title(),
        "message": result.tier.message(),
        "severity": result.tier.severity(),
        "result": result,
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

fn format_markdown(result: &AssessmentResult, name: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("# Financial Assessment: {}\n\n", name));
    output.push_str(&format!("## {}\n\n", result.tier.title()));
    output.push_str(&format!("{}\n\n", result.tier.message()));
    output.push_str(&format!(
        "**Total Score:** {} / {} ({}%)\n\n",
        result.total_score,
        result.max_score,
        result.percentage()
    ));

    output.push_str("| Category | Score | Band |\n");
    output.push_str("|----------|-------|------|\n");
    for (category, percentage) in &result.category_percentages {
        output.push_str(&format!(
            "| {} | {}% | {} |\n",
            category.name(),
            percentage,
            ColorBand::from_percentage(*percentage)
        ));
    }

    output.push_str("\n## Advice\n\n");
    for advice in &result.advice {
        output.push_str(&format!("- {}\n", advice));
    }

    output
}

fn format_compact(result: &AssessmentResult) -> String {
    let categories: Vec<String> = result
        .category_percentages
        .iter()
        .map(|(category, percentage)| {
            format!(
                "{}{}{}",
                category,
                ColorBand::from_percentage(*percentage).marker(),
                percentage
            )
        })
        .collect();

    format!(
        "{}/{} ({}%) {} [{}]",
        result.total_score,
        result.max_score,
        result.percentage(),
        result.tier.title(),
        categories.join(" ")
    )
}

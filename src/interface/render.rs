use std::collections::BTreeSet;

use crate::engine::constants::PROGRESS_BAR_WIDTH;
use crate::error::Result;
use crate::models::{
    AnalysisReport, MealFraction, NutrientCatalog, NutrientVector, ProfileRegistry, Verdict,
};

/// Text progress bar for a percentage already clamped to [0, 100].
pub fn progress_bar(progress: u8) -> String {
    let filled = (progress.min(100) as usize * PROGRESS_BAR_WIDTH) / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        ".".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

/// Show what the detector found on the photo.
pub fn display_detected(labels: &BTreeSet<String>) {
    if labels.is_empty() {
        println!("No items detected. Add foods manually to continue.");
    } else {
        let names: Vec<&str> = labels.iter().map(String::as_str).collect();
        println!("Detected: {}", names.join(", "));
    }
}

pub fn display_empty_selection() {
    println!("No foods selected for analysis.");
}

/// Display nutrient totals in a two-column table.
pub fn display_totals(totals: &NutrientVector) {
    println!();
    println!("=== Estimated Nutrients ===");
    println!();

    let width = totals.names().map(str::len).max().unwrap_or(10);
    for (name, amount) in totals.iter() {
        println!("  {:<width$}  {:>8.1}", name, amount, width = width);
    }
}

/// Display per-nutrient fulfillment and the conclusion.
pub fn display_report(report: &AnalysisReport) {
    if !report.ignored.is_empty() {
        println!("Not in catalog (ignored): {}", report.ignored.join(", "));
    }

    display_totals(&report.totals);

    println!();
    println!("=== Target Fulfillment ===");
    println!(
        "Targets are {:.0}% of the daily intake for {}.",
        report.meal_fraction * 100.0,
        report.profile
    );
    println!();

    for row in &report.fulfillment.rows {
        println!(
            "  {}: {:.1} / {:.1} ({:.1}%)",
            row.nutrient, row.actual, row.target, row.percentage
        );
        println!("  {}", progress_bar(row.progress()));
    }

    println!();
    println!("--- Conclusion ---");
    match &report.verdict {
        Verdict::FullyMet => {
            println!("All nutrient targets for this meal are fully met.");
        }
        Verdict::PartiallyMet(unmet) => {
            println!("This meal does not yet meet the target for: {}.", unmet.join(", "));
            println!("Make up for these at other meals or add portions.");
        }
    }
    println!();
}

/// All photo reports of one run as a single JSON array.
pub fn reports_json(reports: &[AnalysisReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

/// List profiles with daily and per-meal targets.
pub fn display_profiles(registry: &ProfileRegistry, meal_fraction: MealFraction) {
    println!();
    println!(
        "=== Intake Profiles ({} items, meal share {:.0}%) ===",
        registry.len(),
        meal_fraction.percent()
    );

    let default = &registry.default_profile().name;
    for profile in registry.profiles() {
        println!();
        let marker = if &profile.name == default { " (default)" } else { "" };
        println!("{}{}", profile.name, marker);
        for (nutrient, daily) in profile.targets.iter() {
            println!(
                "  {:<18} {:>8.1} / day  {:>8.1} / meal",
                nutrient,
                daily,
                daily * meal_fraction.get()
            );
        }
    }
    println!();
}

/// List every catalog entry with its nutrient values.
pub fn display_catalog(catalog: &NutrientCatalog) {
    if catalog.is_empty() {
        println!("Food catalog: (none)");
        return;
    }

    println!();
    println!("=== Food Catalog ({} items) ===", catalog.len());
    println!();

    let width = catalog
        .identifiers()
        .iter()
        .map(|n| n.len())
        .max()
        .unwrap_or(10);
    for entry in catalog.entries() {
        let values: Vec<String> = entry
            .nutrients
            .iter()
            .map(|(n, v)| format!("{}: {}", n, v))
            .collect();
        println!("  {:<width$}  {}", entry.name, values.join(", "), width = width);
    }
    println!();
}

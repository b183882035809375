use crate::engine::constants::MET_THRESHOLD_PERCENT;
use crate::models::{FulfillmentReport, IntakeProfile, NutrientFulfillment, NutrientVector};

/// Short display name of a nutrient: first word, lower-cased.
///
/// "Energi (kkal)" becomes "energi".
pub fn short_nutrient_name(nutrient: &str) -> String {
    nutrient
        .split_whitespace()
        .next()
        .unwrap_or(nutrient)
        .to_lowercase()
}

/// Percentage of `target` reached by `actual`. Defined as 0 for a non-positive target.
#[inline]
pub fn percentage_of(actual: f64, target: f64) -> f64 {
    if target > 0.0 {
        (actual / target) * 100.0
    } else {
        0.0
    }
}

/// Compare tray totals against the profile's targets scaled by `meal_fraction`.
///
/// Rows follow the profile's nutrient declaration order. Only nutrients the
/// profile declares are evaluated; totals it does not name are ignored.
pub fn evaluate(
    totals: &NutrientVector,
    profile: &IntakeProfile,
    meal_fraction: f64,
) -> FulfillmentReport {
    let mut rows = Vec::with_capacity(profile.targets.len());
    let mut unmet_nutrients = Vec::new();

    for (nutrient, daily) in profile.targets.iter() {
        let target = daily * meal_fraction;
        let actual = totals.get(nutrient);
        let percentage = percentage_of(actual, target);
        let met = percentage >= MET_THRESHOLD_PERCENT;

        if !met {
            let short = short_nutrient_name(nutrient);
            if !unmet_nutrients.contains(&short) {
                unmet_nutrients.push(short);
            }
        }

        rows.push(NutrientFulfillment {
            nutrient: nutrient.to_string(),
            actual,
            target,
            percentage,
            met,
        });
    }

    FulfillmentReport {
        rows,
        unmet_nutrients,
    }
}

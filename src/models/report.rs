use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::models::{NutrientVector, SelectionSet};

/// How one nutrient of the meal compares with its scaled target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientFulfillment {
    /// Nutrient name as declared by the profile.
    pub nutrient: String,

    /// Total amount on the tray.
    pub actual: f64,

    /// Daily target scaled by the meal fraction.
    pub target: f64,

    /// `actual / target * 100`, unclamped. 0 when the target is 0.
    pub percentage: f64,

    /// `percentage >= 100`.
    pub met: bool,
}

impl NutrientFulfillment {
    /// Percentage clamped to [0, 100] for progress bars.
    pub fn progress(&self) -> u8 {
        if self.percentage.is_nan() {
            return 0;
        }
        self.percentage.clamp(0.0, 100.0) as u8
    }
}

/// Overall conclusion for a meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "unmet", rename_all = "snake_case")]
pub enum Verdict {
    FullyMet,
    PartiallyMet(Vec<String>),
}

impl Verdict {
    pub fn is_fully_met(&self) -> bool {
        matches!(self, Verdict::FullyMet)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::FullyMet => write!(f, "fully met"),
            Verdict::PartiallyMet(unmet) => write!(f, "partially met: {}", unmet.join(", ")),
        }
    }
}

/// Per-nutrient rows in profile order plus the derived unmet list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FulfillmentReport {
    pub rows: Vec<NutrientFulfillment>,

    /// Short names (first word, lower-cased) of unmet nutrients, in profile order.
    pub unmet_nutrients: Vec<String>,
}

impl FulfillmentReport {
    pub fn verdict(&self) -> Verdict {
        if self.unmet_nutrients.is_empty() {
            Verdict::FullyMet
        } else {
            Verdict::PartiallyMet(self.unmet_nutrients.clone())
        }
    }

    pub fn row(&self, nutrient: &str) -> Option<&NutrientFulfillment> {
        self.rows.iter().find(|r| r.nutrient == nutrient)
    }
}

/// Everything the front end shows for one analysed tray.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub profile: String,
    pub meal_fraction: f64,

    /// Raw detector labels, including ones the catalog does not know.
    /// Empty when the foods were typed in.
    pub detected: BTreeSet<String>,

    pub selection: SelectionSet,

    /// Selected identifiers the catalog does not know; they contribute nothing.
    pub ignored: Vec<String>,

    pub totals: NutrientVector,
    pub fulfillment: FulfillmentReport,
    pub verdict: Verdict,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(percentage: f64) -> NutrientFulfillment {
        NutrientFulfillment {
            nutrient: "Energi (kkal)".to_string(),
            actual: 0.0,
            target: 0.0,
            percentage,
            met: percentage >= 100.0,
        }
    }

    #[test]
    fn test_progress_clamps() {
        assert_eq!(row(42.05).progress(), 42);
        assert_eq!(row(250.0).progress(), 100);
        assert_eq!(row(-3.0).progress(), 0);
        assert_eq!(row(f64::NAN).progress(), 0);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::FullyMet.to_string(), "fully met");
        let partial = Verdict::PartiallyMet(vec!["energi".to_string(), "serat".to_string()]);
        assert_eq!(partial.to_string(), "partially met: energi, serat");
    }

    #[test]
    fn test_verdict_json_shape() {
        let partial = Verdict::PartiallyMet(vec!["protein".to_string()]);
        let json = serde_json::to_string(&partial).unwrap();
        assert_eq!(json, r#"{"status":"partially_met","unmet":["protein"]}"#);
        let full = serde_json::to_string(&Verdict::FullyMet).unwrap();
        assert_eq!(full, r#"{"status":"fully_met"}"#);
    }
}

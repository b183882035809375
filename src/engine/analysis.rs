use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::detection::{Detector, TrayImage};
use crate::engine::aggregation::aggregate;
use crate::engine::fulfillment::evaluate;
use crate::error::Result;
use crate::models::{
    AnalysisReport, IntakeProfile, MealFraction, NutrientCatalog, ProfileRegistry, SelectionSet,
};

/// Manual corrections applied on top of every photo's detected foods.
#[derive(Debug, Clone, Default)]
pub struct Corrections {
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

/// Read-only tables shared by every analysis in the process.
#[derive(Debug, Clone)]
pub struct MealContext {
    pub catalog: NutrientCatalog,
    pub profiles: ProfileRegistry,
    pub meal_fraction: MealFraction,
}

impl MealContext {
    /// Bundle the tables after checking that profiles and catalog share a schema.
    pub fn new(
        catalog: NutrientCatalog,
        profiles: ProfileRegistry,
        meal_fraction: MealFraction,
    ) -> Result<Self> {
        profiles.check_schema(&catalog)?;
        Ok(Self {
            catalog,
            profiles,
            meal_fraction,
        })
    }

    /// Run the full pipeline for one selection and profile.
    pub fn analyze(&self, profile: &IntakeProfile, selection: &SelectionSet) -> AnalysisReport {
        analyze(&self.catalog, profile, self.meal_fraction, selection)
    }

    /// Photo to report: decode, detect, keep the labels the catalog knows,
    /// apply `corrections`, then hand the candidates to `review` for the
    /// final say.
    pub fn analyze_photo<F>(
        &self,
        detector: &dyn Detector,
        path: &Path,
        profile: &IntakeProfile,
        corrections: &Corrections,
        mut review: F,
    ) -> Result<AnalysisReport>
    where
        F: FnMut(&TrayImage, &BTreeSet<String>, SelectionSet) -> Result<SelectionSet>,
    {
        let image = TrayImage::open(path)?;
        let detected = detector.detect(&image)?;
        debug!(path = %path.display(), labels = detected.len(), "Detection finished");

        let mut selection =
            candidates_from_detection(&self.catalog, detected.iter().map(String::as_str));
        selection.apply_edits(&corrections.add, &corrections.remove);
        let selection = review(&image, &detected, selection)?;

        let mut report = self.analyze(profile, &selection);
        report.detected = detected;
        Ok(report)
    }

    /// Analyse photos in order against one profile.
    ///
    /// Each photo yields its own result; a failure does not stop the photos
    /// after it.
    pub fn analyze_photos<'a, F>(
        &'a self,
        detector: &'a dyn Detector,
        paths: &'a [PathBuf],
        profile: &'a IntakeProfile,
        corrections: &'a Corrections,
        mut review: F,
    ) -> impl Iterator<Item = (&'a Path, Result<AnalysisReport>)> + 'a
    where
        F: FnMut(&TrayImage, &BTreeSet<String>, SelectionSet) -> Result<SelectionSet> + 'a,
    {
        paths.iter().map(move |path| {
            let result = self.analyze_photo(detector, path, profile, corrections, &mut review);
            if let Err(e) = &result {
                warn!(path = %path.display(), error = %e, "Photo analysis failed");
            }
            (path.as_path(), result)
        })
    }
}

/// Aggregate the selection and evaluate it against the profile.
///
/// Pure: the report depends only on its inputs and is rebuilt in full on
/// every call.
pub fn analyze(
    catalog: &NutrientCatalog,
    profile: &IntakeProfile,
    meal_fraction: MealFraction,
    selection: &SelectionSet,
) -> AnalysisReport {
    let ignored: Vec<String> = selection
        .unknown(catalog)
        .into_iter()
        .map(String::from)
        .collect();
    if !ignored.is_empty() {
        debug!(?ignored, "Ignoring identifiers missing from catalog");
    }

    let totals = aggregate(catalog, selection);
    let fulfillment = evaluate(&totals, profile, meal_fraction.get());
    let verdict = fulfillment.verdict();

    if !verdict.is_fully_met() {
        debug!(unmet = ?fulfillment.unmet_nutrients, "Meal falls short of target");
    }

    AnalysisReport {
        profile: profile.name.clone(),
        meal_fraction: meal_fraction.get(),
        detected: BTreeSet::new(),
        selection: selection.clone(),
        ignored,
        totals,
        fulfillment,
        verdict,
    }
}

/// Candidate selection from raw detector labels: only labels the catalog knows.
pub fn candidates_from_detection<'a, I>(catalog: &NutrientCatalog, labels: I) -> SelectionSet
where
    I: IntoIterator<Item = &'a str>,
{
    let mut selection = SelectionSet::new();
    for label in labels {
        if catalog.contains(label) {
            selection.insert(label);
        } else {
            warn!(label, "Detected label has no catalog entry");
        }
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CatalogEntry, Verdict};

    fn sample_context() -> MealContext {
        let catalog = NutrientCatalog::new(vec![
            CatalogEntry::new(
                "nasi_putih",
                [("Energi (kkal)", 140.0), ("Protein (g)", 3.0)]
                    .into_iter()
                    .collect(),
            ),
            CatalogEntry::new(
                "ayam",
                [("Energi (kkal)", 250.0), ("Protein (g)", 25.0)]
                    .into_iter()
                    .collect(),
            ),
        ])
        .unwrap();
        let profiles = ProfileRegistry::new(vec![IntakeProfile::new(
            "Dewasa",
            [("Energi (kkal)", 1000.0), ("Protein (g)", 60.0)]
                .into_iter()
                .collect(),
        )])
        .unwrap();
        MealContext::new(catalog, profiles, MealFraction::new(0.35).unwrap()).unwrap()
    }

    #[test]
    fn test_analyze_ignores_unknown() {
        let ctx = sample_context();
        let profile = ctx.profiles.default_profile();
        let selection: SelectionSet = ["nasi_putih", "ayam", "xyz_unknown"].into_iter().collect();

        let report = ctx.analyze(profile, &selection);

        assert_eq!(report.totals.get("Energi (kkal)"), 390.0);
        assert_eq!(report.ignored, vec!["xyz_unknown"]);
        // 390 / 350 met, 28 / 21 met
        assert_eq!(report.verdict, Verdict::FullyMet);
    }

    #[test]
    fn test_analyze_is_pure() {
        let ctx = sample_context();
        let profile = ctx.profiles.default_profile();
        let selection: SelectionSet = ["nasi_putih"].into_iter().collect();

        assert_eq!(
            ctx.analyze(profile, &selection),
            ctx.analyze(profile, &selection)
        );
    }

    #[test]
    fn test_candidates_drop_unknown_labels() {
        let ctx = sample_context();
        let selection = candidates_from_detection(&ctx.catalog, ["ayam", "piring", "ayam"]);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec!["ayam"]);
    }

    #[test]
    fn test_context_rejects_schema_mismatch() {
        let catalog = NutrientCatalog::new(vec![CatalogEntry::new(
            "ayam",
            [("Energi (kkal)", 250.0)].into_iter().collect(),
        )])
        .unwrap();
        let profiles = ProfileRegistry::new(vec![IntakeProfile::new(
            "Ibu Hamil",
            [("Folat (mcg)", 600.0)].into_iter().collect(),
        )])
        .unwrap();

        assert!(MealContext::new(catalog, profiles, MealFraction::new(0.3).unwrap()).is_err());
    }
}

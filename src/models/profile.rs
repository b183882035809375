use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::{Result, TrayError};
use crate::models::{NutrientCatalog, NutrientVector};

/// Minimum Jaro-Winkler similarity for a fuzzy profile match.
const PROFILE_MATCH_THRESHOLD: f64 = 0.85;

/// Full-day nutrient targets for one demographic group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeProfile {
    pub name: String,
    pub targets: NutrientVector,
}

impl IntakeProfile {
    pub fn new(name: impl Into<String>, targets: NutrientVector) -> Self {
        Self {
            name: name.into(),
            targets,
        }
    }
}

/// Ordered, immutable set of intake profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: Vec<IntakeProfile>,
}

impl ProfileRegistry {
    pub fn new(profiles: Vec<IntakeProfile>) -> Result<Self> {
        if profiles.is_empty() {
            return Err(TrayError::InvalidInput(
                "At least one intake profile is required".to_string(),
            ));
        }
        for (i, profile) in profiles.iter().enumerate() {
            if profiles[..i].iter().any(|p| p.name == profile.name) {
                return Err(TrayError::InvalidInput(format!(
                    "Duplicate profile name: {}",
                    profile.name
                )));
            }
            if let Some((nutrient, value)) = profile.targets.first_invalid() {
                return Err(TrayError::InvalidInput(format!(
                    "Profile '{}' has invalid target {} for {}",
                    profile.name, value, nutrient
                )));
            }
        }
        Ok(Self { profiles })
    }

    pub fn get(&self, name: &str) -> Option<&IntakeProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn profiles(&self) -> &[IntakeProfile] {
        &self.profiles
    }

    /// The profile preselected when the user makes no choice: the last one declared.
    pub fn default_profile(&self) -> &IntakeProfile {
        // `new` guarantees at least one profile.
        &self.profiles[self.profiles.len() - 1]
    }

    /// Index of the default profile, for selection widgets.
    pub fn default_index(&self) -> usize {
        self.profiles.len() - 1
    }

    /// Find a profile by exact name, then case-insensitively.
    ///
    /// A near miss is never accepted. The closest name, if any, is carried
    /// in the error for the caller to offer.
    pub fn resolve(&self, query: &str) -> Result<&IntakeProfile> {
        let query = query.trim();
        if let Some(p) = self.get(query) {
            return Ok(p);
        }

        let lowered = query.to_lowercase();
        if let Some(p) = self
            .profiles
            .iter()
            .find(|p| p.name.to_lowercase() == lowered)
        {
            return Ok(p);
        }

        Err(TrayError::ProfileNotFound {
            query: query.to_string(),
            suggestion: self.closest(query).map(|p| p.name.clone()),
        })
    }

    /// Most similar profile name by Jaro-Winkler, if it clears the threshold.
    pub fn closest(&self, query: &str) -> Option<&IntakeProfile> {
        let lowered = query.trim().to_lowercase();
        self.profiles
            .iter()
            .map(|p| (p, jaro_winkler(&p.name.to_lowercase(), &lowered)))
            .filter(|(_, score)| *score >= PROFILE_MATCH_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(p, _)| p)
    }

    /// Ensure every nutrient a profile targets is carried by the catalog.
    pub fn check_schema(&self, catalog: &NutrientCatalog) -> Result<()> {
        let columns = catalog.nutrient_names();
        for profile in &self.profiles {
            if let Some(missing) = profile.targets.names().find(|n| !columns.contains(n)) {
                return Err(TrayError::SchemaMismatch {
                    profile: profile.name.clone(),
                    nutrient: missing.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Share of a full day's intake attributed to the analysed meal, in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MealFraction(f64);

impl MealFraction {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else {
            Err(TrayError::InvalidMealFraction(value))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Whole-number percentage for display, e.g. 35 for 0.35.
    pub fn percent(self) -> f64 {
        self.0 * 100.0
    }
}

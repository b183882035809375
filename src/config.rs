use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::MealContext;
use crate::engine::constants::{DEFAULT_CONFIDENCE_THRESHOLD, LUNCH_MEAL_FRACTION};
use crate::error::{Result, TrayError};
use crate::models::MealFraction;
use crate::tables::{builtin_catalog, builtin_profiles, load_catalog, load_profiles};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tray_config.json";

/// Startup settings. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Label map of the trained detector.
    pub model_path: PathBuf,

    /// Replacement food catalog (`.csv` or `.json`); built-in table when unset.
    pub catalog_path: Option<PathBuf>,

    /// Replacement intake profiles (`.json`); built-in table when unset.
    pub profiles_path: Option<PathBuf>,

    /// Share of the daily intake the analysed meal should cover.
    pub meal_fraction: f64,

    /// Detector boxes below this confidence are dropped.
    pub confidence_threshold: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("best.labels.json"),
            catalog_path: None,
            profiles_path: None,
            meal_fraction: LUNCH_MEAL_FRACTION,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl AppConfig {
    /// Load settings from an explicit path, or from `tray_config.json` if present.
    ///
    /// An explicit path must exist. Without one, a missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !path.exists() {
            if required {
                return Err(TrayError::InvalidInput(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validated meal fraction.
    pub fn meal_fraction(&self) -> Result<MealFraction> {
        MealFraction::new(self.meal_fraction)
    }

    /// Check every setting that can be checked without touching files.
    pub fn validate(&self) -> Result<()> {
        self.meal_fraction()?;
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(TrayError::InvalidInput(format!(
                "Confidence threshold must be in [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        Ok(())
    }

    /// Load the configured tables (or the built-in ones) into a shared context.
    pub fn load_context(&self) -> Result<MealContext> {
        self.validate()?;

        let catalog = match &self.catalog_path {
            Some(path) => load_catalog(path)?,
            None => builtin_catalog()?,
        };
        let profiles = match &self.profiles_path {
            Some(path) => load_profiles(path)?,
            None => builtin_profiles()?,
        };

        MealContext::new(catalog, profiles, self.meal_fraction()?)
    }
}

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrayError};
use crate::models::{NutrientVector, SelectionSet};

/// A food identifier with its per-serving nutrient values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub nutrients: NutrientVector,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, nutrients: NutrientVector) -> Self {
        Self {
            name: name.into(),
            nutrients,
        }
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        let parts: Vec<String> = self
            .nutrients
            .iter()
            .map(|(n, v)| format!("{}={}", n, v))
            .collect();
        format!("{}: {}", self.name, parts.join(", "))
    }
}

/// Immutable food table keyed by exact, case-sensitive identifier.
#[derive(Debug, Clone, Default)]
pub struct NutrientCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

impl NutrientCatalog {
    /// Build a catalog, rejecting duplicate identifiers and invalid amounts.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if let Some((nutrient, value)) = entry.nutrients.first_invalid() {
                return Err(TrayError::InvalidInput(format!(
                    "{} has invalid amount {} for {}",
                    entry.name, value, nutrient
                )));
            }
            if index.insert(entry.name.clone(), i).is_some() {
                return Err(TrayError::InvalidInput(format!(
                    "Duplicate food identifier: {}",
                    entry.name
                )));
            }
        }
        Ok(Self { entries, index })
    }

    /// Entries whose identifier is in the selection, in catalog order.
    ///
    /// Identifiers the catalog does not know are skipped without error.
    pub fn lookup(&self, selection: &SelectionSet) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| selection.contains(&e.name))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All known identifiers in declaration order.
    pub fn identifiers(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Union of nutrient names across entries, in first-seen order.
    pub fn nutrient_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            for name in entry.nutrients.names() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, energy: f64, protein: f64) -> CatalogEntry {
        CatalogEntry::new(
            name,
            [("Energi (kkal)", energy), ("Protein (g)", protein)]
                .into_iter()
                .collect(),
        )
    }

    fn sample_catalog() -> NutrientCatalog {
        NutrientCatalog::new(vec![
            entry("nasi_putih", 140.0, 3.0),
            entry("ayam", 250.0, 25.0),
            entry("tahu", 80.0, 7.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_skips_unknown() {
        let catalog = sample_catalog();
        let selection: SelectionSet = ["ayam", "xyz_unknown", "nasi_putih"].into_iter().collect();

        let names: Vec<&str> = catalog
            .lookup(&selection)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["nasi_putih", "ayam"]);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let catalog = sample_catalog();
        let selection: SelectionSet = ["Ayam"].into_iter().collect();
        assert!(catalog.lookup(&selection).is_empty());
        assert!(catalog.get("Ayam").is_none());
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let result = NutrientCatalog::new(vec![entry("ayam", 1.0, 1.0), entry("ayam", 2.0, 2.0)]);
        assert!(matches!(result, Err(TrayError::InvalidInput(_))));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = NutrientCatalog::new(vec![entry("ayam", -1.0, 1.0)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_nutrient_names_union() {
        let mut extra = entry("susu", 80.0, 4.0);
        extra.nutrients.set("Kolin (mg)", 30.0);
        let catalog = NutrientCatalog::new(vec![entry("ayam", 1.0, 1.0), extra]).unwrap();

        assert_eq!(
            catalog.nutrient_names(),
            vec!["Energi (kkal)", "Protein (g)", "Kolin (mg)"]
        );
    }
}

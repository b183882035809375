use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, TrayError};
use crate::models::{CatalogEntry, IntakeProfile, NutrientCatalog, NutrientVector, ProfileRegistry};

/// Load a food catalog from a `.csv` or `.json` file.
///
/// CSV: the first column holds the food identifier, every other column is a
/// nutrient. JSON: an array of `{"name": ..., "nutrients": {...}}`.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<NutrientCatalog> {
    let path = path.as_ref();
    let entries = match extension(path).as_deref() {
        Some("csv") => read_catalog_csv(path)?,
        Some("json") => {
            let content = fs::read_to_string(path)?;
            serde_json::from_str::<Vec<CatalogEntry>>(&content)?
        }
        _ => {
            return Err(TrayError::InvalidInput(format!(
                "Unsupported catalog format: {}",
                path.display()
            )));
        }
    };

    let catalog = NutrientCatalog::new(entries)?;
    for entry in catalog.entries() {
        debug!("{}", entry.debug_string());
    }
    info!(path = %path.display(), foods = catalog.len(), "Loaded food catalog");
    Ok(catalog)
}

/// Load intake profiles from a JSON array of `{"name": ..., "targets": {...}}`.
///
/// Declaration order is kept; it is the display order of the evaluation.
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<ProfileRegistry> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let profiles: Vec<IntakeProfile> = serde_json::from_str(&content)?;

    let registry = ProfileRegistry::new(profiles)?;
    info!(path = %path.display(), profiles = registry.len(), "Loaded intake profiles");
    Ok(registry)
}

fn read_catalog_csv(path: &Path) -> Result<Vec<CatalogEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    if headers.len() < 2 {
        return Err(TrayError::InvalidInput(
            "Catalog CSV needs an identifier column and at least one nutrient column".to_string(),
        ));
    }
    let nutrients: Vec<&str> = headers.iter().skip(1).collect();

    let mut entries = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        // Header is line 1.
        let line = row + 2;

        let name = record.get(0).unwrap_or_default();
        if name.is_empty() {
            return Err(TrayError::InvalidInput(format!(
                "Line {}: missing food identifier",
                line
            )));
        }

        let mut vector = NutrientVector::new();
        for (col, nutrient) in nutrients.iter().enumerate() {
            let raw = record.get(col + 1).unwrap_or_default();
            // Blank cells read as zero but keep the column in the schema.
            let value = if raw.is_empty() {
                0.0
            } else {
                raw.parse::<f64>().map_err(|_| {
                    TrayError::InvalidInput(format!(
                        "Line {}: invalid value '{}' for {}",
                        line, raw, nutrient
                    ))
                })?
            };
            vector.set(*nutrient, value);
        }

        entries.push(CatalogEntry::new(name, vector));
    }

    Ok(entries)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_with(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_catalog_csv() {
        let file = temp_with(
            ".csv",
            "nama_makanan,Energi (kkal),Protein (g)\n\
             nasi_putih,140,3\n\
             ayam, 250 ,25\n\
             susu,80,\n",
        );

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.identifiers(), vec!["nasi_putih", "ayam", "susu"]);
        assert_eq!(catalog.get("ayam").unwrap().nutrients.get("Energi (kkal)"), 250.0);
        assert_eq!(catalog.nutrient_names(), vec!["Energi (kkal)", "Protein (g)"]);
        assert!(catalog.get("susu").unwrap().nutrients.contains("Protein (g)"));
    }

    #[test]
    fn test_load_catalog_csv_bad_value() {
        let file = temp_with(".csv", "id,Energi (kkal)\nayam,banyak\n");
        let err = load_catalog(file.path()).unwrap_err();
        assert!(err.to_string().contains("Line 2"));
    }

    #[test]
    fn test_load_catalog_csv_duplicate() {
        let file = temp_with(".csv", "id,Energi (kkal)\nayam,250\nayam,220\n");
        assert!(load_catalog(file.path()).is_err());
    }

    #[test]
    fn test_load_catalog_json() {
        let file = temp_with(
            ".json",
            r#"[{"name": "tempe", "nutrients": {"Energi (kkal)": 100, "Kolin (mg)": 20}}]"#,
        );
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.nutrient_names(), vec!["Energi (kkal)", "Kolin (mg)"]);
    }

    #[test]
    fn test_load_catalog_unknown_format() {
        let file = temp_with(".xlsx", "");
        assert!(matches!(
            load_catalog(file.path()),
            Err(TrayError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_load_profiles_keeps_order() {
        let file = temp_with(
            ".json",
            r#"[
                {"name": "Balita", "targets": {"Serat (g)": 16, "Energi (kkal)": 1350}},
                {"name": "Lansia", "targets": {"Energi (kkal)": 1800, "Serat (g)": 25}}
            ]"#,
        );

        let registry = load_profiles(file.path()).unwrap();
        assert_eq!(registry.names(), vec!["Balita", "Lansia"]);

        let first: Vec<&str> = registry.profiles()[0].targets.names().collect();
        assert_eq!(first, vec!["Serat (g)", "Energi (kkal)"]);
    }
}

use crate::engine::constants::CANONICAL_NUTRIENTS;
use crate::error::Result;
use crate::models::{CatalogEntry, IntakeProfile, NutrientCatalog, NutrientVector, ProfileRegistry};

/// Per-serving values for the tray items the detector is trained on.
///
/// Columns follow `CANONICAL_NUTRIENTS`: energy, protein, fat, carbohydrate, fiber.
const FOODS: [(&str, [f64; 5]); 18] = [
    ("nasi_putih", [140.0, 3.0, 0.3, 30.0, 0.5]),
    ("ayam", [250.0, 25.0, 15.0, 2.0, 0.0]),
    ("nasi_kuning", [180.0, 4.0, 5.0, 30.0, 1.0]),
    ("nasi_liwet", [190.0, 4.5, 6.0, 31.0, 1.0]),
    ("buah_jeruk", [70.0, 1.5, 0.2, 18.0, 3.5]),
    ("buah_melon", [34.0, 0.8, 0.2, 8.0, 0.9]),
    ("buah_pisang", [105.0, 1.3, 0.4, 27.0, 3.1]),
    ("buah_duku", [70.0, 1.0, 0.2, 17.0, 4.0]),
    ("sayur_capcay", [80.0, 4.0, 4.0, 9.0, 3.5]),
    ("sayur_wortel_kacang", [60.0, 2.5, 3.0, 7.0, 3.0]),
    ("sayur", [50.0, 2.0, 2.5, 6.0, 3.0]),
    ("wortel", [41.0, 0.9, 0.2, 10.0, 2.8]),
    ("susu", [80.0, 4.0, 4.5, 6.0, 0.0]),
    ("tahu", [80.0, 7.0, 6.0, 2.0, 1.0]),
    ("tempe", [100.0, 9.0, 6.0, 8.0, 1.5]),
    ("tempe_bacem", [110.0, 10.0, 5.0, 10.0, 1.4]),
    ("ayam_kecap", [220.0, 23.0, 10.0, 10.0, 0.5]),
    ("buah_semangka", [45.0, 0.9, 0.2, 11.0, 0.6]),
];

/// Daily recommended intake (AKG) per group, same column order as `FOODS`.
const PROFILES: [(&str, [f64; 5]); 5] = [
    ("Anak SD (7-12 Tahun)", [1825.0, 48.0, 60.0, 275.0, 26.0]),
    ("Anak SMP (13-15 Tahun)", [2225.0, 68.0, 75.0, 325.0, 32.0]),
    ("Anak SMA (16-18 Tahun)", [2375.0, 70.0, 78.0, 350.0, 33.0]),
    ("Ibu Hamil (Trimester 2 & 3)", [2550.0, 90.0, 70.0, 400.0, 34.0]),
    ("Laki-laki Dewasa (19-29)", [2650.0, 65.0, 75.0, 430.0, 37.0]),
];

fn canonical_vector(values: &[f64; 5]) -> NutrientVector {
    CANONICAL_NUTRIENTS
        .iter()
        .zip(values.iter())
        .map(|(name, value)| (*name, *value))
        .collect()
}

/// The built-in food catalog.
pub fn builtin_catalog() -> Result<NutrientCatalog> {
    let entries = FOODS
        .iter()
        .map(|(name, values)| CatalogEntry::new(*name, canonical_vector(values)))
        .collect();
    NutrientCatalog::new(entries)
}

/// The built-in intake profiles, in display order.
pub fn builtin_profiles() -> Result<ProfileRegistry> {
    let profiles = PROFILES
        .iter()
        .map(|(name, values)| IntakeProfile::new(*name, canonical_vector(values)))
        .collect();
    ProfileRegistry::new(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrayError;

    #[test]
    fn test_builtin_tables_share_schema() {
        let catalog = builtin_catalog().unwrap();
        let profiles = builtin_profiles().unwrap();

        assert_eq!(catalog.len(), 18);
        assert_eq!(profiles.len(), 5);
        assert_eq!(catalog.nutrient_names(), CANONICAL_NUTRIENTS.to_vec());
        assert!(profiles.check_schema(&catalog).is_ok());
    }

    #[test]
    fn test_builtin_default_profile() {
        let profiles = builtin_profiles().unwrap();
        let adult = profiles.default_profile();
        assert_eq!(adult.name, "Laki-laki Dewasa (19-29)");
        assert_eq!(adult.targets.get("Energi (kkal)"), 2650.0);
    }

    #[test]
    fn test_unknown_group_does_not_resolve() {
        let profiles = builtin_profiles().unwrap();
        for query in [
            "Anak SMK (16-18 Tahun)",
            "Ibu Hamil (Trimester 1)",
            "Laki-laki Dewasa (30-49)",
            "Anak SD (13-15 Tahun)",
        ] {
            assert!(
                matches!(
                    profiles.resolve(query),
                    Err(TrayError::ProfileNotFound { .. })
                ),
                "{query} should not resolve"
            );
        }
    }
}

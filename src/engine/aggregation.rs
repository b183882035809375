use tracing::debug;

use crate::models::{NutrientCatalog, NutrientVector, SelectionSet};

/// Sum the nutrient vectors of every selected food the catalog knows.
///
/// The result starts from every catalog nutrient at zero, so an empty
/// selection yields an all-zero vector. Entries are summed in catalog order,
/// which keeps the result independent of how the selection was built.
pub fn aggregate(catalog: &NutrientCatalog, selection: &SelectionSet) -> NutrientVector {
    let mut totals = NutrientVector::zeroed(catalog.nutrient_names());

    let matched = catalog.lookup(selection);
    for entry in &matched {
        totals.accumulate(&entry.nutrients);
    }

    debug!(
        selected = selection.len(),
        matched = matched.len(),
        "Aggregated tray nutrients"
    );

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogEntry;

    fn sample_catalog() -> NutrientCatalog {
        NutrientCatalog::new(vec![
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
            // Sparse entry: missing nutrients count as zero.
            CatalogEntry::new("teh", [("Energi (kkal)", 30.0)].into_iter().collect()),
        ])
        .unwrap()
    }

    #[test]
    fn test_aggregate_sums_matched() {
        let catalog = sample_catalog();
        let selection: SelectionSet = ["nasi_putih", "ayam"].into_iter().collect();
        let totals = aggregate(&catalog, &selection);

        assert_eq!(totals.get("Energi (kkal)"), 390.0);
        assert_eq!(totals.get("Protein (g)"), 28.0);
    }

    #[test]
    fn test_aggregate_empty_is_all_zero() {
        let catalog = sample_catalog();
        let totals = aggregate(&catalog, &SelectionSet::new());

        assert_eq!(totals.len(), 2);
        assert!(totals.iter().all(|(_, v)| v == 0.0));
    }

    #[test]
    fn test_aggregate_sparse_entry() {
        let catalog = sample_catalog();
        let selection: SelectionSet = ["teh", "ayam"].into_iter().collect();
        let totals = aggregate(&catalog, &selection);

        assert_eq!(totals.get("Energi (kkal)"), 280.0);
        assert_eq!(totals.get("Protein (g)"), 25.0);
    }

    #[test]
    fn test_aggregate_ignores_unknown() {
        let catalog = sample_catalog();
        let with_unknown: SelectionSet = ["ayam", "xyz_unknown"].into_iter().collect();
        let without: SelectionSet = ["ayam"].into_iter().collect();

        assert_eq!(
            aggregate(&catalog, &with_unknown),
            aggregate(&catalog, &without)
        );
    }
}

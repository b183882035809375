use std::io::IsTerminal;

use dialoguer::{Confirm, MultiSelect, Select};

use crate::error::{Result, TrayError};
use crate::models::{IntakeProfile, NutrientCatalog, ProfileRegistry, SelectionSet};

/// Whether stdin is attached to a terminal we can prompt on.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal()
}

/// Prompt for the intake profile, preselecting the registry default.
pub fn prompt_profile(registry: &ProfileRegistry) -> Result<&IntakeProfile> {
    let names = registry.names();

    let selection = Select::new()
        .with_prompt("Choose a daily intake profile")
        .items(&names)
        .default(registry.default_index())
        .interact()?;

    Ok(&registry.profiles()[selection])
}

/// Resolve a typed profile name, asking before accepting a near match.
///
/// Without a terminal the lookup error is returned as is.
pub fn confirm_profile<'a>(
    registry: &'a ProfileRegistry,
    query: &str,
) -> Result<&'a IntakeProfile> {
    let err = match registry.resolve(query) {
        Ok(profile) => return Ok(profile),
        Err(err) => err,
    };

    let suggestion = match &err {
        TrayError::ProfileNotFound {
            suggestion: Some(name),
            ..
        } if is_interactive() => Some(name.clone()),
        _ => None,
    };
    let Some(suggestion) = suggestion else {
        return Err(err);
    };

    let confirm = Confirm::new()
        .with_prompt(format!("Did you mean '{}'?", suggestion))
        .default(false)
        .interact()?;

    match registry.get(&suggestion) {
        Some(profile) if confirm => Ok(profile),
        _ => Err(err),
    }
}

/// Let the user add or remove foods, starting from the candidate set.
///
/// Options are every catalog identifier; candidates the catalog knows are
/// pre-ticked. Identifiers outside the catalog are not offered and stay in
/// the selection.
pub fn prompt_food_corrections(
    catalog: &NutrientCatalog,
    candidates: &SelectionSet,
) -> Result<SelectionSet> {
    let options = catalog.identifiers();
    let defaults: Vec<bool> = options.iter().map(|id| candidates.contains(id)).collect();

    let picked = MultiSelect::new()
        .with_prompt("Check the detected foods (space to toggle, enter to confirm)")
        .items(&options)
        .defaults(&defaults)
        .interact()?;

    Ok(confirmed_selection(catalog, candidates, &picked))
}

/// Selection after the checklist: the ticked catalog foods plus any
/// candidates the checklist could not show.
fn confirmed_selection(
    catalog: &NutrientCatalog,
    candidates: &SelectionSet,
    picked: &[usize],
) -> SelectionSet {
    let options = catalog.identifiers();
    let mut selection: SelectionSet = picked
        .iter()
        .filter_map(|&i| options.get(i).copied())
        .collect();
    for name in candidates.unknown(catalog) {
        selection.insert(name);
    }
    selection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogEntry;

    fn catalog() -> NutrientCatalog {
        NutrientCatalog::new(vec![
            CatalogEntry::new("nasi_putih", [("Energi (kkal)", 140.0)].into_iter().collect()),
            CatalogEntry::new("ayam", [("Energi (kkal)", 250.0)].into_iter().collect()),
            CatalogEntry::new("tempe", [("Energi (kkal)", 100.0)].into_iter().collect()),
        ])
        .unwrap()
    }

    #[test]
    fn test_confirmed_selection_keeps_unlisted_ids() {
        let catalog = catalog();
        let candidates: SelectionSet = ["ayam", "xyz_unknown"].into_iter().collect();

        // User unticks ayam and ticks nasi_putih and tempe.
        let selection = confirmed_selection(&catalog, &candidates, &[0, 2]);

        assert_eq!(
            selection.iter().collect::<Vec<_>>(),
            vec!["nasi_putih", "tempe", "xyz_unknown"]
        );
    }

    #[test]
    fn test_confirmed_selection_empty_pick() {
        let catalog = catalog();
        let candidates: SelectionSet = ["ayam"].into_iter().collect();
        assert!(confirmed_selection(&catalog, &candidates, &[]).is_empty());
    }
}

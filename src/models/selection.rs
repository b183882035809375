use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::NutrientCatalog;

/// Confirmed tray contents for one analysis.
///
/// A true set: inserting the same identifier twice keeps one copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SelectionSet {
    items: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an identifier. Returns false if it was already present.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.items.insert(name.into())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.items.remove(name)
    }

    /// Apply manual corrections: additions first, then removals.
    ///
    /// Added identifiers are kept even when the catalog does not know them.
    pub fn apply_edits<A, R>(&mut self, add: A, remove: R)
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        for name in add {
            let name = name.as_ref().trim();
            if !name.is_empty() {
                self.insert(name);
            }
        }
        for name in remove {
            self.remove(name.as_ref().trim());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    /// Identifiers the catalog does not recognise.
    pub fn unknown(&self, catalog: &NutrientCatalog) -> Vec<&str> {
        self.iter().filter(|n| !catalog.contains(n)).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

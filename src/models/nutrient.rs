use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered mapping from nutrient name (e.g. "Energi (kkal)") to amount.
///
/// Names keep their declaration order. A name that is absent reads as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutrientVector {
    values: Vec<(String, f64)>,
}

impl NutrientVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vector with every given name mapped to zero, in the given order.
    pub fn zeroed<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vector = Self::new();
        for name in names {
            vector.set(name, 0.0);
        }
        vector
    }

    /// Amount of a nutrient, or 0 when the name is absent.
    #[inline]
    pub fn get(&self, name: &str) -> f64 {
        self.position(name).map(|i| self.values[i].1).unwrap_or(0.0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Set a nutrient amount. New names are appended at the end.
    pub fn set(&mut self, name: impl Into<String>, amount: f64) {
        let name = name.into();
        match self.position(&name) {
            Some(i) => self.values[i].1 = amount,
            None => self.values.push((name, amount)),
        }
    }

    /// Add to a nutrient amount. New names are appended at the end.
    pub fn add(&mut self, name: &str, amount: f64) {
        match self.position(name) {
            Some(i) => self.values[i].1 += amount,
            None => self.values.push((name.to_string(), amount)),
        }
    }

    /// Add every nutrient of `other` into this vector.
    pub fn accumulate(&mut self, other: &NutrientVector) {
        for (name, amount) in other.iter() {
            self.add(name, amount);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First nutrient whose amount is negative or not finite.
    pub fn first_invalid(&self) -> Option<(&str, f64)> {
        self.iter().find(|(_, v)| !v.is_finite() || *v < 0.0)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.values.iter().position(|(n, _)| n == name)
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for NutrientVector {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut vector = Self::new();
        for (name, amount) in iter {
            vector.set(name, amount);
        }
        vector
    }
}

impl Serialize for NutrientVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, amount) in &self.values {
            map.serialize_entry(name, amount)?;
        }
        map.end()
    }
}

struct NutrientVectorVisitor;

impl<'de> Visitor<'de> for NutrientVectorVisitor {
    type Value = NutrientVector;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of nutrient names to amounts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        // Document order is kept; serde_json's own Map would sort the keys.
        let mut vector = NutrientVector::new();
        while let Some((name, amount)) = access.next_entry::<String, f64>()? {
            vector.set(name, amount);
        }
        Ok(vector)
    }
}

impl<'de> Deserialize<'de> for NutrientVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NutrientVectorVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reads_as_zero() {
        let v: NutrientVector = [("Energi (kkal)", 140.0)].into_iter().collect();
        assert_eq!(v.get("Energi (kkal)"), 140.0);
        assert_eq!(v.get("Serat (g)"), 0.0);
        assert!(!v.contains("Serat (g)"));
    }

    #[test]
    fn test_add_keeps_first_seen_order() {
        let mut v = NutrientVector::new();
        v.add("Protein (g)", 3.0);
        v.add("Energi (kkal)", 140.0);
        v.add("Protein (g)", 25.0);

        let names: Vec<&str> = v.names().collect();
        assert_eq!(names, vec!["Protein (g)", "Energi (kkal)"]);
        assert_eq!(v.get("Protein (g)"), 28.0);
    }

    #[test]
    fn test_json_keeps_document_order() {
        let json = r#"{"Serat (g)": 26, "Energi (kkal)": 1825, "Lemak (g)": 60}"#;
        let v: NutrientVector = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = v.names().collect();
        assert_eq!(names, vec!["Serat (g)", "Energi (kkal)", "Lemak (g)"]);

        let back = serde_json::to_string(&v).unwrap();
        assert_eq!(back, r#"{"Serat (g)":26.0,"Energi (kkal)":1825.0,"Lemak (g)":60.0}"#);
    }

    #[test]
    fn test_first_invalid() {
        let ok: NutrientVector = [("a", 0.0), ("b", 1.5)].into_iter().collect();
        assert!(ok.first_invalid().is_none());

        let bad: NutrientVector = [("a", 1.0), ("b", -0.5)].into_iter().collect();
        assert_eq!(bad.first_invalid(), Some(("b", -0.5)));
    }
}

pub mod catalog;
pub mod nutrient;
pub mod profile;
pub mod report;
pub mod selection;

pub use catalog::{CatalogEntry, NutrientCatalog};
pub use nutrient::NutrientVector;
pub use profile::{IntakeProfile, MealFraction, ProfileRegistry};
pub use report::{AnalysisReport, FulfillmentReport, NutrientFulfillment, Verdict};
pub use selection::SelectionSet;

pub mod aggregation;
pub mod analysis;
pub mod constants;
pub mod fulfillment;

pub use aggregation::aggregate;
pub use analysis::{analyze, candidates_from_detection, Corrections, MealContext};
pub use constants::*;
pub use fulfillment::{evaluate, percentage_of, short_nutrient_name};

pub mod cli;
pub mod config;
pub mod detection;
pub mod engine;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod tables;

pub use error::{Result, TrayError};
pub use models::{AnalysisReport, NutrientCatalog, NutrientVector, SelectionSet};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrayError {
    #[error("Failed to load model from {path}: {reason}")]
    ModelLoad { path: String, reason: String },

    #[error("Detection failed: {0}")]
    Detection(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Profile not found: {query}{}", did_you_mean(.suggestion))]
    ProfileNotFound {
        query: String,
        suggestion: Option<String>,
    },

    #[error("Meal fraction must be in (0, 1], got {0}")]
    InvalidMealFraction(f64),

    #[error("Profile '{profile}' targets nutrient '{nutrient}' which the catalog does not carry")]
    SchemaMismatch { profile: String, nutrient: String },
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{}'?)", name),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, TrayError>;

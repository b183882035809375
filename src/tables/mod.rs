mod builtin;
mod persistence;

pub use builtin::{builtin_catalog, builtin_profiles};
pub use persistence::{load_catalog, load_profiles};

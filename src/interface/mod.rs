pub mod prompts;
pub mod render;

pub use prompts::{confirm_profile, is_interactive, prompt_food_corrections, prompt_profile};
pub use render::{
    display_catalog, display_detected, display_empty_selection, display_profiles, display_report,
    display_totals, progress_bar, reports_json,
};

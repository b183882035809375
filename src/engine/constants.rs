/// Share of the daily intake attributed to lunch ("Makan Siang").
pub const LUNCH_MEAL_FRACTION: f64 = 0.35;

/// Percentage at or above which a nutrient counts as met.
pub const MET_THRESHOLD_PERCENT: f64 = 100.0;

/// Boxes below this confidence are dropped by default.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.25;

/// Width of the text progress bar, in cells.
pub const PROGRESS_BAR_WIDTH: usize = 30;

// ─────────────────────────────────────────────────────────────────────────────
// Canonical nutrient schema
// ─────────────────────────────────────────────────────────────────────────────

pub const ENERGY: &str = "Energi (kkal)";
pub const PROTEIN: &str = "Protein (g)";
pub const FAT: &str = "Lemak (g)";
pub const CARBOHYDRATE: &str = "Karbohidrat (g)";
pub const FIBER: &str = "Serat (g)";

/// Nutrient columns of the built-in tables, in display order.
pub const CANONICAL_NUTRIENTS: [&str; 5] = [ENERGY, PROTEIN, FAT, CARBOHYDRATE, FIBER];

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};

use crate::report::Severity;
use crate::score::{self, Band};

/// Table and cell creation helpers
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn band_color(band: Band) -> TableColor {
    match band {
        Band::High => TableColor::Green,
        Band::Medium => TableColor::Yellow,
        Band::Low => TableColor::Red,
    }
}

/// Score cell colored by its band. Thresholds come from `score::classify`,
/// never from a local copy.
pub fn score_cell(score: u8) -> Cell {
    Cell::new(score).fg(band_color(score::classify(score)))
}

pub fn severity_cell(severity: Severity) -> Cell {
    let (text, color) = match severity {
        Severity::High => ("high", TableColor::Red),
        Severity::Medium => ("medium", TableColor::Yellow),
        Severity::Low => ("low", TableColor::Blue),
    };
    Cell::new(text).fg(color)
}

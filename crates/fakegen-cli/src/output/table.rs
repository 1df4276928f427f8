//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// Coverage data for a single locale.
pub struct LocaleCoverage {
    /// Locale identifier (e.g., "de", "en-GB").
    pub locale: String,
    /// Number of source keys the locale defines.
    pub covered: usize,
    /// Source keys the locale does not define.
    pub missing: Vec<String>,
    /// Keys the locale defines that the source does not.
    pub extra: usize,
}

/// Format coverage data as a table.
pub fn format_coverage_table(source_count: usize, coverage: &[LocaleCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Locale", "Coverage", "Missing", "Extra"]);

    for locale in coverage {
        table.add_row(vec![
            locale.locale.clone(),
            format!("{}/{}", locale.covered, source_count),
            locale.missing.len().to_string(),
            locale.extra.to_string(),
        ]);
    }

    table
}

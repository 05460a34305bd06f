// Repository list rendering
use crate::iostreams::ColorScheme;
use crate::models::RepositorySummary;
use crate::table::{TableLayout, TablePrinter};
use crossterm::style::Color;
use std::io::Write;
use tracing::warn;

/// Print repositories as five-line blocks, then an "And N more" footer
///
/// Display is best effort: once we have the data, a broken stdout is
/// logged and otherwise ignored.
pub fn print_repositories(
    out: &mut dyn Write,
    colors: &ColorScheme,
    layout: TableLayout,
    prefix: &str,
    remaining: usize,
    repos: &[RepositorySummary],
) {
    let mut table = TablePrinter::new(layout, *colors);

    for repo in repos {
        table.add_field(repo.full_name(), Some(Color::Green));
        table.end_row();
        table.add_field(format!("  {}", repo.url), None);
        table.end_row();
        table.add_field(format!("  {}", repo.description), Some(Color::DarkGrey));
        table.end_row();

        // Keep this a single field; the stats read as one line
        let stats = format!(
            "  {} stars | {} forks | {}",
            repo.stars, repo.forks, repo.language
        );
        table.add_field(stats, Some(Color::Blue));
        table.end_row();

        table.add_field("", None);
        table.end_row();
    }

    if let Err(e) = table.render(out) {
        warn!("Failed to render repository table: {}", e);
        return;
    }

    if remaining > 0 && layout.is_tty {
        let footer = colors.gray(&format!("{}And {} more", prefix, remaining));
        if let Err(e) = writeln!(out, "{}", footer) {
            warn!("Failed to write footer: {}", e);
        }
    }
}

// src/report.rs
// =============================================================================
// Everything that prints to stdout.
//
// Two output styles, picked by --json:
// - A human-readable table with a share bar per type (our stand-in for the
//   pie chart the web dashboard draws)
// - Pretty-printed JSON for scripts
//
// Diagnostics and warnings go through tracing to stderr, so piping --json
// output into jq keeps working.
// =============================================================================

use anyhow::Result;
use serde::Serialize;

use crate::analyze::{format_bytes, format_bytes_with, ByteBase, SizeBreakdown, TypeAggregate};
use crate::github::{EntryKind, FetchWarning, RepoMetadata, RepoSummary, TreeListing};

const BAR_WIDTH: usize = 30;

/// Everything `analyze --json` emits
#[derive(Debug, Serialize)]
pub struct AnalysisReport<'a> {
    pub repository: &'a str,
    pub branch: &'a str,
    /// Directory the analysis was limited to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<FetchWarning>,
    pub rows: &'a SizeBreakdown,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// Prints the repository summary shown above the table
pub fn print_header(
    metadata: &RepoMetadata,
    listing: &TreeListing,
    breakdown: &SizeBreakdown,
    base: ByteBase,
) {
    println!("📦 {}", metadata.full_name);
    if let Some(description) = metadata.description.as_deref().filter(|d| !d.is_empty()) {
        println!("   {}", description);
    }
    match metadata.default_branch.as_deref() {
        Some(default) if default != listing.branch => {
            println!("🌿 Branch: {} (GitHub default is {})", listing.branch, default)
        }
        _ => println!("🌿 Branch: {}", listing.branch),
    }

    let submodules = listing
        .entries
        .iter()
        .filter(|e| e.kind == EntryKind::Commit)
        .count();
    println!(
        "📄 {} file(s) of {} type(s) in {} director(ies), {} submodule(s)",
        breakdown.total().file_count,
        breakdown.types().len(),
        listing.trees().count(),
        submodules
    );

    // GitHub's own figure is in KB and includes history, so it is usually
    // larger than the sum of the files on the branch
    println!(
        "📊 Repository Size: {} (GitHub reports {} including history)",
        breakdown.total().formatted_size,
        format_bytes_with(metadata.size.saturating_mul(1024), base)
    );

    if let Some(warning) = listing.warning() {
        println!("⚠️  {}", warning);
    }
    println!();
}

// Prints the size table, Total row first
pub fn print_table(breakdown: &SizeBreakdown) {
    println!(
        "{:<16} {:>8} {:>12}  {:<width$}",
        "TYPE",
        "FILES",
        "SIZE",
        "SHARE",
        width = BAR_WIDTH + 8
    );
    println!("{}", "=".repeat(16 + 1 + 8 + 1 + 12 + 2 + BAR_WIDTH + 8));

    let total_bytes = breakdown.total().total_bytes;
    for row in breakdown.rows() {
        println!("{}", format_row(row, total_bytes));
    }
    println!();
}

fn format_row(row: &TypeAggregate, total_bytes: u64) -> String {
    let file_type = if row.file_type.chars().count() > 15 {
        let short: String = row.file_type.chars().take(12).collect();
        format!("{}...", short)
    } else {
        row.file_type.clone()
    };

    let share = if row.is_total() {
        String::new()
    } else {
        format!(
            "{} {:>5.1}%",
            share_bar(row.total_bytes, total_bytes, BAR_WIDTH),
            percent(row.total_bytes, total_bytes)
        )
    };

    format!(
        "{:<16} {:>8} {:>12}  {}",
        file_type, row.file_count, row.formatted_size, share
    )
    .trim_end()
    .to_string()
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// A bar of `width` cells, filled in proportion to part/whole
///
/// Any non-zero share gets at least one cell so small types stay visible.
pub fn share_bar(part: u64, whole: u64, width: usize) -> String {
    let filled = if whole == 0 || part == 0 {
        0
    } else {
        let cells = (part as f64 / whole as f64 * width as f64).round() as usize;
        cells.clamp(1, width)
    };

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

// Prints a user's repositories, one per line
pub fn print_repos(login: &str, repos: &[RepoSummary]) {
    println!("📚 {} public repositor(ies) for {}\n", repos.len(), login);

    for repo in repos {
        let fork = if repo.fork { " (fork)" } else { "" };
        println!(
            "  {:<40} {:>12}{}",
            repo.name,
            format_bytes(repo.size.saturating_mul(1024)),
            fork
        );
        if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
            println!("      {}", description);
        }
        if let Some(url) = repo.html_url.as_deref() {
            println!("      {}", url);
        }
    }
}

pub fn print_readme(readme: Option<&str>) {
    println!("📖 Repository Readme:");
    println!("{}", "-".repeat(60));
    match readme {
        Some(text) => println!("{}", text),
        None => println!("(this repository has no README)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::aggregate;
    use crate::github::TreeEntry;

    #[test]
    fn test_share_bar() {
        assert_eq!(share_bar(0, 100, 4), "░░░░");
        assert_eq!(share_bar(50, 100, 4), "██░░");
        assert_eq!(share_bar(100, 100, 4), "████");
        // tiny shares still show up
        assert_eq!(share_bar(1, 1_000_000, 4), "█░░░");
        assert_eq!(share_bar(5, 0, 4), "░░░░");
    }

    #[test]
    fn test_format_row() {
        let breakdown = aggregate(&vec![
            TreeEntry::blob("a.rs", 750),
            TreeEntry::blob("b.md", 250),
        ]);

        let total_line = format_row(breakdown.total(), 1000);
        assert!(total_line.starts_with("Total"));
        assert!(total_line.ends_with("1.00 KB"));

        let rs_line = format_row(&breakdown.types()[0], 1000);
        assert!(rs_line.starts_with("rs"));
        assert!(rs_line.ends_with("75.0%"));
    }

    #[test]
    fn test_json_report_shape() {
        let breakdown = aggregate(&vec![TreeEntry::blob(".env", 5)]);
        let report = AnalysisReport {
            repository: "a/b",
            branch: "main",
            path: None,
            warning: Some(FetchWarning::TruncatedResult {
                limit: 100_000,
                received: 1,
            }),
            rows: &breakdown,
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["repository"], "a/b");
        assert!(value.get("path").is_none());
        assert_eq!(value["warning"]["warning"], "truncated_result");
        assert_eq!(value["rows"][0]["type"], "Total");
        assert_eq!(value["rows"][1]["type"], "hidden");
        assert_eq!(value["rows"][1]["total_bytes"], 5);
    }
}

// src/analyze/aggregate.rs
// =============================================================================
// Groups a repository's files by type and adds up their sizes.
//
// How a file's type is chosen (classify_type):
// 1. Path starts with "."          -> "hidden"   (covers everything under .github/)
// 2. File name contains a "."      -> text after the last "."   ("src/main.rs" -> "rs")
// 3. Anything else                 -> "(none)"   ("Makefile", "bin/run")
//
// Only the file name is searched for a dot, so "v1.2/LICENSE" is "(none)",
// not "2/LICENSE".
//
// Output order: the synthetic "Total" row first, then one row per type from
// largest to smallest (ties broken by type name so output is stable).
// =============================================================================

use std::collections::HashMap;

use serde::Serialize;

use super::format::{format_bytes_with, ByteBase};
use crate::github::TreeEntry;

pub const HIDDEN_TYPE: &str = "hidden";
pub const NO_EXTENSION_TYPE: &str = "(none)";
pub const TOTAL_ROW: &str = "Total";

/// One row of the size table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeAggregate {
    #[serde(rename = "type")]
    pub file_type: String,
    pub total_bytes: u64,
    pub file_count: usize,
    pub formatted_size: String,
}

impl TypeAggregate {
    pub fn is_total(&self) -> bool {
        self.file_type == TOTAL_ROW
    }
}

/// Aggregation result: the Total row followed by per-type rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SizeBreakdown {
    rows: Vec<TypeAggregate>,
}

impl SizeBreakdown {
    /// All rows, Total first
    pub fn rows(&self) -> &[TypeAggregate] {
        &self.rows
    }

    pub fn total(&self) -> &TypeAggregate {
        // aggregate() always pushes the Total row first
        &self.rows[0]
    }

    /// Per-type rows without the Total row
    pub fn types(&self) -> &[TypeAggregate] {
        &self.rows[1..]
    }
}

/// Works out which type bucket a path belongs to
pub fn classify_type(path: &str) -> &str {
    if path.starts_with('.') {
        return HIDDEN_TYPE;
    }

    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext,
        _ => NO_EXTENSION_TYPE,
    }
}

/// Aggregates sizes per type using decimal units
pub fn aggregate<'a, I>(entries: I) -> SizeBreakdown
where
    I: IntoIterator<Item = &'a TreeEntry>,
{
    aggregate_with(entries, ByteBase::Decimal)
}

// Sums bytes and counts files for each type, then adds a Total row
//
// Non-blob entries (directories, submodules) are skipped; a blob without
// a size counts as 0 bytes.
pub fn aggregate_with<'a, I>(entries: I, base: ByteBase) -> SizeBreakdown
where
    I: IntoIterator<Item = &'a TreeEntry>,
{
    let mut groups: HashMap<&str, (u64, usize)> = HashMap::new();

    for entry in entries.into_iter().filter(|e| e.is_blob()) {
        let group = groups.entry(classify_type(&entry.path)).or_default();
        group.0 += entry.size.unwrap_or(0);
        group.1 += 1;
    }

    let mut types: Vec<TypeAggregate> = groups
        .into_iter()
        .map(|(file_type, (total_bytes, file_count))| TypeAggregate {
            file_type: file_type.to_string(),
            total_bytes,
            file_count,
            formatted_size: format_bytes_with(total_bytes, base),
        })
        .collect();

    types.sort_by(|a, b| {
        b.total_bytes
            .cmp(&a.total_bytes)
            .then_with(|| a.file_type.cmp(&b.file_type))
    });

    let byte_sum: u64 = types.iter().map(|t| t.total_bytes).sum();
    let total_files: usize = types.iter().map(|t| t.file_count).sum();

    let mut rows = Vec::with_capacity(types.len() + 1);
    rows.push(TypeAggregate {
        file_type: TOTAL_ROW.to_string(),
        total_bytes: byte_sum,
        file_count: total_files,
        formatted_size: format_bytes_with(byte_sum, base),
    });
    rows.extend(types);

    SizeBreakdown { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::TreeEntry;

    fn row<'a>(breakdown: &'a SizeBreakdown, file_type: &str) -> &'a TypeAggregate {
        breakdown
            .rows()
            .iter()
            .find(|r| r.file_type == file_type)
            .unwrap_or_else(|| panic!("no row for {}", file_type))
    }

    #[test]
    fn test_classify_type() {
        assert_eq!(classify_type("a.txt"), "txt");
        assert_eq!(classify_type("src/main.rs"), "rs");
        assert_eq!(classify_type("archive.tar.gz"), "gz");
        assert_eq!(classify_type(".gitignore"), "hidden");
        assert_eq!(classify_type(".github/workflows/ci.yml"), "hidden");
        assert_eq!(classify_type("Makefile"), "(none)");
        assert_eq!(classify_type("v1.2/LICENSE"), "(none)");
        assert_eq!(classify_type("trailing."), "(none)");
    }

    #[test]
    fn test_basic_aggregation() {
        let entries = vec![
            TreeEntry::blob("a.txt", 10),
            TreeEntry::blob("b.txt", 20),
            TreeEntry::blob(".gitignore", 5),
        ];

        let breakdown = aggregate(&entries);
        assert_eq!(breakdown.rows().len(), 3);

        let txt = row(&breakdown, "txt");
        assert_eq!((txt.total_bytes, txt.file_count), (30, 2));

        let hidden = row(&breakdown, "hidden");
        assert_eq!((hidden.total_bytes, hidden.file_count), (5, 1));

        let total = breakdown.total();
        assert_eq!(total.file_type, "Total");
        assert_eq!((total.total_bytes, total.file_count), (35, 3));
        assert_eq!(total.formatted_size, "35.00 B");
    }

    #[test]
    fn test_total_pinned_first_then_descending() {
        let entries = vec![
            TreeEntry::blob("x.md", 1),
            TreeEntry::blob("y.rs", 3000),
            TreeEntry::blob("z.toml", 3000),
            TreeEntry::blob("w.json", 50),
        ];

        let breakdown = aggregate(&entries);
        let order: Vec<&str> = breakdown
            .rows()
            .iter()
            .map(|r| r.file_type.as_str())
            .collect();
        assert_eq!(order, vec!["Total", "rs", "toml", "json", "md"]);
    }

    #[test]
    fn test_totals_match_sum_of_rows() {
        let entries: Vec<TreeEntry> = (0..200u64)
            .map(|i| {
                let ext = ["rs", "py", "md", "lock"][(i % 4) as usize];
                let path = if i % 17 == 0 {
                    format!(".hidden/{}", i)
                } else if i % 13 == 0 {
                    format!("bin/tool{}", i)
                } else {
                    format!("dir{}/file{}.{}", i % 5, i, ext)
                };
                TreeEntry::blob(path, i * 37 + 1)
            })
            .collect();

        let breakdown = aggregate(&entries);
        let bytes: u64 = breakdown.types().iter().map(|r| r.total_bytes).sum();
        let files: usize = breakdown.types().iter().map(|r| r.file_count).sum();

        assert!(breakdown.types().iter().all(|r| !r.is_total()));
        assert_eq!(breakdown.total().total_bytes, bytes);
        assert_eq!(breakdown.total().file_count, files);
        assert_eq!(files, 200);
    }

    #[test]
    fn test_directories_and_sizeless_blobs() {
        let entries = vec![
            TreeEntry {
                path: "src".to_string(),
                kind: crate::github::EntryKind::Tree,
                size: None,
            },
            TreeEntry {
                path: "empty.rs".to_string(),
                kind: crate::github::EntryKind::Blob,
                size: None,
            },
        ];

        let breakdown = aggregate(&entries);
        assert_eq!(breakdown.total().file_count, 1);
        assert_eq!(breakdown.total().total_bytes, 0);
        assert_eq!(row(&breakdown, "rs").file_count, 1);
    }

    #[test]
    fn test_empty_input_still_has_total() {
        let breakdown = aggregate(&Vec::<TreeEntry>::new());
        assert_eq!(breakdown.rows().len(), 1);
        assert!(breakdown.types().is_empty());
        assert_eq!(breakdown.total().formatted_size, "0.00 B");
    }

    #[test]
    fn test_binary_base() {
        let entries = vec![TreeEntry::blob("big.bin", 2048)];
        let breakdown = aggregate_with(&entries, ByteBase::Binary);
        assert_eq!(breakdown.total().formatted_size, "2.00 KB");
    }
}

// src/analyze/mod.rs
// =============================================================================
// Size analysis of a fetched repository tree.
//
// Submodules:
// - aggregate: group files by type, sum bytes and counts, add a Total row
// - format:    byte counts -> "1.23 KB"
//
// Nothing in here does I/O; it works on the TreeEntry list github::fetch_tree
// already returned.
// =============================================================================

mod aggregate;
mod format;

pub use aggregate::{aggregate, aggregate_with, SizeBreakdown, TypeAggregate};
pub use format::{format_bytes, format_bytes_with, ByteBase};

// src/analyze/format.rs
// =============================================================================
// Human-readable byte counts.
//
// Decimal mode steps by 1000 (what GitHub and most file browsers show);
// binary mode steps by 1024. Either way the value is printed with two
// decimals, and anything still >= 1000 TB (1024 TiB) is shown in PB.
//
// Examples (decimal):
//   999        -> "999.00 B"
//   1234       -> "1.23 KB"
//   1_000_000  -> "1.00 MB"
// =============================================================================

use serde::Serialize;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteBase {
    /// Powers of 1000
    #[default]
    Decimal,
    /// Powers of 1024
    Binary,
}

impl ByteBase {
    fn step(self) -> f64 {
        match self {
            ByteBase::Decimal => 1000.0,
            ByteBase::Binary => 1024.0,
        }
    }
}

/// Formats a byte count using decimal (base-1000) units
pub fn format_bytes(bytes: u64) -> String {
    format_bytes_with(bytes, ByteBase::Decimal)
}

pub fn format_bytes_with(bytes: u64, base: ByteBase) -> String {
    let step = base.step();
    let mut value = bytes as f64;

    for unit in UNITS {
        if value < step {
            return format!("{:.2} {}", value, unit);
        }
        value /= step;
    }

    format!("{:.2} PB", value)
}

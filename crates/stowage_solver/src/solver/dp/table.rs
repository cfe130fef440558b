use std::fmt::Display;

use serde::Serialize;

use super::entry::Entry;

/// Entry count and estimated byte footprint of a memoization table.
///
/// Comparing table strategies' memory profile is a first-class output of
/// the DP solvers, so both backends keep this cheap to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub entries: usize,
    pub bytes: usize,
}

impl Display for TableStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const KIB: usize = 1024;
        const MIB: usize = 1024 * 1024;

        write!(f, "Memory used for {} entries: ", self.entries)?;
        if self.bytes < KIB {
            write!(f, "{} B", self.bytes)
        } else if self.bytes < MIB {
            write!(f, "{} KB", self.bytes / KIB)
        } else {
            write!(f, "{} MB", self.bytes / MIB)
        }
    }
}

/// Per-(item index, residual capacity) memoization store.
///
/// `get` returns the NOT_COMPUTED sentinel for absent states; stored
/// entries are immutable and valid for the rest of the same solve call.
pub trait DpTable {
    fn get(&self, i: u32, w: u32) -> &Entry;

    fn set(&mut self, i: u32, w: u32, entry: Entry);

    fn stats(&self) -> TableStats;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_format_scales_units() {
        let small = TableStats {
            entries: 3,
            bytes: 500,
        };
        assert_eq!(small.to_string(), "Memory used for 3 entries: 500 B");

        let medium = TableStats {
            entries: 100,
            bytes: 8 * 1024,
        };
        assert_eq!(medium.to_string(), "Memory used for 100 entries: 8 KB");

        let large = TableStats {
            entries: 1_000_000,
            bytes: 3 * 1024 * 1024,
        };
        assert_eq!(large.to_string(), "Memory used for 1000000 entries: 3 MB");
    }
}

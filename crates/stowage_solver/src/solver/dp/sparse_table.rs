use fxhash::FxHashMap;

use super::{
    entry::{Entry, TieBreak},
    table::{DpTable, TableStats},
};

/// Hash-keyed (item index, residual capacity) table, populated lazily.
///
/// Memory scales with the number of *visited* states, which pays off for
/// top-down recursion on instances where most (i, w) pairs are never
/// reached.
pub struct SparseTable {
    entries: FxHashMap<(u32, u32), Entry>,
    heap_bytes: usize,
    sentinel: Entry,
}

impl SparseTable {
    pub fn new(tie_break: TieBreak) -> Self {
        SparseTable {
            entries: FxHashMap::default(),
            heap_bytes: 0,
            sentinel: Entry::not_computed(tie_break),
        }
    }
}

impl DpTable for SparseTable {
    fn get(&self, i: u32, w: u32) -> &Entry {
        self.entries.get(&(i, w)).unwrap_or(&self.sentinel)
    }

    fn set(&mut self, i: u32, w: u32, entry: Entry) {
        self.heap_bytes += entry.heap_bytes();
        if let Some(old) = self.entries.insert((i, w), entry) {
            self.heap_bytes -= old.heap_bytes();
        }
    }

    fn stats(&self) -> TableStats {
        // Per-entry cost follows the tie-break variant, not the enum's
        // max-variant size.
        let per_entry = std::mem::size_of::<(u32, u32)>() + self.sentinel.footprint_bytes();
        TableStats {
            entries: self.entries.len(),
            bytes: self.entries.len() * per_entry + self.heap_bytes,
        }
    }
}

use std::cmp::Ordering;

use serde::Serialize;
use smallvec::SmallVec;

use crate::problem::item::Item;

/// Sorted id ranks of the items a `Lex` entry has committed to.
pub type RankList = SmallVec<[u32; 8]>;

/// Profit value of the NOT_COMPUTED sentinel, distinguishing "never
/// computed" from "computed, value 0". Sentinels never take part in
/// comparisons.
pub const NOT_COMPUTED_PROFIT: u64 = u64::MAX;

/// Which tie-break state a table entry carries. Picked once per solve call;
/// richer policies cost strictly more memory per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TieBreak {
    /// Profit only. Equal-profit solutions are interchangeable.
    ProfitOnly,
    /// Profit, then lower total weight, then fewer items.
    WeightCount,
    /// `WeightCount` plus the lexicographically smallest sorted id sequence.
    Lexicographic,
}

/// One memoized subproblem result.
///
/// All entries of one table share a single variant, chosen by the call's
/// [`TieBreak`] policy, so comparisons never need runtime capability checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Profit {
        profit: u64,
    },
    Compact {
        profit: u64,
        weight: u64,
        count: u32,
    },
    Lex {
        profit: u64,
        weight: u64,
        count: u32,
        ranks: RankList,
    },
}

impl Entry {
    pub fn zero(tie_break: TieBreak) -> Self {
        match tie_break {
            TieBreak::ProfitOnly => Entry::Profit { profit: 0 },
            TieBreak::WeightCount => Entry::Compact {
                profit: 0,
                weight: 0,
                count: 0,
            },
            TieBreak::Lexicographic => Entry::Lex {
                profit: 0,
                weight: 0,
                count: 0,
                ranks: RankList::new(),
            },
        }
    }

    pub fn not_computed(tie_break: TieBreak) -> Self {
        match Entry::zero(tie_break) {
            Entry::Profit { .. } => Entry::Profit {
                profit: NOT_COMPUTED_PROFIT,
            },
            Entry::Compact { .. } => Entry::Compact {
                profit: NOT_COMPUTED_PROFIT,
                weight: 0,
                count: 0,
            },
            Entry::Lex { .. } => Entry::Lex {
                profit: NOT_COMPUTED_PROFIT,
                weight: 0,
                count: 0,
                ranks: RankList::new(),
            },
        }
    }

    pub fn is_not_computed(&self) -> bool {
        self.profit() == NOT_COMPUTED_PROFIT
    }

    pub fn profit(&self) -> u64 {
        match self {
            Entry::Profit { profit }
            | Entry::Compact { profit, .. }
            | Entry::Lex { profit, .. } => *profit,
        }
    }

    /// The include-step of the recurrence: this entry plus one item, whose
    /// id rank is inserted keeping the rank list sorted.
    pub fn with_item(&self, item: &Item, rank: u32) -> Self {
        match self {
            Entry::Profit { profit } => Entry::Profit {
                profit: profit + u64::from(item.profit()),
            },
            Entry::Compact {
                profit,
                weight,
                count,
            } => Entry::Compact {
                profit: profit + u64::from(item.profit()),
                weight: weight + u64::from(item.weight()),
                count: count + 1,
            },
            Entry::Lex {
                profit,
                weight,
                count,
                ranks,
            } => {
                let mut ranks = ranks.clone();
                let at = ranks.partition_point(|&r| r < rank);
                ranks.insert(at, rank);
                Entry::Lex {
                    profit: profit + u64::from(item.profit()),
                    weight: weight + u64::from(item.weight()),
                    count: count + 1,
                    ranks,
                }
            }
        }
    }

    /// Bytes one entry of this variant costs a table: discriminant plus the
    /// active fields only, so cheaper policies report cheaper tables even
    /// though the enum itself is sized by its largest variant. Spilled
    /// rank-list bytes are accounted separately via [`Entry::heap_bytes`].
    pub fn footprint_bytes(&self) -> usize {
        const TAG: usize = std::mem::size_of::<u64>();
        match self {
            Entry::Profit { .. } => TAG + std::mem::size_of::<u64>(),
            Entry::Compact { .. } => {
                TAG + 2 * std::mem::size_of::<u64>() + std::mem::size_of::<u32>()
            }
            Entry::Lex { .. } => {
                TAG + 2 * std::mem::size_of::<u64>()
                    + std::mem::size_of::<u32>()
                    + std::mem::size_of::<RankList>()
            }
        }
    }

    /// Bytes this entry owns outside of its own discriminated size (a
    /// spilled rank list). Part of the table memory accounting.
    pub fn heap_bytes(&self) -> usize {
        match self {
            Entry::Lex { ranks, .. } if ranks.spilled() => {
                ranks.capacity() * std::mem::size_of::<u32>()
            }
            _ => 0,
        }
    }
}

/// "Greater" means "better": higher profit, then lower weight, then fewer
/// items, then lexicographically smaller rank sequence.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        debug_assert!(!self.is_not_computed() && !other.is_not_computed());

        match (self, other) {
            (Entry::Profit { profit: a }, Entry::Profit { profit: b }) => a.cmp(b),
            (
                Entry::Compact {
                    profit: ap,
                    weight: aw,
                    count: ac,
                },
                Entry::Compact {
                    profit: bp,
                    weight: bw,
                    count: bc,
                },
            ) => ap.cmp(bp).then(bw.cmp(aw)).then(bc.cmp(ac)),
            (
                Entry::Lex {
                    profit: ap,
                    weight: aw,
                    count: ac,
                    ranks: ar,
                },
                Entry::Lex {
                    profit: bp,
                    weight: bw,
                    count: bc,
                    ranks: br,
                },
            ) => ap
                .cmp(bp)
                .then(bw.cmp(aw))
                .then(bc.cmp(ac))
                .then_with(|| br.cmp(ar)),
            _ => {
                debug_assert!(false, "mixed entry variants in one table");
                self.profit().cmp(&other.profit())
            }
        }
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

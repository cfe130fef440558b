use fixedbitset::FixedBitSet;

use crate::problem::item::{Item, ItemIdx};

use super::deadline::Deadline;

/// Best complete assignment found so far by one search.
#[derive(Debug, Clone)]
pub(crate) struct BestAssignment {
    pub profit: u64,
    pub weight: u64,
    pub count: u32,
    pub picked: FixedBitSet,
}

/// Mutable state threaded through one recursive or iterative search:
/// the current inclusion bitmap, the best-so-far holder and the cooperative
/// timeout flag. Owned exclusively by one solve call's stack.
///
/// Candidates are ranked by the four-level order: higher profit, then lower
/// weight, then fewer items, then lexicographically smaller sorted id
/// sequence (compared through precomputed id ranks).
pub(crate) struct SearchContext<'a> {
    items: &'a [Item],
    capacity: u64,
    ranks: &'a [u32],
    deadline: Deadline,
    timed_out: bool,
    current: FixedBitSet,
    best: BestAssignment,
}

impl<'a> SearchContext<'a> {
    pub fn new(items: &'a [Item], capacity: u64, ranks: &'a [u32], deadline: Deadline) -> Self {
        let n = items.len();
        SearchContext {
            items,
            capacity,
            ranks,
            deadline,
            timed_out: false,
            current: FixedBitSet::with_capacity(n),
            // The empty selection is itself valid, so it is the baseline.
            best: BestAssignment {
                profit: 0,
                weight: 0,
                count: 0,
                picked: FixedBitSet::with_capacity(n),
            },
        }
    }

    pub fn items(&self) -> &'a [Item] {
        self.items
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Polls the deadline; returns true once the search must unwind.
    pub fn check_deadline(&mut self) -> bool {
        if !self.timed_out && self.deadline.expired() {
            self.timed_out = true;
        }
        self.timed_out
    }

    pub fn best_profit(&self) -> u64 {
        self.best.profit
    }

    pub fn include(&mut self, index: usize) {
        self.current.set(index, true);
    }

    pub fn exclude(&mut self, index: usize) {
        self.current.set(index, false);
    }

    /// Replaces the current bitmap with the bits of `mask` (subset
    /// enumeration order).
    pub fn load_mask(&mut self, mask: u128) {
        self.current.clear();
        for i in 0..self.items.len() {
            if mask & (1u128 << i) != 0 {
                self.current.set(i, true);
            }
        }
    }

    /// Offers the current bitmap as a complete assignment.
    pub fn offer_current(&mut self, profit: u64, weight: u64) {
        let count = self.current.count_ones(..) as u32;
        if self.candidate_is_better(profit, weight, count, &self.current) {
            self.best = BestAssignment {
                profit,
                weight,
                count,
                picked: self.current.clone(),
            };
        }
    }

    /// Offers an externally built assignment, e.g. the greedy seed that
    /// primes branch-and-bound before the search starts.
    pub fn offer_seed(&mut self, picked: FixedBitSet, profit: u64, weight: u64) {
        let count = picked.count_ones(..) as u32;
        if self.candidate_is_better(profit, weight, count, &picked) {
            self.best = BestAssignment {
                profit,
                weight,
                count,
                picked,
            };
        }
    }

    fn candidate_is_better(
        &self,
        profit: u64,
        weight: u64,
        count: u32,
        candidate: &FixedBitSet,
    ) -> bool {
        if profit != self.best.profit {
            return profit > self.best.profit;
        }
        if weight != self.best.weight {
            return weight < self.best.weight;
        }
        if count != self.best.count {
            return count < self.best.count;
        }
        self.sorted_ranks(candidate) < self.sorted_ranks(&self.best.picked)
    }

    fn sorted_ranks(&self, picked: &FixedBitSet) -> Vec<u32> {
        let mut ranks: Vec<u32> = picked.ones().map(|i| self.ranks[i]).collect();
        ranks.sort_unstable();
        ranks
    }

    pub fn best_selection(&self) -> Vec<Item> {
        self.best
            .picked
            .ones()
            .map(|i| self.items[ItemIdx::new(i)].clone())
            .collect()
    }
}

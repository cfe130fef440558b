use std::time::Duration;

use crate::{
    problem::{item::Item, knapsack_problem::KnapsackProblem},
    solver::{deadline::Deadline, outcome::SolveOutcome, strategy::Strategy},
};

use super::{
    entry::{Entry, TieBreak},
    sparse_table::SparseTable,
    table::DpTable,
};

/// Top-down memoized DP over the sparse table.
///
/// Mirrors the bottom-up recurrence but only ever materializes the
/// (item index, residual capacity) states the recursion actually reaches,
/// which is where the sparse backend's lazy memory profile pays off.
/// Reconstruction reuses the same memo, computing missing states on demand.
pub struct TopDownDp {
    tie_break: TieBreak,
}

impl TopDownDp {
    pub fn new(tie_break: TieBreak) -> Self {
        TopDownDp { tie_break }
    }
}

impl Default for TopDownDp {
    fn default() -> Self {
        TopDownDp::new(TieBreak::ProfitOnly)
    }
}

struct Evaluation<'a> {
    items: &'a [Item],
    ranks: &'a [u32],
    tie_break: TieBreak,
    table: SparseTable,
    deadline: Deadline,
    timed_out: bool,
}

impl Evaluation<'_> {
    /// Memoized recurrence. Once `timed_out` is set every frame unwinds
    /// without storing, so no poisoned entry survives a timeout.
    fn compute(&mut self, i: u32, w: u32) -> Entry {
        if self.timed_out || self.deadline.expired() {
            self.timed_out = true;
            return Entry::zero(self.tie_break);
        }

        if i == 0 || w == 0 {
            return Entry::zero(self.tie_break);
        }

        let cached = self.table.get(i, w);
        if !cached.is_not_computed() {
            return cached.clone();
        }

        let item = &self.items[i as usize - 1];
        let result = if item.weight() > w {
            self.compute(i - 1, w)
        } else {
            let include = self
                .compute(i - 1, w - item.weight())
                .with_item(item, self.ranks[i as usize - 1]);
            let exclude = self.compute(i - 1, w);
            if include > exclude { include } else { exclude }
        };

        if self.timed_out {
            return Entry::zero(self.tie_break);
        }

        self.table.set(i, w, result.clone());
        result
    }
}

impl Strategy for TopDownDp {
    fn name(&self) -> &'static str {
        "DP (sparse table)"
    }

    fn solve(&self, problem: &KnapsackProblem, timeout: Duration) -> SolveOutcome {
        let deadline = Deadline::new(timeout);

        if problem.is_infeasible() {
            return SolveOutcome::infeasible(deadline.elapsed());
        }

        let items = problem.items();
        let n = items.len() as u32;
        let capacity = problem.capacity();

        let mut eval = Evaluation {
            items,
            ranks: problem.lex_ranks(),
            tie_break: self.tie_break,
            table: SparseTable::new(self.tie_break),
            deadline,
            timed_out: false,
        };

        let root = eval.compute(n, capacity);
        if eval.timed_out {
            return SolveOutcome::timed_out(deadline.elapsed())
                .with_table_stats(eval.table.stats());
        }

        let mut selected = Vec::new();
        let (mut i, mut w) = (n, capacity);
        while i > 0 && w > 0 {
            let cell = eval.compute(i, w);
            let excluded = eval.compute(i - 1, w);
            if eval.timed_out {
                return SolveOutcome::timed_out(deadline.elapsed())
                    .with_table_stats(eval.table.stats());
            }
            if cell != excluded {
                let item = &items[i as usize - 1];
                selected.push(item.clone());
                w -= item.weight();
            }
            i -= 1;
        }
        selected.reverse();

        SolveOutcome::solved(root.profit(), selected, deadline.elapsed())
            .with_table_stats(eval.table.stats())
    }
}

use std::time::Duration;

use jiff::Timestamp;
use serde::Serialize;

use crate::problem::item::Item;

use super::dp::table::TableStats;

/// Diagnostic status of one solve call.
///
/// A legitimate zero-profit optimum reports `Solved`, never a timeout
/// variant, so the two are always distinguishable to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SolveStatus {
    /// The search ran to completion; the reported profit is the strategy's
    /// answer (optimal for the exact solvers, best-effort for greedy).
    Solved,
    /// The deadline expired before the search finished.
    TimedOut,
    /// Branch-and-bound only: both ordering phases exhausted their half of
    /// the budget.
    DualTimeout,
    /// Zero items or zero capacity; the search was never entered.
    Infeasible,
    /// External collaborator (ILP bridge) failure. Native solvers never
    /// produce this.
    Failed,
}

impl SolveStatus {
    pub fn is_timeout(&self) -> bool {
        matches!(self, SolveStatus::TimedOut | SolveStatus::DualTimeout)
    }
}

/// The uniform result shape every strategy returns.
#[derive(Debug, Clone, Serialize)]
pub struct SolveOutcome {
    pub profit: u64,
    pub selection: Vec<Item>,
    pub status: SolveStatus,
    pub elapsed: Duration,
    /// Memoization footprint, present for the DP strategies only.
    pub table_stats: Option<TableStats>,
    pub finished_at: Timestamp,
}

impl SolveOutcome {
    pub fn solved(profit: u64, selection: Vec<Item>, elapsed: Duration) -> Self {
        Self::with_status(profit, selection, SolveStatus::Solved, elapsed)
    }

    pub fn infeasible(elapsed: Duration) -> Self {
        Self::with_status(0, Vec::new(), SolveStatus::Infeasible, elapsed)
    }

    pub fn timed_out(elapsed: Duration) -> Self {
        Self::with_status(0, Vec::new(), SolveStatus::TimedOut, elapsed)
    }

    pub fn dual_timeout(elapsed: Duration) -> Self {
        Self::with_status(0, Vec::new(), SolveStatus::DualTimeout, elapsed)
    }

    pub fn failed(elapsed: Duration) -> Self {
        Self::with_status(0, Vec::new(), SolveStatus::Failed, elapsed)
    }

    fn with_status(
        profit: u64,
        selection: Vec<Item>,
        status: SolveStatus,
        elapsed: Duration,
    ) -> Self {
        SolveOutcome {
            profit,
            selection,
            status,
            elapsed,
            table_stats: None,
            finished_at: Timestamp::now(),
        }
    }

    pub fn with_table_stats(mut self, stats: TableStats) -> Self {
        self.table_stats = Some(stats);
        self
    }

    pub fn total_weight(&self) -> u64 {
        self.selection
            .iter()
            .map(|item| u64::from(item.weight()))
            .sum()
    }

    /// Human-readable report with the three payload facts: profit, timing
    /// and (for DP strategies) table memory.
    pub fn diagnostic(&self, strategy: &str) -> String {
        let mut message = match self.status {
            SolveStatus::Solved => format!(
                "[{strategy}] Execution time: {:?} | Profit: {}",
                self.elapsed, self.profit
            ),
            SolveStatus::TimedOut => {
                format!("[{strategy}] Timeout after {:?}.", self.elapsed)
            }
            SolveStatus::DualTimeout => format!(
                "[{strategy}] Timeout after both sort orders ({:?} total).",
                self.elapsed
            ),
            SolveStatus::Infeasible => {
                format!("[{strategy}] Infeasible input: no items or zero capacity.")
            }
            SolveStatus::Failed => {
                format!("[{strategy}] External solver failed after {:?}.", self.elapsed)
            }
        };

        if let Some(stats) = &self.table_stats {
            message.push_str(&format!(" | {stats}"));
        }

        message
    }
}

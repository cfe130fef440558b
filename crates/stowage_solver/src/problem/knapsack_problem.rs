use fxhash::FxHashSet;
use thiserror::Error;

use super::{container::Container, item::Item};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProblemError {
    #[error("item {id} has zero weight")]
    ZeroWeight { id: String },

    #[error("item {id} has zero profit")]
    ZeroProfit { id: String },

    #[error("duplicate item id {id}")]
    DuplicateId { id: String },
}

/// One validated 0/1 knapsack instance.
///
/// Construction is the data-supplier boundary: zero weights, zero profits and
/// duplicate ids are rejected here, so the solvers may assume every item is
/// well formed. An empty catalog or a zero-capacity container is a
/// *feasibility* question, not a construction error; solvers answer those
/// with an infeasible outcome.
#[derive(Debug)]
pub struct KnapsackProblem {
    items: Vec<Item>,
    container: Container,
    lex_ranks: Vec<u32>,
}

/// Rank of each item's id within the lexicographically sorted id list.
///
/// Comparing two selections by their sorted rank sequences is then identical
/// to comparing their sorted id sequences, without touching strings on the
/// hot path.
pub(crate) fn id_ranks(items: &[Item]) -> Vec<u32> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| items[a].id().cmp(items[b].id()));

    let mut ranks = vec![0u32; items.len()];
    for (rank, idx) in order.into_iter().enumerate() {
        ranks[idx] = rank as u32;
    }
    ranks
}

impl KnapsackProblem {
    pub fn new(items: Vec<Item>, container: Container) -> Result<Self, ProblemError> {
        let mut seen = FxHashSet::default();
        for item in &items {
            if item.weight() == 0 {
                return Err(ProblemError::ZeroWeight {
                    id: item.id().to_owned(),
                });
            }
            if item.profit() == 0 {
                return Err(ProblemError::ZeroProfit {
                    id: item.id().to_owned(),
                });
            }
            if !seen.insert(item.id()) {
                return Err(ProblemError::DuplicateId {
                    id: item.id().to_owned(),
                });
            }
        }

        let lex_ranks = id_ranks(&items);

        Ok(Self {
            items,
            container,
            lex_ranks,
        })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn capacity(&self) -> u32 {
        self.container.capacity()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Zero items or zero capacity: nothing to search.
    pub fn is_infeasible(&self) -> bool {
        self.items.is_empty() || self.capacity() == 0
    }

    pub fn lex_ranks(&self) -> &[u32] {
        &self.lex_ranks
    }

    pub fn total_profit(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.profit())).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_weight() {
        let items = vec![Item::new("A", 0, 10)];
        let err = KnapsackProblem::new(items, Container::new(10)).unwrap_err();
        assert_eq!(err, ProblemError::ZeroWeight { id: "A".into() });
    }

    #[test]
    fn test_rejects_zero_profit() {
        let items = vec![Item::new("A", 5, 0)];
        let err = KnapsackProblem::new(items, Container::new(10)).unwrap_err();
        assert_eq!(err, ProblemError::ZeroProfit { id: "A".into() });
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let items = vec![Item::new("A", 5, 5), Item::new("A", 6, 6)];
        let err = KnapsackProblem::new(items, Container::new(10)).unwrap_err();
        assert_eq!(err, ProblemError::DuplicateId { id: "A".into() });
    }

    #[test]
    fn test_zero_capacity_is_constructible_but_infeasible() {
        let items = vec![Item::new("A", 5, 5)];
        let problem = KnapsackProblem::new(items, Container::new(0)).unwrap();
        assert!(problem.is_infeasible());
    }

    #[test]
    fn test_lex_ranks_follow_id_order() {
        let items = vec![
            Item::new("C", 1, 1),
            Item::new("A", 2, 2),
            Item::new("B", 3, 3),
        ];
        let problem = KnapsackProblem::new(items, Container::new(10)).unwrap();
        assert_eq!(problem.lex_ranks(), &[2, 0, 1]);
    }
}

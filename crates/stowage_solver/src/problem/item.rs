use std::fmt::Display;

use serde::Serialize;

use crate::define_index_newtype;

define_index_newtype!(ItemIdx, Item);

/// An indivisible unit of cargo. Picked whole or not at all ("0/1").
///
/// Weight and profit are strictly positive once an item has passed the
/// [`KnapsackProblem`](crate::problem::knapsack_problem::KnapsackProblem)
/// boundary; the id is the external identifier used for lexicographic
/// tie-breaks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Item {
    id: String,
    weight: u32,
    profit: u32,
}

impl Item {
    pub fn new(id: impl Into<String>, weight: u32, profit: u32) -> Self {
        Item {
            id: id.into(),
            weight,
            profit,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn profit(&self) -> u32 {
        self.profit
    }

    /// Profit per unit of weight, the greedy ordering key.
    pub fn ratio(&self) -> f64 {
        f64::from(self.profit) / f64::from(self.weight)
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (w={}, p={})", self.id, self.weight, self.profit)
    }
}

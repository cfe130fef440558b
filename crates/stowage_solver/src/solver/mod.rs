pub mod backtracking;
pub mod bound;
pub mod branch_and_bound;
pub mod brute_force;
pub mod deadline;
pub mod dp;
pub mod greedy;
pub mod outcome;
pub mod search;
pub mod strategy;

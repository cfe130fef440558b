pub mod bottom_up;
pub mod dense_table;
pub mod entry;
pub mod rolling;
pub mod sparse_table;
pub mod table;
pub mod top_down;

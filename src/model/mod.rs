pub mod data_core;
pub mod detail;
pub mod record_tree;

pub mod aggregator;
pub mod collector;
pub mod selector;
pub mod tree;

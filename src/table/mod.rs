pub mod chained;

pub use chained::{ChainedTable, DuplicatePolicy};

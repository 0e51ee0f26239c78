pub use crate::ds::{ChainArena, SlotId};
pub use crate::table::{ChainedTable, DuplicatePolicy};

#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::TableMetricsSnapshot;

pub mod chain_arena;

pub use chain_arena::{ChainArena, SlotId};

//! In-process store used for local development (`STORAGE=memory`) and tests.

mod memory_store;

pub use memory_store::MemoryStore;

pub mod entries;
pub mod pool;
pub mod seed;

pub use pool::{create_memory_pool, create_pool, run_migrations};

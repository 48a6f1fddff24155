//! Process-wide `tracing` subscriber setup shared by the healthmon binaries.

mod tracing;

pub use self::tracing::{init as init_tracing, init_with_level};

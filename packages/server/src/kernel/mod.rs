//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod gemini_client;
pub mod memory_store;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use gemini_client::{GeminiClient, NoopTextGenerator};
pub use memory_store::MemoryKeyValueStore;
pub use traits::*;

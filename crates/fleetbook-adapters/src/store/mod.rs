//! Record store adapters.

pub mod json;
pub mod lock;
pub mod memory;

pub use json::JsonFileStore;
pub use lock::DirLock;
pub use memory::InMemoryStore;

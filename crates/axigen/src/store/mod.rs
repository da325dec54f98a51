//! Key/value storage for trigger state
//!
//! The trait-based design lets the host plug in its own persistence; an
//! in-memory and a JSON-file implementation are provided.

mod file;
mod memory;
mod traits;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;
pub use traits::{KeyValueStore, KeyValueStoreExt};

// Adapters layer: concrete implementations of the domain ports
// (document tree, key-value storage, form transport).

pub mod http;
pub mod memory_dom;
pub mod storage;

pub use http::HttpTransport;
pub use memory_dom::{Element, MemoryDocument};
pub use storage::{FileStore, MemoryStore, UnavailableStore};

//! Document archive access.
//!
//! The corpus is owned by an external scrape pipeline; this module
//! provides read access to it through a key-value adapter seam.
//!
//! - **kv**: storage adapter contract + filesystem and in-memory
//!   adapters
//! - **store**: the document store (ID-addressed plain text)

mod kv;
mod store;

pub use kv::{FsKvStore, KvStore, MemoryKvStore};
pub use store::{DocumentStore, SongArchive};

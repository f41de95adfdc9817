//! Media index and link catalog storage
//!
//! This crate owns the data model of the bot and the two services built on
//! top of it: the [`SearchService`] (fuzzy file search with pagination) and
//! the [`CatalogService`] (categorized link directory). Storage is reached
//! through the [`MediaStore`] and [`LinkStore`] traits, implemented by the
//! MongoDB-backed [`MongoStore`] and the in-process [`MemoryStore`].

pub mod backend;
pub mod catalog;
pub mod config;
pub mod error;
pub mod memory;
pub mod model;
pub mod mongo;
pub mod query;
pub mod search;

pub use backend::{LinkStore, MediaStore};
pub use catalog::CatalogService;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use model::{FileType, LinkEntry, MediaKey, MediaRecord};
pub use mongo::MongoStore;
pub use query::{MediaFilter, SearchPage, SearchQuery};
pub use search::SearchService;

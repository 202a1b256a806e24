//! dentition-study: Flashcard study mode for dentition.
//!
//! Quiz sessions over the tooth catalog, running statistics, and the
//! best-effort persistence layer they are saved through.

pub mod config;
pub mod error;
pub mod repository;
pub mod rng;
pub mod session;
pub mod stats;
pub mod store;
pub mod study;

pub use config::{load_config_from, DentitionConfig};
pub use repository::StudyRepository;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use study::StudyMode;

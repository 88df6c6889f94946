/// Export of recipes as downloadable files.
pub mod export;
pub(crate) mod import;
mod kv;
mod sources;
mod store;

pub use export::{Deliver, DirectoryDelivery, Export, ExportError, sanitize_title};
pub use import::ImportError;
pub use kv::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use sources::{Clock, FixedClock, IdSource, SystemClock, UuidIds};
pub use store::{DEFAULT_STORAGE_KEY, RecipeStore, StorageReadError, StoreError};

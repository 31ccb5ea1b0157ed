//! Layout persistence: key-value stores, the versioned layout format, and
//! the plugin that loads the session at startup and saves it on request.

mod atomic_write;
pub mod envelope;
pub mod layout_store;
pub mod save_error;
pub mod save_migrate;
mod save_plugin;
pub mod store;


pub use layout_store::{LayoutStore, LoadOutcome, LoadedLayout};
pub use save_error::{SaveError, StoreError};
pub use save_plugin::{
    LayoutLoaded, LayoutSaved, LayoutStorage, SavePlugin, SaveStatus, StorageConfig,
};
pub use store::{FileStore, KeyValueStore, MemoryStore};

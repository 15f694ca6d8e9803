/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public todo-day core surface (task store, edit session, collaborators)
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod clipboard;
pub mod config;
pub mod edit;
pub mod error;
pub mod storage;
pub mod store;
pub mod types;

pub use clipboard::{Clipboard, CopyHandle, CopyOutcome, MemoryClipboard, SystemClipboard, copy};
pub use config::AppConfig;
pub use edit::EditSession;
pub use error::{ClipboardError, ConfigError, StorageError, StoreError};
pub use storage::{JsonFileStorage, MemoryStorage, STORAGE_KEY, TaskStorage};
pub use store::{TaskStore, ValidationPolicy};
pub use types::{Task, TaskId};

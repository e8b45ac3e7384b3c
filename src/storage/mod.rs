//! Storage module for persistence and configuration.

pub mod codec;
pub mod config;
pub mod database;
pub mod schema;
pub mod slot;

pub use codec::{decode, encode, CodecError};
pub use config::{AppConfig, ConfigError, DisplaySettings, MapSettings, StorageSettings};
pub use database::Database;
pub use slot::{KeyValueSlot, MemorySlot, StorageError};

// Library interface for workoutrs modules
// The binary and the integration tests both go through these re-exports

pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod models;
pub mod seed;
pub mod storage;
pub mod store;
pub mod vocabulary;

// Re-export commonly used types for convenience
pub use models::*;
pub use vocabulary::{Difficulty, Gender, Rgb, Skill, Sport, Vocabulary, WorkoutKind, WorkoutType};
pub use error::{Result, SeedError, StorageError, WorkoutRsError};
pub use generator::WorkoutGenerator;
pub use seed::SeedSource;
pub use storage::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use store::RecordStore;
pub use logging::{LogConfig, LogFormat, LogLevel};

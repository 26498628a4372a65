pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod render;
pub mod voting;

pub use db::{FightStore, JsonFileStore, MemoryStore};
pub use error::{AppError, FightError, StoreError};
pub use models::{Fight, FightDocument, VoteOutcome};
pub use voting::{compare, tally, Comparison, Tally};

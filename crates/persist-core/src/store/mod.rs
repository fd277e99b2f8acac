//! The stores and the facade that opens them.

pub mod config;
pub mod persistence;
pub mod state;

pub use config::{ConfigOptions, ConfigStore};
pub use persistence::{AppPersistence, PersistenceOptions};
pub use state::StateStore;

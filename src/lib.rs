pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod render;
pub mod service;
pub mod state;

pub use config::Config;
pub use error::{CatalogError, RepositoryError, StorageError};
pub use state::CatalogState;

pub mod connection;
pub mod migrations;
pub mod persistence;
pub mod repositories;
pub mod service;

pub use connection::{connect, connect_with_settings, DbPool};
pub use persistence::PersonalizationStore;
pub use service::PersonalizationService;

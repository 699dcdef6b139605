//! Short-lived selection sessions over offered research options

pub mod config;
pub mod entry;
pub mod store;

pub use config::SessionConfig;
pub use entry::Session;
pub use store::SelectionStore;

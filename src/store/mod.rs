//! Local mirror of backend state.

pub mod log_store;

pub use log_store::LogStore;

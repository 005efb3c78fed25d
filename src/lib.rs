pub mod api;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod executor;
pub mod snippets;
pub mod store;
pub mod types;
pub mod web;

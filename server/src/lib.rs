pub mod api;
mod app;
pub mod core;
pub mod data;
pub mod query;
pub mod utils;

pub mod analysis;
pub mod config;
pub mod errors;
pub mod models;
pub mod reader;
pub mod report;
pub mod scan;

pub mod args;
pub mod comparator;
pub mod config;
pub mod error;
pub mod measurer;
pub mod runner;
pub mod utils;

//! Poisson probe-count model for separate-chaining hash tables.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod plot;
pub mod report;

pub use error::{Error, Result};

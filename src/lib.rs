// src/lib.rs

#[macro_use]
pub mod macros;

pub mod catalog;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod file;
pub mod log;
pub mod normalize;
pub mod profile;
pub mod runner;
pub mod scrape;
pub mod table;

pub use error::{Result, ScrapeError};

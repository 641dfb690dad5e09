// src/core/mod.rs

pub mod html;
pub mod net;
pub mod sanitize;

pub use html::{extract_table, Grid};
pub use net::{Fetch, HttpFetcher};

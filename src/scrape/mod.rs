// src/scrape/mod.rs
mod batch;
mod group;

pub use batch::{pool_size, run_batch};
pub use group::{error_chain, process_group, try_process_group, GroupJob};

// src/config/mod.rs

pub mod consts;
pub mod groups;
pub mod paths;

pub use groups::GroupSet;
pub use paths::OutputPaths;

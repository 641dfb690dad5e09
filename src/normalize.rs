// src/normalize.rs
//! Casting-name normalization.
//!
//! Pages spell the same casting several ways ("Mongoose 2", "Mongoose II Funny
//! Car", ...). [`normalize`] flattens an extracted grid, rewrites known aliases
//! to one canonical name, sorts, and drops duplicates.
//!
//! Matching is on the whole value only; "Snake 2 Custom" is left alone.

use tracing::info_span;

use crate::config::consts::BLANK_COLUMN_KEY;
use crate::core::Grid;

/// Column that the blank-column dataset does not contribute.
const BLANKED_COLUMN: usize = 1;

/// Alias → canonical name.
pub const SYNONYMS: [(&str, &str); 10] = [
    ("Mongoose 2", "Mongoose II"),
    ("Snake 2", "Snake II"),
    ("Mongoose II Funny Car", "Mongoose II"),
    ("Snake II Funny Car", "Snake II"),
    ("Mongoose Funny Car", "Mongoose"),
    ("Snake Funny Car", "Snake"),
    ("Mongoose Funny Rail Dragster", "Mongoose Rail Dragster"),
    ("Alive 55", "Alive '55"),
    ("King Cuda", "King 'Cuda"),
    ("Grasshopper", "Grass Hopper"),
];

/// Canonical form of one raw name. Names not in the table map to themselves.
pub fn canonical(raw: &str) -> &str {
    SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == raw)
        .map_or(raw, |(_, canon)| canon)
}

/// Grid → canonical names, sorted and de-duplicated.
///
/// For [`BLANK_COLUMN_KEY`] the second column is dropped before flattening;
/// a one-column grid is left as is.
pub fn normalize(grid: &Grid, dataset_key: &str) -> Vec<String> {
    let _span = info_span!("normalize", dataset_key).entered();

    let view;
    let grid = if dataset_key == BLANK_COLUMN_KEY {
        view = grid.without_column(BLANKED_COLUMN);
        &view
    } else {
        grid
    };

    // Sort after rewriting: an alias can sort apart from its canonical form.
    let mut names: Vec<&str> = grid.values().map(canonical).collect();
    names.sort_unstable();
    names.dedup();
    names.into_iter().map(String::from).collect()
}

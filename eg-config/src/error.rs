//! This module contains the error type for loading the card config.

use std::{io, path::PathBuf};
use thiserror::Error;

/// An error from reading or validating a [`CardConfig`](crate::CardConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but couldn't be read.
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        /// The file we tried to read.
        path: PathBuf,

        /// The underlying IO error.
        source: io::Error,
    },

    /// The config file was read but isn't valid RON for a [`CardConfig`](crate::CardConfig).
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        /// The file we tried to parse.
        path: PathBuf,

        /// The underlying RON error, with its position in the file.
        source: ron::error::SpannedError,
    },

    /// The tree height must be positive and finite.
    #[error("tree height must be positive and finite, got {0}")]
    InvalidHeight(f32),

    /// The tree base radius must be positive and finite.
    #[error("tree base radius must be positive and finite, got {0}")]
    InvalidBaseRadius(f32),

    /// The ornaments hang between 0.5 and `height - 1.5`, so the tree has to be taller than 2.
    #[error("tree height {0} leaves no room for ornaments; it must be greater than 2")]
    NoOrnamentBand(f32),
}

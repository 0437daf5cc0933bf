//! Ditherlab - dithering and palette reduction laboratory
//!
//! Command-line front end over `dither-core`: config loading, PNG I/O and
//! the subcommand bodies. This library exposes modules for integration testing.

pub mod commands;
pub mod config;
pub mod error;
pub mod image_io;

#![forbid(unsafe_code)]

//! statcat: print a file's contents followed by its `stat` metadata
//!
//! Preferences come from three layers (command line, config file, built-in
//! defaults) and drive a short, strictly sequential pipeline: read the input,
//! print it with optional colors, then run `stat` on it.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod prefs;
pub mod signal;

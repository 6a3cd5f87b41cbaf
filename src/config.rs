//! Configuration file discovery, parsing and generation

pub mod locator;
pub mod statcat_toml;

pub use locator::{Candidate, CandidateKind, SearchEnv};

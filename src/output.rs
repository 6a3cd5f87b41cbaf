//! Presentation of file contents and `stat` output

pub mod ansi;
pub mod presenter;
pub mod stat_runner;

pub use ansi::strip_ansi;
pub use presenter::Presenter;
pub use stat_runner::{StatCommand, StatRunner};

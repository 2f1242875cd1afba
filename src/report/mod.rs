//! Output formatting for solver results and benchmark tables

pub mod display;

pub use display::{ColorOutput, ResultFormatter};

//! Problem instance model shared by all solver engines

pub mod instance;

pub use instance::{Metadata, Payload, ProblemInstance, ProblemKind};

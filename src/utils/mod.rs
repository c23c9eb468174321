//! Utility modules for the style packer.

pub mod exec;
pub mod log;
pub mod merge;
pub mod path;

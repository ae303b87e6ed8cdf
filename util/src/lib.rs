//! Pieces shared by the spalink binaries.

pub mod build;
mod macros;

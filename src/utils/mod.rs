//! Utils Module - Shared Constants

pub mod constants;

pub use constants::*;

//! CLI command handlers
//!
//! Thin shells over the library modules: parse arguments, call the core,
//! print results.

pub mod food;
pub mod weight;

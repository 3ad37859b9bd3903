//! dailytrack library
//!
//! Core aggregation, grouping and storage for the weight and food trackers.

pub mod aggregate;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod plot;
pub mod store;
pub mod weight_log;

//! Median wage versus cumulative inflation dashboard for European countries.

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod engine;
pub mod server;

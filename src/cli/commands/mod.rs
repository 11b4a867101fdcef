//! Command implementations

pub mod config;
pub mod dragonfire;
pub mod roast;
pub mod serve;

//! Result cache adapters

pub mod memory;

pub use memory::InMemoryResultCache;

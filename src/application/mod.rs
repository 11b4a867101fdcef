//! Composition of the services from configuration

pub mod services;

pub use services::ShameServices;

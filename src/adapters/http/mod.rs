//! HTTP adapter exposing DragonFire, Longclaw and the chaos agents

pub mod server;

pub use server::{Backend, ChaosRequest, ErrorResponse, ShameHttpServer};

//! Swarm, orchestration and agent services

pub mod agents;
pub mod dragonfire;
pub mod longclaw;
pub mod swarm;

pub use agents::{AgentContext, AgentRoster, AgentSettings, ChaosAgent};
pub use dragonfire::{DragonFireReport, DragonFireRequest, DragonFireService};
pub use longclaw::LongclawOrchestrator;
pub use swarm::{SwarmRunner, SwarmSettings};

//! Domain types shared by the crewdesk gateway and orchestrator.

pub mod domain;
pub mod error;
pub mod roles;
pub mod types;
pub mod workload;

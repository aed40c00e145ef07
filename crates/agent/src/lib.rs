//! `crewdesk-agent` -- the assignment orchestrator service.
//!
//! Receives structured domain payloads plus free-text instructions, renders
//! a natural-language prompt with a strict JSON-only directive, calls the
//! hosted model, extracts the first parseable JSON object from the reply,
//! and fills per-operation defaults so every declared output field is always
//! present. The binary entrypoint lives in `main.rs`; the library exposes
//! the router and building blocks for integration tests.

pub mod config;
pub mod defaults;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod prompts;
pub mod routes;
pub mod state;

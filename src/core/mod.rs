//! Core module - configuration, state and the HTTP server.
//!
//! - [`Config`] - environment-backed configuration
//! - [`ServerState`] - shared per-request state
//! - [`Server`] - router assembly and run loop

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;

//! Aishou Application Orchestration Layer
//!
//! This crate contains the bootstrap and session-authentication services:
//! session state over the persistence port, first-run registration against
//! the backend, the startup orchestrator and the reauthentication flow.

pub mod bootstrap;
pub mod deps;
pub mod reauth;
pub mod registration;
pub mod session_manager;

pub use bootstrap::{spawn_best_effort, AppBootstrap};
pub use deps::{AppDeps, AppServices};
pub use reauth::{ReauthFlow, ReauthPacing};
pub use registration::{RegistrationError, RegistrationService};
pub use session_manager::SessionManager;

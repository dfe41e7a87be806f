//! # aishou-core
//!
//! Core domain models and business logic for the Aishou client bootstrap.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod ports;
pub mod reauth;
pub mod registration;
pub mod session;

// Re-export commonly used types at the crate root
pub use reauth::{ReauthAction, ReauthError, ReauthEvent, ReauthState, ReauthStateMachine};
pub use registration::{AuthTokens, Platform, RegistrationRequest};
pub use session::{AuthStatus, ReauthPolicy, ReauthRefusal, UserSession};

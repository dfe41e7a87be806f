//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (session
//! manager, registration service, bootstrap, reauth flow) and the
//! infrastructure or SDK implementations. This follows Hexagonal
//! Architecture principles, allowing the core business logic to remain
//! independent of external dependencies.
//!
//! The billing identity, push gateway and locale ports wrap external SDK
//! collaborators; the bootstrap only consumes them and never manages their
//! lifecycle.

pub mod billing_identity;
mod clock;
pub mod errors;
pub mod locale;
pub mod push_gateway;
pub mod reauth_events;
pub mod registration_api;
pub mod session_store;

pub use clock::*;

pub use billing_identity::BillingIdentityPort;
pub use errors::StorageError;
pub use locale::LocalePort;
pub use push_gateway::PushGatewayPort;
pub use reauth_events::{NavigationEvent, ReauthEventPort};
pub use registration_api::{RegistrationApiError, RegistrationApiPort};
pub use session_store::SessionStorePort;

//! Infrastructure adapters for the Aishou client bootstrap.
//!
//! Implements the core ports against real resources: a JSON file for the
//! session, the system clock, the registration REST endpoint, the process
//! environment for the language tag, and a layered config loader.

pub mod config;
pub mod http;
pub mod locale;
pub mod session_store;
pub mod time;

pub use config::BootstrapConfig;
pub use http::HttpRegistrationApi;
pub use locale::EnvLocale;
pub use session_store::FileSessionStore;
pub use time::SystemClock;

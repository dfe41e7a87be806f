//! Reauthentication flow domain.

mod state_machine;

pub use state_machine::{ReauthAction, ReauthError, ReauthEvent, ReauthState, ReauthStateMachine};

//! Application dependencies.
//!
//! `AppDeps` groups the port implementations the composition root wires
//! in. It is not a builder: no build steps, no defaults, no hidden logic,
//! just parameter grouping. The constructor signature of `AppServices` is
//! the dependency manifest.

use std::sync::Arc;

use aishou_core::ports::{
    BillingIdentityPort, ClockPort, LocalePort, PushGatewayPort, ReauthEventPort,
    RegistrationApiPort, SessionStorePort,
};
use aishou_core::session::ReauthPolicy;

use crate::bootstrap::AppBootstrap;
use crate::reauth::{ReauthFlow, ReauthPacing};
use crate::registration::RegistrationService;
use crate::session_manager::SessionManager;

/// Port implementations, provided by the composition root.
pub struct AppDeps {
    pub session_store: Arc<dyn SessionStorePort>,
    pub clock: Arc<dyn ClockPort>,
    pub registration_api: Arc<dyn RegistrationApiPort>,
    pub billing_identity: Arc<dyn BillingIdentityPort>,
    pub push_gateway: Arc<dyn PushGatewayPort>,
    pub locale: Arc<dyn LocalePort>,
    pub reauth_events: Arc<dyn ReauthEventPort>,
}

/// Assembled application services: one instance per process, owned by the
/// composition root and passed explicitly to consumers.
pub struct AppServices {
    pub sessions: Arc<SessionManager>,
    pub registration: Arc<RegistrationService>,
    pub bootstrap: AppBootstrap,
    reauth_events: Arc<dyn ReauthEventPort>,
    reauth_pacing: ReauthPacing,
}

impl AppServices {
    pub fn assemble(deps: AppDeps, policy: ReauthPolicy, reauth_pacing: ReauthPacing) -> Self {
        let sessions = Arc::new(SessionManager::new(
            deps.session_store,
            deps.clock,
            policy,
        ));
        let registration = Arc::new(RegistrationService::new(
            sessions.clone(),
            deps.registration_api,
            deps.billing_identity,
            deps.locale.clone(),
        ));
        let bootstrap = AppBootstrap::new(
            sessions.clone(),
            registration.clone(),
            deps.push_gateway,
            deps.locale,
        );
        Self {
            sessions,
            registration,
            bootstrap,
            reauth_events: deps.reauth_events,
            reauth_pacing,
        }
    }

    /// Fresh flow per screen visit; instances are single-shot and never
    /// shared across visits.
    pub fn new_reauth_flow(&self) -> ReauthFlow {
        ReauthFlow::new(
            self.sessions.clone(),
            self.registration.clone(),
            self.reauth_events.clone(),
            self.reauth_pacing,
        )
    }
}

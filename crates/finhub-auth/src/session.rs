use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use finhub_core::bus::{Bus, BusEventDef};
use finhub_types::UserIdentity;

use crate::error::AuthError;
use crate::provider::IdentityProvider;

/// Published on every session status transition.
pub static SESSION_CHANGED_EVENT: BusEventDef = BusEventDef::new("session.changed");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Startup state while the provider is consulted for an existing
    /// session. Entered exactly once; never re-entered afterward.
    Loading,
    Authenticated,
    Anonymous,
}

/// Read-only view of the session handed to the rendering layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub identity: Option<UserIdentity>,
    pub signing_in: bool,
}

struct SessionState {
    status: SessionStatus,
    identity: Option<UserIdentity>,
    // Sign-in-in-flight guard, distinct from the startup Loading state: a
    // failed sign-in returns to Anonymous, never back to Loading.
    signing_in: bool,
}

impl SessionState {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            identity: self.identity.clone(),
            signing_in: self.signing_in,
        }
    }
}

/// Owns the authentication state machine:
/// `Loading -> {Authenticated, Anonymous}`, `Anonymous -> Authenticated`
/// (sign-in), `Authenticated -> Anonymous` (sign-out).
///
/// Invariant: `status == Authenticated` iff an identity is stored.
#[derive(Clone)]
pub struct SessionController {
    state: Arc<RwLock<SessionState>>,
    provider: Arc<dyn IdentityProvider>,
    bus: Option<Arc<Bus>>,
}

impl SessionController {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState {
                status: SessionStatus::Loading,
                identity: None,
                signing_in: false,
            })),
            provider,
            bus: None,
        }
    }

    pub fn with_bus(mut self, bus: Arc<Bus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Resolves the startup `Loading` state by consulting the provider for a
    /// previously-established session. A provider failure resolves to
    /// `Anonymous`; it never strands the UI in `Loading`.
    pub async fn start(&self) {
        let restored = match self.provider.restore().await {
            Ok(identity) => identity,
            Err(error) => {
                tracing::warn!(%error, "session restore failed");
                None
            }
        };

        {
            let mut state = self.state.write().await;
            match restored {
                Some(identity) => {
                    state.identity = Some(identity);
                    state.status = SessionStatus::Authenticated;
                }
                None => {
                    state.identity = None;
                    state.status = SessionStatus::Anonymous;
                }
            }
        }
        self.publish_changed().await;
    }

    pub async fn status(&self) -> SessionStatus {
        self.state.read().await.status
    }

    pub async fn identity(&self) -> Option<UserIdentity> {
        self.state.read().await.identity.clone()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.state.read().await.snapshot()
    }

    pub async fn is_signing_in(&self) -> bool {
        self.state.read().await.signing_in
    }

    /// Requests authentication from the provider. Rejects with
    /// [`AuthError::SignInBusy`] while another attempt is in flight. On
    /// success the returned identity replaces any previous one wholesale; on
    /// failure the session stays in the status it had before the attempt.
    pub async fn sign_in(&self) -> Result<UserIdentity, AuthError> {
        {
            let mut state = self.state.write().await;
            if state.signing_in {
                return Err(AuthError::SignInBusy);
            }
            state.signing_in = true;
        }
        // Announce the in-flight flag so the UI can disable its affordances.
        self.publish_changed().await;

        let result = self.provider.sign_in().await;

        let outcome = {
            let mut state = self.state.write().await;
            state.signing_in = false;
            match result {
                Ok(identity) => {
                    state.identity = Some(identity.clone());
                    state.status = SessionStatus::Authenticated;
                    Ok(identity)
                }
                Err(error) => Err(AuthError::Rejected(error.reason)),
            }
        };

        match &outcome {
            Ok(identity) => {
                tracing::info!(display_name = %identity.display_name, "signed in");
            }
            Err(error) => {
                tracing::warn!(%error, "sign-in failed");
            }
        }
        self.publish_changed().await;

        outcome
    }

    /// Signs out. Local state transitions to `Anonymous` unconditionally; a
    /// provider-side failure is logged and returned but never leaves the
    /// session `Authenticated`.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let provider_result = self.provider.sign_out().await;

        {
            let mut state = self.state.write().await;
            state.identity = None;
            state.status = SessionStatus::Anonymous;
        }
        self.publish_changed().await;

        match provider_result {
            Ok(()) => {
                tracing::info!("signed out");
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "provider sign-out failed, local session cleared");
                Err(AuthError::SignOutFailed(error.reason))
            }
        }
    }

    async fn publish_changed(&self) {
        if let Some(bus) = &self.bus {
            let snapshot = self.state.read().await.snapshot();
            if let Ok(properties) = serde_json::to_value(&snapshot) {
                bus.publish(&SESSION_CHANGED_EVENT, properties);
            }
        }
    }
}

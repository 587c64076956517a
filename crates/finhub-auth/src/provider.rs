use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::RwLock;

use finhub_types::UserIdentity;

/// Failure reported by the identity provider, with a human-readable reason
/// the UI can display.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{reason}")]
pub struct ProviderError {
    pub reason: String,
}

impl ProviderError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Boundary to the identity provider. The session controller does not know
/// how the provider authenticates; it only consumes these three calls.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The previously-established session, if the provider has one. Consulted
    /// exactly once, at startup.
    async fn restore(&self) -> Result<Option<UserIdentity>, ProviderError>;

    async fn sign_in(&self) -> Result<UserIdentity, ProviderError>;

    async fn sign_out(&self) -> Result<(), ProviderError>;
}

/// Stand-in provider for the demo build. Hands out a fixed identity, with
/// switchable failure modes and an optional simulated round-trip latency.
pub struct DemoIdentityProvider {
    identity: UserIdentity,
    restore_signed_in: bool,
    latency: Option<Duration>,
    sign_in_failure: RwLock<Option<String>>,
    sign_out_failure: RwLock<Option<String>>,
}

impl DemoIdentityProvider {
    pub fn new(identity: UserIdentity) -> Self {
        Self {
            identity,
            restore_signed_in: false,
            latency: None,
            sign_in_failure: RwLock::new(None),
            sign_out_failure: RwLock::new(None),
        }
    }

    /// Makes `restore` report an existing session.
    pub fn with_restored_session(mut self) -> Self {
        self.restore_signed_in = true;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes subsequent `sign_in` calls fail with `reason`; `None` restores
    /// normal behavior.
    pub async fn set_sign_in_failure(&self, reason: Option<String>) {
        *self.sign_in_failure.write().await = reason;
    }

    pub async fn set_sign_out_failure(&self, reason: Option<String>) {
        *self.sign_out_failure.write().await = reason;
    }

    async fn simulate_round_trip(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for DemoIdentityProvider {
    fn default() -> Self {
        Self::new(
            UserIdentity::new("Alex Morgan", "alex.morgan@finhub.app")
                .with_avatar("https://cdn.finhub.app/avatars/alex.png"),
        )
    }
}

#[async_trait]
impl IdentityProvider for DemoIdentityProvider {
    async fn restore(&self) -> Result<Option<UserIdentity>, ProviderError> {
        self.simulate_round_trip().await;
        if self.restore_signed_in {
            Ok(Some(self.identity.clone()))
        } else {
            Ok(None)
        }
    }

    async fn sign_in(&self) -> Result<UserIdentity, ProviderError> {
        self.simulate_round_trip().await;
        if let Some(reason) = self.sign_in_failure.read().await.clone() {
            return Err(ProviderError::new(reason));
        }
        Ok(self.identity.clone())
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.simulate_round_trip().await;
        if let Some(reason) = self.sign_out_failure.read().await.clone() {
            return Err(ProviderError::new(reason));
        }
        Ok(())
    }
}

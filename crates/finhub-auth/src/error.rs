#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Sign-in rejected by the identity provider. The session stays in the
    /// status it had before the attempt.
    #[error("sign-in rejected by identity provider: {0}")]
    Rejected(String),

    /// A sign-in attempt is already in flight; this one was not started.
    #[error("another sign-in attempt is already in flight")]
    SignInBusy,

    /// The provider failed to complete sign-out. Local state is already
    /// `Anonymous` when this is returned.
    #[error("provider sign-out failed: {0}")]
    SignOutFailed(String),
}

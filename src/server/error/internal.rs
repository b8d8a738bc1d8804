use thiserror::Error;

/// Internal issues indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Password hashing or verification failed
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    /// A blocking task was cancelled or panicked
    #[error("Blocking task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    /// Signing a JSON web token failed
    #[error("Failed to sign token: {0}")]
    TokenSigning(#[source] jsonwebtoken::errors::Error),

    /// Building or delivering an email failed
    #[error("There was an error sending the email: {0}")]
    Email(String),
}

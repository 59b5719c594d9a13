/// Generator module
///
/// Defines the credential-generation seam and the single-flight invoker that
/// guards it. The generation primitive itself lives behind `GenerateCredential`
/// so the invoker never knows whether it is talking to the real platform SDK
/// sidecar or a test fake.

pub mod invoker;
pub mod upstream;

use std::fmt;

/// Raw output of one generation call: both fields are opaque, and either may
/// be empty — the platform SDK legitimately yields partial data at times.
#[derive(Debug, Clone)]
pub struct GeneratedCredential {
    pub visitor_data: String,
    pub po_token: String,
}

/// Failure of one generation round.
///
/// Clonable on purpose: a single round's error fans out to every caller that
/// was waiting on it.
#[derive(Debug, Clone)]
pub enum GenerationError {
    /// The generation primitive itself failed.
    Upstream(String),
    /// The generation call exceeded the configured bound.
    Timeout { after_secs: u64 },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Upstream(msg) => write!(f, "token generation failed: {}", msg),
            GenerationError::Timeout { after_secs } => {
                write!(f, "token generation timed out after {}s", after_secs)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

pub trait GenerateCredential {
    fn generate(
        &self,
    ) -> impl std::future::Future<Output = Result<GeneratedCredential, GenerationError>> + Send;
}

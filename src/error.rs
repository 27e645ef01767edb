// src/error.rs
use crate::extract::ExtractError;

/// Everything that can stop a discovery run or its setup.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// Required API key absent. Fatal at construction time.
    #[error("missing credential: set the {0} environment variable")]
    MissingCredential(&'static str),
    #[error("search returned no articles")]
    EmptyUpstream,
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("LLM call failed: {0:#}")]
    Llm(anyhow::Error),
    #[error("setup failed: {0:#}")]
    Setup(anyhow::Error),
}

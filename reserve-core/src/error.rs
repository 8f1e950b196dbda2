use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // The external UTXO fetch failed or returned unparseable data.
    // Retryable; nothing was mutated.
    #[error("utxo source unavailable: {0}")]
    SourceUnavailable(Box<dyn std::error::Error + Send + Sync>),

    // The reservation store could not be reached. Reservations committed
    // earlier in the same call remain valid holds.
    #[error("reservation store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("reservation request timed out after {0:?}")]
    Timeout(Duration),
}

impl Error {
    pub fn source_unavailable(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::SourceUnavailable(err.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

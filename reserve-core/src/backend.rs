use async_trait::async_trait;

use crate::{Result, Utxo};

/// Source of unspent outputs for an address.
///
/// Treated as unreliable I/O: any transport failure or malformed payload
/// surfaces as [`Error::SourceUnavailable`](crate::Error::SourceUnavailable)
/// and mutates nothing.
///
/// Consumers provide an implementation; `backend-sandshrew` ships one for a
/// Sandshrew JSON-RPC endpoint.
#[async_trait]
pub trait UtxoBackend: Send + Sync {
    /// Fetch the current unspent outputs paying `address`.
    async fn fetch_unspent(&self, address: &str) -> Result<Vec<Utxo>>;
}

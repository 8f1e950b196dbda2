mod memory;

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use bitcoin::OutPoint;

use crate::{Reservation, Result, Utxo};

pub use memory::MemoryStore;

/// Shared reservation state.
///
/// `try_reserve` is the synchronization primitive for the whole system: it
/// must be a single indivisible set-if-absent-with-expiry, so that out of any
/// number of simultaneous attempts on one outpoint exactly one succeeds. A
/// check-then-write pair does not qualify. Everything else here is a read or a
/// cleanup.
///
/// Expiry is logical everywhere: an entry past its `expires_at` is absent for
/// every method, whether or not it has been physically purged yet.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// Whether a live reservation exists for `outpoint`.
    async fn is_held(&self, outpoint: OutPoint) -> Result<bool>;

    /// Atomically reserve `utxo` for `holder` unless a live reservation
    /// already exists.
    ///
    /// Returns the created reservation, or `None` (and no change) when the
    /// outpoint is held. The returned `expires_at` is the stored one; there is
    /// no second expiry computation anywhere.
    async fn try_reserve(
        &self,
        utxo: &Utxo,
        holder: &str,
        ttl: Duration,
    ) -> Result<Option<Reservation>>;

    /// Remove all expired entries, returning how many were dropped.
    ///
    /// Only ever removes entries that are already logically dead, so it is
    /// safe to run concurrently with reservation traffic.
    async fn purge_expired(&self) -> Result<usize>;

    /// Snapshot of currently held outpoints.
    ///
    /// A pre-filter for selection, not a substitute for `try_reserve`.
    async fn live_ids(&self) -> Result<HashSet<OutPoint>>;
}

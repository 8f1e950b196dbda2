use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::ReservationStore;

/// Spawn the periodic purge task.
///
/// The store's logical expiry already hides dead entries from lookups; this
/// task reclaims their memory. It runs until the returned handle is aborted.
/// A failed purge is logged and retried on the next tick, never fatal, and
/// request handling never waits on it: both sides talk to the store only
/// through its public contract.
///
/// `every` is typically the configured reservation TTL.
pub fn spawn<S>(store: Arc<S>, every: Duration) -> JoinHandle<()>
where
    S: ReservationStore + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick of an interval completes immediately; skip it so the
        // first purge happens one full period in
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match store.purge_expired().await {
                Ok(purged) => debug!("swept {} expired reservations", purged),
                Err(err) => warn!("reservation sweep failed: {}", err),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use bitcoin::hashes::Hash;
    use bitcoin::{Amount, OutPoint, ScriptBuf, Txid};

    use super::*;
    use crate::{MemoryStore, Utxo};

    #[tokio::test]
    async fn sweeper_reclaims_expired_entries() {
        let store = Arc::new(MemoryStore::new());
        let utxo = Utxo {
            outpoint: OutPoint::new(Txid::all_zeros(), 0),
            value: Amount::from_sat(1000),
            script_pubkey: ScriptBuf::new(),
            confirmations: 3,
        };
        store
            .try_reserve(&utxo, "addr", Duration::from_millis(10))
            .await
            .unwrap();

        let handle = spawn(Arc::clone(&store), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(80)).await;
        handle.abort();

        assert_eq!(store.len(), 0);
    }
}

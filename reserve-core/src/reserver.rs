use std::sync::Arc;
use std::time::Duration;

use bitcoin::Amount;
use log::debug;

use crate::constants::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_TTL, DUST_THRESHOLD};
use crate::{selector, Error, ReservationStore, Result, SelectionResult, UtxoBackend};

/// Tunables for [`UtxoReserver`].
#[derive(Debug, Clone)]
pub struct ReserverConfig {
    /// Lifetime of each committed reservation.
    pub ttl: Duration,
    /// Outputs at or below this value are never selected.
    pub dust_threshold: Amount,
    /// Upper bound on one `reserve_for` call, fetch and retries included.
    pub request_timeout: Duration,
}

impl Default for ReserverConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            dust_threshold: DUST_THRESHOLD,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Hands out unspent outputs to concurrent callers without double-booking.
///
/// The store's `try_reserve` is the only synchronization point. The reserver
/// itself keeps no mutable state, so any number of tasks may share one
/// instance.
pub struct UtxoReserver<B, S> {
    backend: B,
    store: Arc<S>,
    config: ReserverConfig,
}

impl<B, S> UtxoReserver<B, S>
where
    B: UtxoBackend,
    S: ReservationStore,
{
    pub fn new(backend: B, store: Arc<S>, config: ReserverConfig) -> Self {
        Self {
            backend,
            store,
            config,
        }
    }

    pub fn config(&self) -> &ReserverConfig {
        &self.config
    }

    /// Handle to the shared store, e.g. for wiring up a sweeper.
    pub fn store(&self) -> Arc<S> {
        Arc::clone(&self.store)
    }

    /// Reserve unspent outputs of `address` summing to at least `requested`.
    ///
    /// The result is best effort: covering less than `requested` is still a
    /// success, detected via [`SelectionResult::covers_request`]. On timeout or
    /// store failure, reservations committed earlier in the call stay held
    /// until their TTL runs out. They are legitimately in flight from the
    /// caller's perspective, and rolling them back would reopen the
    /// double-reservation race.
    pub async fn reserve_for(&self, address: &str, requested: Amount) -> Result<SelectionResult> {
        tokio::time::timeout(
            self.config.request_timeout,
            self.reserve_inner(address, requested),
        )
        .await
        .map_err(|_| Error::Timeout(self.config.request_timeout))?
    }

    async fn reserve_inner(&self, address: &str, requested: Amount) -> Result<SelectionResult> {
        let candidates = self.backend.fetch_unspent(address).await?;
        let mut held = self.store.live_ids().await?;

        let mut reservations = Vec::new();
        let mut total = Amount::ZERO;
        while total < requested {
            let shortfall = requested - total;
            let picks = selector::select(&candidates, &held, shortfall, self.config.dust_threshold);
            if picks.is_empty() {
                break;
            }
            for utxo in &picks {
                if total >= requested {
                    break;
                }
                // every attempted outpoint leaves the candidate pool, so each
                // round scans strictly fewer candidates and the loop terminates
                // without a second fetch
                held.insert(utxo.outpoint);
                if let Some(reservation) = self
                    .store
                    .try_reserve(utxo, address, self.config.ttl)
                    .await?
                {
                    total = total
                        .checked_add(reservation.utxo.value)
                        .unwrap_or(Amount::MAX);
                    reservations.push(reservation);
                }
            }
        }

        debug!(
            "reserved {} of {} requested for {} across {} outputs",
            total,
            requested,
            address,
            reservations.len()
        );
        Ok(SelectionResult {
            requested,
            reservations,
        })
    }
}

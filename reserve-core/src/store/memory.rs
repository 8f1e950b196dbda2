use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use bitcoin::OutPoint;

use super::ReservationStore;
use crate::{Error, Reservation, Result, Utxo};

/// In-process reservation store.
///
/// A single mutex around the map makes `try_reserve` a genuine check-and-insert
/// inside one critical section. This covers a single process; a multi-process
/// deployment needs a `ReservationStore` over a shared store with a native
/// set-if-absent-with-expiry operation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<OutPoint, Reservation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of physical entries, expired-but-unpurged ones included.
    pub fn len(&self) -> usize {
        self.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<OutPoint, Reservation>>> {
        self.inner
            .lock()
            .map_err(|_| Error::StoreUnavailable("reservation map poisoned".into()))
    }
}

#[async_trait]
impl ReservationStore for MemoryStore {
    async fn is_held(&self, outpoint: OutPoint) -> Result<bool> {
        let now = SystemTime::now();
        let map = self.lock()?;
        Ok(map.get(&outpoint).is_some_and(|r| r.is_live(now)))
    }

    async fn try_reserve(
        &self,
        utxo: &Utxo,
        holder: &str,
        ttl: Duration,
    ) -> Result<Option<Reservation>> {
        let now = SystemTime::now();
        let mut map = self.lock()?;
        if map.get(&utxo.outpoint).is_some_and(|r| r.is_live(now)) {
            return Ok(None);
        }
        let reservation = Reservation {
            utxo: utxo.clone(),
            holder: holder.to_owned(),
            expires_at: now + ttl,
        };
        // may overwrite an expired leftover, which is already logically absent
        map.insert(utxo.outpoint, reservation.clone());
        Ok(Some(reservation))
    }

    async fn purge_expired(&self) -> Result<usize> {
        let now = SystemTime::now();
        let mut map = self.lock()?;
        let before = map.len();
        map.retain(|_, r| r.is_live(now));
        Ok(before - map.len())
    }

    async fn live_ids(&self) -> Result<HashSet<OutPoint>> {
        let now = SystemTime::now();
        let map = self.lock()?;
        Ok(map
            .values()
            .filter(|r| r.is_live(now))
            .map(|r| r.utxo.outpoint)
            .collect())
    }
}

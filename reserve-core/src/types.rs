use std::time::SystemTime;

use bitcoin::{Amount, OutPoint, ScriptBuf};
use serde::{Deserialize, Serialize};

/// An unspent output candidate as returned by a [`UtxoBackend`](crate::UtxoBackend).
///
/// The outpoint (txid plus output index) is the identity reservations are keyed
/// on; two candidates with the same outpoint are the same output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub outpoint: OutPoint,
    #[serde(with = "bitcoin::amount::serde::as_sat")]
    pub value: Amount,
    /// Locking script, passed through unmodified.
    pub script_pubkey: ScriptBuf,
    /// Zero means unconfirmed.
    pub confirmations: u32,
}

/// A time-bounded exclusive hold on a single outpoint.
///
/// Never mutated after creation: it either expires, is purged by the sweeper,
/// or both. Re-reserving the outpoint requires the hold to be logically dead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub utxo: Utxo,
    /// Address the reservation was made for.
    pub holder: String,
    pub expires_at: SystemTime,
}

impl Reservation {
    /// Whether the lease is still live at `now`.
    pub fn is_live(&self, now: SystemTime) -> bool {
        self.expires_at > now
    }
}

/// The committed outcome of one reservation request.
///
/// May cover less than `requested` when eligible candidates ran out. That is
/// still a successful result; callers decide whether partial coverage is
/// acceptable via [`covers_request`](Self::covers_request).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResult {
    #[serde(with = "bitcoin::amount::serde::as_sat")]
    pub requested: Amount,
    pub reservations: Vec<Reservation>,
}

impl SelectionResult {
    /// Sum of all committed values.
    pub fn total(&self) -> Amount {
        self.reservations
            .iter()
            .fold(Amount::ZERO, |acc, r| {
                acc.checked_add(r.utxo.value).unwrap_or(Amount::MAX)
            })
    }

    /// True when the committed sum covers the requested amount.
    pub fn covers_request(&self) -> bool {
        self.total() >= self.requested
    }
}

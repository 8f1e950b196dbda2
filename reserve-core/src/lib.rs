mod backend;
pub mod constants;
mod error;
mod reserver;
pub mod selector;
mod store;
pub mod sweeper;
mod types;

pub use bitcoin;

pub use backend::UtxoBackend;
pub use error::{Error, Result};
pub use reserver::{ReserverConfig, UtxoReserver};
pub use store::{MemoryStore, ReservationStore};
pub use types::{Reservation, SelectionResult, Utxo};

use std::time::Duration;

use bitcoin::Amount;

/// Outputs at or below this value are not economically spendable.
pub const DUST_THRESHOLD: Amount = Amount::from_sat(546);

/// Default lifetime of a committed reservation.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15);

/// Default upper bound on a single reservation request, fetch included.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

use std::collections::HashSet;

use bitcoin::{Amount, OutPoint};

use crate::Utxo;

/// Greedy largest-first selection over eligible candidates.
///
/// Eligible means above the dust threshold and not currently held. Candidates
/// are taken in value-descending order, ties broken by outpoint ascending so
/// identical input always yields identical output, until the running sum
/// reaches `target`. When the eligible total falls short everything eligible
/// is returned; partial coverage is reported, not hidden, and the caller
/// decides whether it is acceptable.
///
/// Pure and side-effect free. Passing a snapshot of held outpoints here is an
/// optimization only; the store's `try_reserve` remains the authority on who
/// gets which output.
pub fn select(
    candidates: &[Utxo],
    held: &HashSet<OutPoint>,
    target: Amount,
    dust_threshold: Amount,
) -> Vec<Utxo> {
    let mut eligible: Vec<&Utxo> = candidates
        .iter()
        .filter(|u| u.value > dust_threshold && !held.contains(&u.outpoint))
        .collect();
    eligible.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.outpoint.cmp(&b.outpoint)));

    let mut selected = Vec::new();
    let mut total = Amount::ZERO;
    for utxo in eligible {
        if total >= target {
            break;
        }
        total = total.checked_add(utxo.value).unwrap_or(Amount::MAX);
        selected.push(utxo.clone());
    }
    selected
}

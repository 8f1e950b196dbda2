use async_trait::async_trait;
use bitcoin::{Amount, OutPoint, ScriptBuf};
use log::debug;

use reserve_core::{Error, Result, Utxo, UtxoBackend};

use crate::client::{HttpClient, SandshrewClient};

/// Confirmation count reported for confirmed outputs.
///
/// The esplora surface only exposes a confirmed flag, so this is a fixed
/// stand-in rather than a real depth.
const CONFIRMED_DEPTH: u32 = 3;

/// UTXO source backed by a Sandshrew JSON-RPC endpoint.
pub struct SandshrewBackend<H: HttpClient> {
    client: SandshrewClient<H>,
}

impl<H: HttpClient + 'static> SandshrewBackend<H> {
    pub fn new(client: SandshrewClient<H>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<H: HttpClient + 'static> UtxoBackend for SandshrewBackend<H> {
    async fn fetch_unspent(&self, address: &str) -> Result<Vec<Utxo>> {
        let unspents = self
            .client
            .address_utxos(address)
            .await
            .map_err(Error::source_unavailable)?;
        let Some(first) = unspents.first() else {
            return Ok(Vec::new());
        };

        // all returned outputs pay the same address, so one transaction lookup
        // recovers the locking script for the whole batch
        let tx = self
            .client
            .tx(&first.txid)
            .await
            .map_err(Error::source_unavailable)?;
        let script_hex = tx
            .vout
            .iter()
            .find(|v| v.scriptpubkey_address.as_deref() == Some(address))
            .map(|v| v.scriptpubkey.as_str())
            .unwrap_or_default();
        let script_pubkey = ScriptBuf::from_hex(script_hex).map_err(Error::source_unavailable)?;

        debug!("fetched {} unspent outputs for {}", unspents.len(), address);

        Ok(unspents
            .into_iter()
            .map(|u| Utxo {
                outpoint: OutPoint::new(u.txid, u.vout),
                value: Amount::from_sat(u.value),
                script_pubkey: script_pubkey.clone(),
                confirmations: if u.status.confirmed { CONFIRMED_DEPTH } else { 0 },
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use anyhow::anyhow;

    use super::*;

    /// HTTP double that replays canned response bodies in order.
    #[derive(Clone, Default)]
    struct ScriptedHttp {
        responses: Arc<Mutex<VecDeque<String>>>,
    }

    impl ScriptedHttp {
        fn new(responses: &[&str]) -> Self {
            Self {
                responses: Arc::new(Mutex::new(
                    responses.iter().map(|s| s.to_string()).collect(),
                )),
            }
        }
    }

    #[async_trait]
    impl HttpClient for ScriptedHttp {
        async fn post_json(&self, _url: &str, _json_body: &str) -> anyhow::Result<String> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| anyhow!("no scripted response left"))
        }
    }

    fn backend(responses: &[&str]) -> SandshrewBackend<ScriptedHttp> {
        let client = SandshrewClient::new(
            "https://mainnet.sandshrew.io/v1/test-key".to_string(),
            ScriptedHttp::new(responses),
        )
        .unwrap();
        SandshrewBackend::new(client)
    }

    const UTXOS_BODY: &str = r#"{
        "jsonrpc": "2.0",
        "id": "esplora_address::utxo",
        "result": [
            {
                "txid": "1111111111111111111111111111111111111111111111111111111111111111",
                "vout": 0,
                "value": 1000,
                "status": { "confirmed": true }
            },
            {
                "txid": "2222222222222222222222222222222222222222222222222222222222222222",
                "vout": 3,
                "value": 800,
                "status": { "confirmed": false }
            }
        ]
    }"#;

    const TX_BODY: &str = r#"{
        "jsonrpc": "2.0",
        "id": "esplora_tx",
        "result": {
            "vout": [
                { "scriptpubkey": "6a00", "scriptpubkey_address": null },
                { "scriptpubkey": "0014b7fc48300d5cb0d21fe52932b7e0dcdcd1a21b7a", "scriptpubkey_address": "bc1qkl7ysvqdtjcdy8l9yfjklcxum5dzyxm6hvvh0k" }
            ]
        }
    }"#;

    #[tokio::test]
    async fn maps_rpc_utxos_into_candidates() {
        let backend = backend(&[UTXOS_BODY, TX_BODY]);

        let utxos = backend
            .fetch_unspent("bc1qkl7ysvqdtjcdy8l9yfjklcxum5dzyxm6hvvh0k")
            .await
            .unwrap();

        assert_eq!(utxos.len(), 2);
        assert_eq!(utxos[0].outpoint.vout, 0);
        assert_eq!(utxos[0].value, Amount::from_sat(1000));
        assert_eq!(utxos[0].confirmations, CONFIRMED_DEPTH);
        assert_eq!(utxos[1].outpoint.vout, 3);
        assert_eq!(utxos[1].confirmations, 0);
        // the matched vout's script is attached to every candidate
        assert_eq!(
            utxos[0].script_pubkey,
            ScriptBuf::from_hex("0014b7fc48300d5cb0d21fe52932b7e0dcdcd1a21b7a").unwrap()
        );
        assert_eq!(utxos[0].script_pubkey, utxos[1].script_pubkey);
    }

    #[tokio::test]
    async fn empty_result_short_circuits_without_tx_lookup() {
        let empty = r#"{ "jsonrpc": "2.0", "id": "esplora_address::utxo", "result": [] }"#;
        let backend = backend(&[empty]);

        let utxos = backend.fetch_unspent("bc1qunused").await.unwrap();
        assert!(utxos.is_empty());
    }

    #[tokio::test]
    async fn unknown_address_yields_empty_script() {
        let backend = backend(&[UTXOS_BODY, TX_BODY]);

        let utxos = backend.fetch_unspent("bc1qsomeoneelse").await.unwrap();
        assert_eq!(utxos[0].script_pubkey, ScriptBuf::new());
    }

    #[tokio::test]
    async fn rpc_error_surfaces_as_source_unavailable() {
        let error_body = r#"{
            "jsonrpc": "2.0",
            "id": "esplora_address::utxo",
            "error": { "code": -32000, "message": "backend overloaded" }
        }"#;
        let backend = backend(&[error_body]);

        let err = backend.fetch_unspent("bc1qunused").await.unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable(_)));
    }

    #[tokio::test]
    async fn malformed_body_surfaces_as_source_unavailable() {
        let backend = backend(&["not json"]);

        let err = backend.fetch_unspent("bc1qunused").await.unwrap_err();
        assert!(matches!(err, Error::SourceUnavailable(_)));
    }
}

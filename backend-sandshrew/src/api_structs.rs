use bitcoin::Txid;
use serde::Deserialize;

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// One entry of the `esplora_address::utxo` result.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressUtxo {
    pub txid: Txid,
    pub vout: u32,
    /// Value in sats.
    pub value: u64,
    pub status: UtxoStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UtxoStatus {
    pub confirmed: bool,
}

/// Subset of the `esplora_tx` result needed to recover the locking script.
#[derive(Debug, Clone, Deserialize)]
pub struct TxDetails {
    pub vout: Vec<TxOutEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TxOutEntry {
    /// Locking script, hex encoded.
    pub scriptpubkey: String,
    pub scriptpubkey_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_address_utxo_response() {
        let body = r#"{
            "jsonrpc": "2.0",
            "id": "esplora_address::utxo",
            "result": [{
                "txid": "3333333333333333333333333333333333333333333333333333333333333333",
                "vout": 1,
                "value": 1000,
                "status": { "confirmed": true, "block_height": 800000 }
            }]
        }"#;
        let response: RpcResponse<Vec<AddressUtxo>> = serde_json::from_str(body).unwrap();
        let utxos = response.result.unwrap();
        assert_eq!(utxos.len(), 1);
        assert_eq!(utxos[0].vout, 1);
        assert_eq!(utxos[0].value, 1000);
        assert!(utxos[0].status.confirmed);
        assert!(response.error.is_none());
    }

    #[test]
    fn parses_rpc_error_envelope() {
        let body = r#"{
            "jsonrpc": "2.0",
            "id": "esplora_tx",
            "error": { "code": -32602, "message": "invalid params" }
        }"#;
        let response: RpcResponse<TxDetails> = serde_json::from_str(body).unwrap();
        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().code, -32602);
    }
}

use anyhow::{anyhow, bail, Result};
use bitcoin::Txid;
use serde::de::DeserializeOwned;
use serde_json::json;
use url::Url;

use super::http_trait::HttpClient;
use crate::api_structs::{AddressUtxo, RpcResponse, TxDetails};

/// Client for a Sandshrew JSON-RPC endpoint multiplexing esplora methods.
///
/// Generic over the HTTP client implementation, allowing consumers to provide
/// their own HTTP client by implementing the `HttpClient` trait.
#[derive(Clone)]
pub struct SandshrewClient<H: HttpClient> {
    http_client: H,
    host_url: Url,
}

impl<H: HttpClient> SandshrewClient<H> {
    /// Create a new client against a full endpoint URL.
    ///
    /// # Arguments
    /// * `host_url` - Endpoint URL, API key path segment included
    /// * `http_client` - HTTP client implementation
    pub fn new(host_url: String, http_client: H) -> Result<Self> {
        let host_url = Url::parse(&host_url)?;

        Ok(SandshrewClient {
            http_client,
            host_url,
        })
    }

    /// Create a client for a hosted Sandshrew network endpoint, e.g.
    /// `from_network("mainnet", api_key, http_client)`.
    pub fn from_network(network: &str, api_key: &str, http_client: H) -> Result<Self> {
        Self::new(
            format!("https://{network}.sandshrew.io/v1/{api_key}"),
            http_client,
        )
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: &[&str]) -> Result<T> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": method,
            "method": method,
            "params": params,
        });
        let body = self
            .http_client
            .post_json(self.host_url.as_str(), &request.to_string())
            .await?;
        let response: RpcResponse<T> = serde_json::from_str(&body)?;
        if let Some(err) = response.error {
            bail!("rpc error {}: {}", err.code, err.message);
        }
        response
            .result
            .ok_or_else(|| anyhow!("rpc response for {} carried no result", method))
    }

    /// Unspent outputs currently paying `address`.
    pub async fn address_utxos(&self, address: &str) -> Result<Vec<AddressUtxo>> {
        self.call("esplora_address::utxo", &[address]).await
    }

    /// Transaction details, used to recover the locking script of an output.
    pub async fn tx(&self, txid: &Txid) -> Result<TxDetails> {
        let id = txid.to_string();
        self.call("esplora_tx", &[id.as_str()]).await
    }
}

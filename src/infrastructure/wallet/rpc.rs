//! JSON-RPC wallet generator client

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::{GeneratedWallet, WalletError, WalletGenerator};
use crate::config::AppConfig;

/// Wallet generator backed by the wallet service's JSON-RPC endpoint
pub struct WalletRpcGenerator {
    endpoint: String,
    client: Client,
}

impl WalletRpcGenerator {
    /// Create a new generator client
    pub fn new(config: &AppConfig) -> Self {
        Self {
            endpoint: config.wallet.rpc_url.clone(),
            client: Client::new(),
        }
    }

    /// Make a JSON-RPC call to the wallet service
    async fn rpc_call(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let request_body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| WalletError::NetworkError(e.to_string()))?;

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| WalletError::ParseError(e.to_string()))?;

        if let Some(error) = response_json.get("error").filter(|e| !e.is_null()) {
            return Err(WalletError::NetworkError(error.to_string()));
        }

        response_json
            .get("result")
            .cloned()
            .ok_or_else(|| WalletError::ParseError("No result in response".to_string()))
    }

    fn required_str(result: &Value, field: &str) -> Result<String, WalletError> {
        result
            .get(field)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| WalletError::ParseError(format!("Missing field '{}' in wallet", field)))
    }
}

#[async_trait]
impl WalletGenerator for WalletRpcGenerator {
    async fn generate(&self) -> Result<GeneratedWallet, WalletError> {
        let result = self.rpc_call("generatewallet", json!([])).await?;

        Ok(GeneratedWallet {
            address: Self::required_str(&result, "address")?,
            passphrase: Self::required_str(&result, "passphrase")?,
            private_key: Self::required_str(&result, "privateKey")?,
            public_key: Self::required_str(&result, "publicKey")?,
        })
    }
}

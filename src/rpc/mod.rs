use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use log::debug;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

/// Token-extension program that SGT identity mints are created under.
pub const TOKEN_EXTENSION_PROGRAM_ID: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";

/// Maximum addresses per getMultipleAccounts request.
pub const MAX_MULTIPLE_ACCOUNTS: usize = 100;

const RPC_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum RpcError {
    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Malformed rpc response: {0}")]
    MalformedResponse(String),
}

/// Thin JSON-RPC client for the two account lookups the verifier needs.
///
/// This is transport only: it hands back address/byte-buffer pairs and never
/// interprets account contents.
pub struct RpcClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Deserialize)]
struct KeyedAccount {
    pubkey: String,
    account: AccountData,
}

#[derive(Deserialize)]
struct AccountData {
    /// `["<payload>", "base64"]` under base64 encoding.
    data: (String, String),
}

impl RpcClient {
    pub fn new(url: String) -> Self {
        RpcClient {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// Fetch the wallet's token accounts under the token-extension program,
    /// paired with their raw account data. A token account whose payload is
    /// not valid base64 is dropped on its own; the call still succeeds.
    pub async fn get_token_accounts_by_owner(
        &self,
        owner: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, RpcError> {
        let params = json!([
            owner,
            { "programId": TOKEN_EXTENSION_PROGRAM_ID },
            { "encoding": "base64" }
        ]);
        let result = self.request("getTokenAccountsByOwner", params).await?;
        parse_token_accounts(result)
    }

    /// Fetch account data for the given mint addresses, chunked at
    /// `MAX_MULTIPLE_ACCOUNTS` per request. Addresses with no account
    /// on-chain are omitted; request order is preserved across chunks.
    pub async fn get_mint_accounts(
        &self,
        addresses: &[String],
    ) -> Result<Vec<(String, Vec<u8>)>, RpcError> {
        let mut accounts = Vec::with_capacity(addresses.len());
        for chunk in addresses.chunks(MAX_MULTIPLE_ACCOUNTS) {
            let params = json!([chunk, { "encoding": "base64" }]);
            let result = self.request("getMultipleAccounts", params).await?;
            accounts.extend(parse_multiple_accounts(chunk, result)?);
        }
        Ok(accounts)
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let response: Value = self
            .client
            .post(&self.url)
            .timeout(RPC_TIMEOUT)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.get("error") {
            return Err(RpcError::Rpc {
                code: error.get("code").and_then(Value::as_i64).unwrap_or(0),
                message: error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            });
        }
        match response.get("result") {
            Some(result) => Ok(result.clone()),
            None => Err(RpcError::MalformedResponse(format!(
                "{} response carried neither result nor error",
                method
            ))),
        }
    }
}

fn parse_token_accounts(result: Value) -> Result<Vec<(String, Vec<u8>)>, RpcError> {
    let value = result.get("value").cloned().unwrap_or(Value::Null);
    let entries: Vec<KeyedAccount> = serde_json::from_value(value)
        .map_err(|e| RpcError::MalformedResponse(e.to_string()))?;

    let mut accounts = Vec::with_capacity(entries.len());
    for entry in entries {
        match BASE64_STANDARD.decode(&entry.account.data.0) {
            Ok(bytes) => accounts.push((entry.pubkey, bytes)),
            Err(e) => {
                debug!(
                    "Skipping token account {} with invalid base64 data: {}",
                    entry.pubkey, e
                );
            }
        }
    }
    Ok(accounts)
}

fn parse_multiple_accounts(
    addresses: &[String],
    result: Value,
) -> Result<Vec<(String, Vec<u8>)>, RpcError> {
    let value = result.get("value").cloned().unwrap_or(Value::Null);
    let entries: Vec<Option<AccountData>> = serde_json::from_value(value)
        .map_err(|e| RpcError::MalformedResponse(e.to_string()))?;
    if entries.len() != addresses.len() {
        return Err(RpcError::MalformedResponse(format!(
            "getMultipleAccounts returned {} entries for {} addresses",
            entries.len(),
            addresses.len()
        )));
    }

    let mut accounts = Vec::with_capacity(addresses.len());
    for (address, entry) in addresses.iter().zip(entries) {
        let account = match entry {
            Some(account) => account,
            None => continue,
        };
        match BASE64_STANDARD.decode(&account.data.0) {
            Ok(bytes) => accounts.push((address.clone(), bytes)),
            Err(e) => debug!("Skipping mint {} with invalid base64 data: {}", address, e),
        }
    }
    Ok(accounts)
}

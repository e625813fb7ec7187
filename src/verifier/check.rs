use std::collections::HashMap;

use log::{debug, info};
use serde::Serialize;

use crate::common::typedefs::identity::Identity;
use crate::parser::{decode_mint, extract_mint_address};
use crate::rpc::RpcClient;

use super::error::CheckError;
use super::is_verified_identity;

/// Outcome of one wallet check. The optional fields are populated only when
/// an identity was found; the result is recomputed on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub has_identity: bool,
    pub serial: Option<u64>,
    pub mint_address: Option<String>,
    pub token_account_address: Option<String>,
}

impl VerificationResult {
    pub fn not_held() -> Self {
        VerificationResult::default()
    }

    pub fn held(serial: Option<u64>, mint_address: String, token_account_address: String) -> Self {
        VerificationResult {
            has_identity: true,
            serial,
            mint_address: Some(mint_address),
            token_account_address: Some(token_account_address),
        }
    }
}

/// Candidate mints behind one wallet's token accounts: the deduplicated mint
/// addresses in first-observed order, and the first token account seen for
/// each mint.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CandidateMints {
    pub mint_addresses: Vec<String>,
    pub token_account_by_mint: HashMap<String, String>,
}

/// Resolve each token account to its owning mint.
///
/// Token accounts whose mint cannot be extracted are skipped without failing
/// the wallet's other candidates. If the wallet holds several accounts of
/// one mint, the first one observed wins.
pub fn collect_candidates(token_accounts: &[(String, Vec<u8>)]) -> CandidateMints {
    let mut candidates = CandidateMints::default();
    for (token_account_address, data) in token_accounts {
        let mint_address = match extract_mint_address(data) {
            Some(mint) => mint.to_string(),
            None => {
                debug!(
                    "Skipping token account {} with undecodable mint",
                    token_account_address
                );
                continue;
            }
        };
        if !candidates.token_account_by_mint.contains_key(&mint_address) {
            candidates.mint_addresses.push(mint_address.clone());
            candidates
                .token_account_by_mint
                .insert(mint_address, token_account_address.clone());
        }
    }
    candidates
}

/// Decode and verify fetched mint data in the order it was returned, and
/// report the first genuine identity with its provenance. One match is
/// sufficient; later candidates are not inspected.
pub fn evaluate_candidates(
    mint_accounts: &[(String, Vec<u8>)],
    candidates: &CandidateMints,
) -> VerificationResult {
    for (mint_address, data) in mint_accounts {
        let decoded = match decode_mint(data) {
            Some(decoded) => decoded,
            None => {
                debug!("Skipping undecodable mint {}", mint_address);
                continue;
            }
        };
        if !is_verified_identity(&decoded.record) {
            continue;
        }
        let token_account_address = match candidates.token_account_by_mint.get(mint_address) {
            Some(address) => address.clone(),
            // Only fetched mints we asked for can match; anything else is
            // a collaborator inventing addresses.
            None => continue,
        };
        return VerificationResult::held(
            decoded.member_number,
            mint_address.clone(),
            token_account_address,
        );
    }
    VerificationResult::not_held()
}

/// Check whether `wallet_address` holds a genuine SGT identity.
///
/// Two sequential RPC round trips: the wallet's token-extension accounts,
/// then the deduplicated mint accounts behind them. Transport failures
/// surface as errors; a wallet that simply holds no matching mint is a
/// successful "not held" result.
pub async fn check_wallet(
    rpc: &RpcClient,
    wallet_address: &str,
) -> Result<VerificationResult, CheckError> {
    Identity::try_from(wallet_address)?;

    let token_accounts = rpc.get_token_accounts_by_owner(wallet_address).await?;
    let candidates = collect_candidates(&token_accounts);
    if candidates.mint_addresses.is_empty() {
        info!(
            "Wallet {} holds no token-extension accounts with a resolvable mint",
            wallet_address
        );
        return Ok(VerificationResult::not_held());
    }

    let mint_accounts = rpc.get_mint_accounts(&candidates.mint_addresses).await?;
    Ok(evaluate_candidates(&mint_accounts, &candidates))
}

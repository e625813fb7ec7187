use thiserror::Error;

use crate::common::typedefs::identity::ParseIdentityError;
use crate::rpc::RpcError;

/// Failures of one wallet check.
///
/// "No identity held" is not among them: a wallet that owns no matching mint
/// is a successful result, not an error.
#[derive(Error, Debug)]
pub enum CheckError {
    /// The wallet address is caller input, so malformed base58 fails loudly
    /// instead of being absorbed like on-chain data.
    #[error("Invalid wallet address: {0}")]
    InvalidWalletAddress(#[from] ParseIdentityError),
    #[error("Rpc error: {0}")]
    Rpc(#[from] RpcError),
}

use crate::common::typedefs::identity::Identity;

/// Extract the owning mint of a token account.
///
/// The mint occupies the first 32 bytes of every token account regardless of
/// which extensions the account carries, so no TLV scan is needed. Returns
/// `None` for buffers shorter than 32 bytes.
pub fn extract_mint_address(data: &[u8]) -> Option<Identity> {
    data.get(..32)
        .and_then(|bytes| Identity::try_from(bytes).ok())
}

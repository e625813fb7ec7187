/// Shared constants for token-extension account byte layouts.
///
/// SPL token/mint account base length, padded so extensions start at the same
/// offset for both account kinds.
pub const SPL_TOKEN_ACCOUNT_BASE_LEN: usize = 165;
/// Account type marker byte offset in token/mint account data.
pub const ACCOUNT_TYPE_OFFSET: usize = SPL_TOKEN_ACCOUNT_BASE_LEN;
/// First byte of the TLV extension region.
pub const EXTENSIONS_START_OFFSET: usize = ACCOUNT_TYPE_OFFSET + 1;
/// Minimum length of an extended mint account: base mint (82 bytes), padding
/// up to the account type byte at offset 165, and the type byte itself.
pub const MIN_EXTENDED_MINT_LEN: usize = EXTENSIONS_START_OFFSET;

/// AccountType::Mint discriminator value.
pub const ACCOUNT_TYPE_MINT: u8 = 1;
/// AccountType::TokenAccount discriminator value.
pub const ACCOUNT_TYPE_TOKEN_ACCOUNT: u8 = 2;

/// Mint authority COption discriminant offset range `[0..4]` (u32 LE).
pub const MINT_AUTHORITY_OPTION_OFFSET: usize = 0;
/// Mint authority pubkey offset range `[4..36]` (32 bytes).
pub const MINT_AUTHORITY_OFFSET: usize = MINT_AUTHORITY_OPTION_OFFSET + 4;

/// ExtensionType::Uninitialized, the end-of-extensions sentinel.
pub const EXTENSION_TYPE_UNINITIALIZED: u16 = 0;
/// ExtensionType::MetadataPointer.
pub const EXTENSION_TYPE_METADATA_POINTER: u16 = 18;
/// ExtensionType::TokenGroupMember.
pub const EXTENSION_TYPE_GROUP_MEMBER: u16 = 23;

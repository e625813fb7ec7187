use crate::common::token_layout::{
    ACCOUNT_TYPE_MINT, ACCOUNT_TYPE_OFFSET, EXTENSIONS_START_OFFSET, EXTENSION_TYPE_GROUP_MEMBER,
    EXTENSION_TYPE_METADATA_POINTER, EXTENSION_TYPE_UNINITIALIZED, MINT_AUTHORITY_OFFSET,
    MINT_AUTHORITY_OPTION_OFFSET, MIN_EXTENDED_MINT_LEN,
};
use crate::common::typedefs::identity::Identity;

/// Identity-relevant fields of one extended mint account.
///
/// A pure projection of the account buffer: every field is an owned copy,
/// and an absent field simply was not present (or not parseable) in the
/// input. The metadata pointer fields are set together or not at all, as are
/// the group member fields.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct MintRecord {
    /// Set iff the authority COption discriminant in the base mint equals 1.
    pub mint_authority: Option<Identity>,
    pub metadata_pointer_authority: Option<Identity>,
    pub metadata_pointer_address: Option<Identity>,
    pub group_member_mint: Option<Identity>,
    pub group_member_group: Option<Identity>,
}

/// A decoded mint plus the member number trailing its group-member
/// extension. The member number is kept outside the record because it is
/// only reported to callers after the record verifies.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct DecodedMint {
    pub record: MintRecord,
    pub member_number: Option<u64>,
}

/// Parse the identity-relevant fields of an extended mint account.
///
/// Layout:
/// - BaseMint (82 bytes):
///   - mint_authority COption (4 + 32 = 36 bytes)
///   - supply (8 bytes)
///   - decimals (1 byte)
///   - is_initialized (1 byte)
///   - freeze_authority COption (4 + 32 = 36 bytes)
/// - Padding up to the account type byte at offset 165
/// - account_type (1 byte), must be AccountType::Mint
/// - TLV extension entries from offset 166:
///   type (2 bytes LE), length (2 bytes LE), value (length bytes)
///
/// Every structural problem (short buffer, non-mint account type, truncated
/// trailing entry) resolves to `None` or an absent field. Callers cannot
/// tell undecodable data apart from data that is not a mint, and they are
/// not supposed to.
pub fn decode_mint(data: &[u8]) -> Option<DecodedMint> {
    if data.len() < MIN_EXTENDED_MINT_LEN {
        return None;
    }
    // Token accounts are padded to the same extension layout; only accept
    // actual mints here.
    if data[ACCOUNT_TYPE_OFFSET] != ACCOUNT_TYPE_MINT {
        return None;
    }

    let mut decoded = DecodedMint::default();

    let authority_option = u32::from_le_bytes(
        data[MINT_AUTHORITY_OPTION_OFFSET..MINT_AUTHORITY_OPTION_OFFSET + 4]
            .try_into()
            .ok()?,
    );
    if authority_option == 1 {
        decoded.record.mint_authority = read_identity(data, MINT_AUTHORITY_OFFSET);
    }

    scan_extensions(data, &mut decoded);
    Some(decoded)
}

/// Walk the TLV entries trailing the base mint.
///
/// Unknown types are skipped by their declared length. A later entry of a
/// known type overwrites an earlier one. An entry whose declared length runs
/// past the buffer ends the scan without failing the decode; already
/// extracted fields are kept.
fn scan_extensions(data: &[u8], decoded: &mut DecodedMint) {
    let mut cursor = EXTENSIONS_START_OFFSET;
    while cursor + 4 <= data.len() {
        let extension_type = u16::from_le_bytes([data[cursor], data[cursor + 1]]);
        if extension_type == EXTENSION_TYPE_UNINITIALIZED {
            break;
        }
        let length = u16::from_le_bytes([data[cursor + 2], data[cursor + 3]]) as usize;
        cursor += 4;
        if cursor + length > data.len() {
            break;
        }
        let value = &data[cursor..cursor + length];

        match extension_type {
            EXTENSION_TYPE_METADATA_POINTER if length >= 64 => {
                decoded.record.metadata_pointer_authority = read_identity(value, 0);
                decoded.record.metadata_pointer_address = read_identity(value, 32);
            }
            EXTENSION_TYPE_GROUP_MEMBER if length >= 64 => {
                decoded.record.group_member_mint = read_identity(value, 0);
                decoded.record.group_member_group = read_identity(value, 32);
                decoded.member_number = value
                    .get(64..72)
                    .and_then(|bytes| bytes.try_into().ok())
                    .map(u64::from_le_bytes);
            }
            _ => {}
        }
        cursor += length;
    }
}

fn read_identity(data: &[u8], offset: usize) -> Option<Identity> {
    data.get(offset..offset + 32)
        .and_then(|bytes| Identity::try_from(bytes).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::token_layout::ACCOUNT_TYPE_TOKEN_ACCOUNT;
    use rstest::rstest;

    fn base_mint(authority: Option<[u8; 32]>, account_type: u8) -> Vec<u8> {
        let mut data = vec![0u8; MIN_EXTENDED_MINT_LEN];
        if let Some(authority) = authority {
            data[MINT_AUTHORITY_OPTION_OFFSET..MINT_AUTHORITY_OPTION_OFFSET + 4]
                .copy_from_slice(&1u32.to_le_bytes());
            data[MINT_AUTHORITY_OFFSET..MINT_AUTHORITY_OFFSET + 32].copy_from_slice(&authority);
        }
        data[ACCOUNT_TYPE_OFFSET] = account_type;
        data
    }

    fn push_extension(data: &mut Vec<u8>, extension_type: u16, value: &[u8]) {
        data.extend_from_slice(&extension_type.to_le_bytes());
        data.extend_from_slice(&(value.len() as u16).to_le_bytes());
        data.extend_from_slice(value);
    }

    fn group_member_value(mint: [u8; 32], group: [u8; 32], member_number: Option<u64>) -> Vec<u8> {
        let mut value = Vec::new();
        value.extend_from_slice(&mint);
        value.extend_from_slice(&group);
        if let Some(member_number) = member_number {
            value.extend_from_slice(&member_number.to_le_bytes());
        }
        value
    }

    #[rstest]
    #[case(0)]
    #[case(82)]
    #[case(165)]
    fn rejects_short_buffers(#[case] len: usize) {
        assert_eq!(decode_mint(&vec![0u8; len]), None);
    }

    #[rstest]
    #[case(0)]
    #[case(ACCOUNT_TYPE_TOKEN_ACCOUNT)]
    #[case(3)]
    #[case(255)]
    fn rejects_non_mint_account_types(#[case] account_type: u8) {
        // Well-formed extensions do not rescue a non-mint account type.
        let mut data = base_mint(Some([1u8; 32]), account_type);
        push_extension(&mut data, EXTENSION_TYPE_METADATA_POINTER, &[1u8; 64]);
        assert_eq!(decode_mint(&data), None);
    }

    #[test]
    fn reads_mint_authority_when_option_is_set() {
        let data = base_mint(Some([42u8; 32]), ACCOUNT_TYPE_MINT);
        let decoded = decode_mint(&data).unwrap();
        assert_eq!(decoded.record.mint_authority, Some(Identity([42u8; 32])));
        assert_eq!(decoded.member_number, None);
    }

    #[test]
    fn absent_authority_option_leaves_authority_unset() {
        let data = base_mint(None, ACCOUNT_TYPE_MINT);
        let decoded = decode_mint(&data).unwrap();
        assert_eq!(decoded.record.mint_authority, None);
    }

    #[test]
    fn reads_metadata_pointer_fields() {
        let mut data = base_mint(None, ACCOUNT_TYPE_MINT);
        let mut value = [5u8; 64];
        value[32..].copy_from_slice(&[6u8; 32]);
        push_extension(&mut data, EXTENSION_TYPE_METADATA_POINTER, &value);

        let decoded = decode_mint(&data).unwrap();
        assert_eq!(
            decoded.record.metadata_pointer_authority,
            Some(Identity([5u8; 32]))
        );
        assert_eq!(
            decoded.record.metadata_pointer_address,
            Some(Identity([6u8; 32]))
        );
    }

    #[test]
    fn short_metadata_pointer_leaves_both_fields_unset() {
        let mut data = base_mint(None, ACCOUNT_TYPE_MINT);
        push_extension(&mut data, EXTENSION_TYPE_METADATA_POINTER, &[5u8; 63]);

        let decoded = decode_mint(&data).unwrap();
        assert_eq!(decoded.record.metadata_pointer_authority, None);
        assert_eq!(decoded.record.metadata_pointer_address, None);
    }

    #[test]
    fn reads_group_member_with_member_number() {
        let mut data = base_mint(None, ACCOUNT_TYPE_MINT);
        let value = group_member_value([7u8; 32], [8u8; 32], Some(4217));
        push_extension(&mut data, EXTENSION_TYPE_GROUP_MEMBER, &value);

        let decoded = decode_mint(&data).unwrap();
        assert_eq!(decoded.record.group_member_mint, Some(Identity([7u8; 32])));
        assert_eq!(decoded.record.group_member_group, Some(Identity([8u8; 32])));
        assert_eq!(decoded.member_number, Some(4217));
    }

    #[rstest]
    #[case(64)]
    #[case(67)]
    #[case(71)]
    fn group_member_without_full_trailer_has_no_member_number(#[case] len: usize) {
        let mut data = base_mint(None, ACCOUNT_TYPE_MINT);
        let mut value = group_member_value([7u8; 32], [8u8; 32], Some(4217));
        value.truncate(len);
        push_extension(&mut data, EXTENSION_TYPE_GROUP_MEMBER, &value);

        let decoded = decode_mint(&data).unwrap();
        assert_eq!(decoded.record.group_member_mint, Some(Identity([7u8; 32])));
        assert_eq!(decoded.record.group_member_group, Some(Identity([8u8; 32])));
        assert_eq!(decoded.member_number, None);
    }

    #[test]
    fn skips_unknown_extension_without_losing_position() {
        let mut data = base_mint(None, ACCOUNT_TYPE_MINT);
        push_extension(&mut data, 9, &[0xAA; 13]);
        let mut value = [5u8; 64];
        value[32..].copy_from_slice(&[6u8; 32]);
        push_extension(&mut data, EXTENSION_TYPE_METADATA_POINTER, &value);

        let decoded = decode_mint(&data).unwrap();
        assert_eq!(
            decoded.record.metadata_pointer_address,
            Some(Identity([6u8; 32]))
        );
    }

    #[test]
    fn later_entry_of_same_type_wins() {
        let mut data = base_mint(None, ACCOUNT_TYPE_MINT);
        push_extension(&mut data, EXTENSION_TYPE_METADATA_POINTER, &[1u8; 64]);
        push_extension(&mut data, EXTENSION_TYPE_METADATA_POINTER, &[2u8; 64]);

        let decoded = decode_mint(&data).unwrap();
        assert_eq!(
            decoded.record.metadata_pointer_authority,
            Some(Identity([2u8; 32]))
        );
    }

    #[test]
    fn sentinel_type_ends_the_scan() {
        let mut data = base_mint(None, ACCOUNT_TYPE_MINT);
        push_extension(&mut data, EXTENSION_TYPE_UNINITIALIZED, &[]);
        push_extension(&mut data, EXTENSION_TYPE_METADATA_POINTER, &[1u8; 64]);

        let decoded = decode_mint(&data).unwrap();
        assert_eq!(decoded.record.metadata_pointer_authority, None);
    }

    #[test]
    fn truncated_entry_ends_the_scan_but_keeps_earlier_fields() {
        let mut data = base_mint(None, ACCOUNT_TYPE_MINT);
        push_extension(&mut data, EXTENSION_TYPE_METADATA_POINTER, &[1u8; 64]);
        // Declared length runs past the end of the buffer.
        data.extend_from_slice(&EXTENSION_TYPE_GROUP_MEMBER.to_le_bytes());
        data.extend_from_slice(&200u16.to_le_bytes());
        data.extend_from_slice(&[9u8; 10]);

        let decoded = decode_mint(&data).unwrap();
        assert_eq!(
            decoded.record.metadata_pointer_authority,
            Some(Identity([1u8; 32]))
        );
        assert_eq!(decoded.record.group_member_mint, None);
    }
}

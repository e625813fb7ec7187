use once_cell::sync::Lazy;

use crate::common::typedefs::identity::Identity;
use crate::parser::mint::MintRecord;

pub mod check;
pub mod error;

/// Mint authority every genuine SGT identity mint was created with.
pub const EXPECTED_AUTHORITY_ADDRESS: &str = "2k6VZBtUCXsLi8aPSajExBPgZyNidT2wBZQqiqiVfR7E";
/// Metadata pointer target and token group of the SGT collection.
pub const EXPECTED_GROUP_ADDRESS: &str = "94zJMz6F1yu3KkShXuDdFytna7kVDXmek1dLyH7rzyjf";

pub static EXPECTED_AUTHORITY: Lazy<Identity> = Lazy::new(|| {
    Identity::try_from(EXPECTED_AUTHORITY_ADDRESS).expect("expected authority address is invalid")
});

pub static EXPECTED_GROUP: Lazy<Identity> =
    Lazy::new(|| Identity::try_from(EXPECTED_GROUP_ADDRESS).expect("expected group address is invalid"));

/// Check whether one decoded mint record is a genuine SGT identity mint.
///
/// All four fields must be present and equal their expected constant; the
/// first mismatch rejects the mint. Anything weaker would accept arbitrary
/// token-extension mints as identities.
pub fn is_verified_identity(record: &MintRecord) -> bool {
    record.mint_authority == Some(*EXPECTED_AUTHORITY)
        && record.metadata_pointer_authority == Some(*EXPECTED_AUTHORITY)
        && record.metadata_pointer_address == Some(*EXPECTED_GROUP)
        && record.group_member_group == Some(*EXPECTED_GROUP)
}

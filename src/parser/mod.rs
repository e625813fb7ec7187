pub mod mint;
pub mod token_account;

pub use mint::{decode_mint, DecodedMint, MintRecord};
pub use token_account::extract_mint_address;

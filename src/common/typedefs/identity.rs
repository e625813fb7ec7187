use core::fmt;
use std::convert::TryFrom;

use serde::de::{self, Visitor};
use serde::ser::{Serialize, Serializer};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use super::base58;
use super::base58::Base58Error;

pub const IDENTITY_LEN: usize = 32;

/// A fixed 32-byte public identifier, displayed as base58 text.
///
/// Identities are compared byte-for-byte and own their bytes outright; they
/// keep no reference to whatever buffer they were decoded from.
#[derive(Default, Clone, PartialEq, Eq, Hash, Copy)]
pub struct Identity(pub [u8; IDENTITY_LEN]);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseIdentityError {
    #[error(transparent)]
    Base58(#[from] Base58Error),
    #[error("Expected {IDENTITY_LEN} bytes, got {0}")]
    WrongSize(usize),
}

impl Identity {
    pub fn to_bytes(&self) -> [u8; IDENTITY_LEN] {
        self.0
    }

    pub fn to_bytes_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl TryFrom<&str> for Identity {
    type Error = ParseIdentityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let bytes = base58::decode(value)?;
        Identity::try_from(bytes.as_slice())
    }
}

impl TryFrom<&[u8]> for Identity {
    type Error = ParseIdentityError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; IDENTITY_LEN] = bytes
            .try_into()
            .map_err(|_| ParseIdentityError::WrongSize(bytes.len()))?;
        Ok(Identity(array))
    }
}

impl From<[u8; IDENTITY_LEN]> for Identity {
    fn from(bytes: [u8; IDENTITY_LEN]) -> Self {
        Identity(bytes)
    }
}

impl From<Identity> for String {
    fn from(val: Identity) -> Self {
        base58::encode(&val.0)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", base58::encode(&self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self)
    }
}

struct Base58Visitor;

impl<'de> Visitor<'de> for Base58Visitor {
    type Value = Identity;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a base58 encoded string")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Identity::try_from(value).map_err(|e| E::custom(e.to_string()))
    }
}

impl<'de> Deserialize<'de> for Identity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(Base58Visitor)
    }
}

impl Serialize for Identity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&base58::encode(&self.0))
    }
}

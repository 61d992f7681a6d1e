// Path: crates/types/src/app/address.rs
use crate::error::AddressError;
use bech32::{FromBase32, ToBase32, Variant};
use std::fmt;

/// The canonical byte form of an on-chain account.
///
/// Two addresses are equal iff their bytes are equal; the bech32 prefix they
/// were parsed from plays no part in equality.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress(Vec<u8>);

impl AccountAddress {
    /// Wraps raw address bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parses a bech32 string with any human-readable part.
    pub fn from_bech32(s: &str) -> Result<Self, AddressError> {
        let (_hrp, data, _variant) = bech32::decode(s).map_err(|e| AddressError::Bech32 {
            address: s.to_string(),
            reason: e.to_string(),
        })?;
        let bytes = Vec::<u8>::from_base32(&data).map_err(|e| AddressError::Bech32 {
            address: s.to_string(),
            reason: e.to_string(),
        })?;
        if bytes.is_empty() {
            return Err(AddressError::Empty(s.to_string()));
        }
        Ok(Self(bytes))
    }

    /// Renders the address with the given human-readable part.
    pub fn to_bech32(&self, hrp: &str) -> Result<String, AddressError> {
        bech32::encode(hrp, self.0.to_base32(), Variant::Bech32)
            .map_err(|e| AddressError::InvalidHrp(format!("{hrp}: {e}")))
    }

    /// The raw address bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for AccountAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress(0x{})", hex::encode(&self.0))
    }
}

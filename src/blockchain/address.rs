//! Account identifier normalization.
//!
//! Hedera exposes accounts both as ordinary 20-byte EVM addresses and as
//! long-form aliases whose trailing 40 hex characters are the EVM address.
//! Either form is reduced to an [`Address`], whose `Display` renders the
//! EIP-55 checksum casing.

use alloy::primitives::Address;
use thiserror::Error;

/// Length of a `0x`-prefixed 20-byte hex address.
const SHORT_FORM_LEN: usize = 42;
/// Hex characters in an address body.
const ADDRESS_HEX_LEN: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("account identifier is empty")]
    Empty,

    #[error("'{input}' does not contain a 40 character hex address")]
    InvalidHex { input: String },
}

/// Reduce an account identifier to a checksummable address.
///
/// Identifiers longer than 42 characters keep only their last 40 characters.
/// Shorter ones are lowercased and lose an optional `0x` prefix.
///
/// The input is measured as given; surrounding whitespace is not trimmed and
/// makes the identifier invalid.
pub fn normalize_address(input: &str) -> Result<Address, AddressError> {
    if input.is_empty() {
        return Err(AddressError::Empty);
    }

    let body = if input.len() > SHORT_FORM_LEN {
        // Byte slicing is only safe on a char boundary; non-ASCII input is not hex anyway.
        let start = input.len() - ADDRESS_HEX_LEN;
        input
            .get(start..)
            .ok_or_else(|| invalid(input))?
            .to_string()
    } else {
        let lower = input.to_lowercase();
        lower.strip_prefix("0x").unwrap_or(&lower).to_string()
    };

    if body.len() != ADDRESS_HEX_LEN || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid(input));
    }

    format!("0x{body}").parse::<Address>().map_err(|_| invalid(input))
}

/// Checksummed string form of [`normalize_address`].
pub fn to_checksum_address(input: &str) -> Result<String, AddressError> {
    normalize_address(input).map(|address| address.to_checksum(None))
}

fn invalid(input: &str) -> AddressError {
    AddressError::InvalidHex {
        input: input.to_string(),
    }
}

use std::str::FromStr;

use ethers_core::types::Address;

use crate::error::BuildError;

/// Parses a 0x-prefixed (or bare) 20-byte hex address.
///
/// Builders take an [Address]; this is for callers holding addresses as strings, e.g. from
/// a config file, and reports a bad address as [BuildError::InvalidSubqueryInput].
pub fn parse_address(addr: &str) -> Result<Address, BuildError> {
    let hex = addr.strip_prefix("0x").unwrap_or(addr);
    if hex.len() != 40 {
        return Err(BuildError::invalid_input(
            "address",
            format!("expected 40 hex characters, found {}", hex.len()),
        ));
    }
    Address::from_str(hex).map_err(|e| BuildError::invalid_input("address", e.to_string()))
}

pub fn to_block_number(block_number: u64) -> Result<u32, BuildError> {
    u32::try_from(block_number).map_err(|_| {
        BuildError::invalid_input("blockNumber", format!("{block_number} exceeds u32"))
    })
}

pub fn to_tx_idx(tx_idx: u64) -> Result<u16, BuildError> {
    u16::try_from(tx_idx)
        .map_err(|_| BuildError::invalid_input("txIdx", format!("{tx_idx} exceeds u16")))
}

/// Checks `idx < len` for a chunk or topic index.
pub fn check_index(field: &'static str, idx: usize, len: usize) -> Result<(), BuildError> {
    if idx >= len {
        return Err(BuildError::invalid_input(field, format!("{idx} out of range [0, {len})")));
    }
    Ok(())
}

/// `offset + idx` as a field index, failing if the result reaches `limit`.
pub fn offset_idx(
    field: &'static str,
    offset: usize,
    idx: u32,
    limit: Option<usize>,
) -> Result<u32, BuildError> {
    let overflow = || BuildError::invalid_input(field, format!("{idx} overflows the field index"));
    let field_idx = (offset as u64).checked_add(idx as u64).ok_or_else(overflow)?;
    if let Some(limit) = limit {
        if field_idx >= limit as u64 {
            return Err(BuildError::invalid_input(
                field,
                format!("{idx} must be less than {}", limit - offset),
            ));
        }
    }
    u32::try_from(field_idx).map_err(|_| overflow())
}

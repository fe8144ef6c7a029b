use ethers_core::types::{Address, H256, U256};

pub fn u256_to_h256(input: &U256) -> H256 {
    let mut bytes = [0; 32];
    input.to_big_endian(&mut bytes);
    H256(bytes)
}

pub fn h256_to_u256(input: &H256) -> U256 {
    U256::from_big_endian(input.as_bytes())
}

/// Left pads the address with zeros to a bytes32.
pub fn address_to_h256(addr: &Address) -> H256 {
    let mut bytes = [0u8; 32];
    bytes[12..].copy_from_slice(addr.as_bytes());
    H256(bytes)
}

/// Right pads `bytes` with zeros to a bytes32, truncating anything after the first 32 bytes.
pub fn pad_to_bytes32(bytes: &[u8]) -> H256 {
    let mut padded = [0u8; 32];
    let len = bytes.len().min(32);
    padded[..len].copy_from_slice(&bytes[..len]);
    H256(padded)
}

use std::io::{Result, Write};

use ethers_core::types::U256;

pub fn write_u256(writer: &mut impl Write, word: U256) -> Result<()> {
    let mut buf = [0u8; 32];
    word.to_big_endian(&mut buf);
    writer.write_all(&buf)?;
    Ok(())
}

use axiom_codec::{
    constants::MAX_SOLIDITY_MAPPING_KEYS, types::native::SolidityNestedMappingSubquery,
};
use ethers_core::types::{Address, H256, U256};

use super::SubqueryHandle;
use crate::{error::BuildError, session::BuildSession};

/// Values of a (possibly nested) Solidity mapping stored at `mapping_slot`.
pub struct MappingBuilder<'a> {
    session: &'a mut BuildSession,
    block_number: u32,
    addr: Address,
    mapping_slot: U256,
}

impl<'a> MappingBuilder<'a> {
    pub(crate) fn new(
        session: &'a mut BuildSession,
        block_number: u32,
        addr: Address,
        mapping_slot: U256,
    ) -> Self {
        Self { session, block_number, addr, mapping_slot }
    }

    /// `mapping[key]`
    pub fn key(&mut self, key: H256) -> Result<SubqueryHandle, BuildError> {
        self.nested(&[key])
    }

    /// `mapping[keys[0]][keys[1]]...`, between 1 and 4 keys.
    pub fn nested(&mut self, keys: &[H256]) -> Result<SubqueryHandle, BuildError> {
        let (block_number, addr, mapping_slot) = (self.block_number, self.addr, self.mapping_slot);
        self.session.guard(|session| {
            if keys.is_empty() || keys.len() > MAX_SOLIDITY_MAPPING_KEYS {
                return Err(BuildError::invalid_input(
                    "keys",
                    format!(
                        "mapping depth {} not in [1, {MAX_SOLIDITY_MAPPING_KEYS}]",
                        keys.len()
                    ),
                ));
            }
            let subquery = SolidityNestedMappingSubquery {
                block_number,
                addr,
                mapping_slot,
                mapping_depth: keys.len() as u8,
                keys: keys.to_vec(),
            };
            session.register_key(subquery.into())
        })
    }
}

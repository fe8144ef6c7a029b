use axiom_codec::{
    types::native::{SolidityNestedMappingSubquery, StorageSubquery},
    utils::native::{h256_to_u256, u256_to_h256},
};
use ethers_core::{
    types::{BlockId, H256},
    utils::keccak256,
};
use ethers_providers::{JsonRpcClient, Middleware, Provider};

use crate::provider::FetchError;

pub async fn get_storage_field_value<P: JsonRpcClient>(
    provider: &Provider<P>,
    query: StorageSubquery,
) -> Result<H256, FetchError> {
    let block_id = BlockId::from(query.block_number as u64);
    let value =
        provider.get_storage_at(query.addr, u256_to_h256(&query.slot), Some(block_id)).await?;
    Ok(value)
}

/// Storage slot of `mapping[keys[0]]...[keys[depth - 1]]` for a mapping at `mapping_slot`.
pub fn nested_mapping_slot(query: &SolidityNestedMappingSubquery) -> H256 {
    let mut slot = u256_to_h256(&query.mapping_slot);
    for key in query.keys.iter().take(query.mapping_depth as usize) {
        let preimage = [key.as_bytes(), slot.as_bytes()].concat();
        slot = H256(keccak256(preimage));
    }
    slot
}

pub async fn get_solidity_nested_mapping_field_value<P: JsonRpcClient>(
    provider: &Provider<P>,
    query: SolidityNestedMappingSubquery,
) -> Result<H256, FetchError> {
    let storage_query = StorageSubquery {
        block_number: query.block_number,
        addr: query.addr,
        slot: h256_to_u256(&nested_mapping_slot(&query)),
    };
    get_storage_field_value(provider, storage_query).await
}

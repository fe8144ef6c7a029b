use axiom_codec::{
    special_values::{HEADER_LOGS_BLOOM_FIELD_IDX_OFFSET, LOGS_BLOOM_CHUNKS},
    types::native::HeaderSubquery,
    utils::native::{address_to_h256, pad_to_bytes32},
};
use ethers_core::types::{BigEndianHash, H256};
use ethers_providers::{JsonRpcClient, Middleware, Provider};

use super::{not_found, required};
use crate::{provider::FetchError, subquery::HeaderField};

pub async fn get_header_field_value<P: JsonRpcClient>(
    provider: &Provider<P>,
    query: HeaderSubquery,
) -> Result<H256, FetchError> {
    let block = provider
        .get_block(query.block_number as u64)
        .await?
        .ok_or_else(|| not_found(format!("block {}", query.block_number)))?;

    let field_idx = query.field_idx as usize;
    let bloom_range =
        HEADER_LOGS_BLOOM_FIELD_IDX_OFFSET..HEADER_LOGS_BLOOM_FIELD_IDX_OFFSET + LOGS_BLOOM_CHUNKS;
    if bloom_range.contains(&field_idx) {
        let bloom = required(block.logs_bloom, "logsBloom")?;
        let start = (field_idx - HEADER_LOGS_BLOOM_FIELD_IDX_OFFSET) * 32;
        return Ok(H256::from_slice(&bloom.as_bytes()[start..start + 32]));
    }

    let field = HeaderField::try_from(query.field_idx)
        .map_err(|idx| not_found(format!("header field {idx}")))?;
    let value = match field {
        HeaderField::ParentHash => block.parent_hash,
        HeaderField::Sha3Uncles => block.uncles_hash,
        HeaderField::Miner => address_to_h256(&required(block.author, "miner")?),
        HeaderField::StateRoot => block.state_root,
        HeaderField::TransactionsRoot => block.transactions_root,
        HeaderField::ReceiptsRoot => block.receipts_root,
        HeaderField::LogsBloom => {
            pad_to_bytes32(required(block.logs_bloom, "logsBloom")?.as_bytes())
        }
        HeaderField::Difficulty => H256::from_uint(&block.difficulty),
        HeaderField::Number => H256::from_low_u64_be(required(block.number, "number")?.as_u64()),
        HeaderField::GasLimit => H256::from_uint(&block.gas_limit),
        HeaderField::GasUsed => H256::from_uint(&block.gas_used),
        HeaderField::Timestamp => H256::from_uint(&block.timestamp),
        HeaderField::ExtraData => pad_to_bytes32(&block.extra_data),
        HeaderField::MixHash => required(block.mix_hash, "mixHash")?,
        HeaderField::Nonce => {
            let nonce = required(block.nonce, "nonce")?;
            H256::from_low_u64_be(u64::from_be_bytes(nonce.to_fixed_bytes()))
        }
        HeaderField::BaseFeePerGas => {
            H256::from_uint(&required(block.base_fee_per_gas, "baseFeePerGas")?)
        }
        HeaderField::WithdrawalsRoot => required(block.withdrawals_root, "withdrawalsRoot")?,
        HeaderField::Hash => required(block.hash, "hash")?,
        HeaderField::Size => H256::from_uint(&required(block.size, "size")?),
        HeaderField::ExtraDataLen => H256::from_low_u64_be(block.extra_data.len() as u64),
    };
    Ok(value)
}

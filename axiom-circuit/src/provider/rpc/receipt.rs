use axiom_codec::{
    special_values::{
        LOGS_BLOOM_CHUNKS, RECEIPT_ADDRESS_IDX, RECEIPT_DATA_IDX_OFFSET,
        RECEIPT_LOGS_BLOOM_IDX_OFFSET, RECEIPT_LOG_IDX_OFFSET,
    },
    types::native::ReceiptSubquery,
    utils::native::{address_to_h256, pad_to_bytes32},
};
use ethers_core::types::{BigEndianHash, BlockId, Log, TransactionReceipt, H256, U64};
use ethers_providers::{JsonRpcClient, Middleware, Provider};

use super::{not_found, required};
use crate::{provider::FetchError, subquery::ReceiptField};

pub async fn get_receipt_field_value<P: JsonRpcClient>(
    provider: &Provider<P>,
    query: ReceiptSubquery,
) -> Result<H256, FetchError> {
    let block_id = BlockId::from(query.block_number as u64);
    let tx = provider
        .get_transaction_by_block_and_index(block_id, U64::from(query.tx_idx))
        .await?
        .ok_or_else(|| {
            not_found(format!("transaction {} in block {}", query.tx_idx, query.block_number))
        })?;
    let receipt = provider
        .get_transaction_receipt(tx.hash)
        .await?
        .ok_or_else(|| not_found(format!("receipt of {:?}", tx.hash)))?;

    let field_or_log_idx = query.field_or_log_idx as usize;
    let bloom_range =
        RECEIPT_LOGS_BLOOM_IDX_OFFSET..RECEIPT_LOGS_BLOOM_IDX_OFFSET + LOGS_BLOOM_CHUNKS;
    if bloom_range.contains(&field_or_log_idx) {
        let start = (field_or_log_idx - RECEIPT_LOGS_BLOOM_IDX_OFFSET) * 32;
        return Ok(H256::from_slice(&receipt.logs_bloom.as_bytes()[start..start + 32]));
    }
    if field_or_log_idx >= RECEIPT_LOG_IDX_OFFSET {
        let log_idx = field_or_log_idx - RECEIPT_LOG_IDX_OFFSET;
        let log = receipt
            .logs
            .get(log_idx)
            .ok_or_else(|| not_found(format!("log {log_idx} of {}", receipt.logs.len())))?;
        let idx = query.topic_or_data_or_address_idx as usize;
        return get_log_value(log, idx, query.event_schema);
    }

    let field = ReceiptField::try_from(query.field_or_log_idx)
        .map_err(|idx| not_found(format!("receipt field {idx}")))?;
    get_receipt_field(receipt, field)
}

fn get_receipt_field(
    receipt: TransactionReceipt,
    field: ReceiptField,
) -> Result<H256, FetchError> {
    let value = match field {
        ReceiptField::Status => {
            H256::from_low_u64_be(required(receipt.status, "status")?.as_u64())
        }
        ReceiptField::PostState => required(receipt.root, "root")?,
        ReceiptField::CumulativeGas => H256::from_uint(&receipt.cumulative_gas_used),
        ReceiptField::LogsBloom => pad_to_bytes32(receipt.logs_bloom.as_bytes()),
        ReceiptField::Logs => return Err(not_found("logs must be queried by log index")),
        ReceiptField::TxType => {
            H256::from_low_u64_be(receipt.transaction_type.unwrap_or_default().as_u64())
        }
        ReceiptField::BlockNumber => {
            H256::from_low_u64_be(required(receipt.block_number, "blockNumber")?.as_u64())
        }
        ReceiptField::TxIndex => H256::from_low_u64_be(receipt.transaction_index.as_u64()),
    };
    Ok(value)
}

/// A topic, the emitting address or a bytes32 of data of `log`. A non-zero `event_schema`
/// must match the first topic.
pub fn get_log_value(log: &Log, idx: usize, event_schema: H256) -> Result<H256, FetchError> {
    if !event_schema.is_zero() && log.topics.first() != Some(&event_schema) {
        return Err(not_found(format!("log does not match event schema {event_schema:?}")));
    }
    if idx == RECEIPT_ADDRESS_IDX {
        return Ok(address_to_h256(&log.address));
    }
    if idx < RECEIPT_DATA_IDX_OFFSET {
        return log
            .topics
            .get(idx)
            .copied()
            .ok_or_else(|| not_found(format!("topic {idx} of {}", log.topics.len())));
    }
    let data_idx = idx - RECEIPT_DATA_IDX_OFFSET;
    let num_chunks = log.data.len() / 32;
    if data_idx >= num_chunks {
        return Err(not_found(format!("log data chunk {data_idx} of {num_chunks}")));
    }
    Ok(H256::from_slice(&log.data[data_idx * 32..(data_idx + 1) * 32]))
}

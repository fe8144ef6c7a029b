use axiom_codec::{
    special_values::{
        TX_CALLDATA_IDX_OFFSET, TX_CONTRACT_DATA_IDX_OFFSET, TX_CONTRACT_DEPLOY_SELECTOR_VALUE,
        TX_NO_CALLDATA_SELECTOR_VALUE,
    },
    types::native::TxSubquery,
    utils::native::{address_to_h256, pad_to_bytes32},
};
use ethers_core::{
    types::{BigEndianHash, BlockId, Transaction, H256, U64},
    utils::keccak256,
};
use ethers_providers::{JsonRpcClient, Middleware, Provider};

use super::{not_found, required};
use crate::{provider::FetchError, subquery::TxField};

pub async fn get_tx_field_value<P: JsonRpcClient>(
    provider: &Provider<P>,
    query: TxSubquery,
) -> Result<H256, FetchError> {
    let block_id = BlockId::from(query.block_number as u64);
    let tx = provider
        .get_transaction_by_block_and_index(block_id, U64::from(query.tx_idx))
        .await?
        .ok_or_else(|| {
            not_found(format!("transaction {} in block {}", query.tx_idx, query.block_number))
        })?;

    let idx = query.field_or_calldata_idx as usize;
    if idx < TX_CALLDATA_IDX_OFFSET {
        let field = TxField::try_from(query.field_or_calldata_idx)
            .map_err(|idx| not_found(format!("transaction field {idx}")))?;
        get_tx_field(tx, field)
    } else if idx < TX_CONTRACT_DATA_IDX_OFFSET {
        get_calldata_chunk(&tx.input, idx - TX_CALLDATA_IDX_OFFSET)
    } else {
        get_contract_data_chunk(&tx.input, idx - TX_CONTRACT_DATA_IDX_OFFSET)
    }
}

fn get_tx_field(tx: Transaction, field: TxField) -> Result<H256, FetchError> {
    let value = match field {
        TxField::ChainId => H256::from_uint(&tx.chain_id.unwrap_or_default()),
        TxField::Nonce => H256::from_uint(&tx.nonce),
        TxField::MaxPriorityFeePerGas => {
            H256::from_uint(&tx.max_priority_fee_per_gas.unwrap_or_default())
        }
        TxField::MaxFeePerGas => H256::from_uint(&tx.max_fee_per_gas.unwrap_or_default()),
        TxField::GasLimit => H256::from_uint(&tx.gas),
        TxField::To => tx.to.map(|to| address_to_h256(&to)).unwrap_or_default(),
        TxField::Value => H256::from_uint(&tx.value),
        TxField::Data => pad_to_bytes32(&tx.input),
        TxField::GasPrice => {
            if tx.transaction_type == Some(U64::from(2)) {
                return Err(not_found("gasPrice is not a field of EIP-1559 transactions"));
            }
            H256::from_uint(&required(tx.gas_price, "gasPrice")?)
        }
        TxField::V => H256::from_low_u64_be(tx.v.as_u64()),
        TxField::R => H256::from_uint(&tx.r),
        TxField::S => H256::from_uint(&tx.s),
        TxField::TxType => {
            H256::from_low_u64_be(tx.transaction_type.unwrap_or_default().as_u64())
        }
        TxField::BlockNumber => {
            H256::from_low_u64_be(required(tx.block_number, "blockNumber")?.as_u64())
        }
        TxField::TxIndex => {
            H256::from_low_u64_be(required(tx.transaction_index, "transactionIndex")?.as_u64())
        }
        TxField::FunctionSelector => {
            if tx.input.is_empty() {
                H256::from_low_u64_be(TX_NO_CALLDATA_SELECTOR_VALUE as u64)
            } else if tx.to.is_none() {
                H256::from_low_u64_be(TX_CONTRACT_DEPLOY_SELECTOR_VALUE as u64)
            } else if tx.input.len() < 4 {
                return Err(not_found("calldata shorter than a function selector"));
            } else {
                pad_to_bytes32(&tx.input[..4])
            }
        }
        TxField::CalldataHash => H256(keccak256(&tx.input)),
        TxField::DataLength => H256::from_low_u64_be(tx.input.len() as u64),
    };
    Ok(value)
}

/// The `idx`-th bytes32 of calldata after the 4 byte function selector.
fn get_calldata_chunk(calldata: &[u8], idx: usize) -> Result<H256, FetchError> {
    let num_chunks = calldata.len().saturating_sub(4) / 32;
    if idx >= num_chunks {
        return Err(not_found(format!("calldata chunk {idx} of {num_chunks}")));
    }
    let start = 4 + idx * 32;
    Ok(H256::from_slice(&calldata[start..start + 32]))
}

/// The `idx`-th bytes32 of contract creation data. The last chunk is right padded.
fn get_contract_data_chunk(data: &[u8], idx: usize) -> Result<H256, FetchError> {
    let num_chunks = data.len().div_ceil(32);
    if idx >= num_chunks {
        return Err(not_found(format!("contract data chunk {idx} of {num_chunks}")));
    }
    let end = data.len().min((idx + 1) * 32);
    Ok(pad_to_bytes32(&data[idx * 32..end]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calldata_chunks() {
        let mut calldata = vec![0xa9, 0x05, 0x9c, 0xbb];
        calldata.extend([1u8; 32]);
        calldata.extend([2u8; 32]);
        assert_eq!(get_calldata_chunk(&calldata, 1).unwrap(), H256::repeat_byte(2));
        assert!(get_calldata_chunk(&calldata, 2).is_err());
        assert!(get_calldata_chunk(&calldata[..3], 0).is_err());
    }

    #[test]
    fn test_contract_data_last_chunk_padded() {
        let data = [7u8; 40];
        assert_eq!(get_contract_data_chunk(&data, 0).unwrap(), H256::repeat_byte(7));
        let mut last = [0u8; 32];
        last[..8].copy_from_slice(&[7u8; 8]);
        assert_eq!(get_contract_data_chunk(&data, 1).unwrap(), H256(last));
        assert!(get_contract_data_chunk(&data, 2).is_err());
    }
}

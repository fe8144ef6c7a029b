use axiom_codec::types::native::AccountSubquery;
use ethers_core::{
    types::{BigEndianHash, BlockId, H256},
    utils::keccak256,
};
use ethers_providers::{JsonRpcClient, Middleware, Provider};

use super::not_found;
use crate::{provider::FetchError, subquery::AccountField};

/// Storage root of an account with empty storage: the root of an empty trie.
pub fn empty_storage_root() -> H256 {
    // keccak of the RLP encoding of the empty string
    H256(keccak256([0x80u8]))
}

pub async fn get_account_field_value<P: JsonRpcClient>(
    provider: &Provider<P>,
    query: AccountSubquery,
) -> Result<H256, FetchError> {
    let block_id = Some(BlockId::from(query.block_number as u64));
    let field = AccountField::try_from(query.field_idx)
        .map_err(|idx| not_found(format!("account field {idx}")))?;

    let value = match field {
        AccountField::Nonce => {
            H256::from_uint(&provider.get_transaction_count(query.addr, block_id).await?)
        }
        AccountField::Balance => {
            H256::from_uint(&provider.get_balance(query.addr, block_id).await?)
        }
        AccountField::StorageRoot | AccountField::CodeHash => {
            let proof = provider.get_proof(query.addr, vec![], block_id).await?;
            // Accounts that do not exist have no storage and a zero code hash.
            let exists = !proof.nonce.is_zero()
                || !proof.balance.is_zero()
                || !(proof.code_hash.is_zero() || proof.code_hash == H256(keccak256(b"")));
            match field {
                AccountField::StorageRoot if proof.storage_hash.is_zero() => empty_storage_root(),
                AccountField::StorageRoot => proof.storage_hash,
                _ if !exists => H256::zero(),
                _ => proof.code_hash,
            }
        }
    };
    Ok(value)
}

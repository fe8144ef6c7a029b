use axiom_codec::{
    special_values::{
        HEADER_EXTRA_DATA_LEN_FIELD_IDX, HEADER_HASH_FIELD_IDX, HEADER_HEADER_SIZE_FIELD_IDX,
        HEADER_LOGS_BLOOM_FIELD_IDX_OFFSET, LOGS_BLOOM_CHUNKS,
    },
    types::native::HeaderSubquery,
};

use super::{utils::check_index, SubqueryHandle};
use crate::{error::BuildError, session::BuildSession};

field_enum!(
    /// Block header fields, in RLP order, followed by derived values.
    HeaderField {
        ParentHash = 0,
        Sha3Uncles = 1,
        Miner = 2,
        StateRoot = 3,
        TransactionsRoot = 4,
        ReceiptsRoot = 5,
        LogsBloom = 6,
        Difficulty = 7,
        Number = 8,
        GasLimit = 9,
        GasUsed = 10,
        Timestamp = 11,
        ExtraData = 12,
        MixHash = 13,
        Nonce = 14,
        BaseFeePerGas = 15,
        WithdrawalsRoot = 16,
        Hash = HEADER_HASH_FIELD_IDX,
        Size = HEADER_HEADER_SIZE_FIELD_IDX,
        ExtraDataLen = HEADER_EXTRA_DATA_LEN_FIELD_IDX,
    }
);

pub struct HeaderBuilder<'a> {
    session: &'a mut BuildSession,
    block_number: u32,
}

impl<'a> HeaderBuilder<'a> {
    pub(crate) fn new(session: &'a mut BuildSession, block_number: u32) -> Self {
        Self { session, block_number }
    }

    pub fn field(&mut self, field: HeaderField) -> Result<SubqueryHandle, BuildError> {
        let subquery = HeaderSubquery { block_number: self.block_number, field_idx: field.into() };
        self.session.register(subquery)
    }

    field_accessors!(HeaderField {
        parent_hash => ParentHash,
        sha3_uncles => Sha3Uncles,
        miner => Miner,
        state_root => StateRoot,
        transactions_root => TransactionsRoot,
        receipts_root => ReceiptsRoot,
        logs_bloom => LogsBloom,
        difficulty => Difficulty,
        number => Number,
        gas_limit => GasLimit,
        gas_used => GasUsed,
        timestamp => Timestamp,
        extra_data => ExtraData,
        mix_hash => MixHash,
        nonce => Nonce,
        base_fee_per_gas => BaseFeePerGas,
        withdrawals_root => WithdrawalsRoot,
        hash => Hash,
        size => Size,
        extra_data_len => ExtraDataLen,
    });

    /// One of the 8 bytes32 chunks of `logsBloom`.
    pub fn logs_bloom_chunk(&mut self, idx: usize) -> Result<SubqueryHandle, BuildError> {
        let block_number = self.block_number;
        self.session.guard(|session| {
            check_index("logsBloomIdx", idx, LOGS_BLOOM_CHUNKS)?;
            let field_idx = (HEADER_LOGS_BLOOM_FIELD_IDX_OFFSET + idx) as u32;
            session.register_key(HeaderSubquery { block_number, field_idx }.into())
        })
    }
}

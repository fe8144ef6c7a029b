use axiom_codec::{
    special_values::{
        TX_BLOCK_NUMBER_FIELD_IDX, TX_CALLDATA_HASH_FIELD_IDX, TX_CALLDATA_IDX_OFFSET,
        TX_CONTRACT_DATA_IDX_OFFSET, TX_DATA_LENGTH_FIELD_IDX, TX_FUNCTION_SELECTOR_FIELD_IDX,
        TX_TX_INDEX_FIELD_IDX, TX_TX_TYPE_FIELD_IDX,
    },
    types::native::TxSubquery,
};

use super::{utils::offset_idx, SubqueryHandle};
use crate::{error::BuildError, session::BuildSession};

field_enum!(
    /// Transaction fields. Fields a transaction type does not have are zero.
    TxField {
        ChainId = 0,
        Nonce = 1,
        MaxPriorityFeePerGas = 2,
        MaxFeePerGas = 3,
        GasLimit = 4,
        To = 5,
        Value = 6,
        Data = 7,
        GasPrice = 8,
        V = 9,
        R = 10,
        S = 11,
        TxType = TX_TX_TYPE_FIELD_IDX,
        BlockNumber = TX_BLOCK_NUMBER_FIELD_IDX,
        TxIndex = TX_TX_INDEX_FIELD_IDX,
        FunctionSelector = TX_FUNCTION_SELECTOR_FIELD_IDX,
        CalldataHash = TX_CALLDATA_HASH_FIELD_IDX,
        DataLength = TX_DATA_LENGTH_FIELD_IDX,
    }
);

pub struct TxBuilder<'a> {
    session: &'a mut BuildSession,
    block_number: u32,
    tx_idx: u16,
}

impl<'a> TxBuilder<'a> {
    pub(crate) fn new(session: &'a mut BuildSession, block_number: u32, tx_idx: u16) -> Self {
        Self { session, block_number, tx_idx }
    }

    pub fn field(&mut self, field: TxField) -> Result<SubqueryHandle, BuildError> {
        self.session.register(TxSubquery {
            block_number: self.block_number,
            tx_idx: self.tx_idx,
            field_or_calldata_idx: field.into(),
        })
    }

    field_accessors!(TxField {
        chain_id => ChainId,
        nonce => Nonce,
        max_priority_fee_per_gas => MaxPriorityFeePerGas,
        max_fee_per_gas => MaxFeePerGas,
        gas_limit => GasLimit,
        to => To,
        value => Value,
        data => Data,
        gas_price => GasPrice,
        v => V,
        r => R,
        s => S,
        tx_type => TxType,
        block_number => BlockNumber,
        tx_idx => TxIndex,
        function_selector => FunctionSelector,
        calldata_hash => CalldataHash,
        data_length => DataLength,
    });

    /// The `idx`-th bytes32 of calldata after the function selector.
    pub fn calldata(&mut self, idx: u32) -> Result<SubqueryHandle, BuildError> {
        let limit = Some(TX_CONTRACT_DATA_IDX_OFFSET);
        self.register_offset("calldataIdx", TX_CALLDATA_IDX_OFFSET, idx, limit)
    }

    /// The `idx`-th bytes32 of contract creation data.
    pub fn contract_data(&mut self, idx: u32) -> Result<SubqueryHandle, BuildError> {
        self.register_offset("contractDataIdx", TX_CONTRACT_DATA_IDX_OFFSET, idx, None)
    }

    fn register_offset(
        &mut self,
        field: &'static str,
        offset: usize,
        idx: u32,
        limit: Option<usize>,
    ) -> Result<SubqueryHandle, BuildError> {
        let (block_number, tx_idx) = (self.block_number, self.tx_idx);
        self.session.guard(|session| {
            let field_or_calldata_idx = offset_idx(field, offset, idx, limit)?;
            session.register_key(TxSubquery { block_number, tx_idx, field_or_calldata_idx }.into())
        })
    }
}

use axiom_codec::{
    special_values::{
        LOGS_BLOOM_CHUNKS, RECEIPT_ADDRESS_IDX, RECEIPT_BLOCK_NUMBER_FIELD_IDX,
        RECEIPT_DATA_IDX_OFFSET, RECEIPT_LOGS_BLOOM_IDX_OFFSET, RECEIPT_LOG_IDX_OFFSET,
        RECEIPT_MAX_TOPICS, RECEIPT_TX_INDEX_FIELD_IDX, RECEIPT_TX_TYPE_FIELD_IDX,
    },
    types::native::ReceiptSubquery,
};
use ethers_core::types::H256;

use super::{
    utils::{check_index, offset_idx},
    SubqueryHandle,
};
use crate::{error::BuildError, session::BuildSession};

field_enum!(ReceiptField {
    // post EIP-658
    Status = 0,
    // pre EIP-658
    PostState = 1,
    CumulativeGas = 2,
    LogsBloom = 3,
    Logs = 4,
    TxType = RECEIPT_TX_TYPE_FIELD_IDX,
    BlockNumber = RECEIPT_BLOCK_NUMBER_FIELD_IDX,
    TxIndex = RECEIPT_TX_INDEX_FIELD_IDX,
});

pub struct ReceiptBuilder<'a> {
    session: &'a mut BuildSession,
    block_number: u32,
    tx_idx: u16,
}

impl<'a> ReceiptBuilder<'a> {
    pub(crate) fn new(session: &'a mut BuildSession, block_number: u32, tx_idx: u16) -> Self {
        Self { session, block_number, tx_idx }
    }

    /// [ReceiptField::Logs] cannot be queried as a whole; use [ReceiptBuilder::log].
    pub fn field(&mut self, field: ReceiptField) -> Result<SubqueryHandle, BuildError> {
        self.register("fieldIdx", |_| {
            if field == ReceiptField::Logs {
                return Err(BuildError::invalid_input("fieldIdx", "query a single log instead"));
            }
            Ok((field.into(), 0, H256::zero()))
        })
    }

    field_accessors!(ReceiptField {
        status => Status,
        post_state => PostState,
        cumulative_gas => CumulativeGas,
        tx_type => TxType,
        block_number => BlockNumber,
        tx_idx => TxIndex,
    });

    /// One of the 8 bytes32 chunks of the receipt `logsBloom`.
    pub fn logs_bloom(&mut self, idx: usize) -> Result<SubqueryHandle, BuildError> {
        self.register("logsBloomIdx", |field| {
            check_index(field, idx, LOGS_BLOOM_CHUNKS)?;
            Ok(((RECEIPT_LOGS_BLOOM_IDX_OFFSET + idx) as u32, 0, H256::zero()))
        })
    }

    pub fn log(&mut self, log_idx: u32) -> Result<LogBuilder<'_, 'a>, BuildError> {
        let field_or_log_idx =
            self.session.guard(|_| offset_idx("logIdx", RECEIPT_LOG_IDX_OFFSET, log_idx, None))?;
        Ok(LogBuilder { receipt: self, field_or_log_idx })
    }

    fn register(
        &mut self,
        field: &'static str,
        indices: impl FnOnce(&'static str) -> Result<(u32, u32, H256), BuildError>,
    ) -> Result<SubqueryHandle, BuildError> {
        let (block_number, tx_idx) = (self.block_number, self.tx_idx);
        self.session.guard(|session| {
            let (field_or_log_idx, topic_or_data_or_address_idx, event_schema) = indices(field)?;
            let subquery = ReceiptSubquery {
                block_number,
                tx_idx,
                field_or_log_idx,
                topic_or_data_or_address_idx,
                event_schema,
            };
            session.register_key(subquery.into())
        })
    }
}

/// A single log of a receipt. A non-zero `event_schema` requires the log's first topic
/// to equal it.
pub struct LogBuilder<'r, 'a> {
    receipt: &'r mut ReceiptBuilder<'a>,
    field_or_log_idx: u32,
}

impl LogBuilder<'_, '_> {
    /// Topic `idx`, where topic 0 is the event signature.
    pub fn topic(&mut self, idx: usize, event_schema: H256) -> Result<SubqueryHandle, BuildError> {
        let field_or_log_idx = self.field_or_log_idx;
        self.receipt.register("topicIdx", |field| {
            check_index(field, idx, RECEIPT_MAX_TOPICS)?;
            Ok((field_or_log_idx, idx as u32, event_schema))
        })
    }

    /// Address of the contract that emitted the log.
    pub fn address(&mut self) -> Result<SubqueryHandle, BuildError> {
        let field_or_log_idx = self.field_or_log_idx;
        self.receipt.register("addressIdx", |_| {
            Ok((field_or_log_idx, RECEIPT_ADDRESS_IDX as u32, H256::zero()))
        })
    }

    /// The `idx`-th bytes32 of the log data.
    pub fn data(&mut self, idx: u32, event_schema: H256) -> Result<SubqueryHandle, BuildError> {
        let field_or_log_idx = self.field_or_log_idx;
        self.receipt.register("dataIdx", |field| {
            let data_idx = offset_idx(field, RECEIPT_DATA_IDX_OFFSET, idx, None)?;
            Ok((field_or_log_idx, data_idx, event_schema))
        })
    }
}

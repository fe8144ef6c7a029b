//! Field indices with special meaning, beyond the RLP field positions of each object.

// Header
pub const HEADER_HASH_FIELD_IDX: usize = 50;
pub const HEADER_HEADER_SIZE_FIELD_IDX: usize = 51;
pub const HEADER_EXTRA_DATA_LEN_FIELD_IDX: usize = 52;
/// `logsBloom` is 256 bytes, exposed as 8 chunks of 32 bytes starting at this index.
pub const HEADER_LOGS_BLOOM_FIELD_IDX_OFFSET: usize = 70;

// Transaction
pub const TX_TX_TYPE_FIELD_IDX: usize = 51;
pub const TX_BLOCK_NUMBER_FIELD_IDX: usize = 52;
pub const TX_TX_INDEX_FIELD_IDX: usize = 53;
pub const TX_FUNCTION_SELECTOR_FIELD_IDX: usize = 54;
pub const TX_CALLDATA_HASH_FIELD_IDX: usize = 55;
pub const TX_DATA_LENGTH_FIELD_IDX: usize = 56;
/// Returned as the function selector when the transaction has no calldata.
pub const TX_NO_CALLDATA_SELECTOR_VALUE: usize = 60;
/// Returned as the function selector for contract deployments.
pub const TX_CONTRACT_DEPLOY_SELECTOR_VALUE: usize = 61;
pub const TX_CALLDATA_IDX_OFFSET: usize = 100;
pub const TX_CONTRACT_DATA_IDX_OFFSET: usize = 100000;

// Receipt
pub const RECEIPT_TX_TYPE_FIELD_IDX: usize = 51;
pub const RECEIPT_BLOCK_NUMBER_FIELD_IDX: usize = 52;
pub const RECEIPT_TX_INDEX_FIELD_IDX: usize = 53;
pub const RECEIPT_LOGS_BLOOM_IDX_OFFSET: usize = 70;
pub const RECEIPT_LOG_IDX_OFFSET: usize = 100;
pub const RECEIPT_ADDRESS_IDX: usize = 50;
pub const RECEIPT_DATA_IDX_OFFSET: usize = 100;
/// A log has at most 4 topics.
pub const RECEIPT_MAX_TOPICS: usize = 4;

/// Number of 32 byte chunks in a logs bloom.
pub const LOGS_BLOOM_CHUNKS: usize = 8;

use ethers_core::types::{Address, Bytes, H256, U256};
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

#[derive(Clone, Debug, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AxiomV2DataQuery {
    pub source_chain_id: u64,
    pub subqueries: Vec<Subquery>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubqueryResult {
    pub subquery: Subquery,
    /// The output of the subquery. In V2, always bytes32.
    pub value: Bytes,
}

impl Default for SubqueryResult {
    fn default() -> Self {
        Self { subquery: Subquery::default(), value: Bytes::from([0u8; 32]) }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct Subquery {
    /// uint16 type of subquery
    pub subquery_type: SubqueryType,
    /// Subquery data encoded, _without_ the subquery type. Length is variable and **not** resized.
    pub encoded_subquery_data: Bytes,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Serialize_repr,
    Deserialize_repr,
    Hash,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
)]
#[repr(u16)]
pub enum SubqueryType {
    #[default]
    Null = 0, // For lookup tables, important to have a null type
    Header = 1,
    Account = 2,
    Storage = 3,
    Transaction = 4,
    Receipt = 5,
    SolidityNestedMapping = 6,
}

/// Structural identity of a subquery. Two subqueries are the same request
/// iff they are the same variant with bitwise equal fields.
#[derive(Clone, Debug, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnySubquery {
    Null,
    Header(HeaderSubquery),
    Account(AccountSubquery),
    Storage(StorageSubquery),
    Transaction(TxSubquery),
    Receipt(ReceiptSubquery),
    SolidityNestedMapping(SolidityNestedMappingSubquery),
}

impl AnySubquery {
    pub fn subquery_type(&self) -> SubqueryType {
        match self {
            AnySubquery::Null => SubqueryType::Null,
            AnySubquery::Header(_) => SubqueryType::Header,
            AnySubquery::Account(_) => SubqueryType::Account,
            AnySubquery::Storage(_) => SubqueryType::Storage,
            AnySubquery::Transaction(_) => SubqueryType::Transaction,
            AnySubquery::Receipt(_) => SubqueryType::Receipt,
            AnySubquery::SolidityNestedMapping(_) => SubqueryType::SolidityNestedMapping,
        }
    }

    /// Block number the subquery reads from. `None` for [AnySubquery::Null].
    pub fn block_number(&self) -> Option<u32> {
        match self {
            AnySubquery::Null => None,
            AnySubquery::Header(s) => Some(s.block_number),
            AnySubquery::Account(s) => Some(s.block_number),
            AnySubquery::Storage(s) => Some(s.block_number),
            AnySubquery::Transaction(s) => Some(s.block_number),
            AnySubquery::Receipt(s) => Some(s.block_number),
            AnySubquery::SolidityNestedMapping(s) => Some(s.block_number),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct HeaderSubquery {
    pub block_number: u32,
    pub field_idx: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct AccountSubquery {
    pub block_number: u32,
    pub addr: Address,
    pub field_idx: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct StorageSubquery {
    pub block_number: u32,
    pub addr: Address,
    pub slot: U256,
}

#[derive(Clone, Debug, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct TxSubquery {
    /// The block number with the requested transaction.
    pub block_number: u32,
    /// The index of the transaction in the block.
    pub tx_idx: u16,
    /// Special index to specify what subquery value to extract from the transaction.
    pub field_or_calldata_idx: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSubquery {
    /// The block number with the requested transaction.
    pub block_number: u32,
    /// The index of the transaction in the block.
    pub tx_idx: u16,
    /// Special index to specify what subquery value to extract from the transaction.
    pub field_or_log_idx: u32,
    pub topic_or_data_or_address_idx: u32,
    /// Zero means the log's event schema is not checked.
    pub event_schema: H256,
}

#[derive(Clone, Debug, Serialize, Deserialize, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct SolidityNestedMappingSubquery {
    pub block_number: u32,
    pub addr: Address,
    pub mapping_slot: U256,
    /// Should be equal to `keys.len()`
    pub mapping_depth: u8,
    pub keys: Vec<H256>,
}

/// Shape of a user circuit, packed into a bytes32 for the on-chain verifier.
///
/// The number of phases is `num_challenge.len()`. `num_advice_per_phase` and
/// `num_lookup_advice_per_phase` may be shorter than the number of phases, in which
/// case the missing phases have zero columns.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Hash, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AxiomV2CircuitMetadata {
    pub version: u8,
    pub num_advice_per_phase: Vec<u16>,
    pub num_lookup_advice_per_phase: Vec<u8>,
    pub num_rlc_columns: u16,
    pub num_fixed: u8,
    /// Number of public instances in each instance column.
    pub num_instance: Vec<u32>,
    /// Number of challenges used in each phase, excluding halo2 system challenges.
    pub num_challenge: Vec<u8>,
    pub max_outputs: u16,
    pub is_aggregation: bool,
}

impl AxiomV2CircuitMetadata {
    pub fn num_phase(&self) -> usize {
        self.num_challenge.len()
    }
}

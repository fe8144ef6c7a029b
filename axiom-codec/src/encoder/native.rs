use std::{
    io::{Result, Write},
    iter,
};

use byteorder::{BigEndian, WriteBytesExt};
use ethers_core::{types::H256, utils::keccak256};

use crate::{
    constants::{CIRCUIT_METADATA_BYTES, MAX_PHASES, SUPPORTED_CIRCUIT_METADATA_VERSIONS},
    types::native::{
        AccountSubquery, AnySubquery, AxiomV2CircuitMetadata, AxiomV2DataQuery, HeaderSubquery,
        ReceiptSubquery, SolidityNestedMappingSubquery, StorageSubquery, Subquery, SubqueryResult,
        SubqueryType, TxSubquery,
    },
    utils::writer::write_u256,
    MetadataError,
};

impl AxiomV2DataQuery {
    pub fn keccak(&self) -> H256 {
        get_data_query_hash(self.source_chain_id, &self.subqueries)
    }
}

pub fn get_data_query_hash(source_chain_id: u64, subqueries: &[Subquery]) -> H256 {
    let subquery_hashes = subqueries.iter().flat_map(|subquery| subquery.keccak().0);
    let encoded: Vec<_> =
        iter::empty().chain(source_chain_id.to_be_bytes()).chain(subquery_hashes).collect();
    H256(keccak256(encoded))
}

impl Subquery {
    pub fn encode(&self) -> Vec<u8> {
        let sub_type = (self.subquery_type as u16).to_be_bytes();
        let subquery_data = self.encoded_subquery_data.as_ref();
        [&sub_type[..], subquery_data].concat()
    }
    pub fn keccak(&self) -> H256 {
        H256(keccak256(self.encode()))
    }
}

impl SubqueryResult {
    pub fn encode(&self) -> Vec<u8> {
        let subquery = self.subquery.encode();
        let value = self.value.as_ref();
        [&subquery[..], value].concat()
    }
    pub fn keccak(&self) -> H256 {
        H256(keccak256(self.encode()))
    }
}

impl AxiomV2CircuitMetadata {
    /// Packs the circuit shape into a bytes32, big endian, right padded with zeros:
    ///
    /// `version (u8) | num_instance.len() (u8) | num_instance (u32 each) | num_phase (u8)
    /// | num_challenge (u8 each) | is_aggregation (u8) | num_advice_per_phase (u16 x num_phase)
    /// | num_lookup_advice_per_phase (u8 x num_phase) | num_rlc_columns (u16) | num_fixed (u8)
    /// | max_outputs (u16)`
    pub fn encode(&self) -> std::result::Result<H256, MetadataError> {
        if !SUPPORTED_CIRCUIT_METADATA_VERSIONS.contains(&self.version) {
            return Err(MetadataError::UnsupportedVersion(self.version));
        }
        let num_phase = self.num_phase();
        if num_phase == 0 {
            return Err(MetadataError::UnsupportedShape("num_challenge must be non-empty".into()));
        }
        if num_phase > MAX_PHASES {
            return Err(MetadataError::UnsupportedShape(format!(
                "{num_phase} phases exceeds maximum of {MAX_PHASES}"
            )));
        }
        if self.num_advice_per_phase.len() > num_phase {
            return Err(MetadataError::UnsupportedShape(format!(
                "num_advice_per_phase has {} phases, more than num_phase {num_phase}",
                self.num_advice_per_phase.len()
            )));
        }
        if self.num_lookup_advice_per_phase.len() > num_phase {
            return Err(MetadataError::UnsupportedShape(format!(
                "num_lookup_advice_per_phase has {} phases, more than num_phase {num_phase}",
                self.num_lookup_advice_per_phase.len()
            )));
        }
        let num_instance_len: u8 = self.num_instance.len().try_into().map_err(|_| {
            MetadataError::UnsupportedShape(format!(
                "{} instance columns exceeds u8",
                self.num_instance.len()
            ))
        })?;

        let mut encoded = Vec::with_capacity(CIRCUIT_METADATA_BYTES);
        encoded.write_u8(self.version)?;
        encoded.write_u8(num_instance_len)?;
        for &num_instance in &self.num_instance {
            encoded.write_u32::<BigEndian>(num_instance)?;
        }
        encoded.write_u8(num_phase as u8)?;
        encoded.write_all(&self.num_challenge)?;
        encoded.write_u8(self.is_aggregation as u8)?;
        for phase in 0..num_phase {
            let num_advice = self.num_advice_per_phase.get(phase).copied().unwrap_or_default();
            encoded.write_u16::<BigEndian>(num_advice)?;
        }
        for phase in 0..num_phase {
            let num_lookup =
                self.num_lookup_advice_per_phase.get(phase).copied().unwrap_or_default();
            encoded.write_u8(num_lookup)?;
        }
        encoded.write_u16::<BigEndian>(self.num_rlc_columns)?;
        encoded.write_u8(self.num_fixed)?;
        encoded.write_u16::<BigEndian>(self.max_outputs)?;

        if encoded.len() > CIRCUIT_METADATA_BYTES {
            return Err(MetadataError::UnsupportedShape(format!(
                "circuit metadata cannot be packed into bytes32 (byte length={})",
                encoded.len()
            )));
        }
        encoded.resize(CIRCUIT_METADATA_BYTES, 0);
        Ok(H256::from_slice(&encoded))
    }
}

pub fn encode_header_subquery(writer: &mut impl Write, subquery: HeaderSubquery) -> Result<()> {
    let HeaderSubquery { block_number, field_idx } = subquery;
    writer.write_u32::<BigEndian>(block_number)?;
    writer.write_u32::<BigEndian>(field_idx)?;
    Ok(())
}

pub fn encode_account_subquery(writer: &mut impl Write, subquery: AccountSubquery) -> Result<()> {
    let AccountSubquery { block_number, addr, field_idx } = subquery;
    writer.write_u32::<BigEndian>(block_number)?;
    writer.write_all(&addr[..])?;
    writer.write_u32::<BigEndian>(field_idx)?;
    Ok(())
}

pub fn encode_storage_subquery(writer: &mut impl Write, subquery: StorageSubquery) -> Result<()> {
    let StorageSubquery { block_number, addr, slot } = subquery;
    writer.write_u32::<BigEndian>(block_number)?;
    writer.write_all(&addr[..])?;
    write_u256(writer, slot)?;
    Ok(())
}

pub fn encode_tx_subquery(writer: &mut impl Write, subquery: TxSubquery) -> Result<()> {
    let TxSubquery { block_number, tx_idx, field_or_calldata_idx } = subquery;
    writer.write_u32::<BigEndian>(block_number)?;
    writer.write_u16::<BigEndian>(tx_idx)?;
    writer.write_u32::<BigEndian>(field_or_calldata_idx)?;
    Ok(())
}

pub fn encode_receipt_subquery(writer: &mut impl Write, subquery: ReceiptSubquery) -> Result<()> {
    let ReceiptSubquery {
        block_number,
        tx_idx,
        field_or_log_idx,
        topic_or_data_or_address_idx,
        event_schema,
    } = subquery;
    writer.write_u32::<BigEndian>(block_number)?;
    writer.write_u16::<BigEndian>(tx_idx)?;
    writer.write_u32::<BigEndian>(field_or_log_idx)?;
    writer.write_u32::<BigEndian>(topic_or_data_or_address_idx)?;
    writer.write_all(&event_schema[..])?;
    Ok(())
}

pub fn encode_solidity_nested_mapping_subquery(
    writer: &mut impl Write,
    subquery: SolidityNestedMappingSubquery,
) -> Result<()> {
    let SolidityNestedMappingSubquery { block_number, addr, mapping_slot, mapping_depth, mut keys } =
        subquery;
    writer.write_u32::<BigEndian>(block_number)?;
    writer.write_all(&addr[..])?;
    write_u256(writer, mapping_slot)?;
    writer.write_u8(mapping_depth)?;
    keys.resize(mapping_depth as usize, H256::zero());
    for key in keys {
        writer.write_all(&key[..])?;
    }
    Ok(())
}

/// Writes into a `Vec`, which cannot fail.
fn encode_to_subquery<T>(
    subquery_type: SubqueryType,
    value: T,
    encode: impl FnOnce(&mut Vec<u8>, T) -> Result<()>,
) -> Subquery {
    let mut bytes = vec![];
    encode(&mut bytes, value).expect("writing to Vec<u8> is infallible");
    Subquery { subquery_type, encoded_subquery_data: bytes.into() }
}

impl From<HeaderSubquery> for Subquery {
    fn from(value: HeaderSubquery) -> Self {
        encode_to_subquery(SubqueryType::Header, value, |w, v| encode_header_subquery(w, v))
    }
}

impl From<AccountSubquery> for Subquery {
    fn from(value: AccountSubquery) -> Self {
        encode_to_subquery(SubqueryType::Account, value, |w, v| encode_account_subquery(w, v))
    }
}

impl From<StorageSubquery> for Subquery {
    fn from(value: StorageSubquery) -> Self {
        encode_to_subquery(SubqueryType::Storage, value, |w, v| encode_storage_subquery(w, v))
    }
}

impl From<TxSubquery> for Subquery {
    fn from(value: TxSubquery) -> Self {
        encode_to_subquery(SubqueryType::Transaction, value, |w, v| encode_tx_subquery(w, v))
    }
}

impl From<ReceiptSubquery> for Subquery {
    fn from(value: ReceiptSubquery) -> Self {
        encode_to_subquery(SubqueryType::Receipt, value, |w, v| encode_receipt_subquery(w, v))
    }
}

impl From<SolidityNestedMappingSubquery> for Subquery {
    fn from(value: SolidityNestedMappingSubquery) -> Self {
        encode_to_subquery(
            SubqueryType::SolidityNestedMapping,
            value,
            |w, v| encode_solidity_nested_mapping_subquery(w, v),
        )
    }
}

impl From<AnySubquery> for Subquery {
    fn from(value: AnySubquery) -> Self {
        match value {
            AnySubquery::Null => {
                Self { subquery_type: SubqueryType::Null, encoded_subquery_data: vec![].into() }
            }
            AnySubquery::Header(subquery) => subquery.into(),
            AnySubquery::Account(subquery) => subquery.into(),
            AnySubquery::Storage(subquery) => subquery.into(),
            AnySubquery::Transaction(subquery) => subquery.into(),
            AnySubquery::Receipt(subquery) => subquery.into(),
            AnySubquery::SolidityNestedMapping(subquery) => subquery.into(),
        }
    }
}

impl From<HeaderSubquery> for AnySubquery {
    fn from(value: HeaderSubquery) -> Self {
        AnySubquery::Header(value)
    }
}
impl From<AccountSubquery> for AnySubquery {
    fn from(value: AccountSubquery) -> Self {
        AnySubquery::Account(value)
    }
}
impl From<StorageSubquery> for AnySubquery {
    fn from(value: StorageSubquery) -> Self {
        AnySubquery::Storage(value)
    }
}
impl From<TxSubquery> for AnySubquery {
    fn from(value: TxSubquery) -> Self {
        AnySubquery::Transaction(value)
    }
}
impl From<ReceiptSubquery> for AnySubquery {
    fn from(value: ReceiptSubquery) -> Self {
        AnySubquery::Receipt(value)
    }
}
impl From<SolidityNestedMappingSubquery> for AnySubquery {
    fn from(value: SolidityNestedMappingSubquery) -> Self {
        AnySubquery::SolidityNestedMapping(value)
    }
}

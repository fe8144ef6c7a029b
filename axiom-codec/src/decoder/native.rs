use std::io::{self, Read, Result};

use byteorder::{BigEndian, ReadBytesExt};
use ethers_core::types::{Bytes, H256};

use crate::{
    constants::{
        CIRCUIT_METADATA_BYTES, MAX_PHASES, MAX_SOLIDITY_MAPPING_KEYS,
        SUPPORTED_CIRCUIT_METADATA_VERSIONS,
    },
    types::native::{
        AccountSubquery, AnySubquery, AxiomV2CircuitMetadata, HeaderSubquery, ReceiptSubquery,
        SolidityNestedMappingSubquery, StorageSubquery, Subquery, SubqueryType, TxSubquery,
    },
    utils::reader::{read_address, read_h256, read_u256},
    MetadataError,
};

impl TryFrom<Subquery> for AnySubquery {
    type Error = io::Error;

    fn try_from(subquery: Subquery) -> Result<Self> {
        let mut reader = &subquery.encoded_subquery_data[..];
        let subquery_type = subquery.subquery_type;
        let any_subquery = match subquery_type {
            SubqueryType::Null => AnySubquery::Null,
            SubqueryType::Header => AnySubquery::Header(decode_header_subquery(&mut reader)?),
            SubqueryType::Account => AnySubquery::Account(decode_account_subquery(&mut reader)?),
            SubqueryType::Storage => AnySubquery::Storage(decode_storage_subquery(&mut reader)?),
            SubqueryType::Transaction => AnySubquery::Transaction(decode_tx_subquery(&mut reader)?),
            SubqueryType::Receipt => AnySubquery::Receipt(decode_receipt_subquery(&mut reader)?),
            SubqueryType::SolidityNestedMapping => AnySubquery::SolidityNestedMapping(
                decode_solidity_nested_mapping_subquery(&mut reader)?,
            ),
        };
        if !reader.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("{} trailing bytes after {:?} subquery", reader.len(), subquery_type),
            ));
        }
        Ok(any_subquery)
    }
}

impl TryFrom<u16> for SubqueryType {
    type Error = io::Error;
    fn try_from(value: u16) -> Result<Self> {
        match value {
            0 => Ok(Self::Null),
            1 => Ok(Self::Header),
            2 => Ok(Self::Account),
            3 => Ok(Self::Storage),
            4 => Ok(Self::Transaction),
            5 => Ok(Self::Receipt),
            6 => Ok(Self::SolidityNestedMapping),
            _ => Err(io::Error::new(io::ErrorKind::InvalidData, "Invalid SubqueryType")),
        }
    }
}

pub fn decode_subquery(mut reader: impl Read) -> Result<AnySubquery> {
    let subquery_type = reader.read_u16::<BigEndian>()?;
    let subquery_type = subquery_type.try_into()?;
    let mut buf = vec![];
    reader.read_to_end(&mut buf)?;
    let encoded_subquery_data = Bytes::from(buf);
    let subquery = Subquery { subquery_type, encoded_subquery_data };
    subquery.try_into()
}

pub fn decode_header_subquery(mut reader: impl Read) -> Result<HeaderSubquery> {
    let block_number = reader.read_u32::<BigEndian>()?;
    let field_idx = reader.read_u32::<BigEndian>()?;
    Ok(HeaderSubquery { block_number, field_idx })
}

pub fn decode_account_subquery(mut reader: impl Read) -> Result<AccountSubquery> {
    let block_number = reader.read_u32::<BigEndian>()?;
    let addr = read_address(&mut reader)?;
    let field_idx = reader.read_u32::<BigEndian>()?;
    Ok(AccountSubquery { block_number, addr, field_idx })
}

pub fn decode_storage_subquery(mut reader: impl Read) -> Result<StorageSubquery> {
    let block_number = reader.read_u32::<BigEndian>()?;
    let addr = read_address(&mut reader)?;
    let slot = read_u256(&mut reader)?;
    Ok(StorageSubquery { block_number, addr, slot })
}

pub fn decode_tx_subquery(mut reader: impl Read) -> Result<TxSubquery> {
    let block_number = reader.read_u32::<BigEndian>()?;
    let tx_idx = reader.read_u16::<BigEndian>()?;
    let field_or_calldata_idx = reader.read_u32::<BigEndian>()?;
    Ok(TxSubquery { block_number, tx_idx, field_or_calldata_idx })
}

pub fn decode_receipt_subquery(mut reader: impl Read) -> Result<ReceiptSubquery> {
    let block_number = reader.read_u32::<BigEndian>()?;
    let tx_idx = reader.read_u16::<BigEndian>()?;
    let field_or_log_idx = reader.read_u32::<BigEndian>()?;
    let topic_or_data_or_address_idx = reader.read_u32::<BigEndian>()?;
    let event_schema = read_h256(&mut reader)?;
    Ok(ReceiptSubquery {
        block_number,
        tx_idx,
        field_or_log_idx,
        topic_or_data_or_address_idx,
        event_schema,
    })
}

pub fn decode_solidity_nested_mapping_subquery(
    mut reader: impl Read,
) -> Result<SolidityNestedMappingSubquery> {
    let block_number = reader.read_u32::<BigEndian>()?;
    let addr = read_address(&mut reader)?;
    let mapping_slot = read_u256(&mut reader)?;
    let mapping_depth = reader.read_u8()?;
    if mapping_depth as usize > MAX_SOLIDITY_MAPPING_KEYS {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "SolidityNestedMappingSubquery mapping_depth {} exceeds MAX_SOLIDITY_MAPPING_KEYS {}",
                mapping_depth, MAX_SOLIDITY_MAPPING_KEYS
            ),
        ));
    }
    let mut keys = Vec::with_capacity(mapping_depth as usize);
    for _ in 0..mapping_depth {
        keys.push(read_h256(&mut reader)?);
    }
    Ok(SolidityNestedMappingSubquery { block_number, addr, mapping_slot, mapping_depth, keys })
}

/// Inverse of [AxiomV2CircuitMetadata::encode]. Per-phase column counts are returned with
/// exactly `num_phase` entries.
pub fn decode_circuit_metadata(
    bytes: &[u8],
) -> std::result::Result<AxiomV2CircuitMetadata, MetadataError> {
    if bytes.len() != CIRCUIT_METADATA_BYTES {
        return Err(MetadataError::InvalidEncoding(format!(
            "expected {CIRCUIT_METADATA_BYTES} bytes, found {}",
            bytes.len()
        )));
    }
    let mut reader = bytes;
    let version = reader.read_u8()?;
    if !SUPPORTED_CIRCUIT_METADATA_VERSIONS.contains(&version) {
        return Err(MetadataError::UnsupportedVersion(version));
    }
    let num_instance_len = reader.read_u8()? as usize;
    let mut num_instance = Vec::with_capacity(num_instance_len);
    for _ in 0..num_instance_len {
        num_instance.push(reader.read_u32::<BigEndian>()?);
    }
    let num_phase = reader.read_u8()? as usize;
    if num_phase == 0 || num_phase > MAX_PHASES {
        return Err(MetadataError::UnsupportedShape(format!(
            "num_phase {num_phase} not in [1, {MAX_PHASES}]"
        )));
    }
    let mut num_challenge = vec![0u8; num_phase];
    reader.read_exact(&mut num_challenge)?;
    let is_aggregation = match reader.read_u8()? {
        0 => false,
        1 => true,
        b => {
            return Err(MetadataError::InvalidEncoding(format!("is_aggregation byte {b:#x}")));
        }
    };
    let mut num_advice_per_phase = Vec::with_capacity(num_phase);
    for _ in 0..num_phase {
        num_advice_per_phase.push(reader.read_u16::<BigEndian>()?);
    }
    let mut num_lookup_advice_per_phase = vec![0u8; num_phase];
    reader.read_exact(&mut num_lookup_advice_per_phase)?;
    let num_rlc_columns = reader.read_u16::<BigEndian>()?;
    let num_fixed = reader.read_u8()?;
    let max_outputs = reader.read_u16::<BigEndian>()?;
    if reader.iter().any(|&b| b != 0) {
        return Err(MetadataError::InvalidEncoding("non-zero padding".into()));
    }
    Ok(AxiomV2CircuitMetadata {
        version,
        num_advice_per_phase,
        num_lookup_advice_per_phase,
        num_rlc_columns,
        num_fixed,
        num_instance,
        num_challenge,
        max_outputs,
        is_aggregation,
    })
}

impl TryFrom<H256> for AxiomV2CircuitMetadata {
    type Error = MetadataError;

    fn try_from(encoded: H256) -> std::result::Result<Self, Self::Error> {
        decode_circuit_metadata(encoded.as_bytes())
    }
}

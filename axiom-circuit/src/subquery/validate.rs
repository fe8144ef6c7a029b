//! Checks a subquery built by hand against the index layout the builders produce, so every
//! registered subquery has a single wire encoding and can be decoded again.

use axiom_codec::{
    constants::MAX_SOLIDITY_MAPPING_KEYS,
    special_values::{
        HEADER_LOGS_BLOOM_FIELD_IDX_OFFSET, LOGS_BLOOM_CHUNKS, RECEIPT_ADDRESS_IDX,
        RECEIPT_DATA_IDX_OFFSET, RECEIPT_LOGS_BLOOM_IDX_OFFSET, RECEIPT_LOG_IDX_OFFSET,
        RECEIPT_MAX_TOPICS, TX_CALLDATA_IDX_OFFSET,
    },
    types::native::{
        AnySubquery, HeaderSubquery, ReceiptSubquery, SolidityNestedMappingSubquery, TxSubquery,
    },
};

use super::{AccountField, HeaderField, ReceiptField, TxField};
use crate::error::BuildError;

fn in_chunks(idx: u32, offset: usize) -> bool {
    (offset..offset + LOGS_BLOOM_CHUNKS).contains(&(idx as usize))
}

fn unknown(field: &'static str, idx: u32) -> BuildError {
    BuildError::invalid_input(field, format!("{idx} is not a valid index"))
}

pub fn validate_subquery(subquery: &AnySubquery) -> Result<(), BuildError> {
    match subquery {
        AnySubquery::Null => {
            Err(BuildError::invalid_input("subquery", "null subquery cannot be registered"))
        }
        AnySubquery::Header(query) => validate_header(query),
        AnySubquery::Account(query) => {
            AccountField::try_from(query.field_idx).map_err(|idx| unknown("fieldIdx", idx))?;
            Ok(())
        }
        AnySubquery::Storage(_) => Ok(()),
        AnySubquery::Transaction(query) => validate_tx(query),
        AnySubquery::Receipt(query) => validate_receipt(query),
        AnySubquery::SolidityNestedMapping(query) => validate_mapping(query),
    }
}

fn validate_header(query: &HeaderSubquery) -> Result<(), BuildError> {
    let HeaderSubquery { field_idx, .. } = *query;
    if HeaderField::try_from(field_idx).is_ok()
        || in_chunks(field_idx, HEADER_LOGS_BLOOM_FIELD_IDX_OFFSET)
    {
        return Ok(());
    }
    Err(unknown("fieldIdx", field_idx))
}

fn validate_tx(query: &TxSubquery) -> Result<(), BuildError> {
    let TxSubquery { field_or_calldata_idx: idx, .. } = *query;
    // calldata and contract data chunks extend to u32::MAX
    if idx as usize >= TX_CALLDATA_IDX_OFFSET || TxField::try_from(idx).is_ok() {
        return Ok(());
    }
    Err(unknown("fieldOrCalldataIdx", idx))
}

fn validate_receipt(query: &ReceiptSubquery) -> Result<(), BuildError> {
    let ReceiptSubquery { field_or_log_idx, topic_or_data_or_address_idx: sub_idx, .. } = *query;
    if field_or_log_idx as usize >= RECEIPT_LOG_IDX_OFFSET {
        let sub = sub_idx as usize;
        let is_topic = sub < RECEIPT_MAX_TOPICS;
        if is_topic || sub == RECEIPT_ADDRESS_IDX || sub >= RECEIPT_DATA_IDX_OFFSET {
            return Ok(());
        }
        return Err(unknown("topicOrDataOrAddressIdx", sub_idx));
    }

    let is_field =
        matches!(ReceiptField::try_from(field_or_log_idx), Ok(f) if f != ReceiptField::Logs);
    if !is_field && !in_chunks(field_or_log_idx, RECEIPT_LOGS_BLOOM_IDX_OFFSET) {
        return Err(unknown("fieldOrLogIdx", field_or_log_idx));
    }
    // only logs carry a topic, data or address index and an event schema
    if sub_idx != 0 {
        return Err(BuildError::invalid_input(
            "topicOrDataOrAddressIdx",
            "must be 0 for a receipt field",
        ));
    }
    if !query.event_schema.is_zero() {
        return Err(BuildError::invalid_input("eventSchema", "must be zero for a receipt field"));
    }
    Ok(())
}

fn validate_mapping(query: &SolidityNestedMappingSubquery) -> Result<(), BuildError> {
    let depth = query.mapping_depth as usize;
    if !(1..=MAX_SOLIDITY_MAPPING_KEYS).contains(&depth) {
        return Err(BuildError::invalid_input(
            "mappingDepth",
            format!("mapping depth {depth} not in [1, {MAX_SOLIDITY_MAPPING_KEYS}]"),
        ));
    }
    if query.keys.len() != depth {
        return Err(BuildError::invalid_input(
            "keys",
            format!("{} keys for mapping depth {depth}", query.keys.len()),
        ));
    }
    Ok(())
}

use axiom_codec::types::native::{
    AccountSubquery, AnySubquery, HeaderSubquery, ReceiptSubquery, SolidityNestedMappingSubquery,
    Subquery, TxSubquery,
};
use ethers_core::types::{H256, U256};
use test_case::test_case;

use super::{init_logger, weth};
use crate::{
    error::BuildError,
    session::{BuildSession, SessionState},
};

fn account(field_idx: u32) -> AnySubquery {
    AccountSubquery { block_number: 1, addr: weth(), field_idx }.into()
}

fn header(field_idx: u32) -> AnySubquery {
    HeaderSubquery { block_number: 1, field_idx }.into()
}

fn tx(field_or_calldata_idx: u32) -> AnySubquery {
    TxSubquery { block_number: 1, tx_idx: 0, field_or_calldata_idx }.into()
}

fn receipt(field_or_log_idx: u32, topic_or_data_or_address_idx: u32, schema: u8) -> AnySubquery {
    ReceiptSubquery {
        block_number: 1,
        tx_idx: 0,
        field_or_log_idx,
        topic_or_data_or_address_idx,
        event_schema: H256::repeat_byte(schema),
    }
    .into()
}

fn mapping(mapping_depth: u8, num_keys: usize) -> AnySubquery {
    SolidityNestedMappingSubquery {
        block_number: 1,
        addr: weth(),
        mapping_slot: U256::from(2),
        mapping_depth,
        keys: (0..num_keys).map(|i| H256::from_low_u64_be(i as u64 + 1)).collect(),
    }
    .into()
}

#[test_case(account(999), "fieldIdx"; "account field")]
#[test_case(header(17), "fieldIdx"; "header field gap")]
#[test_case(header(78), "fieldIdx"; "header past logs bloom")]
#[test_case(tx(12), "fieldOrCalldataIdx"; "tx field gap")]
#[test_case(tx(99), "fieldOrCalldataIdx"; "tx below calldata")]
#[test_case(receipt(4, 0, 0), "fieldOrLogIdx"; "receipt whole logs")]
#[test_case(receipt(78, 0, 0), "fieldOrLogIdx"; "receipt past logs bloom")]
#[test_case(receipt(0, 1, 0), "topicOrDataOrAddressIdx"; "receipt field with topic")]
#[test_case(receipt(0, 0, 0xdd), "eventSchema"; "receipt field with schema")]
#[test_case(receipt(100, 4, 0), "topicOrDataOrAddressIdx"; "log topic 4")]
#[test_case(receipt(100, 99, 0), "topicOrDataOrAddressIdx"; "log below data")]
#[test_case(mapping(0, 0), "mappingDepth"; "mapping depth 0")]
#[test_case(mapping(200, 0), "mappingDepth"; "mapping depth 200")]
#[test_case(mapping(5, 5), "mappingDepth"; "mapping depth 5")]
#[test_case(mapping(1, 2), "keys"; "extra mapping keys")]
#[test_case(mapping(3, 2), "keys"; "missing mapping keys")]
fn test_register_rejects_invalid(subquery: AnySubquery, expected_field: &str) {
    init_logger();
    let mut session = BuildSession::default();
    match session.register(subquery) {
        Err(BuildError::InvalidSubqueryInput { field, .. }) => assert_eq!(field, expected_field),
        res => panic!("expected InvalidSubqueryInput, got {res:?}"),
    }
    assert_eq!(session.state(), SessionState::Aborted);
}

#[test_case(account(3); "account code hash")]
#[test_case(header(52); "header extra data len")]
#[test_case(header(77); "header last logs bloom chunk")]
#[test_case(tx(56); "tx data length")]
#[test_case(tx(100); "tx first calldata")]
#[test_case(tx(u32::MAX); "tx last contract data")]
#[test_case(receipt(3, 0, 0); "receipt logs bloom")]
#[test_case(receipt(70, 0, 0); "receipt logs bloom chunk")]
#[test_case(receipt(53, 0, 0); "receipt tx index")]
#[test_case(receipt(100, 3, 0xdd); "log topic 3")]
#[test_case(receipt(100, 50, 0); "log address")]
#[test_case(receipt(100, 100, 0xdd); "log data")]
#[test_case(mapping(1, 1); "mapping depth 1")]
#[test_case(mapping(4, 4); "mapping depth 4")]
fn test_register_accepts_valid(subquery: AnySubquery) {
    let mut session = BuildSession::default();
    session.register(subquery).unwrap();
    assert_eq!(session.registry().len(), 1);
}

#[test]
fn test_registered_subqueries_have_distinct_encodings() {
    let mut session = BuildSession::default();
    let key = H256::repeat_byte(1);
    let single = SolidityNestedMappingSubquery {
        block_number: 1,
        addr: weth(),
        mapping_slot: U256::from(2),
        mapping_depth: 1,
        keys: vec![key],
    };
    // would encode identically to `single`, since only `mapping_depth` keys are written
    let padded =
        SolidityNestedMappingSubquery { keys: vec![key, H256::repeat_byte(2)], ..single.clone() };
    assert_eq!(Subquery::from(single.clone()), Subquery::from(padded.clone()));

    session.register(single).unwrap();
    assert!(matches!(
        session.register(padded),
        Err(BuildError::InvalidSubqueryInput { field: "keys", .. })
    ));
}

#[test]
fn test_registered_subqueries_decode() {
    let mut session = BuildSession::default();
    for subquery in [account(1), header(70), tx(100_000), receipt(101, 2, 0xdd), mapping(2, 2)] {
        session.register(subquery).unwrap();
    }
    for record in session.registry().records() {
        let subquery = Subquery::from(record.subquery.clone());
        assert_eq!(AnySubquery::try_from(subquery).unwrap(), record.subquery);
    }
}

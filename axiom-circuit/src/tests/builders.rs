use axiom_codec::types::native::{
    AnySubquery, HeaderSubquery, ReceiptSubquery, SolidityNestedMappingSubquery, TxSubquery,
};
use ethers_core::types::{H256, U256};
use test_case::test_case;

use super::{init_logger, weth};
use crate::{
    error::BuildError,
    session::{BuildSession, SessionState},
    subquery::{
        utils::parse_address, AccountField, HeaderField, ReceiptField, SubqueryHandle, TxField,
    },
};

fn subquery_of(session: &BuildSession, handle: SubqueryHandle) -> AnySubquery {
    session.registry().get(handle.index).unwrap().subquery.clone()
}

fn invalid_field(res: Result<SubqueryHandle, BuildError>) -> &'static str {
    match res {
        Err(BuildError::InvalidSubqueryInput { field, .. }) => field,
        res => panic!("expected InvalidSubqueryInput, got {res:?}"),
    }
}

#[test]
fn test_field_indices() {
    assert_eq!(u32::from(HeaderField::WithdrawalsRoot), 16);
    assert_eq!(u32::from(HeaderField::Hash), 50);
    assert_eq!(u32::from(HeaderField::ExtraDataLen), 52);
    assert_eq!(u32::from(AccountField::CodeHash), 3);
    assert_eq!(u32::from(TxField::S), 11);
    assert_eq!(u32::from(TxField::FunctionSelector), 54);
    assert_eq!(u32::from(ReceiptField::TxIndex), 53);
    for field in HeaderField::ALL {
        assert_eq!(HeaderField::try_from(field.field_idx()), Ok(*field));
    }
    for field in TxField::ALL {
        assert_eq!(TxField::try_from(field.field_idx()), Ok(*field));
    }
    assert_eq!(HeaderField::try_from(17), Err(17));
    assert_eq!(ReceiptField::try_from(5), Err(5));
}

#[test]
fn test_header_builder() {
    init_logger();
    let mut session = BuildSession::default();
    let mut header = session.header(17_000_000).unwrap();
    let hash = header.hash().unwrap();
    let bloom = header.logs_bloom_chunk(7).unwrap();
    let timestamp = header.field(HeaderField::Timestamp).unwrap();
    assert_eq!(
        subquery_of(&session, hash),
        HeaderSubquery { block_number: 17_000_000, field_idx: 50 }.into()
    );
    assert_eq!(
        subquery_of(&session, bloom),
        HeaderSubquery { block_number: 17_000_000, field_idx: 77 }.into()
    );
    assert_eq!(timestamp.index, 2);
}

#[test]
fn test_tx_builder() {
    let mut session = BuildSession::default();
    let mut tx = session.tx(17_000_000, 12).unwrap();
    let calldata = tx.calldata(2).unwrap();
    let contract_data = tx.contract_data(0).unwrap();
    let selector = tx.function_selector().unwrap();
    let expected = |field_or_calldata_idx| -> AnySubquery {
        TxSubquery { block_number: 17_000_000, tx_idx: 12, field_or_calldata_idx }.into()
    };
    assert_eq!(subquery_of(&session, calldata), expected(102));
    assert_eq!(subquery_of(&session, contract_data), expected(100_000));
    assert_eq!(subquery_of(&session, selector), expected(54));
}

#[test]
fn test_receipt_builder() {
    let mut session = BuildSession::default();
    let schema = H256::repeat_byte(0xdd);
    let mut receipt = session.receipt(17_000_000, 3).unwrap();
    let status = receipt.status().unwrap();
    let mut log = receipt.log(2).unwrap();
    let topic = log.topic(1, schema).unwrap();
    let address = log.address().unwrap();
    let data = log.data(4, schema).unwrap();
    let expected = |field_or_log_idx, topic_or_data_or_address_idx, event_schema| -> AnySubquery {
        ReceiptSubquery {
            block_number: 17_000_000,
            tx_idx: 3,
            field_or_log_idx,
            topic_or_data_or_address_idx,
            event_schema,
        }
        .into()
    };
    assert_eq!(subquery_of(&session, status), expected(0, 0, H256::zero()));
    assert_eq!(subquery_of(&session, topic), expected(102, 1, schema));
    assert_eq!(subquery_of(&session, address), expected(102, 50, H256::zero()));
    assert_eq!(subquery_of(&session, data), expected(102, 104, schema));
}

#[test]
fn test_mapping_builder() {
    let mut session = BuildSession::default();
    let keys = [H256::repeat_byte(1), H256::repeat_byte(2)];
    let mut mapping = session.mapping(17_000_000, weth(), 5u64).unwrap();
    let nested = mapping.nested(&keys).unwrap();
    let single = mapping.key(keys[0]).unwrap();
    assert_eq!(
        subquery_of(&session, nested),
        SolidityNestedMappingSubquery {
            block_number: 17_000_000,
            addr: weth(),
            mapping_slot: U256::from(5),
            mapping_depth: 2,
            keys: keys.to_vec(),
        }
        .into()
    );
    assert_ne!(nested, single);
}

#[test_case(|s| s.header(1 << 32).map(|_| ()), "blockNumber"; "header block number")]
#[test_case(|s| s.tx(1, 1 << 16).map(|_| ()), "txIdx"; "tx index")]
#[test_case(|s| s.receipt(1 << 40, 0).map(|_| ()), "blockNumber"; "receipt block number")]
fn test_builder_scalar_rejected(
    build: fn(&mut BuildSession) -> Result<(), BuildError>,
    expected_field: &str,
) {
    init_logger();
    let mut session = BuildSession::default();
    match build(&mut session) {
        Err(BuildError::InvalidSubqueryInput { field, .. }) => assert_eq!(field, expected_field),
        res => panic!("expected InvalidSubqueryInput, got {res:?}"),
    }
    assert_eq!(session.state(), SessionState::Aborted);
}

#[test_case(|s| s.header(1)?.logs_bloom_chunk(8), "logsBloomIdx"; "header bloom chunk")]
#[test_case(|s| s.receipt(1, 0)?.logs_bloom(8), "logsBloomIdx"; "receipt bloom chunk")]
#[test_case(|s| s.receipt(1, 0)?.log(0)?.topic(4, H256::zero()), "topicIdx"; "topic")]
#[test_case(|s| s.receipt(1, 0)?.field(ReceiptField::Logs), "fieldIdx"; "whole logs")]
#[test_case(|s| s.tx(1, 0)?.calldata(99_900), "calldataIdx"; "calldata into contract data")]
#[test_case(|s| s.tx(1, 0)?.contract_data(u32::MAX), "contractDataIdx"; "contract data")]
#[test_case(|s| s.mapping(1, weth(), 0u64)?.nested(&[]), "keys"; "empty mapping keys")]
#[test_case(|s| s.mapping(1, weth(), 0u64)?.nested(&[H256::zero(); 5]), "keys"; "deep mapping")]
fn test_builder_index_rejected(
    build: fn(&mut BuildSession) -> Result<SubqueryHandle, BuildError>,
    expected_field: &str,
) {
    let mut session = BuildSession::default();
    assert_eq!(invalid_field(build(&mut session)), expected_field);
    assert_eq!(session.state(), SessionState::Aborted);
    assert!(session.registry().is_empty());
}

#[test]
fn test_builder_index_bounds_accepted() {
    let mut session = BuildSession::default();
    session.tx(1, 0).unwrap().calldata(99_899).unwrap();
    session.receipt(1, 0).unwrap().log(0).unwrap().topic(3, H256::zero()).unwrap();
    session.mapping(1, weth(), 0u64).unwrap().nested(&[H256::zero(); 4]).unwrap();
    session.header(u32::MAX as u64).unwrap().number().unwrap();
    assert_eq!(session.registry().len(), 4);
}

#[test_case("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2", true; "checksummed")]
#[test_case("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", true; "bare lowercase")]
#[test_case("0x1234", false; "too short")]
#[test_case("0xZ02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", false; "not hex")]
fn test_parse_address(addr: &str, valid: bool) {
    match parse_address(addr) {
        Ok(parsed) => {
            assert!(valid);
            assert_eq!(parsed, weth());
        }
        Err(e) => {
            assert!(!valid);
            assert!(matches!(e, BuildError::InvalidSubqueryInput { field: "address", .. }));
        }
    }
}

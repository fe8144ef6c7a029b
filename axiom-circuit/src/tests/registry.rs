use axiom_codec::{
    constants::USER_MAX_SUBQUERIES,
    types::native::{AccountSubquery, AnySubquery, HeaderSubquery, StorageSubquery},
};
use ethers_core::types::{H256, U256};
use test_log::test;

use super::weth;
use crate::{capacity::CapacityKind, error::BuildError, subquery::registry::SubqueryRegistry};

fn header(block_number: u32, field_idx: u32) -> AnySubquery {
    HeaderSubquery { block_number, field_idx }.into()
}

#[test]
fn test_register_dedup() {
    let mut registry = SubqueryRegistry::new(USER_MAX_SUBQUERIES as u32);
    assert_eq!(registry.register(header(17_000_000, 8)).unwrap(), 0);
    assert_eq!(registry.register(header(17_000_000, 8)).unwrap(), 0);
    assert_eq!(registry.register(header(17_000_000, 9)).unwrap(), 1);
    assert_eq!(registry.register(header(17_000_000, 8)).unwrap(), 0);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.index_of(&header(17_000_000, 9)), Some(1));
}

#[test]
fn test_register_cross_type_independent() {
    let mut registry = SubqueryRegistry::new(USER_MAX_SUBQUERIES as u32);
    let subqueries: Vec<AnySubquery> = vec![
        header(17_000_000, 1),
        AccountSubquery { block_number: 17_000_000, addr: weth(), field_idx: 1 }.into(),
        StorageSubquery { block_number: 17_000_000, addr: weth(), slot: U256::from(1) }.into(),
    ];
    for (i, subquery) in subqueries.iter().enumerate() {
        assert_eq!(registry.register(subquery.clone()).unwrap(), i as u32);
    }
    let registered: Vec<_> = registry.records().iter().map(|r| r.subquery.clone()).collect();
    assert_eq!(registered, subqueries);
}

#[test]
fn test_register_capacity() {
    let mut registry = SubqueryRegistry::new(128);
    for i in 0..128 {
        registry.register(header(i, 0)).unwrap();
    }
    // duplicates never count against capacity
    assert_eq!(registry.register(header(5, 0)).unwrap(), 5);
    match registry.register(header(128, 0)) {
        Err(BuildError::CapacityExceeded { kind, limit, attempted }) => {
            assert_eq!(kind, CapacityKind::Subqueries);
            assert_eq!(limit, 128);
            assert_eq!(attempted, 129);
        }
        res => panic!("expected CapacityExceeded, got {res:?}"),
    }
    assert_eq!(registry.len(), 128);
}

#[test]
fn test_record_resolution() {
    let mut registry = SubqueryRegistry::new(4);
    let index = registry.register(header(17_000_000, 8)).unwrap();
    let record = registry.get(index).unwrap();
    assert!(!record.resolved());
    assert!(record.to_subquery_result().is_none());

    registry.set_value(index, H256::from_low_u64_be(17_000_000)).unwrap();
    assert_eq!(registry.unresolved().count(), 0);
    let result = registry.get(index).unwrap().to_subquery_result().unwrap();
    assert_eq!(result.value.as_ref(), H256::from_low_u64_be(17_000_000).as_bytes());
    assert!(matches!(
        registry.set_value(1, H256::zero()),
        Err(BuildError::UnknownHandle { index: 1 })
    ));
}

#[test]
fn test_record_wire_shape() {
    let mut registry = SubqueryRegistry::new(4);
    registry.register(header(17_000_000, 8)).unwrap();
    let json = serde_json::to_value(&registry.records()[0]).unwrap();
    assert_eq!(json["index"], serde_json::json!(0));
    assert_eq!(json["subqueryType"], serde_json::json!(1));
    assert_eq!(json["subquery"]["Header"]["blockNumber"], serde_json::json!(17_000_000));
    assert!(json["value"].is_null());
}

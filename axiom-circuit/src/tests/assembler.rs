use axiom_codec::types::native::{AxiomV2DataQuery, Subquery};
use ethers_core::{types::H256, utils::keccak256};
use test_log::test;

use super::{value_of, weth, KeccakProvider};
use crate::{
    assembler::QueryAssembler,
    capacity::CapacityConfig,
    compiler::{CircuitCompiler, CompilerError},
    config::SessionConfig,
    error::BuildError,
    provider::MockProvider,
    subquery::registry::SubqueryRecord,
};

const DEFAULT_METADATA: &str = "0001000009000100000004010000010080000000000000000000000000000000";
const CAPACITY_200_METADATA: &str =
    "000100000e1001000000040100000100c8000000000000000000000000000000";

fn h256(hex_str: &str) -> H256 {
    H256::from_slice(&hex::decode(hex_str).unwrap())
}

#[test(tokio::test)]
async fn test_default_metadata() {
    let artifact = QueryAssembler::default()
        .build(&MockProvider, |session| {
            session.header(17_000_000)?.number()?;
            Ok(())
        })
        .await
        .unwrap();
    assert_eq!(artifact.metadata, h256(DEFAULT_METADATA));
}

#[test(tokio::test)]
async fn test_capacity_200_metadata() {
    let capacity = CapacityConfig { max_subqueries: 200, max_outputs: 200 };
    let assembler = QueryAssembler::new(SessionConfig::default().with_capacity(capacity));
    let artifact = assembler.build(&MockProvider, |_| Ok(())).await.unwrap();
    assert_eq!(artifact.metadata, h256(CAPACITY_200_METADATA));
    assert!(artifact.subqueries.is_empty());
}

#[test(tokio::test)]
async fn test_build_with_compute() {
    let provider = KeccakProvider::default();
    let artifact = QueryAssembler::default()
        .build_with(
            &provider,
            |session| {
                let balance = session.account(17_000_000, weth())?.balance()?;
                let number = session.header(17_000_000)?.number()?;
                session.add_output(number)?;
                Ok(balance)
            },
            |session, balance| {
                let value = session.value(balance)?;
                session.add_output(H256(keccak256(value)))
            },
        )
        .await
        .unwrap();

    let [balance, number] = [0, 1].map(|i| value_of(&artifact.subqueries[i].subquery));
    assert_eq!(artifact.outputs, vec![number, H256(keccak256(balance))]);
    assert_eq!(provider.calls(), 2);

    let results = artifact.subquery_results();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].value.as_ref(), balance.as_bytes());
    assert_eq!(results[1].subquery, Subquery::from(artifact.subqueries[1].subquery.clone()));

    let data_query = AxiomV2DataQuery {
        source_chain_id: 1,
        subqueries: results.into_iter().map(|result| result.subquery).collect(),
    };
    assert_eq!(artifact.data_query, data_query);
    assert_eq!(artifact.data_query_hash, data_query.keccak());
}

#[test(tokio::test)]
async fn test_circuit_error_fails_build() {
    let err = QueryAssembler::default()
        .build(&MockProvider, |session| {
            session.header(17_000_000)?.logs_bloom_chunk(9)?;
            Ok(())
        })
        .await
        .unwrap_err();
    assert!(matches!(err, BuildError::InvalidSubqueryInput { field: "logsBloomIdx", .. }));
}

#[test(tokio::test)]
async fn test_compute_error_fails_build() {
    let err = QueryAssembler::default()
        .build_with(
            &MockProvider,
            |session| session.header(17_000_000)?.number(),
            |session, _| {
                for i in 0..129 {
                    session.add_output(H256::from_low_u64_be(i))?;
                }
                Ok(())
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BuildError::CapacityExceeded { attempted: 129, .. }));
}

/// Concatenates metadata, subquery count and outputs.
struct ConcatCompiler;

impl CircuitCompiler for ConcatCompiler {
    fn compile(
        &self,
        metadata: H256,
        subqueries: &[SubqueryRecord],
        outputs: &[H256],
    ) -> Result<Vec<u8>, CompilerError> {
        let mut artifact = metadata.as_bytes().to_vec();
        artifact.push(subqueries.len() as u8);
        outputs.iter().for_each(|output| artifact.extend_from_slice(output.as_bytes()));
        Ok(artifact)
    }
}

struct FailingCompiler;

impl CircuitCompiler for FailingCompiler {
    fn compile(&self, _: H256, _: &[SubqueryRecord], _: &[H256]) -> Result<Vec<u8>, CompilerError> {
        Err(CompilerError::Failed("too many advice cells".to_string()))
    }
}

#[test(tokio::test)]
async fn test_compile() {
    let artifact = QueryAssembler::default()
        .build(&MockProvider, |session| {
            let timestamp = session.header(17_000_000)?.timestamp()?;
            session.add_output(timestamp)
        })
        .await
        .unwrap();

    let compiled = artifact.compile(&ConcatCompiler).unwrap();
    assert_eq!(compiled.len(), 65);
    assert_eq!(&compiled[..32], h256(DEFAULT_METADATA).as_bytes());
    assert_eq!(compiled[32], 1);

    let err = artifact.compile(&FailingCompiler).unwrap_err();
    assert!(matches!(err, BuildError::Compiler(CompilerError::Failed(_))));
}

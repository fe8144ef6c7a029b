use std::collections::HashMap;

use axiom_codec::types::native::AnySubquery;
use ethers_core::types::H256;
use thiserror::Error;

#[cfg(feature = "providers")]
pub mod rpc;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("provider error: {0}")]
    Rpc(String),
}

/// Source of the bytes32 value of a subquery at its block.
///
/// Retry policy, if any, belongs to the implementation; a session never retries a fetch.
#[allow(async_fn_in_trait)]
pub trait ChainDataProvider {
    async fn fetch(&self, subquery: &AnySubquery) -> Result<H256, FetchError>;
}

/// Resolves every subquery to zero. Useful for building a circuit without chain access.
#[derive(Clone, Copy, Debug, Default)]
pub struct MockProvider;

impl ChainDataProvider for MockProvider {
    async fn fetch(&self, _subquery: &AnySubquery) -> Result<H256, FetchError> {
        Ok(H256::zero())
    }
}

/// Fixed table of subquery values.
#[derive(Clone, Debug, Default)]
pub struct InMemoryProvider {
    values: HashMap<AnySubquery, H256>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, subquery: impl Into<AnySubquery>, value: H256) -> Option<H256> {
        self.values.insert(subquery.into(), value)
    }

    pub fn with(mut self, subquery: impl Into<AnySubquery>, value: H256) -> Self {
        self.insert(subquery, value);
        self
    }
}

impl FromIterator<(AnySubquery, H256)> for InMemoryProvider {
    fn from_iter<I: IntoIterator<Item = (AnySubquery, H256)>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

impl ChainDataProvider for InMemoryProvider {
    async fn fetch(&self, subquery: &AnySubquery) -> Result<H256, FetchError> {
        self.values
            .get(subquery)
            .copied()
            .ok_or_else(|| FetchError::NotFound(format!("{subquery:?}")))
    }
}

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use axiom_codec::types::native::{AnySubquery, Subquery};
use ethers_core::{
    types::{Address, H256},
    utils::keccak256,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    provider::{ChainDataProvider, FetchError},
    subquery::utils::parse_address,
};

pub mod assembler;
pub mod builders;
pub mod registry;
pub mod validate;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn weth() -> Address {
    parse_address("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2").unwrap()
}

/// Deterministic stand-in for the on-chain value of a subquery.
pub fn value_of(subquery: &AnySubquery) -> H256 {
    H256(keccak256(Subquery::from(subquery.clone()).encode()))
}

/// Answers with [value_of] and counts fetches.
#[derive(Default)]
pub struct KeccakProvider {
    pub calls: AtomicUsize,
}

impl KeccakProvider {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ChainDataProvider for KeccakProvider {
    async fn fetch(&self, subquery: &AnySubquery) -> Result<H256, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(value_of(subquery))
    }
}

/// Answers with [value_of] after a random delay, so fetches complete out of order.
pub struct DelayedProvider {
    rng: Mutex<ChaCha8Rng>,
}

impl DelayedProvider {
    pub fn new(seed: u64) -> Self {
        Self { rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)) }
    }
}

impl ChainDataProvider for DelayedProvider {
    async fn fetch(&self, subquery: &AnySubquery) -> Result<H256, FetchError> {
        let delay = self.rng.lock().unwrap().gen_range(0..20u64);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(value_of(subquery))
    }
}

//! [ChainDataProvider] backed by an Ethereum JSON-RPC node.

use std::env::var;

use anyhow::{bail, Context};
use axiom_codec::types::native::AnySubquery;
use ethers_core::types::H256;
use ethers_providers::{Http, JsonRpcClient, Provider, ProviderError, RetryClient};
use log::debug;

use super::{ChainDataProvider, FetchError};

pub mod account;
pub mod block;
pub mod receipt;
pub mod storage;
pub mod transaction;

/// Reads the node URI from the `PROVIDER_URI` environment variable.
pub fn get_provider_uri() -> anyhow::Result<String> {
    let uri = var("PROVIDER_URI").context("PROVIDER_URI environmental variable not set")?;
    if !(uri.starts_with("http://") || uri.starts_with("https://")) {
        bail!("PROVIDER_URI must be an http(s) URL, got {uri}");
    }
    Ok(uri)
}

pub fn setup_provider() -> anyhow::Result<Provider<RetryClient<Http>>> {
    let provider_uri = get_provider_uri()?;
    Provider::new_client(&provider_uri, 10, 500).context("could not instantiate HTTP Provider")
}

impl From<ProviderError> for FetchError {
    fn from(e: ProviderError) -> Self {
        FetchError::Rpc(e.to_string())
    }
}

pub(crate) fn not_found(what: impl Into<String>) -> FetchError {
    FetchError::NotFound(what.into())
}

/// Unwraps a field that a node may omit, e.g. for pending blocks.
pub(crate) fn required<T>(value: Option<T>, name: &str) -> Result<T, FetchError> {
    value.ok_or_else(|| not_found(format!("{name} missing from node response")))
}

impl<P: JsonRpcClient> ChainDataProvider for Provider<P> {
    async fn fetch(&self, subquery: &AnySubquery) -> Result<H256, FetchError> {
        debug!("Fetching {subquery:?}");
        match subquery.clone() {
            AnySubquery::Null => Ok(H256::zero()),
            AnySubquery::Header(query) => block::get_header_field_value(self, query).await,
            AnySubquery::Account(query) => account::get_account_field_value(self, query).await,
            AnySubquery::Storage(query) => storage::get_storage_field_value(self, query).await,
            AnySubquery::Transaction(query) => {
                transaction::get_tx_field_value(self, query).await
            }
            AnySubquery::Receipt(query) => receipt::get_receipt_field_value(self, query).await,
            AnySubquery::SolidityNestedMapping(query) => {
                storage::get_solidity_nested_mapping_field_value(self, query).await
            }
        }
    }
}

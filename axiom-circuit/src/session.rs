use axiom_codec::types::native::{AnySubquery, AxiomV2DataQuery, Subquery};
use ethers_core::types::{Address, H256, U256};
use futures::{stream, StreamExt};
use itertools::Itertools;
use log::{debug, info, warn};

use crate::{
    assembler::BuildArtifact,
    capacity::CapacityValidator,
    config::SessionConfig,
    error::BuildError,
    provider::ChainDataProvider,
    subquery::{
        registry::SubqueryRegistry,
        utils::{to_block_number, to_tx_idx},
        validate::validate_subquery,
        AccountBuilder, HeaderBuilder, MappingBuilder, ReceiptBuilder, StorageBuilder, TxBuilder,
        SubqueryHandle,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Building,
    Finalized,
    Aborted,
}

/// A logical output of the circuit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Output {
    Value(H256),
    /// The value of a subquery, known once the session is resolved.
    Subquery(SubqueryHandle),
}

impl From<H256> for Output {
    fn from(value: H256) -> Self {
        Output::Value(value)
    }
}

impl From<SubqueryHandle> for Output {
    fn from(handle: SubqueryHandle) -> Self {
        Output::Subquery(handle)
    }
}

/// Owns the registry, the outputs and the circuit shape of exactly one circuit build.
///
/// Registration is synchronous; values are fetched in bulk by [BuildSession::resolve].
/// Any error from a mutating operation aborts the session, after which it only returns
/// [BuildError::SessionAborted]. A session finalizes at most once.
#[derive(Debug)]
pub struct BuildSession {
    config: SessionConfig,
    capacity: CapacityValidator,
    registry: SubqueryRegistry,
    outputs: Vec<Output>,
    state: SessionState,
}

impl Default for BuildSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl BuildSession {
    pub fn new(config: SessionConfig) -> Self {
        if !config.capacity.is_default() {
            warn!(
                "Non-default capacity (max_subqueries={}, max_outputs={}): the query cannot be fulfilled by the default on-chain verifier",
                config.capacity.max_subqueries, config.capacity.max_outputs
            );
        }
        let capacity = CapacityValidator::new(config.capacity);
        let registry = SubqueryRegistry::new(config.capacity.max_subqueries);
        Self { config, capacity, registry, outputs: vec![], state: SessionState::Building }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn registry(&self) -> &SubqueryRegistry {
        &self.registry
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    fn ensure_building(&self) -> Result<(), BuildError> {
        match self.state {
            SessionState::Building => Ok(()),
            SessionState::Finalized => Err(BuildError::AlreadyFinalized),
            SessionState::Aborted => Err(BuildError::SessionAborted),
        }
    }

    /// Discards everything registered so far. No artifact can be produced afterwards.
    pub fn abort(&mut self) {
        if self.state == SessionState::Building {
            self.state = SessionState::Aborted;
            self.registry = SubqueryRegistry::new(self.config.capacity.max_subqueries);
            self.outputs.clear();
        }
    }

    /// Runs a mutating operation, aborting the session if it fails.
    pub(crate) fn guard<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, BuildError>,
    ) -> Result<T, BuildError> {
        self.ensure_building()?;
        let res = op(self);
        if let Err(e) = &res {
            warn!("Aborting build session: {e}");
            self.abort();
        }
        res
    }

    pub(crate) fn register_key(
        &mut self,
        subquery: AnySubquery,
    ) -> Result<SubqueryHandle, BuildError> {
        validate_subquery(&subquery)?;
        let subquery_type = subquery.subquery_type();
        let index = self.registry.register(subquery)?;
        Ok(SubqueryHandle { index, subquery_type })
    }

    /// Registers an already constructed subquery.
    pub fn register(
        &mut self,
        subquery: impl Into<AnySubquery>,
    ) -> Result<SubqueryHandle, BuildError> {
        let subquery = subquery.into();
        self.guard(|session| session.register_key(subquery))
    }

    pub fn header(&mut self, block_number: u64) -> Result<HeaderBuilder<'_>, BuildError> {
        let block_number = self.guard(|_| to_block_number(block_number))?;
        Ok(HeaderBuilder::new(self, block_number))
    }

    pub fn account(
        &mut self,
        block_number: u64,
        addr: Address,
    ) -> Result<AccountBuilder<'_>, BuildError> {
        let block_number = self.guard(|_| to_block_number(block_number))?;
        Ok(AccountBuilder::new(self, block_number, addr))
    }

    pub fn storage(
        &mut self,
        block_number: u64,
        addr: Address,
    ) -> Result<StorageBuilder<'_>, BuildError> {
        let block_number = self.guard(|_| to_block_number(block_number))?;
        Ok(StorageBuilder::new(self, block_number, addr))
    }

    pub fn tx(&mut self, block_number: u64, tx_idx: u64) -> Result<TxBuilder<'_>, BuildError> {
        let (block_number, tx_idx) =
            self.guard(|_| Ok((to_block_number(block_number)?, to_tx_idx(tx_idx)?)))?;
        Ok(TxBuilder::new(self, block_number, tx_idx))
    }

    pub fn receipt(
        &mut self,
        block_number: u64,
        tx_idx: u64,
    ) -> Result<ReceiptBuilder<'_>, BuildError> {
        let (block_number, tx_idx) =
            self.guard(|_| Ok((to_block_number(block_number)?, to_tx_idx(tx_idx)?)))?;
        Ok(ReceiptBuilder::new(self, block_number, tx_idx))
    }

    pub fn mapping(
        &mut self,
        block_number: u64,
        addr: Address,
        mapping_slot: impl Into<U256>,
    ) -> Result<MappingBuilder<'_>, BuildError> {
        let block_number = self.guard(|_| to_block_number(block_number))?;
        Ok(MappingBuilder::new(self, block_number, addr, mapping_slot.into()))
    }

    pub fn add_output(&mut self, output: impl Into<Output>) -> Result<(), BuildError> {
        let output = output.into();
        self.guard(|session| {
            if let Output::Subquery(handle) = output {
                session.check_handle(handle)?;
            }
            session.capacity.check_outputs(session.outputs.len() + 1)?;
            session.outputs.push(output);
            Ok(())
        })
    }

    fn check_handle(&self, handle: SubqueryHandle) -> Result<(), BuildError> {
        match self.registry.get(handle.index) {
            Some(record) if record.subquery_type == handle.subquery_type => Ok(()),
            _ => Err(BuildError::UnknownHandle { index: handle.index }),
        }
    }

    /// Value of a resolved subquery.
    pub fn value(&self, handle: SubqueryHandle) -> Result<H256, BuildError> {
        if self.state == SessionState::Aborted {
            return Err(BuildError::SessionAborted);
        }
        self.check_handle(handle)?;
        self.registry
            .get(handle.index)
            .and_then(|record| record.value)
            .ok_or(BuildError::Unresolved { index: handle.index })
    }

    /// Fetches every unresolved subquery, each distinct subquery exactly once, with at most
    /// `fetch_concurrency` requests in flight. Values are stored by index so completion order
    /// has no effect on the subquery list. On the first failure (by index) the session aborts;
    /// nothing is retried.
    pub async fn resolve<P: ChainDataProvider>(&mut self, provider: &P) -> Result<(), BuildError> {
        self.ensure_building()?;
        let pending = self
            .registry
            .unresolved()
            .map(|record| (record.index, record.subquery.clone()))
            .collect_vec();
        if pending.is_empty() {
            return Ok(());
        }
        debug!("Resolving {} subqueries", pending.len());

        let concurrency = self.config.fetch_concurrency.max(1);
        let fetched: Vec<_> = stream::iter(pending)
            .map(|(index, subquery)| async move {
                let res = provider.fetch(&subquery).await;
                (index, subquery, res)
            })
            .buffered(concurrency)
            .collect()
            .await;

        self.guard(|session| {
            let mut values = Vec::with_capacity(fetched.len());
            for (index, subquery, res) in fetched {
                match res {
                    Ok(value) => values.push((index, value)),
                    Err(source) => {
                        return Err(BuildError::ResolutionFailure { index, subquery, source })
                    }
                }
            }
            for (index, value) in values {
                session.registry.set_value(index, value)?;
            }
            debug!("Resolved {} subqueries", session.registry.len());
            Ok(())
        })
    }

    /// Emits the build artifact. Requires every subquery to be resolved. Can only succeed once.
    pub fn finalize(&mut self) -> Result<BuildArtifact, BuildError> {
        let artifact = self.guard(|session| session.assemble())?;
        self.state = SessionState::Finalized;
        info!(
            "Finalized circuit with {} subqueries and {} outputs, metadata {:?}",
            artifact.subqueries.len(),
            artifact.outputs.len(),
            artifact.metadata
        );
        Ok(artifact)
    }

    fn assemble(&self) -> Result<BuildArtifact, BuildError> {
        self.capacity.check_subqueries(self.registry.len())?;
        self.capacity.check_outputs(self.outputs.len())?;
        if let Some(record) = self.registry.unresolved().next() {
            return Err(BuildError::Unresolved { index: record.index });
        }
        let outputs = self
            .outputs
            .iter()
            .map(|output| match *output {
                Output::Value(value) => Ok(value),
                Output::Subquery(handle) => self.value(handle),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let metadata = self.config.circuit.metadata(&self.config.capacity)?.encode()?;
        let subqueries = self.registry.records().to_vec();
        let data_query = AxiomV2DataQuery {
            source_chain_id: self.config.source_chain_id,
            subqueries: subqueries
                .iter()
                .map(|record| Subquery::from(record.subquery.clone()))
                .collect(),
        };
        let data_query_hash = data_query.keccak();
        Ok(BuildArtifact { metadata, subqueries, outputs, data_query, data_query_hash })
    }
}

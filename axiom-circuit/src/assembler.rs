use axiom_codec::types::native::{AxiomV2DataQuery, SubqueryResult};
use ethers_core::types::H256;
use serde::{Deserialize, Serialize};

use crate::{
    compiler::CircuitCompiler,
    config::SessionConfig,
    error::BuildError,
    provider::ChainDataProvider,
    session::BuildSession,
    subquery::registry::SubqueryRecord,
};

/// Everything a finalized session produces for submission.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BuildArtifact {
    /// Encoded [axiom_codec::types::native::AxiomV2CircuitMetadata].
    pub metadata: H256,
    /// Deduplicated subqueries in first-registration order, all resolved.
    pub subqueries: Vec<SubqueryRecord>,
    pub outputs: Vec<H256>,
    pub data_query: AxiomV2DataQuery,
    pub data_query_hash: H256,
}

impl BuildArtifact {
    pub fn subquery_results(&self) -> Vec<SubqueryResult> {
        self.subqueries.iter().filter_map(SubqueryRecord::to_subquery_result).collect()
    }

    pub fn compile<C: CircuitCompiler>(&self, compiler: &C) -> Result<Vec<u8>, BuildError> {
        Ok(compiler.compile(self.metadata, &self.subqueries, &self.outputs)?)
    }
}

/// Drives one [BuildSession] per build: authoring, resolution, optional compute, finalize.
#[derive(Clone, Debug, Default)]
pub struct QueryAssembler {
    pub config: SessionConfig,
}

impl QueryAssembler {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    pub async fn build<P, F>(&self, provider: &P, circuit: F) -> Result<BuildArtifact, BuildError>
    where
        P: ChainDataProvider,
        F: FnOnce(&mut BuildSession) -> Result<(), BuildError>,
    {
        self.build_with(provider, circuit, |_, _| Ok(())).await
    }

    /// `circuit` declares subqueries and outputs and may hand state (e.g. handles) to
    /// `compute`, which runs after every subquery is resolved and may read values and add
    /// further outputs.
    pub async fn build_with<P, F, C, T>(
        &self,
        provider: &P,
        circuit: F,
        compute: C,
    ) -> Result<BuildArtifact, BuildError>
    where
        P: ChainDataProvider,
        F: FnOnce(&mut BuildSession) -> Result<T, BuildError>,
        C: FnOnce(&mut BuildSession, T) -> Result<(), BuildError>,
    {
        let mut session = BuildSession::new(self.config.clone());
        let state = session.guard(circuit)?;
        session.resolve(provider).await?;
        session.guard(|session| compute(session, state))?;
        session.finalize()
    }
}

//! Boundary to the external circuit compiler.

use ethers_core::types::H256;
use thiserror::Error;

use crate::subquery::registry::SubqueryRecord;

#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("circuit compilation failed: {0}")]
    Failed(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Produces the compiled circuit artifact from a finalized build.
pub trait CircuitCompiler {
    fn compile(
        &self,
        metadata: H256,
        subqueries: &[SubqueryRecord],
        outputs: &[H256],
    ) -> Result<Vec<u8>, CompilerError>;
}

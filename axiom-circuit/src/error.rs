use axiom_codec::{types::native::AnySubquery, MetadataError};
use thiserror::Error;

use crate::{capacity::CapacityKind, compiler::CompilerError, provider::FetchError};

/// Every failure of a build session. Any of these returned from a mutating
/// [crate::session::BuildSession] operation aborts the session.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("invalid subquery input `{field}`: {reason}")]
    InvalidSubqueryInput { field: &'static str, reason: String },

    #[error("{kind} capacity exceeded: limit {limit}, attempted {attempted}")]
    CapacityExceeded { kind: CapacityKind, limit: u32, attempted: usize },

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("build session already finalized")]
    AlreadyFinalized,

    #[error("build session was aborted")]
    SessionAborted,

    #[error("subquery {index} has not been resolved")]
    Unresolved { index: u32 },

    #[error("no subquery with index {index} in this session")]
    UnknownHandle { index: u32 },

    #[error("failed to resolve subquery {index} ({subquery:?})")]
    ResolutionFailure {
        index: u32,
        subquery: AnySubquery,
        #[source]
        source: FetchError,
    },

    #[error(transparent)]
    Compiler(#[from] CompilerError),
}

impl BuildError {
    pub(crate) fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSubqueryInput { field, reason: reason.into() }
    }
}

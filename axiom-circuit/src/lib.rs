pub use axiom_codec;

/// Turns a finalized session into the metadata word and ordered subquery list
pub mod assembler;
/// Subquery and output count limits
pub mod capacity;
pub mod compiler;
/// Session configuration, loadable from JSON
pub mod config;
pub mod error;
/// Sources of subquery values
pub mod provider;
/// A single circuit build: registration, resolution, finalize
pub mod session;
/// Subquery handles, the per-session registry and the per-type builders
pub mod subquery;

#[cfg(test)]
pub mod tests;

pub use axiom_codec::types::native::AnySubquery;
pub use error::BuildError;

/// Structural identity of a subquery within a session.
pub type SubqueryKey = AnySubquery;

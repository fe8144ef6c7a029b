use std::fmt;

use axiom_codec::constants::{USER_MAX_OUTPUTS, USER_MAX_SUBQUERIES};
use serde::{Deserialize, Serialize};

use crate::error::BuildError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapacityKind {
    Subqueries,
    Outputs,
}

impl fmt::Display for CapacityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityKind::Subqueries => write!(f, "subquery"),
            CapacityKind::Outputs => write!(f, "output"),
        }
    }
}

/// Limits on the number of distinct subqueries and logical outputs of one circuit.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CapacityConfig {
    pub max_subqueries: u32,
    pub max_outputs: u32,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self { max_subqueries: USER_MAX_SUBQUERIES as u32, max_outputs: USER_MAX_OUTPUTS as u32 }
    }
}

impl CapacityConfig {
    /// The default on-chain verifier only accepts circuits with the default capacity.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

fn check(kind: CapacityKind, count: usize, max: u32) -> Result<(), BuildError> {
    if count > max as usize {
        return Err(BuildError::CapacityExceeded { kind, limit: max, attempted: count });
    }
    Ok(())
}

/// `count == max` is allowed.
pub fn check_subqueries(count: usize, max: u32) -> Result<(), BuildError> {
    check(CapacityKind::Subqueries, count, max)
}

pub fn check_outputs(count: usize, max: u32) -> Result<(), BuildError> {
    check(CapacityKind::Outputs, count, max)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CapacityValidator {
    pub capacity: CapacityConfig,
}

impl CapacityValidator {
    pub fn new(capacity: CapacityConfig) -> Self {
        Self { capacity }
    }

    pub fn check_subqueries(&self, count: usize) -> Result<(), BuildError> {
        check_subqueries(count, self.capacity.max_subqueries)
    }

    pub fn check_outputs(&self, count: usize) -> Result<(), BuildError> {
        check_outputs(count, self.capacity.max_outputs)
    }
}

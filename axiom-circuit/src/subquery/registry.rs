use std::collections::HashMap;

use axiom_codec::types::native::{AnySubquery, Subquery, SubqueryResult, SubqueryType};
use ethers_core::types::H256;
use log::debug;
use serde::{Deserialize, Serialize};

use super::SubqueryHandle;
use crate::{capacity::check_subqueries, error::BuildError};

/// A registered subquery and, once resolved, its value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubqueryRecord {
    pub index: u32,
    pub subquery_type: SubqueryType,
    pub subquery: AnySubquery,
    pub value: Option<H256>,
}

impl SubqueryRecord {
    pub fn resolved(&self) -> bool {
        self.value.is_some()
    }

    pub fn handle(&self) -> SubqueryHandle {
        SubqueryHandle { index: self.index, subquery_type: self.subquery_type }
    }

    /// The `(subquery, value)` pair submitted on-chain. `None` until resolved.
    pub fn to_subquery_result(&self) -> Option<SubqueryResult> {
        let value = self.value?;
        Some(SubqueryResult {
            subquery: Subquery::from(self.subquery.clone()),
            value: value.as_bytes().to_vec().into(),
        })
    }
}

/// Deduplicating, insertion ordered set of the subqueries of one session.
///
/// Indices are assigned in first-registration order and never change.
#[derive(Clone, Debug)]
pub struct SubqueryRegistry {
    indices: HashMap<AnySubquery, u32>,
    records: Vec<SubqueryRecord>,
    max_subqueries: u32,
}

impl SubqueryRegistry {
    pub fn new(max_subqueries: u32) -> Self {
        Self { indices: HashMap::new(), records: Vec::new(), max_subqueries }
    }

    /// Returns the index of `subquery`, appending a new record if it has not been seen.
    /// A duplicate never counts against capacity.
    pub fn register(&mut self, subquery: AnySubquery) -> Result<u32, BuildError> {
        if let Some(&index) = self.indices.get(&subquery) {
            return Ok(index);
        }
        check_subqueries(self.records.len() + 1, self.max_subqueries)?;
        let index = self.records.len() as u32;
        debug!("registered subquery {index}: {subquery:?}");
        self.indices.insert(subquery.clone(), index);
        self.records.push(SubqueryRecord {
            index,
            subquery_type: subquery.subquery_type(),
            subquery,
            value: None,
        });
        Ok(index)
    }

    pub fn index_of(&self, subquery: &AnySubquery) -> Option<u32> {
        self.indices.get(subquery).copied()
    }

    pub fn get(&self, index: u32) -> Option<&SubqueryRecord> {
        self.records.get(index as usize)
    }

    pub(crate) fn set_value(&mut self, index: u32, value: H256) -> Result<(), BuildError> {
        let record =
            self.records.get_mut(index as usize).ok_or(BuildError::UnknownHandle { index })?;
        record.value = Some(value);
        Ok(())
    }

    /// Records without a value, in index order.
    pub fn unresolved(&self) -> impl Iterator<Item = &SubqueryRecord> {
        self.records.iter().filter(|record| !record.resolved())
    }

    pub fn records(&self) -> &[SubqueryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_subqueries(&self) -> u32 {
        self.max_subqueries
    }
}

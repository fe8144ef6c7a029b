use std::{fs::File, path::Path};

use axiom_codec::{
    constants::{
        SUBQUERY_RESULT_LEN, USER_ADVICE_COLS, USER_FIXED_COLS, USER_LOOKUP_ADVICE_COLS,
        USER_RESULT_FIELD_ELEMENTS,
    },
    types::native::AxiomV2CircuitMetadata,
    MetadataError,
};
use serde::{Deserialize, Serialize};

use crate::capacity::CapacityConfig;

/// Column layout of the user circuit. Instance counts and `max_outputs` are not part of
/// the layout; they follow from the [CapacityConfig].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CircuitParams {
    pub version: u8,
    pub num_advice_per_phase: Vec<u16>,
    pub num_lookup_advice_per_phase: Vec<u8>,
    pub num_rlc_columns: u16,
    pub num_fixed: u8,
    pub num_challenge: Vec<u8>,
    pub is_aggregation: bool,
}

impl Default for CircuitParams {
    fn default() -> Self {
        Self {
            version: 0,
            num_advice_per_phase: vec![USER_ADVICE_COLS as u16],
            num_lookup_advice_per_phase: vec![USER_LOOKUP_ADVICE_COLS as u8],
            num_rlc_columns: 0,
            num_fixed: USER_FIXED_COLS as u8,
            num_challenge: vec![0],
            is_aggregation: false,
        }
    }
}

impl CircuitParams {
    /// Circuit metadata for these params at the given capacity. The single instance column
    /// holds every output as hi-lo followed by every subquery result.
    pub fn metadata(
        &self,
        capacity: &CapacityConfig,
    ) -> Result<AxiomV2CircuitMetadata, MetadataError> {
        let num_instance = capacity.max_outputs as u64 * USER_RESULT_FIELD_ELEMENTS as u64
            + capacity.max_subqueries as u64 * SUBQUERY_RESULT_LEN as u64;
        let num_instance: u32 = num_instance.try_into().map_err(|_| {
            MetadataError::UnsupportedShape(format!("{num_instance} instances exceeds u32"))
        })?;
        let max_outputs: u16 = capacity.max_outputs.try_into().map_err(|_| {
            MetadataError::UnsupportedShape(format!(
                "max_outputs {} exceeds u16",
                capacity.max_outputs
            ))
        })?;
        Ok(AxiomV2CircuitMetadata {
            version: self.version,
            num_advice_per_phase: self.num_advice_per_phase.clone(),
            num_lookup_advice_per_phase: self.num_lookup_advice_per_phase.clone(),
            num_rlc_columns: self.num_rlc_columns,
            num_fixed: self.num_fixed,
            num_instance: vec![num_instance],
            num_challenge: self.num_challenge.clone(),
            max_outputs,
            is_aggregation: self.is_aggregation,
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionConfig {
    pub source_chain_id: u64,
    pub capacity: CapacityConfig,
    pub circuit: CircuitParams,
    /// Maximum number of provider fetches in flight during resolution.
    pub fetch_concurrency: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            source_chain_id: 1,
            capacity: CapacityConfig::default(),
            circuit: CircuitParams::default(),
            fetch_concurrency: 10,
        }
    }
}

impl SessionConfig {
    pub fn with_capacity(mut self, capacity: CapacityConfig) -> Self {
        self.capacity = capacity;
        self
    }

    /// Loads from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let config = serde_json::from_reader(File::open(&path)?)?;
        Ok(config)
    }

    /// Writes to a JSON file
    pub fn write<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(File::create(path)?, self)?;
        Ok(())
    }
}
